//! Per-profile environment records.

use heapless::FnvIndexMap;

use crate::profiles::{MAX_PROFILES, ProfileId};

use super::connections::INVALID_CONHDL;

/// State of one profile client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileEnv {
    pub enabled: bool,
    pub conhdl: u16,
    /// Last notification configuration forwarded to the stack.
    pub ntf_cfg: Option<u16>,
}

impl Default for ProfileEnv {
    fn default() -> Self {
        Self {
            enabled: false,
            conhdl: INVALID_CONHDL,
            ntf_cfg: None,
        }
    }
}

/// `ProfileId -> ProfileEnv`.
#[derive(Debug, Default)]
pub struct ProfileEnvTable {
    records: FnvIndexMap<ProfileId, ProfileEnv, MAX_PROFILES>,
}

impl ProfileEnvTable {
    pub fn new() -> Self {
        Self {
            records: FnvIndexMap::new(),
        }
    }

    pub fn get(&self, id: ProfileId) -> Option<&ProfileEnv> {
        self.records.get(&id)
    }

    pub fn is_enabled_on(&self, id: ProfileId, conhdl: u16) -> bool {
        self.get(id)
            .is_some_and(|env| env.enabled && env.conhdl == conhdl)
    }

    /// Mark `id` enabled on `conhdl` after a successful enable confirmation.
    pub fn set_enabled(&mut self, id: ProfileId, conhdl: u16) {
        // One record per profile id and MAX_PROFILES >= ProfileId::ALL.len().
        let _ = self.records.insert(
            id,
            ProfileEnv {
                enabled: true,
                conhdl,
                ntf_cfg: None,
            },
        );
    }

    /// Drop the record for `id` only if it is bound to `conhdl`.
    pub fn disable_on(&mut self, id: ProfileId, conhdl: u16) -> bool {
        if self.get(id).is_some_and(|env| env.conhdl == conhdl) {
            self.records.remove(&id);
            true
        } else {
            false
        }
    }

    pub fn set_ntf_cfg(&mut self, id: ProfileId, cfg: u16) {
        if let Some(env) = self.records.get_mut(&id) {
            env.ntf_cfg = Some(cfg);
        }
    }

    /// Drop every record bound to `conhdl`. Returns how many were cleared.
    pub fn clear_conhdl(&mut self, conhdl: u16) -> usize {
        let bound: heapless::Vec<ProfileId, MAX_PROFILES> = self
            .records
            .iter()
            .filter(|(_, env)| env.conhdl == conhdl)
            .map(|(id, _)| *id)
            .collect();
        for id in &bound {
            self.records.remove(id);
        }
        bound.len()
    }

    pub fn enabled_count(&self) -> usize {
        self.records.values().filter(|env| env.enabled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_is_per_connection() {
        let mut t = ProfileEnvTable::new();
        assert!(!t.is_enabled_on(ProfileId::Batt, 0));
        t.set_enabled(ProfileId::Batt, 0);
        assert!(t.is_enabled_on(ProfileId::Batt, 0));
        assert!(!t.is_enabled_on(ProfileId::Batt, 1));
        assert!(!t.is_enabled_on(ProfileId::Hrp, 0));
    }

    #[test]
    fn ntf_cfg_is_cached_only_for_known_profiles() {
        let mut t = ProfileEnvTable::new();
        t.set_ntf_cfg(ProfileId::Hrp, 1);
        assert!(t.get(ProfileId::Hrp).is_none());
        t.set_enabled(ProfileId::Hrp, 2);
        t.set_ntf_cfg(ProfileId::Hrp, 1);
        assert_eq!(t.get(ProfileId::Hrp).and_then(|e| e.ntf_cfg), Some(1));
    }

    #[test]
    fn disconnect_clears_bound_records() {
        let mut t = ProfileEnvTable::new();
        t.set_enabled(ProfileId::Batt, 0);
        t.set_enabled(ProfileId::Dis, 0);
        t.set_enabled(ProfileId::Hrp, 1);
        assert_eq!(t.clear_conhdl(0), 2);
        assert_eq!(t.enabled_count(), 1);
        assert!(t.is_enabled_on(ProfileId::Hrp, 1));
    }

    #[test]
    fn disable_on_other_connection_keeps_record() {
        let mut t = ProfileEnvTable::new();
        t.set_enabled(ProfileId::Batt, 0);
        assert!(!t.disable_on(ProfileId::Batt, 1));
        assert!(t.is_enabled_on(ProfileId::Batt, 0));
        assert!(t.disable_on(ProfileId::Batt, 0));
        assert!(t.get(ProfileId::Batt).is_none());
    }

    #[test]
    fn every_profile_fits() {
        let mut t = ProfileEnvTable::new();
        for id in ProfileId::ALL {
            t.set_enabled(id, 0);
        }
        assert_eq!(t.enabled_count(), ProfileId::ALL.len());
    }
}
