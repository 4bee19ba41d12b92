//! EACI message dispatcher.
//!
//! Routes host messages to the GAP adapter or the request profile, and
//! turns stack events back into host PDUs.
//!
//! | Inbound type | Handling                                          |
//! |--------------|---------------------------------------------------|
//! | `CMD`        | GAP adapter, peer resolved to a conhdl            |
//! | `DATA_REQ`   | range check, then the request profile's decoder   |
//! | other        | device-to-host types; logged and dropped          |
//!
//! Requests that cannot be honoured (unresolved peer, profile not
//! enabled, malformed block) are dropped without a reply. Only an
//! out-of-range `DATA_REQ` id is answered, with `DATA_ERROR`.

use core::fmt;

use log::{debug, warn};

use crate::eaci::message::{EaciMessage, ErrorCode, MsgType};
use crate::eaci::wire::WireError;
use crate::error::{Error, Result};
use crate::gap;
use crate::profiles::{ProfileEntry, ProfileId, ProfileRegistry};

use super::connections::{ConnectionTable, INVALID_CONHDL};
use super::env::ProfileEnvTable;
use super::events::StackEvent;
use super::ports::StackPort;

/// Why a message was not forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The peer address has no live connection.
    Unresolved,
    /// A non-enable request for a profile not enabled on that link.
    NotEnabled,
    /// The parameter block did not match the layout.
    Malformed(WireError),
    /// `CMD` id with no GAP handler.
    UnknownCommand(u8),
    /// A type the device sends but never receives.
    WrongDirection(MsgType),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "peer not connected"),
            Self::NotEnabled => write!(f, "profile not enabled"),
            Self::Malformed(e) => write!(f, "malformed: {e}"),
            Self::UnknownCommand(id) => write!(f, "unknown CMD id {id}"),
            Self::WrongDirection(ty) => write!(f, "{ty:?} is device-to-host"),
        }
    }
}

/// Result of dispatching one host message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Handed to the stack.
    Forwarded,
    /// Discarded without a reply.
    Dropped(DropReason),
    /// Refused; the caller answers with a `DATA_ERROR` carrying the code.
    Rejected(ErrorCode),
}

/// Message router, built once from the registered profile set.
pub struct Dispatcher {
    registry: ProfileRegistry,
    request: &'static ProfileEntry,
}

impl Dispatcher {
    /// `request_profile` must be part of `registry`.
    pub fn new(registry: ProfileRegistry, request_profile: ProfileId) -> Result<Self> {
        let request = registry
            .get(request_profile)
            .ok_or(Error::ProfileNotRegistered)?;
        Ok(Self { registry, request })
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Profile that receives `DATA_REQ` messages.
    pub fn request_profile(&self) -> ProfileId {
        self.request.id
    }

    pub fn select_request_profile(&mut self, id: ProfileId) -> Result<()> {
        self.request = self.registry.get(id).ok_or(Error::ProfileNotRegistered)?;
        Ok(())
    }

    /// Route one host message.
    pub fn dispatch(
        &self,
        msg: &EaciMessage,
        conns: &ConnectionTable,
        envs: &mut ProfileEnvTable,
        stack: &mut impl StackPort,
    ) -> Outcome {
        let outcome = match msg.msg_type {
            MsgType::Cmd => Self::dispatch_cmd(msg, conns, stack),
            MsgType::DataReq => self.dispatch_data_req(msg, conns, envs, stack),
            other => Outcome::Dropped(DropReason::WrongDirection(other)),
        };
        match outcome {
            Outcome::Forwarded => {}
            Outcome::Dropped(reason) => {
                warn!(
                    "EACI {:?} id={} dropped: {}",
                    msg.msg_type, msg.msg_id, reason
                );
            }
            Outcome::Rejected(code) => {
                warn!(
                    "EACI {:?} id={} rejected: {}",
                    msg.msg_type, msg.msg_id, code
                );
            }
        }
        outcome
    }

    fn dispatch_cmd(
        msg: &EaciMessage,
        conns: &ConnectionTable,
        stack: &mut impl StackPort,
    ) -> Outcome {
        let command = match gap::decode_cmd(msg.msg_id, &msg.param) {
            Ok(c) => c,
            Err(WireError::UnknownId(id)) => {
                return Outcome::Dropped(DropReason::UnknownCommand(id));
            }
            Err(e) => return Outcome::Dropped(DropReason::Malformed(e)),
        };
        let Some(request) = command.resolve(|addr| conns.resolve(addr)) else {
            return Outcome::Dropped(DropReason::Unresolved);
        };
        debug!("GAP -> stack: {:?}", request);
        stack.gap_request(&request);
        Outcome::Forwarded
    }

    fn dispatch_data_req(
        &self,
        msg: &EaciMessage,
        conns: &ConnectionTable,
        envs: &mut ProfileEnvTable,
        stack: &mut impl StackPort,
    ) -> Outcome {
        let entry = self.request;
        if !entry.in_range(msg.msg_id) {
            return Outcome::Rejected(ErrorCode::MsgOutOfRange);
        }
        let call = match entry.decode_request(msg.msg_id, &msg.param) {
            Ok(call) => call,
            Err(e) => return Outcome::Dropped(DropReason::Malformed(e)),
        };
        let conhdl = conns.resolve(&call.addr);
        if conhdl == INVALID_CONHDL {
            return Outcome::Dropped(DropReason::Unresolved);
        }
        if !call.request.is_enable() && !envs.is_enabled_on(entry.id, conhdl) {
            return Outcome::Dropped(DropReason::NotEnabled);
        }
        if let Some(cfg) = call.request.ntf_cfg() {
            envs.set_ntf_cfg(entry.id, cfg);
        }
        debug!("{:?} -> stack (conhdl {}): {:?}", entry.id, conhdl, call.request);
        stack.profile_request(conhdl, &call.request);
        Outcome::Forwarded
    }

    /// Encode a stack event as a host PDU. `None` if the event belongs to
    /// a profile that is not registered or does not fit its layout.
    pub fn encode_event(&self, event: &StackEvent) -> Option<EaciMessage> {
        let encoded = match event {
            StackEvent::Gap(gap_event) => gap::encode_evt(gap_event),
            StackEvent::Profile { event, .. } => {
                let Some(entry) = self.registry.get(event.profile()) else {
                    warn!("event for unregistered profile {:?}", event.profile());
                    return None;
                };
                entry.encode_event(event)?
            }
        };
        encoded
            .inspect_err(|e| warn!("event not encodable: {e}"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eaci::wire::BdAddr;
    use crate::gap::GapRequest;
    use crate::profiles::ProfileRequest;
    use crate::profiles::batt::{self, BattRequest};

    const PEER: [u8; 6] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];

    #[derive(Default)]
    struct Calls {
        gap: std::vec::Vec<GapRequest>,
        profile: std::vec::Vec<(u16, ProfileRequest)>,
    }

    impl StackPort for Calls {
        fn gap_request(&mut self, request: &GapRequest) {
            self.gap.push(request.clone());
        }

        fn profile_request(&mut self, conhdl: u16, request: &ProfileRequest) {
            self.profile.push((conhdl, request.clone()));
        }
    }

    fn dispatcher() -> Dispatcher {
        let reg = ProfileRegistry::with_profiles(&[ProfileId::Batt, ProfileId::Hrp]);
        Dispatcher::new(reg, ProfileId::Batt).unwrap()
    }

    fn connected() -> ConnectionTable {
        let mut t = ConnectionTable::default();
        t.insert(0, BdAddr::new(PEER));
        t
    }

    fn data_req(id: u8, param: &[u8]) -> EaciMessage {
        EaciMessage::new(MsgType::DataReq, id, param).unwrap()
    }

    #[test]
    fn request_profile_must_be_registered() {
        let reg = ProfileRegistry::with_profiles(&[ProfileId::Batt]);
        assert!(matches!(
            Dispatcher::new(reg, ProfileId::Gl),
            Err(Error::ProfileNotRegistered)
        ));
    }

    #[test]
    fn enable_is_forwarded_on_resolved_handle() {
        let d = dispatcher();
        let mut envs = ProfileEnvTable::new();
        let mut stack = Calls::default();
        let out = d.dispatch(&data_req(batt::req::ENABLE, &PEER), &connected(), &mut envs, &mut stack);
        assert_eq!(out, Outcome::Forwarded);
        assert_eq!(
            stack.profile,
            [(0, ProfileRequest::Batt(BattRequest::Enable))]
        );
    }

    #[test]
    fn out_of_range_is_rejected_before_decode() {
        let d = dispatcher();
        let mut stack = Calls::default();
        for id in [0, batt::req::MAX, 0xFF] {
            let out = d.dispatch(
                &data_req(id, &PEER),
                &connected(),
                &mut ProfileEnvTable::new(),
                &mut stack,
            );
            assert_eq!(out, Outcome::Rejected(ErrorCode::MsgOutOfRange));
        }
        assert!(stack.profile.is_empty());
    }

    #[test]
    fn read_before_enable_is_dropped() {
        let d = dispatcher();
        let mut stack = Calls::default();
        let mut param = vec![batt::char_code::BATT_LEVEL];
        param.extend_from_slice(&PEER);
        let out = d.dispatch(
            &data_req(batt::req::RD_CHAR, &param),
            &connected(),
            &mut ProfileEnvTable::new(),
            &mut stack,
        );
        assert_eq!(out, Outcome::Dropped(DropReason::NotEnabled));
        assert!(stack.profile.is_empty());
    }

    #[test]
    fn cfg_ntf_is_cached() {
        let d = dispatcher();
        let mut envs = ProfileEnvTable::new();
        envs.set_enabled(ProfileId::Batt, 0);
        let mut stack = Calls::default();
        let mut param = vec![0x01, 0x00];
        param.extend_from_slice(&PEER);
        let out = d.dispatch(&data_req(batt::req::CFG_NTF, &param), &connected(), &mut envs, &mut stack);
        assert_eq!(out, Outcome::Forwarded);
        assert_eq!(envs.get(ProfileId::Batt).and_then(|e| e.ntf_cfg), Some(1));
    }

    #[test]
    fn unknown_cmd_is_dropped_silently() {
        let d = dispatcher();
        let mut stack = Calls::default();
        let msg = EaciMessage::new(MsgType::Cmd, gap::cmd::MAX, &[]).unwrap();
        let out = d.dispatch(&msg, &connected(), &mut ProfileEnvTable::new(), &mut stack);
        assert_eq!(out, Outcome::Dropped(DropReason::UnknownCommand(gap::cmd::MAX)));
        assert!(stack.gap.is_empty());
    }

    #[test]
    fn device_to_host_types_are_dropped() {
        let d = dispatcher();
        let mut stack = Calls::default();
        for ty in [MsgType::DataInd, MsgType::Evt, MsgType::DataError] {
            let msg = EaciMessage::new(ty, 1, &[0]).unwrap();
            let out = d.dispatch(&msg, &connected(), &mut ProfileEnvTable::new(), &mut stack);
            assert_eq!(out, Outcome::Dropped(DropReason::WrongDirection(ty)));
        }
        assert!(stack.gap.is_empty() && stack.profile.is_empty());
    }

    #[test]
    fn switching_request_profile_changes_decoder() {
        let mut d = dispatcher();
        d.select_request_profile(ProfileId::Hrp).unwrap();
        assert_eq!(d.request_profile(), ProfileId::Hrp);
        let mut stack = Calls::default();
        d.dispatch(&data_req(1, &PEER), &connected(), &mut ProfileEnvTable::new(), &mut stack);
        assert_eq!(stack.profile[0].1.profile(), ProfileId::Hrp);
        assert_eq!(
            d.select_request_profile(ProfileId::Fm),
            Err(Error::ProfileNotRegistered)
        );
    }

    #[test]
    fn unregistered_profile_event_is_not_encoded() {
        let d = dispatcher();
        let event = StackEvent::Profile {
            conhdl: 0,
            event: crate::profiles::ProfileEvent::Fm(crate::profiles::fm::FmEvent::Enable(
                crate::profiles::EnableCfm { status: 0 },
            )),
        };
        assert!(d.encode_event(&event).is_none());
    }
}
