//! Bridge configuration parameters
//!
//! Selects which profile adapters are registered, which of them receives
//! `DATA_REQ` messages, and the link limits. Loaded from JSON at start-up
//! or built from [`EaciConfig::default`].

use anyhow::Context;
use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::app::connections::MAX_CONNECTIONS;
use crate::eaci::wire::MAX_PARAM_LEN;
use crate::error::Error;
use crate::profiles::{MAX_PROFILES, ProfileId};

/// Core bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EaciConfig {
    // --- Framing ---
    /// Largest `param_len` accepted from the host
    pub max_param_len: u8,

    // --- Profiles ---
    /// Profile that decodes `DATA_REQ` messages
    pub request_profile: ProfileId,
    /// Profiles registered at start-up
    pub profiles: Vec<ProfileId, MAX_PROFILES>,

    // --- Links ---
    /// Simultaneous connections tracked
    pub max_connections: u8,
}

impl EaciConfig {
    /// Reject inconsistent values.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_param_len == 0 {
            return Err(Error::Config("max_param_len must be non-zero"));
        }
        if self.profiles.is_empty() {
            return Err(Error::Config("no profiles registered"));
        }
        if !self.profiles.contains(&self.request_profile) {
            return Err(Error::Config("request_profile is not registered"));
        }
        if self.max_connections == 0 || self.max_connections as usize > MAX_CONNECTIONS {
            return Err(Error::Config("max_connections out of range"));
        }
        Ok(())
    }
}

impl Default for EaciConfig {
    fn default() -> Self {
        let mut profiles = Vec::new();
        for id in ProfileId::ALL {
            // ALL has fewer entries than MAX_PROFILES.
            let _ = profiles.push(id);
        }
        Self {
            max_param_len: MAX_PARAM_LEN as u8,
            request_profile: ProfileId::Batt,
            profiles,
            max_connections: 1,
        }
    }
}

/// Parse and validate a JSON configuration document.
pub fn load_json(json: &str) -> anyhow::Result<EaciConfig> {
    let config: EaciConfig =
        serde_json::from_str(json).context("failed to parse EACI configuration")?;
    config
        .validate()
        .map_err(anyhow::Error::new)
        .context("invalid EACI configuration")?;
    Ok(config)
}
