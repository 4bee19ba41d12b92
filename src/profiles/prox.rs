//! Proximity monitor (PROXM).
//!
//! Talks to three peer services (Link Loss, Immediate Alert, Tx Power);
//! indications are tagged with the Link Loss UUID.

use super::{
    EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId, ProfileRequest,
    ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1803;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const WR_ALERT_LVL: u8 = 3;
    pub const MAX: u8 = 4;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR_RSP: u8 = 2;
    pub const WR_CHAR_RSP: u8 = 3;
}

pub mod char_code {
    /// Link Loss alert level.
    pub const LLS_ALERT_LVL: u8 = 0;
    /// Immediate Alert level.
    pub const IAS_ALERT_LVL: u8 = 1;
    /// Tx Power level (read only).
    pub const TX_POWER_LVL: u8 = 2;
}

/// Highest alert level ("high alert").
pub const ALERT_HIGH: u8 = 2;

crate::wire_struct! {
    pub struct AlertLevel {
        pub char_code: u8,
        pub level: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxRequest {
    Enable,
    ReadChar(ReadChar),
    WriteAlertLevel(AlertLevel),
}

impl RequestKind for ProxRequest {
    fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxEvent {
    Enable(EnableCfm),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for ProxEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Prox,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => ProxRequest::Enable,
        req::RD_CHAR => ProxRequest::ReadChar(r.read()?),
        req::WR_ALERT_LVL => {
            let lvl: AlertLevel = r.read()?;
            if lvl.char_code == char_code::TX_POWER_LVL {
                return Err(WireError::Invalid("tx power is read only"));
            }
            if lvl.level > ALERT_HIGH {
                return Err(WireError::Invalid("alert level"));
            }
            ProxRequest::WriteAlertLevel(lvl)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Prox(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Prox(event) = event else {
        return None;
    };
    Some(match event {
        ProxEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        ProxEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        ProxEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
