//! Find Me locator (FMPL). Write-only: the only indication is the
//! enable confirmation.

use super::{
    EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId, ProfileRequest,
    RequestKind, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1802;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const SET_ALERT: u8 = 2;
    pub const MAX: u8 = 3;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
}

pub mod alert_level {
    pub const NONE: u8 = 0;
    pub const MILD: u8 = 1;
    pub const HIGH: u8 = 2;
}

crate::wire_struct! {
    pub struct SetAlert {
        pub level: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FmRequest {
    Enable,
    SetAlert(SetAlert),
}

impl RequestKind for FmRequest {
    fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FmEvent {
    Enable(EnableCfm),
}

impl EventKind for FmEvent {
    fn enable_status(&self) -> Option<u8> {
        let Self::Enable(c) = self;
        Some(c.status)
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Fm,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => FmRequest::Enable,
        req::SET_ALERT => {
            let alert: SetAlert = r.read()?;
            if alert.level > alert_level::HIGH {
                return Err(WireError::Invalid("alert level"));
            }
            FmRequest::SetAlert(alert)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Fm(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Fm(FmEvent::Enable(cfm)) = event else {
        return None;
    };
    Some(indication(SERVICE_UUID, ind::ENABLE, cfm))
}
