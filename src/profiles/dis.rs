//! Device Information Service client (DISC).

use super::{
    EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId, ProfileRequest,
    ReadChar, ReadRsp, RequestKind, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x180A;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const MAX: u8 = 3;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR_RSP: u8 = 2;
}

/// Characteristic codes, in service declaration order.
pub mod char_code {
    pub const MANUFACTURER_NAME: u8 = 0;
    pub const MODEL_NB: u8 = 1;
    pub const SERIAL_NB: u8 = 2;
    pub const HARD_REV: u8 = 3;
    pub const FIRM_REV: u8 = 4;
    pub const SW_REV: u8 = 5;
    pub const SYSTEM_ID: u8 = 6;
    pub const IEEE: u8 = 7;
    pub const PNP_ID: u8 = 8;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisRequest {
    Enable,
    ReadChar(ReadChar),
}

impl RequestKind for DisRequest {
    fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisEvent {
    Enable(EnableCfm),
    ReadRsp(ReadRsp),
}

impl EventKind for DisEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            Self::ReadRsp(_) => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Dis,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => DisRequest::Enable,
        req::RD_CHAR => {
            let rd: ReadChar = r.read()?;
            if rd.char_code > char_code::PNP_ID {
                return Err(WireError::Invalid("char_code"));
            }
            DisRequest::ReadChar(rd)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Dis(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Dis(event) = event else {
        return None;
    };
    Some(match event {
        DisEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        DisEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
    })
}
