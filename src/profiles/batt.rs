//! Battery Service client (BASC).
//!
//! ```text
//! DATA_REQ                          DATA_IND
//! 1 ENABLE   [addr]                 1 ENABLE      [uuid, status]
//! 2 RD_CHAR  [char_code, addr]      2 LEVEL       [uuid, level]
//! 3 CFG_NTF  [ntf_cfg u16, addr]    3 RD_CHAR_RSP [uuid, status, char_code, value..]
//!                                   4 WR_CHAR_RSP [uuid, status, char_code]
//! ```

use super::{
    CfgNtf, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x180F;

/// `DATA_REQ` message ids.
pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_NTF: u8 = 3;
    pub const MAX: u8 = 4;
}

/// `DATA_IND` message ids.
pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const LEVEL: u8 = 2;
    pub const RD_CHAR_RSP: u8 = 3;
    pub const WR_CHAR_RSP: u8 = 4;
}

/// Characteristic codes accepted by `RD_CHAR`.
pub mod char_code {
    pub const BATT_LEVEL: u8 = 0;
    pub const NTF_CFG: u8 = 1;
    pub const PRES_FORMAT: u8 = 2;
}

crate::wire_struct! {
    pub struct BattLevel {
        pub level: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattRequest {
    Enable,
    ReadChar(ReadChar),
    CfgNtf(CfgNtf),
}

impl RequestKind for BattRequest {
    fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }

    fn ntf_cfg(&self) -> Option<u16> {
        match self {
            Self::CfgNtf(c) => Some(c.cfg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattEvent {
    Enable(EnableCfm),
    Level(BattLevel),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for BattEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Batt,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => BattRequest::Enable,
        req::RD_CHAR => BattRequest::ReadChar(r.read()?),
        req::CFG_NTF => BattRequest::CfgNtf(r.read()?),
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Batt(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Batt(event) = event else {
        return None;
    };
    Some(match event {
        BattEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        BattEvent::Level(level) => indication(SERVICE_UUID, ind::LEVEL, level),
        BattEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        BattEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
