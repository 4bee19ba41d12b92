//! Phone Alert Status client (PASPC).

use super::{
    CfgChar, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x180E;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_NTF: u8 = 3;
    pub const WR_RINGER_CNTL_PT: u8 = 4;
    pub const MAX: u8 = 5;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const ALERT_STATUS: u8 = 2;
    pub const RINGER_SETTING: u8 = 3;
    pub const RD_CHAR_RSP: u8 = 4;
    pub const WR_CHAR_RSP: u8 = 5;
}

/// Ringer Control Point commands.
pub mod ringer {
    pub const SILENT_MODE: u8 = 1;
    pub const MUTE_ONCE: u8 = 2;
    pub const CANCEL_SILENT_MODE: u8 = 3;
}

crate::wire_struct! {
    pub struct RingerCntlPoint {
        pub value: u8,
    }
}

crate::wire_struct! {
    pub struct AlertStatus {
        pub value: u8,
    }
}

crate::wire_struct! {
    pub struct RingerSetting {
        pub value: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasRequest {
    Enable,
    ReadChar(ReadChar),
    CfgNtf(CfgChar),
    WriteRingerCntlPoint(RingerCntlPoint),
}

impl RequestKind for PasRequest {
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
pub enum PasEvent {
    Enable(EnableCfm),
    AlertStatus(AlertStatus),
    RingerSetting(RingerSetting),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for PasEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Pas,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => PasRequest::Enable,
        req::RD_CHAR => PasRequest::ReadChar(r.read()?),
        req::CFG_NTF => PasRequest::CfgNtf(r.read()?),
        req::WR_RINGER_CNTL_PT => {
            let cp: RingerCntlPoint = r.read()?;
            if !(ringer::SILENT_MODE..=ringer::CANCEL_SILENT_MODE).contains(&cp.value) {
                return Err(WireError::Invalid("ringer command"));
            }
            PasRequest::WriteRingerCntlPoint(cp)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Pas(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Pas(event) = event else {
        return None;
    };
    Some(match event {
        PasEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        PasEvent::AlertStatus(s) => indication(SERVICE_UUID, ind::ALERT_STATUS, s),
        PasEvent::RingerSetting(s) => indication(SERVICE_UUID, ind::RINGER_SETTING, s),
        PasEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        PasEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
