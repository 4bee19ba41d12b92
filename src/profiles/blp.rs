//! Blood Pressure collector (BLPC).

use super::{
    CfgChar, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1810;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_INDNTF: u8 = 3;
    pub const MAX: u8 = 4;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const BP_MEAS: u8 = 2;
    pub const RD_CHAR_RSP: u8 = 3;
    pub const WR_CHAR_RSP: u8 = 4;
}

crate::wire_struct! {
    /// Pressure and pulse fields are IEEE-11073 16-bit SFLOATs.
    pub struct BpMeas {
        pub flags: u8,
        pub systolic: u16,
        pub diastolic: u16,
        pub mean_arterial: u16,
        pub pulse_rate: u16,
        pub user_id: u8,
        pub meas_status: u16,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlpRequest {
    Enable,
    ReadChar(ReadChar),
    CfgIndNtf(CfgChar),
}

impl RequestKind for BlpRequest {
    fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }

    fn ntf_cfg(&self) -> Option<u16> {
        match self {
            Self::CfgIndNtf(c) => Some(c.cfg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlpEvent {
    Enable(EnableCfm),
    BpMeas(BpMeas),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for BlpEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Blp,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => BlpRequest::Enable,
        req::RD_CHAR => BlpRequest::ReadChar(r.read()?),
        req::CFG_INDNTF => BlpRequest::CfgIndNtf(r.read()?),
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Blp(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Blp(event) = event else {
        return None;
    };
    Some(match event {
        BlpEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        BlpEvent::BpMeas(meas) => indication(SERVICE_UUID, ind::BP_MEAS, meas),
        BlpEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        BlpEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
