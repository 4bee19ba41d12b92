//! Health Thermometer collector (HTPC).

use super::{
    CfgChar, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1809;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_INDNTF: u8 = 3;
    pub const WR_MEAS_INTV: u8 = 4;
    pub const MAX: u8 = 5;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const TEMP_MEAS: u8 = 2;
    pub const MEAS_INTV: u8 = 3;
    pub const RD_CHAR_RSP: u8 = 4;
    pub const WR_CHAR_RSP: u8 = 5;
}

pub mod char_code {
    pub const TEMP_MEAS_CFG: u8 = 0;
    pub const INTM_TEMP_CFG: u8 = 1;
    pub const MEAS_INTV_CFG: u8 = 2;
}

crate::wire_struct! {
    /// Measurement interval in seconds; 0 disables periodic measurement.
    pub struct MeasIntv {
        pub intv: u16,
    }
}

crate::wire_struct! {
    /// `temp` is an IEEE-11073 32-bit FLOAT, forwarded untouched.
    pub struct TempMeas {
        pub flags: u8,
        pub temp: u32,
        pub temp_type: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtpRequest {
    Enable,
    ReadChar(ReadChar),
    CfgIndNtf(CfgChar),
    WriteMeasIntv(MeasIntv),
}

impl RequestKind for HtpRequest {
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
pub enum HtpEvent {
    Enable(EnableCfm),
    TempMeas(TempMeas),
    MeasIntv(MeasIntv),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for HtpEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Htp,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => HtpRequest::Enable,
        req::RD_CHAR => HtpRequest::ReadChar(r.read()?),
        req::CFG_INDNTF => HtpRequest::CfgIndNtf(r.read()?),
        req::WR_MEAS_INTV => HtpRequest::WriteMeasIntv(r.read()?),
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Htp(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Htp(event) = event else {
        return None;
    };
    Some(match event {
        HtpEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        HtpEvent::TempMeas(meas) => indication(SERVICE_UUID, ind::TEMP_MEAS, meas),
        HtpEvent::MeasIntv(intv) => indication(SERVICE_UUID, ind::MEAS_INTV, intv),
        HtpEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        HtpEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
