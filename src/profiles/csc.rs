//! Cycling Speed and Cadence client (CSCPC).
//!
//! The SC Control Point write carries an op code and a 32-bit operand
//! whose meaning depends on the op code (cumulative value or sensor
//! location); unused operand bytes are zero.

use super::{
    CfgChar, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1816;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_NTFIND: u8 = 3;
    pub const WR_SC_CNTL_PT: u8 = 4;
    pub const MAX: u8 = 5;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const MEAS: u8 = 2;
    pub const CNTL_PT_RSP: u8 = 3;
    pub const RD_CHAR_RSP: u8 = 4;
    pub const WR_CHAR_RSP: u8 = 5;
}

/// SC Control Point op codes.
pub mod op_code {
    pub const SET_CUMUL_VALUE: u8 = 1;
    pub const UPD_SENSOR_LOC: u8 = 3;
    pub const REQ_SUPP_SENSOR_LOC: u8 = 4;
}

crate::wire_struct! {
    pub struct ScCntlPoint {
        pub op_code: u8,
        pub value: u32,
    }
}

crate::wire_struct! {
    pub struct CscMeas {
        pub flags: u8,
        pub cumul_wheel_rev: u32,
        pub last_wheel_evt_time: u16,
        pub cumul_crank_rev: u16,
        pub last_crank_evt_time: u16,
    }
}

crate::wire_struct! {
    pub struct CntlPointRsp {
        pub req_op_code: u8,
        pub resp_value: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CscRequest {
    Enable,
    ReadChar(ReadChar),
    CfgNtfInd(CfgChar),
    WriteScCntlPoint(ScCntlPoint),
}

impl RequestKind for CscRequest {
    fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }

    fn ntf_cfg(&self) -> Option<u16> {
        match self {
            Self::CfgNtfInd(c) => Some(c.cfg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CscEvent {
    Enable(EnableCfm),
    Meas(CscMeas),
    CntlPointRsp(CntlPointRsp),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for CscEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Csc,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => CscRequest::Enable,
        req::RD_CHAR => CscRequest::ReadChar(r.read()?),
        req::CFG_NTFIND => CscRequest::CfgNtfInd(r.read()?),
        req::WR_SC_CNTL_PT => {
            let cp: ScCntlPoint = r.read()?;
            if !matches!(
                cp.op_code,
                op_code::SET_CUMUL_VALUE | op_code::UPD_SENSOR_LOC | op_code::REQ_SUPP_SENSOR_LOC
            ) {
                return Err(WireError::Invalid("sc control point op code"));
            }
            CscRequest::WriteScCntlPoint(cp)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Csc(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Csc(event) = event else {
        return None;
    };
    Some(match event {
        CscEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        CscEvent::Meas(meas) => indication(SERVICE_UUID, ind::MEAS, meas),
        CscEvent::CntlPointRsp(rsp) => indication(SERVICE_UUID, ind::CNTL_PT_RSP, rsp),
        CscEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        CscEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
