//! Running Speed and Cadence client (RSCPC).

use super::{
    CfgChar, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1814;

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

pub mod op_code {
    pub const SET_CUMUL_VALUE: u8 = 1;
    pub const START_CALIBRATION: u8 = 2;
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
    pub struct RscMeas {
        pub flags: u8,
        /// 1/256 m/s
        pub inst_speed: u16,
        pub inst_cadence: u8,
        /// 1/100 m
        pub inst_stride_len: u16,
        /// 1/10 m
        pub total_distance: u32,
    }
}

crate::wire_struct! {
    pub struct CntlPointRsp {
        pub req_op_code: u8,
        pub resp_value: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RscRequest {
    Enable,
    ReadChar(ReadChar),
    CfgNtfInd(CfgChar),
    WriteScCntlPoint(ScCntlPoint),
}

impl RequestKind for RscRequest {
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
pub enum RscEvent {
    Enable(EnableCfm),
    Meas(RscMeas),
    CntlPointRsp(CntlPointRsp),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for RscEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Rsc,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => RscRequest::Enable,
        req::RD_CHAR => RscRequest::ReadChar(r.read()?),
        req::CFG_NTFIND => RscRequest::CfgNtfInd(r.read()?),
        req::WR_SC_CNTL_PT => {
            let cp: ScCntlPoint = r.read()?;
            if !(op_code::SET_CUMUL_VALUE..=op_code::REQ_SUPP_SENSOR_LOC).contains(&cp.op_code) {
                return Err(WireError::Invalid("sc control point op code"));
            }
            RscRequest::WriteScCntlPoint(cp)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Rsc(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Rsc(event) = event else {
        return None;
    };
    Some(match event {
        RscEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        RscEvent::Meas(meas) => indication(SERVICE_UUID, ind::MEAS, meas),
        RscEvent::CntlPointRsp(rsp) => indication(SERVICE_UUID, ind::CNTL_PT_RSP, rsp),
        RscEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        RscEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
