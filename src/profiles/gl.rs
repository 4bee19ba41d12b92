//! Glucose collector (GLPC).
//!
//! Unlike the other collectors, GL has no generic characteristic read:
//! id 2 registers for measurement notifications (optionally with the
//! context characteristic) and id 3 writes the Record Access Control
//! Point.

use super::{
    EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId, ProfileRequest,
    RequestKind, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1808;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const REGISTER: u8 = 2;
    pub const RACP: u8 = 3;
    pub const MAX: u8 = 4;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const MEAS: u8 = 2;
    pub const MEAS_CTX: u8 = 3;
    pub const RACP_RSP: u8 = 4;
    pub const REGISTER_RSP: u8 = 5;
}

/// Record Access Control Point op codes.
pub mod racp_op {
    pub const REP_STRD_RECS: u8 = 1;
    pub const DEL_STRD_RECS: u8 = 2;
    pub const ABORT_OP: u8 = 3;
    pub const REP_NUM_OF_STRD_RECS: u8 = 4;
}

crate::wire_struct! {
    pub struct Register {
        /// Also register for the Measurement Context characteristic.
        pub meas_ctx_en: u8,
    }
}

crate::wire_struct! {
    pub struct Racp {
        pub op_code: u8,
        pub operator: u8,
        pub filter_type: u8,
        pub min: u16,
        pub max: u16,
    }
}

crate::wire_struct! {
    pub struct GlMeas {
        pub seq_num: u16,
        pub flags: u8,
        pub concentration: u16,
        pub type_sample_loc: u8,
        pub sensor_status: u16,
    }
}

crate::wire_struct! {
    pub struct GlMeasCtx {
        pub seq_num: u16,
        pub carbo_id: u8,
        pub carbo_val: u16,
    }
}

crate::wire_struct! {
    pub struct RacpRsp {
        pub op_code: u8,
        pub status: u8,
        pub num_of_records: u16,
    }
}

crate::wire_struct! {
    pub struct RegisterRsp {
        pub status: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlRequest {
    Enable,
    Register(Register),
    Racp(Racp),
}

impl RequestKind for GlRequest {
    fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlEvent {
    Enable(EnableCfm),
    Meas(GlMeas),
    MeasCtx(GlMeasCtx),
    RacpRsp(RacpRsp),
    RegisterRsp(RegisterRsp),
}

impl EventKind for GlEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Gl,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => GlRequest::Enable,
        req::REGISTER => GlRequest::Register(r.read()?),
        req::RACP => {
            let racp: Racp = r.read()?;
            if !(racp_op::REP_STRD_RECS..=racp_op::REP_NUM_OF_STRD_RECS).contains(&racp.op_code) {
                return Err(WireError::Invalid("racp op code"));
            }
            GlRequest::Racp(racp)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Gl(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Gl(event) = event else {
        return None;
    };
    Some(match event {
        GlEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        GlEvent::Meas(meas) => indication(SERVICE_UUID, ind::MEAS, meas),
        GlEvent::MeasCtx(ctx) => indication(SERVICE_UUID, ind::MEAS_CTX, ctx),
        GlEvent::RacpRsp(rsp) => indication(SERVICE_UUID, ind::RACP_RSP, rsp),
        GlEvent::RegisterRsp(rsp) => indication(SERVICE_UUID, ind::REGISTER_RSP, rsp),
    })
}
