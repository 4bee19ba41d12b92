//! Heart Rate collector (HRPC).
//!
//! The measurement indication carries a variable number of RR-intervals
//! (1/1024 s units) as a counted list.

use super::{
    CfgNtf, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Counted, Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x180D;

/// Most RR-intervals forwarded per measurement.
pub const MAX_RR_INTERVALS: usize = 8;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_NTF: u8 = 3;
    pub const WR_CNTL_POINT: u8 = 4;
    pub const MAX: u8 = 5;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const MEAS: u8 = 2;
    pub const RD_CHAR_RSP: u8 = 3;
    pub const WR_CHAR_RSP: u8 = 4;
}

/// Heart Rate Control Point value: reset energy expended.
pub const CNTL_POINT_RESET_ENERGY: u8 = 0x01;

crate::wire_struct! {
    pub struct CntlPoint {
        pub value: u8,
    }
}

crate::wire_struct! {
    pub struct HrsMeas {
        pub flags: u8,
        pub heart_rate: u16,
        pub energy_expended: u16,
        pub rr_intervals: Counted<u16, MAX_RR_INTERVALS>,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HrpRequest {
    Enable,
    ReadChar(ReadChar),
    CfgNtf(CfgNtf),
    WriteCntlPoint(CntlPoint),
}

impl RequestKind for HrpRequest {
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
pub enum HrpEvent {
    Enable(EnableCfm),
    Meas(HrsMeas),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for HrpEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Hrp,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => HrpRequest::Enable,
        req::RD_CHAR => HrpRequest::ReadChar(r.read()?),
        req::CFG_NTF => HrpRequest::CfgNtf(r.read()?),
        req::WR_CNTL_POINT => {
            let cp: CntlPoint = r.read()?;
            if cp.value != CNTL_POINT_RESET_ENERGY {
                return Err(WireError::Invalid("control point value"));
            }
            HrpRequest::WriteCntlPoint(cp)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Hrp(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Hrp(event) = event else {
        return None;
    };
    Some(match event {
        HrpEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        HrpEvent::Meas(meas) => indication(SERVICE_UUID, ind::MEAS, meas),
        HrpEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        HrpEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_with_rr_intervals() {
        let mut rr = heapless::Vec::new();
        rr.push(0x0400).unwrap();
        rr.push(0x03F0).unwrap();
        let meas = HrsMeas {
            flags: 0x10,
            heart_rate: 72,
            energy_expended: 0,
            rr_intervals: Counted(rr),
        };
        let (id, param) = encode(&ProfileEvent::Hrp(HrpEvent::Meas(meas))).unwrap().unwrap();
        assert_eq!(id, ind::MEAS);
        assert_eq!(
            param.as_slice(),
            &[0x0D, 0x18, 0x10, 72, 0, 0, 0, 2, 0x00, 0x04, 0xF0, 0x03]
        );
    }

    #[test]
    fn only_reset_energy_is_a_valid_control_point() {
        let ok = [CNTL_POINT_RESET_ENERGY, 1, 2, 3, 4, 5, 6];
        assert!(decode(req::WR_CNTL_POINT, &ok).is_ok());
        let bad = [0x02, 1, 2, 3, 4, 5, 6];
        assert_eq!(
            decode(req::WR_CNTL_POINT, &bad),
            Err(WireError::Invalid("control point value"))
        );
    }
}
