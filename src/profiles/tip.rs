//! Time client (TIPC), Current Time Service.

use super::{
    CfgNtf, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1805;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_NTF: u8 = 3;
    pub const WR_UPD_CNTL_PT: u8 = 4;
    pub const MAX: u8 = 5;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const CURR_TIME: u8 = 2;
    pub const RD_CHAR_RSP: u8 = 3;
    pub const WR_CHAR_RSP: u8 = 4;
}

/// Time Update Control Point commands.
pub mod upd_cntl {
    pub const GET_REF_UPDATE: u8 = 1;
    pub const CANCEL_REF_UPDATE: u8 = 2;
}

crate::wire_struct! {
    pub struct UpdCntlPoint {
        pub value: u8,
    }
}

crate::wire_struct! {
    pub struct CurrTime {
        pub year: u16,
        pub month: u8,
        pub day: u8,
        pub hour: u8,
        pub min: u8,
        pub sec: u8,
        pub day_of_week: u8,
        pub fraction_256: u8,
        pub adjust_reason: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipRequest {
    Enable,
    ReadChar(ReadChar),
    CfgNtf(CfgNtf),
    WriteUpdCntlPoint(UpdCntlPoint),
}

impl RequestKind for TipRequest {
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
pub enum TipEvent {
    Enable(EnableCfm),
    CurrTime(CurrTime),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for TipEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Tip,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => TipRequest::Enable,
        req::RD_CHAR => TipRequest::ReadChar(r.read()?),
        req::CFG_NTF => TipRequest::CfgNtf(r.read()?),
        req::WR_UPD_CNTL_PT => {
            let cp: UpdCntlPoint = r.read()?;
            if !matches!(cp.value, upd_cntl::GET_REF_UPDATE | upd_cntl::CANCEL_REF_UPDATE) {
                return Err(WireError::Invalid("time update command"));
            }
            TipRequest::WriteUpdCntlPoint(cp)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Tip(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Tip(event) = event else {
        return None;
    };
    Some(match event {
        TipEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        TipEvent::CurrTime(t) => indication(SERVICE_UUID, ind::CURR_TIME, t),
        TipEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        TipEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_time_layout() {
        let t = CurrTime {
            year: 2013,
            month: 5,
            day: 17,
            hour: 9,
            min: 30,
            sec: 0,
            day_of_week: 5,
            fraction_256: 0,
            adjust_reason: 0x01,
        };
        let (id, param) = encode(&ProfileEvent::Tip(TipEvent::CurrTime(t))).unwrap().unwrap();
        assert_eq!(id, ind::CURR_TIME);
        assert_eq!(
            param.as_slice(),
            &[0x05, 0x18, 0xDD, 0x07, 5, 17, 9, 30, 0, 5, 0, 0x01]
        );
    }

    #[test]
    fn unknown_update_command_is_invalid() {
        assert!(decode(req::WR_UPD_CNTL_PT, &[0x03, 1, 2, 3, 4, 5, 6]).is_err());
        assert!(decode(req::WR_UPD_CNTL_PT, &[0x01, 1, 2, 3, 4, 5, 6]).is_ok());
    }
}
