//! Scan Parameters client (SCPPC).

use super::{
    CfgNtf, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, WireError};

pub const SERVICE_UUID: u16 = 0x1813;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const WR_SCAN_INTV_WD: u8 = 3;
    pub const CFG_NTF: u8 = 4;
    pub const MAX: u8 = 5;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const SCAN_REFRESH: u8 = 2;
    pub const RD_CHAR_RSP: u8 = 3;
    pub const WR_CHAR_RSP: u8 = 4;
}

crate::wire_struct! {
    /// Both values in 0.625 ms units.
    pub struct ScanIntvWindow {
        pub scan_intv: u16,
        pub scan_window: u16,
    }
}

crate::wire_struct! {
    /// The server asks for the scan parameters to be written again.
    pub struct ScanRefresh {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScppRequest {
    Enable,
    ReadChar(ReadChar),
    WriteScanIntvWindow(ScanIntvWindow),
    CfgNtf(CfgNtf),
}

impl RequestKind for ScppRequest {
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
pub enum ScppEvent {
    Enable(EnableCfm),
    ScanRefresh(ScanRefresh),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for ScppEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::Scpp,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => ScppRequest::Enable,
        req::RD_CHAR => ScppRequest::ReadChar(r.read()?),
        req::WR_SCAN_INTV_WD => {
            let p: ScanIntvWindow = r.read()?;
            if p.scan_window > p.scan_intv {
                return Err(WireError::Invalid("scan window exceeds interval"));
            }
            ScppRequest::WriteScanIntvWindow(p)
        }
        req::CFG_NTF => ScppRequest::CfgNtf(r.read()?),
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::Scpp(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::Scpp(event) = event else {
        return None;
    };
    Some(match event {
        ScppEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        ScppEvent::ScanRefresh(r) => indication(SERVICE_UUID, ind::SCAN_REFRESH, r),
        ScppEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        ScppEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_larger_than_interval_is_invalid() {
        let param = [0x10, 0x00, 0x20, 0x00, 1, 2, 3, 4, 5, 6];
        assert!(decode(req::WR_SCAN_INTV_WD, &param).is_err());
    }

    #[test]
    fn scan_refresh_is_uuid_only() {
        let (id, param) = encode(&ProfileEvent::Scpp(ScppEvent::ScanRefresh(ScanRefresh {})))
            .unwrap()
            .unwrap();
        assert_eq!(id, ind::SCAN_REFRESH);
        assert_eq!(param.as_slice(), &[0x13, 0x18]);
    }
}
