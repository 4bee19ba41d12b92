//! Alert Notification client (ANPC).

use super::{
    CfgChar, EnableCfm, EventKind, ProfileCall, ProfileEntry, ProfileEvent, ProfileId,
    ProfileRequest, ReadChar, ReadRsp, RequestKind, WriteRsp, indication,
};
use crate::eaci::wire::{Param, ParamReader, Tail, WireError};

pub const SERVICE_UUID: u16 = 0x1811;

/// Longest text carried by a New Alert.
pub const MAX_ALERT_TEXT: usize = 18;

pub mod req {
    pub const ENABLE: u8 = 1;
    pub const RD_CHAR: u8 = 2;
    pub const CFG_NTF: u8 = 3;
    pub const WR_CNTL_PT: u8 = 4;
    pub const MAX: u8 = 5;
}

pub mod ind {
    pub const ENABLE: u8 = 1;
    pub const NEW_ALERT: u8 = 2;
    pub const UNREAD_ALERT: u8 = 3;
    pub const RD_CHAR_RSP: u8 = 4;
    pub const WR_CHAR_RSP: u8 = 5;
}

/// Alert Notification Control Point command ids.
pub mod cntl_cmd {
    pub const ENABLE_NEW: u8 = 0;
    pub const ENABLE_UNREAD: u8 = 1;
    pub const DISABLE_NEW: u8 = 2;
    pub const DISABLE_UNREAD: u8 = 3;
    pub const NOTIFY_NEW_NOW: u8 = 4;
    pub const NOTIFY_UNREAD_NOW: u8 = 5;
}

/// Category id meaning "all categories".
pub const CAT_ALL: u8 = 0xFF;

crate::wire_struct! {
    pub struct CntlPoint {
        pub cmd_id: u8,
        pub category_id: u8,
    }
}

crate::wire_struct! {
    pub struct NewAlert {
        pub category_id: u8,
        pub nb_new: u8,
        pub text: Tail<MAX_ALERT_TEXT>,
    }
}

crate::wire_struct! {
    pub struct UnreadAlert {
        pub category_id: u8,
        pub nb_unread: u8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnRequest {
    Enable,
    ReadChar(ReadChar),
    CfgNtf(CfgChar),
    WriteCntlPoint(CntlPoint),
}

impl RequestKind for AnRequest {
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
pub enum AnEvent {
    Enable(EnableCfm),
    NewAlert(NewAlert),
    UnreadAlert(UnreadAlert),
    ReadRsp(ReadRsp),
    WriteRsp(WriteRsp),
}

impl EventKind for AnEvent {
    fn enable_status(&self) -> Option<u8> {
        match self {
            Self::Enable(c) => Some(c.status),
            _ => None,
        }
    }
}

pub static ENTRY: ProfileEntry = ProfileEntry {
    id: ProfileId::An,
    service_uuid: SERVICE_UUID,
    req_max: req::MAX,
    decode,
    encode,
};

fn decode(msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
    let mut r = ParamReader::new(param);
    let request = match msg_id {
        req::ENABLE => AnRequest::Enable,
        req::RD_CHAR => AnRequest::ReadChar(r.read()?),
        req::CFG_NTF => AnRequest::CfgNtf(r.read()?),
        req::WR_CNTL_PT => {
            let cp: CntlPoint = r.read()?;
            if cp.cmd_id > cntl_cmd::NOTIFY_UNREAD_NOW {
                return Err(WireError::Invalid("control point command"));
            }
            AnRequest::WriteCntlPoint(cp)
        }
        _ => return Err(WireError::UnknownId(msg_id)),
    };
    Ok(ProfileCall {
        addr: r.read()?,
        request: ProfileRequest::An(request),
    })
}

fn encode(event: &ProfileEvent) -> Option<Result<(u8, Param), WireError>> {
    let ProfileEvent::An(event) = event else {
        return None;
    };
    Some(match event {
        AnEvent::Enable(cfm) => indication(SERVICE_UUID, ind::ENABLE, cfm),
        AnEvent::NewAlert(a) => indication(SERVICE_UUID, ind::NEW_ALERT, a),
        AnEvent::UnreadAlert(a) => indication(SERVICE_UUID, ind::UNREAD_ALERT, a),
        AnEvent::ReadRsp(rsp) => indication(SERVICE_UUID, ind::RD_CHAR_RSP, rsp),
        AnEvent::WriteRsp(rsp) => indication(SERVICE_UUID, ind::WR_CHAR_RSP, rsp),
    })
}
