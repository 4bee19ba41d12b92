//! GAP adapter: `CMD` decode and `EVT` encode.
//!
//! ```text
//!   host ── CMD ──▶ decode_cmd ──▶ GapCommand ──resolve──▶ GapRequest ──▶ stack
//!   host ◀── EVT ── encode_evt ◀── GapEvent ◀───────────────────────────── stack
//! ```
//!
//! Commands that target an existing link (`DISC`, `BOND`, `UPDATE_PARAM`)
//! carry the peer address; it is resolved to a connection handle before
//! the request reaches the stack.

use heapless::Vec;

use crate::eaci::message::{EaciMessage, MsgType};
use crate::eaci::wire::{BdAddr, ParamReader, ParamWriter, WireError, WireField};

/// Connection handle meaning "no connection".
pub const INVALID_CONHDL: u16 = 0xFFFF;

/// Longest device name accepted by `SET_DEVNAME`.
pub const DEVNAME_MAX: usize = 32;

pub type DevName = Vec<u8, DEVNAME_MAX>;

pub mod cmd {
    pub const ADV: u8 = 1;
    pub const SCAN: u8 = 2;
    pub const CONN: u8 = 3;
    pub const DISC: u8 = 4;
    pub const SET_DEVNAME: u8 = 5;
    pub const BOND: u8 = 6;
    pub const UPDATE_PARAM: u8 = 7;
    pub const MAX: u8 = 8;
}

pub mod evt {
    pub const ADV: u8 = 1;
    pub const SCAN_RESULT: u8 = 2;
    pub const SCAN_CMP: u8 = 3;
    pub const CONN: u8 = 4;
    pub const DISC: u8 = 5;
    pub const SET_DEVNAME: u8 = 6;
    pub const BOND: u8 = 7;
    pub const UPDATE_PARAM: u8 = 8;
}

// ───────────────────────────────────────────────────────────────
// Command layouts
// ───────────────────────────────────────────────────────────────

crate::wire_struct! {
    struct AdvCmd {
        start: u8,
        intv_min: u16,
        intv_max: u16,
    }
}

crate::wire_struct! {
    /// Connection parameters, intervals in 1.25 ms and timeout in 10 ms.
    pub struct ConnParams {
        pub intv_min: u16,
        pub intv_max: u16,
        pub latency: u16,
        pub timeout: u16,
    }
}

/// A decoded `CMD`, with peers still given by address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapCommand {
    Advertise { intv_min: u16, intv_max: u16 },
    StopAdvertising,
    Scan { start: bool },
    Connect { addr: BdAddr },
    Disconnect { addr: BdAddr },
    SetDevName { name: DevName },
    Bond { addr: BdAddr },
    UpdateParam { params: ConnParams, addr: BdAddr },
}

/// A GAP request for the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapRequest {
    Advertise { intv_min: u16, intv_max: u16 },
    StopAdvertising,
    Scan { start: bool },
    Connect { addr: BdAddr },
    Disconnect { conhdl: u16 },
    SetDevName { name: DevName },
    Bond { conhdl: u16 },
    UpdateParam { conhdl: u16, params: ConnParams },
}

impl GapCommand {
    /// Address that must map to a live connection, if any.
    pub fn peer(&self) -> Option<BdAddr> {
        match self {
            Self::Disconnect { addr } | Self::Bond { addr } | Self::UpdateParam { addr, .. } => {
                Some(*addr)
            }
            _ => None,
        }
    }

    /// Turn the command into a stack request, looking up the connection
    /// handle of its peer. `None` when the peer is not connected.
    pub fn resolve(self, lookup: impl FnOnce(&BdAddr) -> u16) -> Option<GapRequest> {
        let conhdl = match self.peer() {
            Some(addr) => {
                let conhdl = lookup(&addr);
                if conhdl == INVALID_CONHDL {
                    return None;
                }
                conhdl
            }
            None => INVALID_CONHDL,
        };
        Some(match self {
            Self::Advertise { intv_min, intv_max } => GapRequest::Advertise { intv_min, intv_max },
            Self::StopAdvertising => GapRequest::StopAdvertising,
            Self::Scan { start } => GapRequest::Scan { start },
            Self::Connect { addr } => GapRequest::Connect { addr },
            Self::SetDevName { name } => GapRequest::SetDevName { name },
            Self::Disconnect { .. } => GapRequest::Disconnect { conhdl },
            Self::Bond { .. } => GapRequest::Bond { conhdl },
            Self::UpdateParam { params, .. } => GapRequest::UpdateParam { conhdl, params },
        })
    }
}

/// Decode the parameter block of a `CMD` message.
pub fn decode_cmd(msg_id: u8, param: &[u8]) -> Result<GapCommand, WireError> {
    let mut r = ParamReader::new(param);
    Ok(match msg_id {
        cmd::ADV => {
            let adv: AdvCmd = r.read()?;
            if adv.start == 0 {
                GapCommand::StopAdvertising
            } else {
                if adv.intv_min > adv.intv_max {
                    return Err(WireError::Invalid("advertising interval"));
                }
                GapCommand::Advertise {
                    intv_min: adv.intv_min,
                    intv_max: adv.intv_max,
                }
            }
        }
        cmd::SCAN => GapCommand::Scan {
            start: r.read::<u8>()? != 0,
        },
        cmd::CONN => GapCommand::Connect { addr: r.read()? },
        cmd::DISC => GapCommand::Disconnect { addr: r.read()? },
        cmd::SET_DEVNAME => {
            let raw = r.rest();
            if raw.is_empty() {
                return Err(WireError::Truncated);
            }
            let name = Vec::from_slice(raw).map_err(|()| WireError::Invalid("device name"))?;
            GapCommand::SetDevName { name }
        }
        cmd::BOND => GapCommand::Bond { addr: r.read()? },
        cmd::UPDATE_PARAM => GapCommand::UpdateParam {
            params: r.read()?,
            addr: r.read()?,
        },
        _ => return Err(WireError::UnknownId(msg_id)),
    })
}

// ───────────────────────────────────────────────────────────────
// Event layouts
// ───────────────────────────────────────────────────────────────

crate::wire_struct! {
    pub struct StatusEvt {
        pub status: u8,
    }
}

crate::wire_struct! {
    pub struct ScanResult {
        pub addr_type: u8,
        pub addr: BdAddr,
        pub rssi: i8,
    }
}

crate::wire_struct! {
    pub struct ScanComplete {
        pub status: u8,
        pub nb_devices: u8,
    }
}

crate::wire_struct! {
    pub struct Connected {
        pub status: u8,
        pub conhdl: u16,
        pub addr: BdAddr,
    }
}

crate::wire_struct! {
    pub struct Disconnected {
        pub conhdl: u16,
        pub reason: u8,
    }
}

crate::wire_struct! {
    pub struct Bonded {
        pub status: u8,
        pub addr: BdAddr,
    }
}

/// A GAP event reported by the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapEvent {
    Advertising(StatusEvt),
    ScanResult(ScanResult),
    ScanComplete(ScanComplete),
    Connected(Connected),
    Disconnected(Disconnected),
    DevNameSet(StatusEvt),
    Bonded(Bonded),
    ParamUpdated(StatusEvt),
}

impl GapEvent {
    pub fn msg_id(&self) -> u8 {
        match self {
            Self::Advertising(_) => evt::ADV,
            Self::ScanResult(_) => evt::SCAN_RESULT,
            Self::ScanComplete(_) => evt::SCAN_CMP,
            Self::Connected(_) => evt::CONN,
            Self::Disconnected(_) => evt::DISC,
            Self::DevNameSet(_) => evt::SET_DEVNAME,
            Self::Bonded(_) => evt::BOND,
            Self::ParamUpdated(_) => evt::UPDATE_PARAM,
        }
    }
}

/// Encode `event` as an `EVT` message.
pub fn encode_evt(event: &GapEvent) -> Result<EaciMessage, WireError> {
    let mut w = ParamWriter::new();
    match event {
        GapEvent::Advertising(e) | GapEvent::DevNameSet(e) | GapEvent::ParamUpdated(e) => {
            e.write(&mut w)?;
        }
        GapEvent::ScanResult(e) => e.write(&mut w)?,
        GapEvent::ScanComplete(e) => e.write(&mut w)?,
        GapEvent::Connected(e) => e.write(&mut w)?,
        GapEvent::Disconnected(e) => e.write(&mut w)?,
        GapEvent::Bonded(e) => e.write(&mut w)?,
    }
    Ok(EaciMessage::from_param(MsgType::Evt, event.msg_id(), w.finish()))
}
