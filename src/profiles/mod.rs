//! Per-profile EACI adapters and the registration table.
//!
//! Each profile module translates between its fixed `DATA_REQ` /
//! `DATA_IND` layouts and typed requests/events for the stack, and
//! exposes one [`ProfileEntry`]:
//!
//! | Module | Role                          | Service UUID |
//! |--------|-------------------------------|--------------|
//! | `batt` | Battery Service client        | `0x180F`     |
//! | `dis`  | Device Information client     | `0x180A`     |
//! | `hrp`  | Heart Rate collector          | `0x180D`     |
//! | `htp`  | Health Thermometer collector  | `0x1809`     |
//! | `blp`  | Blood Pressure collector      | `0x1810`     |
//! | `prox` | Proximity monitor             | `0x1803`     |
//! | `scpp` | Scan Parameters client        | `0x1813`     |
//! | `tip`  | Time client                   | `0x1805`     |
//! | `an`   | Alert Notification client     | `0x1811`     |
//! | `csc`  | Cycling Speed/Cadence client  | `0x1816`     |
//! | `pas`  | Phone Alert Status client     | `0x180E`     |
//! | `rsc`  | Running Speed/Cadence client  | `0x1814`     |
//! | `gl`   | Glucose collector             | `0x1808`     |
//! | `fm`   | Find Me locator               | `0x1802`     |
//!
//! Request layouts end with the peer's 6-byte address; indication
//! layouts start with the service UUID.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::eaci::message::{EaciMessage, MsgType};
use crate::eaci::wire::{BdAddr, Param, ParamWriter, Tail, WireError, WireField};

pub mod an;
pub mod batt;
pub mod blp;
pub mod csc;
pub mod dis;
pub mod fm;
pub mod gl;
pub mod hrp;
pub mod htp;
pub mod pas;
pub mod prox;
pub mod rsc;
pub mod scpp;
pub mod tip;

/// Upper bound on registered profiles.
pub const MAX_PROFILES: usize = 16;

/// Longest characteristic value carried in a read response.
pub const CHAR_VALUE_MAX: usize = 128;

/// GATT status for success.
pub const STATUS_OK: u8 = 0x00;

// ───────────────────────────────────────────────────────────────
// Shared layouts
// ───────────────────────────────────────────────────────────────

crate::wire_struct! {
    /// `[char_code]`
    pub struct ReadChar {
        pub char_code: u8,
    }
}

crate::wire_struct! {
    /// `[cfg u16]` for profiles with a single configurable characteristic.
    pub struct CfgNtf {
        pub cfg: u16,
    }
}

crate::wire_struct! {
    /// `[char_code, cfg u16]`
    pub struct CfgChar {
        pub char_code: u8,
        pub cfg: u16,
    }
}

crate::wire_struct! {
    /// `[status]`
    pub struct EnableCfm {
        pub status: u8,
    }
}

crate::wire_struct! {
    /// `[status, char_code, value..]`
    pub struct ReadRsp {
        pub status: u8,
        pub char_code: u8,
        pub value: Tail<CHAR_VALUE_MAX>,
    }
}

crate::wire_struct! {
    /// `[status, char_code]`
    pub struct WriteRsp {
        pub status: u8,
        pub char_code: u8,
    }
}

/// Properties the dispatcher needs from every profile request.
pub trait RequestKind {
    /// Enable requests are the only ones accepted before the profile is
    /// enabled on the connection.
    fn is_enable(&self) -> bool;

    /// Notification/indication configuration carried by the request.
    fn ntf_cfg(&self) -> Option<u16> {
        None
    }
}

/// Properties the service needs from every profile event.
pub trait EventKind {
    /// Status of an enable confirmation, `None` for other events.
    fn enable_status(&self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Profile identifiers and sum types
// ───────────────────────────────────────────────────────────────

/// Profile role identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileId {
    Batt,
    Dis,
    Hrp,
    Htp,
    Blp,
    Prox,
    Scpp,
    Tip,
    An,
    Csc,
    Pas,
    Rsc,
    Gl,
    Fm,
}

impl ProfileId {
    pub const ALL: [Self; 14] = [
        Self::Batt,
        Self::Dis,
        Self::Hrp,
        Self::Htp,
        Self::Blp,
        Self::Prox,
        Self::Scpp,
        Self::Tip,
        Self::An,
        Self::Csc,
        Self::Pas,
        Self::Rsc,
        Self::Gl,
        Self::Fm,
    ];
}

macro_rules! profile_table {
    ($( $variant:ident => $module:ident :: { $req:ident, $evt:ident } ),* $(,)?) => {
        /// A decoded profile request, ready for the stack.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ProfileRequest {
            $( $variant($module::$req) ),*
        }

        /// A profile event reported by the stack.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ProfileEvent {
            $( $variant($module::$evt) ),*
        }

        impl ProfileRequest {
            pub fn profile(&self) -> ProfileId {
                match self {
                    $( Self::$variant(_) => ProfileId::$variant ),*
                }
            }

            pub fn is_enable(&self) -> bool {
                match self {
                    $( Self::$variant(r) => r.is_enable() ),*
                }
            }

            pub fn ntf_cfg(&self) -> Option<u16> {
                match self {
                    $( Self::$variant(r) => r.ntf_cfg() ),*
                }
            }
        }

        impl ProfileEvent {
            pub fn profile(&self) -> ProfileId {
                match self {
                    $( Self::$variant(_) => ProfileId::$variant ),*
                }
            }

            pub fn enable_status(&self) -> Option<u8> {
                match self {
                    $( Self::$variant(e) => e.enable_status() ),*
                }
            }
        }

        impl ProfileId {
            /// Static registration entry of this profile.
            pub fn entry(self) -> &'static ProfileEntry {
                match self {
                    $( Self::$variant => &$module::ENTRY ),*
                }
            }
        }
    };
}

profile_table! {
    Batt => batt::{ BattRequest, BattEvent },
    Dis  => dis::{ DisRequest, DisEvent },
    Hrp  => hrp::{ HrpRequest, HrpEvent },
    Htp  => htp::{ HtpRequest, HtpEvent },
    Blp  => blp::{ BlpRequest, BlpEvent },
    Prox => prox::{ ProxRequest, ProxEvent },
    Scpp => scpp::{ ScppRequest, ScppEvent },
    Tip  => tip::{ TipRequest, TipEvent },
    An   => an::{ AnRequest, AnEvent },
    Csc  => csc::{ CscRequest, CscEvent },
    Pas  => pas::{ PasRequest, PasEvent },
    Rsc  => rsc::{ RscRequest, RscEvent },
    Gl   => gl::{ GlRequest, GlEvent },
    Fm   => fm::{ FmRequest, FmEvent },
}

/// A decoded `DATA_REQ`: the peer address and what to ask of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCall {
    pub addr: BdAddr,
    pub request: ProfileRequest,
}

// ───────────────────────────────────────────────────────────────
// Registration entry
// ───────────────────────────────────────────────────────────────

/// Request decoder: `(msg_id, param) -> call`.
pub type DecodeFn = fn(u8, &[u8]) -> Result<ProfileCall, WireError>;

/// Event encoder: `None` if the event belongs to another profile.
pub type EncodeFn = fn(&ProfileEvent) -> Option<Result<(u8, Param), WireError>>;

/// `(service identifier) -> (decode fn, encode fn, max id)`.
pub struct ProfileEntry {
    pub id: ProfileId,
    pub service_uuid: u16,
    /// First `DATA_REQ` id past the end of this profile's table.
    pub req_max: u8,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

impl ProfileEntry {
    /// Request ids start at 1; 0 and `req_max..` are out of range.
    pub fn in_range(&self, msg_id: u8) -> bool {
        msg_id != 0 && msg_id < self.req_max
    }

    pub fn decode_request(&self, msg_id: u8, param: &[u8]) -> Result<ProfileCall, WireError> {
        (self.decode)(msg_id, param)
    }

    /// Encode `event` as a `DATA_IND` message.
    pub fn encode_event(&self, event: &ProfileEvent) -> Option<Result<EaciMessage, WireError>> {
        (self.encode)(event).map(|res| {
            res.map(|(msg_id, param)| EaciMessage::from_param(MsgType::DataInd, msg_id, param))
        })
    }
}

/// Build an indication parameter block: `[uuid LE, body..]`.
pub(crate) fn indication<T: WireField>(
    uuid: u16,
    msg_id: u8,
    body: &T,
) -> Result<(u8, Param), WireError> {
    let mut w = ParamWriter::new();
    w.write(&uuid)?;
    w.write(body)?;
    Ok((msg_id, w.finish()))
}

// ───────────────────────────────────────────────────────────────
// Registry
// ───────────────────────────────────────────────────────────────

/// Profiles available on this build, selected at start-up.
pub struct ProfileRegistry {
    entries: Vec<&'static ProfileEntry, MAX_PROFILES>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register every id in `ids`, ignoring duplicates.
    pub fn with_profiles(ids: &[ProfileId]) -> Self {
        let mut reg = Self::new();
        for &id in ids {
            reg.register(id);
        }
        reg
    }

    /// Returns `false` if already present or the table is full.
    pub fn register(&mut self, id: ProfileId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.push(id.entry()).is_ok()
    }

    pub fn contains(&self, id: ProfileId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ProfileId) -> Option<&'static ProfileEntry> {
        self.entries.iter().copied().find(|e| e.id == id)
    }

    pub fn by_uuid(&self, uuid: u16) -> Option<&'static ProfileEntry> {
        self.entries.iter().copied().find(|e| e.service_uuid == uuid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ProfileEntry> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
