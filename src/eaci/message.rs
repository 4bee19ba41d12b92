//! EACI message model and frame encoding.
//!
//! Wire format:
//! ```text
//! ┌──────────┬────────┬───────────┬───────────────────────┐
//! │ msg_type │ msg_id │ param_len │ param (param_len B)   │
//! │ 1B       │ 1B     │ 1B (0-255)│                       │
//! └──────────┴────────┴───────────┴───────────────────────┘
//! ```

use core::fmt;

use heapless::Vec;

use super::wire::{MAX_PARAM_LEN, Param, WireError};

/// Frame header size (`msg_type`, `msg_id`, `param_len`).
pub const HEADER_SIZE: usize = 3;

/// Largest encoded frame.
pub const MAX_FRAME_LEN: usize = HEADER_SIZE + MAX_PARAM_LEN;

/// An encoded frame ready for the UART.
pub type Frame = Vec<u8, MAX_FRAME_LEN>;

/// `msg_id` used by every DATA_ERROR PDU.
pub const DATA_ERROR_ID: u8 = 0x00;

/// First byte of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MsgType {
    /// Host → device GAP command.
    Cmd = 0xEA,
    /// Host → device profile request.
    DataReq = 0xEB,
    /// Device → host profile indication.
    DataInd = 0xEC,
    /// Device → host GAP event.
    Evt = 0xED,
    /// Device → host protocol error report.
    DataError = 0xFA,
}

impl MsgType {
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0xEA => Some(Self::Cmd),
            0xEB => Some(Self::DataReq),
            0xEC => Some(Self::DataInd),
            0xED => Some(Self::Evt),
            0xFA => Some(Self::DataError),
            _ => None,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Reason code carried by a DATA_ERROR PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Unrecognised `msg_type` byte.
    Type = 0x01,
    /// `msg_id` at or beyond the profile's declared maximum.
    MsgOutOfRange = 0x02,
    /// `param_len` larger than the receive buffer.
    Length = 0x03,
}

impl ErrorCode {
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0x01 => Some(Self::Type),
            0x02 => Some(Self::MsgOutOfRange),
            0x03 => Some(Self::Length),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "unknown message type"),
            Self::MsgOutOfRange => write!(f, "message id out of range"),
            Self::Length => write!(f, "parameter length too large"),
        }
    }
}

/// One complete EACI message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EaciMessage {
    pub msg_type: MsgType,
    pub msg_id: u8,
    pub param: Param,
}

impl EaciMessage {
    pub fn new(msg_type: MsgType, msg_id: u8, param: &[u8]) -> Result<Self, WireError> {
        let param = Vec::from_slice(param).map_err(|()| WireError::Overflow)?;
        Ok(Self {
            msg_type,
            msg_id,
            param,
        })
    }

    pub fn from_param(msg_type: MsgType, msg_id: u8, param: Param) -> Self {
        Self {
            msg_type,
            msg_id,
            param,
        }
    }

    /// DATA_ERROR PDU carrying `code`.
    pub fn error(code: ErrorCode) -> Self {
        let mut param = Vec::new();
        // A one-byte push into an empty 255-byte buffer cannot fail.
        let _ = param.push(code as u8);
        Self::from_param(MsgType::DataError, DATA_ERROR_ID, param)
    }

    pub fn param_len(&self) -> u8 {
        self.param.len() as u8
    }

    /// Encode as `[msg_type, msg_id, param_len, param..]`.
    pub fn encode(&self) -> Frame {
        let mut frame = Vec::new();
        // HEADER_SIZE + param.len() <= MAX_FRAME_LEN by construction.
        let _ = frame.extend_from_slice(&[self.msg_type.as_u8(), self.msg_id, self.param_len()]);
        let _ = frame.extend_from_slice(&self.param);
        frame
    }

    /// Parse one complete, pre-encoded frame.
    pub fn decode(frame: &[u8]) -> Result<Self, WireError> {
        if frame.len() < HEADER_SIZE {
            return Err(WireError::Truncated);
        }
        let msg_type = MsgType::from_u8(frame[0]).ok_or(WireError::Invalid("msg_type"))?;
        let len = frame[2] as usize;
        if frame.len() - HEADER_SIZE != len {
            return Err(WireError::Invalid("param_len"));
        }
        Self::new(msg_type, frame[1], &frame[HEADER_SIZE..])
    }
}
