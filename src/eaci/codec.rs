//! Streaming EACI frame decoder.
//!
//! Byte-driven receive state machine. Bytes arrive one at a time from the
//! UART receive path; the decoder reassembles them into complete
//! [`EaciMessage`]s and reports framing errors.
//!
//! ```text
//!            known type            id, len>0             len bytes
//!  RxStart ───────────▶ RxHdr ─────────────▶ RxPayl ───────────────▶ RxStart
//!     ▲  │ unknown type   │ len=0                                     (message)
//!     │  └─▶ Type error   └──────────────────────────────────────────▶ RxStart
//!     │                   │ len > max
//!     │                   └──▶ Length error ──▶ RxErr (discard len bytes)
//!     └───────────────────────────────────────────────┘
//! ```

use heapless::Vec;
use log::warn;

use super::message::{EaciMessage, ErrorCode, MsgType};
use super::wire::{MAX_PARAM_LEN, Param};

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxState {
    /// Waiting for a `msg_type` byte.
    RxStart,
    /// Type received; reading `msg_id` then `param_len`.
    RxHdr { got_id: bool },
    /// Header received, reading payload.
    RxPayl { expected: usize },
    /// Oversized frame announced; skipping its payload.
    RxErr { remaining: usize },
}

/// Output of the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    Message(EaciMessage),
    Error(ErrorCode),
}

/// Streaming frame decoder.
pub struct FrameDecoder {
    state: RxState,
    max_param_len: usize,
    msg_type: MsgType,
    msg_id: u8,
    payload: Param,
}

impl FrameDecoder {
    /// Decoder accepting the full 255-byte parameter range.
    pub fn new() -> Self {
        Self::with_max_param_len(MAX_PARAM_LEN)
    }

    /// Decoder that rejects frames announcing more than `max_param_len`
    /// parameter bytes.
    pub fn with_max_param_len(max_param_len: usize) -> Self {
        Self {
            state: RxState::RxStart,
            max_param_len: max_param_len.min(MAX_PARAM_LEN),
            msg_type: MsgType::Cmd,
            msg_id: 0,
            payload: Vec::new(),
        }
    }

    pub fn state(&self) -> RxState {
        self.state
    }

    /// Consume one byte. Returns an event when a frame completes or fails.
    pub fn push_byte(&mut self, byte: u8) -> Option<FrameEvent> {
        match self.state {
            RxState::RxStart => match MsgType::from_u8(byte) {
                Some(ty) => {
                    self.msg_type = ty;
                    self.state = RxState::RxHdr { got_id: false };
                    None
                }
                None => {
                    warn!("EACI rx: unknown msg_type 0x{:02X}", byte);
                    Some(FrameEvent::Error(ErrorCode::Type))
                }
            },

            RxState::RxHdr { got_id: false } => {
                self.msg_id = byte;
                self.state = RxState::RxHdr { got_id: true };
                None
            }

            RxState::RxHdr { got_id: true } => {
                let len = byte as usize;
                self.payload.clear();

                if len > self.max_param_len {
                    warn!(
                        "EACI rx: param_len {} exceeds limit {}, discarding",
                        len, self.max_param_len
                    );
                    self.state = RxState::RxErr { remaining: len };
                    return Some(FrameEvent::Error(ErrorCode::Length));
                }

                if len == 0 {
                    return Some(self.complete());
                }

                self.state = RxState::RxPayl { expected: len };
                None
            }

            RxState::RxPayl { expected } => {
                // `expected <= max_param_len <= capacity`, so the push fits.
                let _ = self.payload.push(byte);
                if self.payload.len() == expected {
                    Some(self.complete())
                } else {
                    None
                }
            }

            RxState::RxErr { remaining } => {
                let remaining = remaining - 1;
                self.state = if remaining == 0 {
                    RxState::RxStart
                } else {
                    RxState::RxErr { remaining }
                };
                None
            }
        }
    }

    /// Feed a chunk of bytes, invoking `on_event` for every completed
    /// frame or framing error, in arrival order.
    pub fn feed(&mut self, data: &[u8], mut on_event: impl FnMut(FrameEvent)) {
        for &byte in data {
            if let Some(event) = self.push_byte(byte) {
                on_event(event);
            }
        }
    }

    /// Reset decoder state (e.g. after a UART break or re-init).
    pub fn reset(&mut self) {
        self.state = RxState::RxStart;
        self.payload.clear();
    }

    fn complete(&mut self) -> FrameEvent {
        self.state = RxState::RxStart;
        let param = core::mem::take(&mut self.payload);
        FrameEvent::Message(EaciMessage::from_param(self.msg_type, self.msg_id, param))
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
