//! Unified error types for the EACI bridge.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! service's error handling uniform. All variants are `Copy` so they can
//! be passed through the receive path without allocation.

use core::fmt;

use crate::eaci::wire::WireError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A parameter block could not be decoded or encoded.
    Wire(WireError),
    /// The UART side failed.
    Link(LinkError),
    /// Configuration is invalid.
    Config(&'static str),
    /// A profile was named that is not registered.
    ProfileNotRegistered,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::ProfileNotRegistered => write!(f, "profile not registered"),
        }
    }
}

impl core::error::Error for Error {}

impl From<WireError> for Error {
    fn from(e: WireError) -> Self {
        Self::Wire(e)
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The TX queue is full; the frame was dropped.
    QueueFull,
    /// The transport rejected a write.
    Transport,
    /// A pre-encoded PDU's length byte does not match its size.
    InvalidPdu,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "TX queue full"),
            Self::Transport => write!(f, "transport write failed"),
            Self::InvalidPdu => write!(f, "malformed PDU"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
