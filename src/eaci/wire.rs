//! Declarative little-endian parameter schema.
//!
//! Every EACI parameter block is a fixed positional layout of
//! little-endian fields. Instead of hand-written shifts in each adapter,
//! layouts are declared once with [`wire_struct!`] and read or written
//! through a single [`ParamReader`] / [`ParamWriter`] pair.
//!
//! ```text
//! wire_struct! { pub struct CfgNtf { pub ntf_cfg: u16, pub addr: BdAddr } }
//!
//!   param:  ┌─────────┬───────────────────────┐
//!           │ ntf_cfg │ addr (6B, LSB first)  │
//!           │ LE u16  │                       │
//!           └─────────┴───────────────────────┘
//! ```

use core::fmt;

use heapless::Vec;
use serde::{Deserialize, Serialize};

/// Largest parameter block a single EACI frame can carry.
pub const MAX_PARAM_LEN: usize = 255;

/// Owned parameter block.
pub type Param = Vec<u8, MAX_PARAM_LEN>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// The parameter block ended before the layout was complete.
    Truncated,
    /// The encoded layout does not fit into one parameter block.
    Overflow,
    /// A `msg_id` has no layout in this adapter.
    UnknownId(u8),
    /// A field value is outside the range its layout allows.
    Invalid(&'static str),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "parameter block truncated"),
            Self::Overflow => write!(f, "parameter block overflow"),
            Self::UnknownId(id) => write!(f, "no layout for msg_id {id}"),
            Self::Invalid(what) => write!(f, "invalid field: {what}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Reader / writer
// ---------------------------------------------------------------------------

/// Cursor over a received parameter block.
pub struct ParamReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ParamReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Take exactly `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let end = self.pos.checked_add(n).ok_or(WireError::Truncated)?;
        let bytes = self.buf.get(self.pos..end).ok_or(WireError::Truncated)?;
        self.pos = end;
        Ok(bytes)
    }

    /// Take every byte that is left.
    pub fn rest(&mut self) -> &'a [u8] {
        let bytes = &self.buf[self.pos..];
        self.pos = self.buf.len();
        bytes
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read one field of type `T`.
    pub fn read<T: WireField>(&mut self) -> Result<T, WireError> {
        T::read(self)
    }
}

/// Builder for an outbound parameter block.
#[derive(Default)]
pub struct ParamWriter {
    buf: Param,
}

impl ParamWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn put(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.buf
            .extend_from_slice(bytes)
            .map_err(|_| WireError::Overflow)
    }

    /// Append one field of type `T`.
    pub fn write<T: WireField>(&mut self, value: &T) -> Result<(), WireError> {
        value.write(self)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Param {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// Field trait
// ---------------------------------------------------------------------------

/// A value with a fixed little-endian wire representation.
pub trait WireField: Sized {
    fn read(r: &mut ParamReader<'_>) -> Result<Self, WireError>;
    fn write(&self, w: &mut ParamWriter) -> Result<(), WireError>;

    /// Decode `Self` from the front of `param`. Trailing bytes are ignored.
    fn from_param(param: &[u8]) -> Result<Self, WireError> {
        Self::read(&mut ParamReader::new(param))
    }
}

macro_rules! impl_wire_int {
    ($($ty:ty),*) => {$(
        impl WireField for $ty {
            fn read(r: &mut ParamReader<'_>) -> Result<Self, WireError> {
                let bytes = r.take(core::mem::size_of::<$ty>())?;
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                Ok(<$ty>::from_le_bytes(raw))
            }

            fn write(&self, w: &mut ParamWriter) -> Result<(), WireError> {
                w.put(&self.to_le_bytes())
            }
        }
    )*};
}

impl_wire_int!(u8, i8, u16, i16, u32);

impl WireField for () {
    fn read(_r: &mut ParamReader<'_>) -> Result<Self, WireError> {
        Ok(())
    }

    fn write(&self, _w: &mut ParamWriter) -> Result<(), WireError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bluetooth device address
// ---------------------------------------------------------------------------

/// 6-byte Bluetooth device address, stored in wire order (LSB first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BdAddr(pub [u8; 6]);

impl BdAddr {
    /// The all-ones address the host uses for "no peer".
    pub const UNRESOLVED: Self = Self([0xFF; 6]);

    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for BdAddr {
    // Printed MSB first, the conventional human-readable order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[5], b[4], b[3], b[2], b[1], b[0]
        )
    }
}

impl WireField for BdAddr {
    fn read(r: &mut ParamReader<'_>) -> Result<Self, WireError> {
        let mut raw = [0u8; 6];
        raw.copy_from_slice(r.take(6)?);
        Ok(Self(raw))
    }

    fn write(&self, w: &mut ParamWriter) -> Result<(), WireError> {
        w.put(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Variable-length fields
// ---------------------------------------------------------------------------

/// Trailing bytes up to the end of the parameter block (at most `N`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tail<const N: usize>(pub Vec<u8, N>);

impl<const N: usize> Tail<N> {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        Vec::from_slice(bytes).map(Self).map_err(|()| WireError::Overflow)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> WireField for Tail<N> {
    fn read(r: &mut ParamReader<'_>) -> Result<Self, WireError> {
        Self::from_slice(r.rest())
    }

    fn write(&self, w: &mut ParamWriter) -> Result<(), WireError> {
        w.put(&self.0)
    }
}

/// A `u8` element count followed by that many fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Counted<T, const N: usize>(pub Vec<T, N>);

impl<T: WireField, const N: usize> WireField for Counted<T, N> {
    fn read(r: &mut ParamReader<'_>) -> Result<Self, WireError> {
        let count = r.read::<u8>()? as usize;
        if count > N {
            return Err(WireError::Invalid("element count"));
        }
        let mut items = Vec::new();
        for _ in 0..count {
            // Capacity was checked against `count` above.
            let _ = items.push(r.read::<T>()?);
        }
        Ok(Self(items))
    }

    fn write(&self, w: &mut ParamWriter) -> Result<(), WireError> {
        w.write(&(self.0.len() as u8))?;
        for item in &self.0 {
            w.write(item)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Layout declaration macro
// ---------------------------------------------------------------------------

/// Declare a struct whose fields are laid out on the wire in declaration
/// order, and derive its [`WireField`] impl.
#[macro_export]
macro_rules! wire_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty ),*
        }

        impl $crate::eaci::wire::WireField for $name {
            #[allow(unused_variables)]
            fn read(
                r: &mut $crate::eaci::wire::ParamReader<'_>,
            ) -> Result<Self, $crate::eaci::wire::WireError> {
                Ok(Self {
                    $( $field: r.read::<$ty>()? ),*
                })
            }

            #[allow(unused_variables)]
            fn write(
                &self,
                w: &mut $crate::eaci::wire::ParamWriter,
            ) -> Result<(), $crate::eaci::wire::WireError> {
                $( w.write(&self.$field)?; )*
                Ok(())
            }
        }
    };
}
