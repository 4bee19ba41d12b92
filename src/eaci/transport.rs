//! Transport abstraction for the EACI UART.
//!
//! The link writes one complete frame at a time and waits for the
//! driver's completion callback ([`EaciLink::tx_done`]) before starting
//! the next. Reads are non-blocking and return whatever the receive
//! FIFO holds.
//!
//! [`EaciLink::tx_done`]: super::link::EaciLink::tx_done

/// Byte-oriented UART channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Start transmitting `frame`. Completion is signalled separately
    /// through the link's `tx_done`.
    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

/// A null transport that discards all writes and never reads.
/// Useful when the host side is not attached yet.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = ();

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> {
        Ok(0)
    }

    fn write(&mut self, _frame: &[u8]) -> Result<(), ()> {
        Ok(())
    }
}
