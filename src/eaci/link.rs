//! Outbound EACI path: TX state and pending-frame queue.
//!
//! ```text
//!  send() ──▶ Idle?  ──yes──▶ Transport::write ──▶ Ongoing
//!               │no
//!               ▼
//!           TxQueue (FIFO) ──▶ tx_done() pops next ──▶ Transport::write
//!                                   │ empty
//!                                   ▼
//!                                  Idle
//! ```
//!
//! The queue is an `embassy-sync` bounded channel guarded by a
//! critical-section mutex, so any producer holding a shared reference
//! can push while the TX-completion path pops.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use log::{debug, warn};

use super::message::{EaciMessage, Frame, HEADER_SIZE};
use super::transport::Transport;
use crate::error::LinkError;

/// Number of frames that may wait for the UART.
pub const TX_QUEUE_DEPTH: usize = 16;

/// Transmit state of the UART.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// No write in flight.
    Idle,
    /// A frame is being written; the next waits for `tx_done`.
    Ongoing,
}

/// Bounded FIFO of encoded frames awaiting the UART.
pub struct TxQueue {
    chan: Channel<CriticalSectionRawMutex, Frame, TX_QUEUE_DEPTH>,
}

impl TxQueue {
    pub const fn new() -> Self {
        Self {
            chan: Channel::new(),
        }
    }

    pub fn push(&self, frame: Frame) -> Result<(), LinkError> {
        self.chan.try_send(frame).map_err(|_| LinkError::QueueFull)
    }

    pub fn pop(&self) -> Option<Frame> {
        self.chan.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.chan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chan.is_empty()
    }

    pub fn clear(&self) {
        self.chan.clear();
    }
}

impl Default for TxQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// UART-facing half of the EACI layer.
pub struct EaciLink<T: Transport> {
    transport: T,
    state: TxState,
    queue: TxQueue,
}

impl<T: Transport> EaciLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: TxState::Idle,
            queue: TxQueue::new(),
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Encode and send `msg`, queueing it if a write is in flight.
    pub fn send(&mut self, msg: &EaciMessage) -> Result<(), LinkError> {
        self.send_frame(msg.encode())
    }

    /// Send a pre-encoded frame `[type, id, len, param..]`.
    ///
    /// `buf[2]` must equal `buf.len() - 3`.
    pub fn pdu_send(&mut self, buf: &[u8]) -> Result<(), LinkError> {
        if buf.len() < HEADER_SIZE || buf[2] as usize != buf.len() - HEADER_SIZE {
            warn!("EACI tx: malformed pdu ({} bytes)", buf.len());
            return Err(LinkError::InvalidPdu);
        }
        let frame = Vec::from_slice(buf).map_err(|()| LinkError::InvalidPdu)?;
        self.send_frame(frame)
    }

    /// UART completion callback: start the next queued frame, if any.
    pub fn tx_done(&mut self) -> Result<(), LinkError> {
        match self.queue.pop() {
            Some(frame) => {
                self.state = TxState::Idle;
                self.start(&frame)
            }
            None => {
                self.state = TxState::Idle;
                Ok(())
            }
        }
    }

    /// Drop everything queued and return to `Idle`.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.state = TxState::Idle;
    }

    fn send_frame(&mut self, frame: Frame) -> Result<(), LinkError> {
        match self.state {
            TxState::Idle if self.queue.is_empty() => self.start(&frame),
            TxState::Idle => {
                // A failed write left older frames queued; they go first.
                self.queue.push(frame).inspect_err(|_| {
                    warn!("EACI tx: queue full, dropping frame");
                })?;
                self.tx_done()
            }
            TxState::Ongoing => {
                self.queue.push(frame).inspect_err(|_| {
                    warn!("EACI tx: queue full, dropping frame");
                })
            }
        }
    }

    fn start(&mut self, frame: &[u8]) -> Result<(), LinkError> {
        debug!("EACI tx: {:02X?}", frame);
        match self.transport.write(frame) {
            Ok(()) => {
                self.state = TxState::Ongoing;
                Ok(())
            }
            Err(e) => {
                warn!("EACI tx: transport write failed: {:?}", e);
                Err(LinkError::Transport)
            }
        }
    }
}
