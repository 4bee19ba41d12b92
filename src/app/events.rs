//! Inbound stack events.
//!
//! The BLE stack reports results through these. The
//! [`EaciApp`](super::service::EaciApp) updates its connection and
//! profile tables from them, then encodes each one for the host.

use crate::gap::GapEvent;
use crate::profiles::ProfileEvent;

/// Events reported by the BLE stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    /// Advertising, scan and connection events (sent as `EVT`).
    Gap(GapEvent),

    /// A profile client event on the connection `conhdl` (sent as `DATA_IND`).
    Profile { conhdl: u16, event: ProfileEvent },
}

impl From<GapEvent> for StackEvent {
    fn from(event: GapEvent) -> Self {
        Self::Gap(event)
    }
}
