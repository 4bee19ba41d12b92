//! Log-based stack adapter.
//!
//! Implements [`StackPort`] by writing every request to the logger.
//! Used when no BLE stack is attached, e.g. to watch a host drive the
//! bridge over the UART.

use log::info;

use crate::app::ports::StackPort;
use crate::gap::GapRequest;
use crate::profiles::ProfileRequest;

/// Adapter that logs every stack request.
#[derive(Debug, Default)]
pub struct LogStack {
    requests: u32,
}

impl LogStack {
    pub fn new() -> Self {
        Self { requests: 0 }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> u32 {
        self.requests
    }
}

impl StackPort for LogStack {
    fn gap_request(&mut self, request: &GapRequest) {
        self.requests = self.requests.wrapping_add(1);
        match request {
            GapRequest::Advertise { intv_min, intv_max } => {
                info!("GAP | advertise intv={:#06x}..{:#06x}", intv_min, intv_max);
            }
            GapRequest::StopAdvertising => info!("GAP | stop advertising"),
            GapRequest::Scan { start } => {
                info!("GAP | scan {}", if *start { "start" } else { "stop" });
            }
            GapRequest::Connect { addr } => info!("GAP | connect {}", addr),
            GapRequest::Disconnect { conhdl } => info!("GAP | disconnect conhdl={}", conhdl),
            GapRequest::SetDevName { name } => {
                info!("GAP | set name {:?}", core::str::from_utf8(name).unwrap_or("<binary>"));
            }
            GapRequest::Bond { conhdl } => info!("GAP | bond conhdl={}", conhdl),
            GapRequest::UpdateParam { conhdl, params } => {
                info!(
                    "GAP | update conhdl={} intv={}..{} latency={} timeout={}",
                    conhdl, params.intv_min, params.intv_max, params.latency, params.timeout
                );
            }
        }
    }

    fn profile_request(&mut self, conhdl: u16, request: &ProfileRequest) {
        self.requests = self.requests.wrapping_add(1);
        info!(
            "{:?} | conhdl={} | {:?}",
            request.profile(),
            conhdl,
            request
        );
    }
}
