//! Port traits: the boundary between the EACI bridge and the BLE stack.
//!
//! ```text
//!   Dispatcher ──▶ StackPort ──▶ BLE stack (GAP, profile clients)
//! ```
//!
//! The stack itself is opaque. Anything that can accept GAP and profile
//! requests implements [`StackPort`]: the real stack glue on target, the
//! [`LogStack`](crate::adapters::log_stack::LogStack) adapter, or a
//! recording mock in tests. Results come back asynchronously as
//! [`StackEvent`](super::events::StackEvent)s.

use crate::gap::GapRequest;
use crate::profiles::ProfileRequest;

// ───────────────────────────────────────────────────────────────
// Stack port (driven adapter: bridge → BLE stack)
// ───────────────────────────────────────────────────────────────

/// Request side of the BLE stack.
pub trait StackPort {
    /// Advertising, scanning and connection management.
    fn gap_request(&mut self, request: &GapRequest);

    /// A profile client request on the connection `conhdl`.
    fn profile_request(&mut self, conhdl: u16, request: &ProfileRequest);
}
