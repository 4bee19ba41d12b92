//! Easy ACI protocol layer.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      EACI Stack                            │
//! │                                                            │
//! │  ┌───────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │  │ Transport │──▶│ FrameDecoder │──▶│ Dispatcher (app) │   │
//! │  │ (UART rx) │   │ (codec)      │   │  → StackPort     │   │
//! │  └───────────┘   └──────────────┘   └──────────────────┘   │
//! │       ▲                                      │             │
//! │       │              ┌───────────────────────┘             │
//! │       │              ▼                                     │
//! │  ┌───────────┐   ┌──────────────┐                          │
//! │  │ Transport │◀──│  EaciLink    │   (TX queue, tx_done)    │
//! │  │ (UART tx) │   │              │                          │
//! │  └───────────┘   └──────────────┘                          │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod codec;
pub mod link;
pub mod message;
pub mod transport;
pub mod wire;
