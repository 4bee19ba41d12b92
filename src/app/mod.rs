//! Application core: dispatch and bookkeeping, zero I/O.
//!
//! Host messages are routed by the [`dispatch::Dispatcher`] to the BLE
//! stack through the [`ports::StackPort`] trait; stack results come back
//! as [`events::StackEvent`]s. [`service::EaciApp`] ties the two paths to
//! the framing layer.

pub mod connections;
pub mod dispatch;
pub mod env;
pub mod events;
pub mod ports;
pub mod service;

pub use dispatch::{DropReason, Outcome};
pub use events::StackEvent;
pub use ports::StackPort;
pub use service::EaciApp;
