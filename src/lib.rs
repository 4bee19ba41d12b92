//! QN9020 Easy ACI bridge library.
//!
//! Frames, dispatches and adapts Easy ACI (EACI) host messages to the
//! GAP and profile-client API of a BLE stack. The stack and the UART are
//! reached only through the [`app::StackPort`] and
//! [`eaci::transport::Transport`] traits, so everything here runs on a
//! host for integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod eaci;
pub mod error;
pub mod gap;
pub mod profiles;
