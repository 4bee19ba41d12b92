//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific path of the
//! bridge against mock adapters. All tests run on the host with no UART
//! or BLE stack attached.

mod bridge_tests;
mod event_tests;
mod mock_stack;
mod tx_queue_tests;
