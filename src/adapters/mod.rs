//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter     | Implements | Connects to       |
//! |-------------|------------|-------------------|
//! | `log_stack` | StackPort  | Serial log output |

pub mod log_stack;
