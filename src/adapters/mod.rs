//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements   | Connects to       |
//! |------------|--------------|-------------------|
//! | `log_sink` | CreditSink   | Serial log output |

pub mod log_sink;
