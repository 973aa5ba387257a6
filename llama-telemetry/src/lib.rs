//! # llama-telemetry
//!
//! Structured logging for the Azure Llama client crates.
//!
//! Re-exports the `tracing` macros so library crates log through a single
//! surface, and provides a `Once`-guarded subscriber initializer for
//! binaries.
//!
//! ## Usage
//!
//! ```rust
//! use llama_telemetry::{info, init_telemetry};
//!
//! init_telemetry("my-service").expect("Failed to initialize telemetry");
//! info!("ready");
//! ```

pub mod init;

// Re-export tracing macros for convenience
pub use tracing::{Span, debug, error, info, instrument, trace, warn};

// Re-export init functions
pub use init::init_telemetry;
