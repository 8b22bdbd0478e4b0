//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + config produce:
//!     → tracing events (route registration, builds, reloads)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered by RUST_LOG)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; the binary installs the subscriber
//! - Build output goes to stdout, logs to stderr, so generated output
//!   stays pipeable

pub mod logging;
