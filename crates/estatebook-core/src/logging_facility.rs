//! Structured logging facility
//!
//! - One initialization point, `init(profile)`
//! - Operation macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - In-memory capture for asserting on events in tests
//!
//! # Usage
//!
//! ```rust
//! use estatebook_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
