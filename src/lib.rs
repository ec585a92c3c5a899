//! waiver library crate — the pipeline behind the `waiver-request` binary.
//!
//! The primary interface is the binary. This lib.rs exposes the stages so
//! integration tests and other front ends can drive them directly, and so a
//! real PDF combiner can be plugged in through [`assemble::Assembler`].

pub mod assemble;
pub mod config;
pub mod confirm;
pub mod error;
pub mod folder;
pub mod format;
pub mod ids;
pub mod matcher;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod telemetry;

pub use error::{Result, WaiverError};
