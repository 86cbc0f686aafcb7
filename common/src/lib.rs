//! # rdpctl common
//!
//! Shared vocabulary of the dispatcher: the command model, the capability
//! provider boundary, the operator session, target parsing and the error
//! taxonomy. Nothing in here performs I/O on its own.

pub mod capability;
pub mod command;
pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod session;

#[doc(hidden)]
pub use tracing;
