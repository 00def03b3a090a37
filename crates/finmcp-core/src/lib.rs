//! Core abstractions for finmcp
//!
//! This crate defines the request [`Context`] handed to every tool invocation
//! and the [`Error`] type tools report back to the protocol server.

pub mod context;
pub mod error;

pub use context::Context;
pub use error::{Error, Result};
