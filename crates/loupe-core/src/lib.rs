//! Core types and trait definitions for the Loupe design collector.
//!
//! This crate is deliberately free of HTTP, HTML and filesystem dependencies.
//! All other crates depend on it.

// Native `async fn` in traits; the futures are declared `Send` explicitly.
#![allow(async_fn_in_trait)]

pub mod analysis;
pub mod error;
pub mod generate;
pub mod record;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result};
