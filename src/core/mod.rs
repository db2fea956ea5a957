//! Shared error handling
//!
//! - [`error`]: the crate-wide [`Error`](error::Error) and `Result` alias

pub mod error;
