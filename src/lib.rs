//! Helpful Extensions
//!
//! Convenience helpers for application code: text cleanup, fixed-point
//! currency values, conflict-free alert presentation and image resizing.
//!
//! # Architecture
//!
//! - [`text`] - Grapheme-aware slicing, character filters, numeric and escape conversion
//! - [`numeric`] - [`DecimalValue`] arithmetic and locale currency formatting
//! - [`presentation`] - Visible-screen resolution over a [`presentation::ScreenHost`]
//! - [`dispatch`] - Main-thread job queue
//! - [`media`] - Resizing, desaturation and JPEG encoding
//! - [`net`], [`date`], [`device`], [`table`], [`record`] - Small platform helpers
//! - [`config`] - Configuration persistence
//! - [`utils`] - XDG directories
//!
//! # Conventions
//!
//! - Text and numeric helpers coerce bad input to a safe value (zero, empty)
//! - Image and presentation helpers return [`Result`] so callers decide what is fatal
//! - Platform singletons (locale, root screen, main thread) are explicit arguments

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod core;
pub mod date;
pub mod device;
pub mod dispatch;
pub mod media;
pub mod net;
pub mod numeric;
pub mod presentation;
pub mod record;
pub mod table;
pub mod text;
pub mod utils;

// Re-export commonly used types
pub use core::error::{Error, Result};
pub use numeric::{DecimalValue, Locale};
pub use text::TextExt;
