//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the canonical tree and various text representations.

pub mod html;
pub mod json;
pub mod text;

pub use html::{HtmlFormat, HtmlTables};
pub use json::JsonFormat;
pub use text::TextFormat;
