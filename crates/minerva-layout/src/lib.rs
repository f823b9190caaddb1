//! # minerva-layout
//!
//! Output adapters for Minerva expression trees: a bounded textual
//! serializer, a floating-point display formatter and a structural
//! display-layout builder.
//!
//! Serialization never overruns its buffer. [`serialize`] reports the
//! length the full text would occupy, so callers compare against the
//! buffer capacity to detect truncation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod float_format;
pub mod layout;
pub mod serialize;

#[cfg(test)]
mod proptests;

pub use float_format::{format_float, MAX_SIGNIFICANT_DIGITS};
pub use layout::{create_layout, LayoutNode};
pub use serialize::serialize;
