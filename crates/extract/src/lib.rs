//! Typed extraction of archive pages.
//!
//! Parse a page once with [`Extractor`], then ask it for whichever entity the
//! page carries. Every extractor returns `None` when the markup it cannot do
//! without is missing; individual fields degrade instead of failing the page.

mod consts;
mod dom;
pub mod error;
mod extract;
mod fields;
pub mod models;
pub mod thread;

pub use crate::extract::Extractor;
pub use crate::fields::{parse_count, slice_between, web_friendly};
pub use crate::thread::{ThreadNode, ThreadShape};
