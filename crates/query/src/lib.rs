//! Where archive pages live, and how listing filters are written into a
//! work-search query.

pub mod error;
mod filter;
mod page;

pub use crate::filter::{
    Completion, Crossover, DateRange, FilterSelections, Slider, SortColumn, Sorting, TagSelections, WordCount, encode,
    encode_on,
};
pub use crate::page::{Address, DEFAULT_BASE, DEFAULT_BASE_URL, MediaCategory, Page, ProfileSection};
