//! Data model shared by the extractor and the mapper.
//!
//! [`RawCell`] is what a sheet reader hands over before resolution;
//! [`Table`] is the rectangular string table produced from those cells.

mod cell;
mod table;

pub use cell::*;
pub use table::*;
