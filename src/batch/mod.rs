//! CSV-driven bulk operations.
//!
//! Both batch kinds share the same row lifecycle: read the whole file up
//! front, drop the header row, then process each data row start-to-finish
//! in file order, emitting exactly one outcome line per row. A row that
//! fails against the remote API is reported and never stops the rows after
//! it; only file-level problems abort the run.

mod input;
pub mod merge_request;
pub mod tag;

pub use input::read_batch_file;
