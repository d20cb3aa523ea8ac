//! Gapminder dataset: wire record, storage repository, CSV reader and the
//! source seam the HTTP layer depends on.

pub mod csv_table;
pub mod domain;
pub mod repo;
pub mod repository;
pub mod source;

pub use domain::{DataRecord, Row, WIRE_FIELDS};
pub use source::{CsvGapminderSource, DatabaseGapminderSource, GapminderSource};
