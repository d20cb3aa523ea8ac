//! Service layer for the gapminder dataset.
//! - Defines the wire record and the storage-to-wire field mapping.
//! - Hides the two backing stores (CSV file, relational table) behind one source trait.
//! - Classifies failures so the HTTP layer can pick a status code.

pub mod errors;
pub mod gapminder;
#[cfg(test)]
pub mod test_support;
