#![cfg(test)]
use std::io::Write;

use models::testing;
use tempfile::NamedTempFile;

use crate::gapminder::repo::seaorm::SeaOrmGapminderRepository;

/// Repository over a fresh in-memory database with an empty `gapminder_data` table.
pub async fn memory_repository() -> Result<SeaOrmGapminderRepository, anyhow::Error> {
    let db = testing::memory_db_with_table().await?;
    Ok(SeaOrmGapminderRepository::new(db))
}

/// Write `contents` to a temp file that lives as long as the returned handle.
pub fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}

pub const FIXTURE_CSV: &str = "\
country,continent,year,lifeExp,pop,gdpPercap
Afghanistan,Asia,1952,28.801,8425333,779.4453145
Albania,Europe,1952,55.23,1282697,1601.056136
Algeria,Africa,1952,43.077,9279525,2449.008185
";
