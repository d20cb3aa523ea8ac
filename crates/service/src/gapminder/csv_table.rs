//! Reads a CSV file into ordered JSON rows.
//!
//! Header names are kept verbatim. Each column gets one type for the whole
//! file: integer if every non-empty cell parses as `i64`, else float if every
//! one parses as `f64`, else boolean for `true`/`false`, else string. Empty
//! cells become `null`.
use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde_json::Value;

use super::domain::Row;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnKind {
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let (mut int, mut float, mut boolean) = (true, true, true);
        let mut seen = false;
        for cell in cells.filter(|c| !c.is_empty()) {
            seen = true;
            int = int && cell.parse::<i64>().is_ok();
            float = float && parse_finite(cell).is_some();
            boolean = boolean && parse_bool(cell).is_some();
            if !(int || float || boolean) {
                return Self::Text;
            }
        }
        match (seen, int, float, boolean) {
            (false, ..) => Self::Text,
            (_, true, ..) => Self::Integer,
            (_, _, true, _) => Self::Float,
            (_, _, _, true) => Self::Boolean,
            _ => Self::Text,
        }
    }

    fn convert(self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        let text = || Value::String(cell.to_owned());
        match self {
            Self::Integer => cell.parse::<i64>().map_or_else(|_| text(), Value::from),
            Self::Float => parse_finite(cell).map_or_else(text, Value::from),
            Self::Boolean => parse_bool(cell).map_or_else(text, Value::Bool),
            Self::Text => text(),
        }
    }
}

/// `NaN` and infinities have no JSON number form, so they do not count as floats.
fn parse_finite(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Repeated header names get the first free `.N` suffix so no column is
/// silently dropped. Names already present in the header are never reused.
fn dedupe_headers(names: &[&str]) -> Vec<String> {
    let mut used: HashSet<String> = names.iter().map(|n| (*n).to_owned()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut next_suffix: HashMap<&str, usize> = HashMap::new();
    names
        .iter()
        .map(|&name| {
            if seen.insert(name) {
                return name.to_owned();
            }
            let n = next_suffix.entry(name).or_insert(1);
            loop {
                let candidate = format!("{name}.{n}");
                *n += 1;
                if used.insert(candidate.clone()) {
                    return candidate;
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl CsvTable {
    /// Load and parse the whole file. A missing or unreadable file is
    /// `SourceUnavailable`; a ragged or non-UTF-8 row is `MalformedRecord`.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ServiceError::SourceUnavailable(format!("{}: {e}", path.display())))?;
        Self::parse(&bytes)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, ServiceError> {
        let malformed = |e: csv::Error| ServiceError::MalformedRecord(e.to_string());

        let mut reader = csv::ReaderBuilder::new().from_reader(bytes);
        let header_record = reader.headers().map_err(malformed)?;
        if header_record.is_empty() {
            return Err(ServiceError::MalformedRecord("file has no header row".into()));
        }
        let headers = dedupe_headers(&header_record.iter().collect::<Vec<_>>());

        let records = reader
            .records()
            .collect::<Result<Vec<csv::StringRecord>, _>>()
            .map_err(malformed)?;

        let kinds: Vec<ColumnKind> = (0..headers.len())
            .map(|i| ColumnKind::infer(records.iter().map(|r| r.get(i).unwrap_or(""))))
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .zip(&kinds)
                    .zip(record.iter())
                    .map(|((name, kind), cell)| (name.clone(), kind.convert(cell)))
                    .collect::<Row>()
            })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Names from `expected` that the header does not contain.
    pub fn missing_columns(&self, expected: &[&str]) -> Vec<String> {
        expected
            .iter()
            .filter(|name| !self.headers.iter().any(|h| h == *name))
            .map(|name| (*name).to_owned())
            .collect()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::gapminder::domain::WIRE_FIELDS;
    use crate::test_support::{csv_file, FIXTURE_CSV};

    #[test]
    fn fixture_rows_have_typed_values_in_file_order() {
        let table = CsvTable::parse(FIXTURE_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let rows = table.into_rows();
        assert_eq!(
            Value::Object(rows[0].clone()),
            json!({
                "country": "Afghanistan",
                "continent": "Asia",
                "year": 1952,
                "lifeExp": 28.801,
                "pop": 8425333,
                "gdpPercap": 779.4453145
            })
        );
        let countries: Vec<&Value> = rows.iter().map(|r| &r["country"]).collect();
        assert_eq!(countries, [&json!("Afghanistan"), &json!("Albania"), &json!("Algeria")]);
    }

    #[test]
    fn keys_keep_header_order() {
        let rows = CsvTable::parse(FIXTURE_CSV.as_bytes()).unwrap().into_rows();
        let keys: Vec<&str> = rows[1].keys().map(String::as_str).collect();
        assert_eq!(keys, WIRE_FIELDS);
    }

    #[test]
    fn header_names_are_not_renamed() {
        let table = CsvTable::parse(b"country,life_exp\nChad,38.092\n").unwrap();
        assert_eq!(table.headers(), ["country", "life_exp"]);
        assert_eq!(table.missing_columns(&WIRE_FIELDS), ["continent", "year", "lifeExp", "pop", "gdpPercap"]);
        assert_eq!(table.into_rows()[0]["life_exp"], json!(38.092));
    }

    #[test]
    fn one_float_makes_the_whole_column_float() {
        let rows = CsvTable::parse(b"v\n1\n2.5\n").unwrap().into_rows();
        assert!(rows[0]["v"].is_f64());
        assert_eq!(rows[0]["v"], json!(1.0));
    }

    #[test]
    fn one_word_makes_the_whole_column_text() {
        let rows = CsvTable::parse(b"year\n1952\nunknown\n").unwrap().into_rows();
        assert_eq!(rows[0]["year"], json!("1952"));
        assert_eq!(rows[1]["year"], json!("unknown"));
    }

    #[test]
    fn booleans_and_blanks() {
        let rows = CsvTable::parse(b"flag,n\nTrue,\nfalse,3\n").unwrap().into_rows();
        assert_eq!(rows[0]["flag"], json!(true));
        assert_eq!(rows[1]["flag"], json!(false));
        assert_eq!(rows[0]["n"], Value::Null);
        assert_eq!(rows[1]["n"], json!(3));
    }

    #[test]
    fn duplicate_headers_get_suffixes() {
        let table = CsvTable::parse(b"a,a,b\n1,2,3\n").unwrap();
        assert_eq!(table.headers(), ["a", "a.1", "b"]);
    }

    #[test]
    fn suffix_skips_names_already_in_header() {
        let table = CsvTable::parse(b"a,a,a.1\n1,2,3\n").unwrap();
        assert_eq!(table.headers(), ["a", "a.2", "a.1"]);
        let row = &table.into_rows()[0];
        assert_eq!(row.len(), 3);
        assert_eq!(row["a"], json!(1));
        assert_eq!(row["a.2"], json!(2));
        assert_eq!(row["a.1"], json!(3));
    }

    #[test]
    fn non_finite_words_stay_text() {
        let rows = CsvTable::parse(b"country,v\nNan,inf\nNamibia,1.5\n").unwrap().into_rows();
        assert_eq!(rows[0]["country"], json!("Nan"));
        assert_eq!(rows[0]["v"], json!("inf"));
        assert_eq!(rows[1]["v"], json!("1.5"));

        let rows = CsvTable::parse(b"country\nNaN\n").unwrap().into_rows();
        assert_eq!(rows[0]["country"], json!("NaN"));
    }

    #[test]
    fn header_only_file_is_empty() {
        let table = CsvTable::parse(b"country,continent,year,lifeExp,pop,gdpPercap\n").unwrap();
        assert!(table.is_empty());
        assert!(table.missing_columns(&WIRE_FIELDS).is_empty());
    }

    #[test]
    fn empty_file_is_malformed() {
        let err = CsvTable::parse(b"").unwrap_err();
        assert!(matches!(err, ServiceError::MalformedRecord(_)));
    }

    #[test]
    fn ragged_row_fails_the_whole_table() {
        let err = CsvTable::parse(b"a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, ServiceError::MalformedRecord(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn read_loads_file_from_disk() {
        let file = csv_file(FIXTURE_CSV);
        let table = CsvTable::read(file.path()).await.unwrap();
        assert_eq!(table.len(), 3);
    }

    #[tokio::test]
    async fn missing_file_is_source_unavailable() {
        let err = CsvTable::read("/nonexistent/gapminder.csv").await.unwrap_err();
        assert!(matches!(err, ServiceError::SourceUnavailable(_)));
        assert!(err.to_string().contains("/nonexistent/gapminder.csv"));
    }
}
