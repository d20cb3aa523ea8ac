use serde::Serialize;
use serde_json::Value;

/// One JSON object of the response body. Keys keep insertion order.
pub type Row = serde_json::Map<String, Value>;

/// Wire field names in response order.
pub const WIRE_FIELDS: [&str; 6] = ["country", "continent", "year", "lifeExp", "pop", "gdpPercap"];

/// One country-year observation as seen by clients.
///
/// Storage columns `life_exp` and `gdp_per_cap` are exposed as `lifeExp` and
/// `gdpPercap`; the surrogate `id` is never part of the wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRecord {
    pub country: String,
    pub continent: String,
    pub year: i32,
    #[serde(rename = "lifeExp")]
    pub life_exp: f64,
    pub pop: i32,
    #[serde(rename = "gdpPercap")]
    pub gdp_per_cap: f64,
}

impl From<models::gapminder::Model> for DataRecord {
    fn from(m: models::gapminder::Model) -> Self {
        Self {
            country: m.country,
            continent: m.continent,
            year: m.year,
            life_exp: m.life_exp,
            pop: m.pop,
            gdp_per_cap: m.gdp_per_cap,
        }
    }
}

impl From<DataRecord> for Row {
    fn from(r: DataRecord) -> Self {
        let mut row = Row::with_capacity(WIRE_FIELDS.len());
        row.insert("country".into(), Value::String(r.country));
        row.insert("continent".into(), Value::String(r.continent));
        row.insert("year".into(), Value::from(r.year));
        row.insert("lifeExp".into(), Value::from(r.life_exp));
        row.insert("pop".into(), Value::from(r.pop));
        row.insert("gdpPercap".into(), Value::from(r.gdp_per_cap));
        row
    }
}
