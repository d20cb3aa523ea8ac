//! Test helpers: an in-memory SQLite pool with the `gapminder_data` table.
//!
//! Only compiled for tests or with the `testing` feature; the service itself
//! never creates tables or writes rows.
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Set,
};

use crate::gapminder;

/// Single-connection pool so every query sees the same in-memory database.
pub async fn memory_db() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    Database::connect(opt).await
}

/// In-memory pool with the table already created.
pub async fn memory_db_with_table() -> Result<DatabaseConnection, DbErr> {
    let db = memory_db().await?;
    create_table(&db).await?;
    Ok(db)
}

pub async fn create_table<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(gapminder::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

pub async fn insert_row<C>(
    db: &C,
    country: &str,
    continent: &str,
    year: i32,
    life_exp: f64,
    pop: i32,
    gdp_per_cap: f64,
) -> Result<gapminder::Model, DbErr>
where
    C: ConnectionTrait,
{
    gapminder::ActiveModel {
        country: Set(country.to_string()),
        continent: Set(continent.to_string()),
        year: Set(year),
        life_exp: Set(life_exp),
        pop: Set(pop),
        gdp_per_cap: Set(gdp_per_cap),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// The three rows used across the test suites, in insertion order.
pub async fn seed_fixture<C>(db: &C) -> Result<Vec<gapminder::Model>, DbErr>
where
    C: ConnectionTrait,
{
    Ok(vec![
        insert_row(db, "Afghanistan", "Asia", 1952, 28.801, 8_425_333, 779.445_314_5).await?,
        insert_row(db, "Albania", "Europe", 1952, 55.23, 1_282_697, 1_601.056_136).await?,
        insert_row(db, "Algeria", "Africa", 1952, 43.077, 9_279_525, 2_449.008_185).await?,
    ])
}
