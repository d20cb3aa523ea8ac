//! `gapminder_data` table: one row per country-year observation.
//!
//! Rows are loaded out-of-band; this crate only reads them.
use sea_orm::entity::prelude::*;
use sea_orm::ConnectionTrait;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gapminder_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub country: String,
    #[sea_orm(indexed)]
    pub continent: String,
    #[sea_orm(indexed)]
    pub year: i32,
    pub life_exp: f64,
    pub pop: i32,
    pub gdp_per_cap: f64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Full table scan in the store's natural order. No filter, no paging.
pub async fn find_all<C>(db: &C) -> Result<Vec<Model>, ModelError>
where
    C: ConnectionTrait,
{
    Entity::find().all(db).await.map_err(ModelError::from)
}
