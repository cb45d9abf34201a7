use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::store::StoreError;

pub const TABLE: &str = "motorcycles";

/// orderBy values accepted by the listing endpoint, mapped to columns.
pub const SORT_KEYS: &[(&str, &str)] = &[("plate", "plate"), ("model", "model"), ("year", "year")];
pub const DEFAULT_SORT: &str = "plate";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Motorcycle {
    pub id: i32,
    pub plate: String,
    pub model: String,
    pub manufacturer: String,
    pub year: i32,
    pub yard_id: i32,
    pub current_location: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorcycleInput {
    pub plate: String,
    pub model: String,
    pub manufacturer: String,
    pub year: i32,
    pub yard_id: i32,
    pub current_location: String,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Motorcycle>, StoreError> {
    let row = sqlx::query_as::<_, Motorcycle>(
        "SELECT id, plate, model, manufacturer, year, yard_id, current_location \
         FROM motorcycles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(pool: &PgPool, input: &MotorcycleInput) -> Result<Motorcycle, StoreError> {
    let row = sqlx::query_as::<_, Motorcycle>(
        "INSERT INTO motorcycles (plate, model, manufacturer, year, yard_id, current_location) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, plate, model, manufacturer, year, yard_id, current_location",
    )
    .bind(&input.plate)
    .bind(&input.model)
    .bind(&input.manufacturer)
    .bind(input.year)
    .bind(input.yard_id)
    .bind(&input.current_location)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &MotorcycleInput,
) -> Result<Option<Motorcycle>, StoreError> {
    let row = sqlx::query_as::<_, Motorcycle>(
        "UPDATE motorcycles \
         SET plate = $1, model = $2, manufacturer = $3, year = $4, yard_id = $5, current_location = $6 \
         WHERE id = $7 \
         RETURNING id, plate, model, manufacturer, year, yard_id, current_location",
    )
    .bind(&input.plate)
    .bind(&input.model)
    .bind(&input.manufacturer)
    .bind(input.year)
    .bind(input.yard_id)
    .bind(&input.current_location)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM motorcycles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
