use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::store::StoreError;

pub const TABLE: &str = "location_records";

pub const SORT_KEYS: &[(&str, &str)] =
    &[("recordedAt", "recorded_at"), ("referencePoint", "reference_point")];
pub const DEFAULT_SORT: &str = "recorded_at";

/// A sighting of a motorcycle by a yard camera.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: i32,
    pub recorded_at: DateTime<Utc>,
    pub reference_point: String,
    pub motorcycle_id: i32,
    pub yard_id: i32,
    pub camera_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecordInput {
    /// Defaults to the server clock when omitted.
    pub recorded_at: Option<DateTime<Utc>>,
    pub reference_point: String,
    pub motorcycle_id: i32,
    pub yard_id: i32,
    pub camera_id: i32,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<LocationRecord>, StoreError> {
    let row = sqlx::query_as::<_, LocationRecord>(
        "SELECT id, recorded_at, reference_point, motorcycle_id, yard_id, camera_id \
         FROM location_records WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(pool: &PgPool, input: &LocationRecordInput) -> Result<LocationRecord, StoreError> {
    let recorded_at = input.recorded_at.unwrap_or_else(Utc::now);

    let row = sqlx::query_as::<_, LocationRecord>(
        "INSERT INTO location_records (recorded_at, reference_point, motorcycle_id, yard_id, camera_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, recorded_at, reference_point, motorcycle_id, yard_id, camera_id",
    )
    .bind(recorded_at)
    .bind(&input.reference_point)
    .bind(input.motorcycle_id)
    .bind(input.yard_id)
    .bind(input.camera_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &LocationRecordInput,
) -> Result<Option<LocationRecord>, StoreError> {
    let recorded_at = input.recorded_at.unwrap_or_else(Utc::now);

    let row = sqlx::query_as::<_, LocationRecord>(
        "UPDATE location_records \
         SET recorded_at = $1, reference_point = $2, motorcycle_id = $3, yard_id = $4, camera_id = $5 \
         WHERE id = $6 \
         RETURNING id, recorded_at, reference_point, motorcycle_id, yard_id, camera_id",
    )
    .bind(recorded_at)
    .bind(&input.reference_point)
    .bind(input.motorcycle_id)
    .bind(input.yard_id)
    .bind(input.camera_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM location_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
