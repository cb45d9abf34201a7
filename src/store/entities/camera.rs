use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::store::StoreError;

pub const TABLE: &str = "cameras";

pub const SORT_KEYS: &[(&str, &str)] =
    &[("status", "status"), ("physicalLocation", "physical_location")];
pub const DEFAULT_SORT: &str = "id";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: i32,
    pub status: String,
    pub physical_location: String,
    pub yard_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInput {
    pub status: String,
    pub physical_location: String,
    pub yard_id: i32,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Camera>, StoreError> {
    let row = sqlx::query_as::<_, Camera>(
        "SELECT id, status, physical_location, yard_id FROM cameras WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(pool: &PgPool, input: &CameraInput) -> Result<Camera, StoreError> {
    let row = sqlx::query_as::<_, Camera>(
        "INSERT INTO cameras (status, physical_location, yard_id) VALUES ($1, $2, $3) \
         RETURNING id, status, physical_location, yard_id",
    )
    .bind(&input.status)
    .bind(&input.physical_location)
    .bind(input.yard_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &CameraInput,
) -> Result<Option<Camera>, StoreError> {
    let row = sqlx::query_as::<_, Camera>(
        "UPDATE cameras SET status = $1, physical_location = $2, yard_id = $3 WHERE id = $4 \
         RETURNING id, status, physical_location, yard_id",
    )
    .bind(&input.status)
    .bind(&input.physical_location)
    .bind(input.yard_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM cameras WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
