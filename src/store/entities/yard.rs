use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::store::StoreError;

pub const TABLE: &str = "yards";

pub const SORT_KEYS: &[(&str, &str)] = &[("name", "name"), ("address", "address")];
pub const DEFAULT_SORT: &str = "name";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Yard {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub max_capacity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YardInput {
    pub name: String,
    pub address: String,
    pub max_capacity: i32,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Yard>, StoreError> {
    let row = sqlx::query_as::<_, Yard>(
        "SELECT id, name, address, max_capacity FROM yards WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(pool: &PgPool, input: &YardInput) -> Result<Yard, StoreError> {
    let row = sqlx::query_as::<_, Yard>(
        "INSERT INTO yards (name, address, max_capacity) VALUES ($1, $2, $3) \
         RETURNING id, name, address, max_capacity",
    )
    .bind(&input.name)
    .bind(&input.address)
    .bind(input.max_capacity)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(pool: &PgPool, id: i32, input: &YardInput) -> Result<Option<Yard>, StoreError> {
    let row = sqlx::query_as::<_, Yard>(
        "UPDATE yards SET name = $1, address = $2, max_capacity = $3 WHERE id = $4 \
         RETURNING id, name, address, max_capacity",
    )
    .bind(&input.name)
    .bind(&input.address)
    .bind(input.max_capacity)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM yards WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
