use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::hateoas::{Document, LinkSet};
use crate::listing::{sort_column, ListResponse, PageMeta, PageRequest};
use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::RoutePolicy;
use crate::state::SharedState;
use crate::store::entities::location::{self, LocationRecord, LocationRecordInput};
use crate::store::query::{fetch_page, ListQuery};

pub const BASE: &str = "/api/v1/locations";

const LINKS: LinkSet = LinkSet::new(BASE);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    page: Option<i64>,
    page_size: Option<i64>,
    order_by: Option<String>,
    reference_point: Option<String>,
}

pub fn router() -> Router<SharedState> {
    Router::new()
        .route(BASE, get(list).post(create))
        .route(
            &format!("{}/:id", BASE),
            get(show).put(update).delete(destroy),
        )
}

pub fn policy(policy: RoutePolicy) -> RoutePolicy {
    policy.crud_entity(BASE)
}

async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.db.pool().await?;
    let page = PageRequest::from_params(
        params.page,
        params.page_size,
        state.config.pagination.default_page_size,
    );
    let order = sort_column(
        params.order_by.as_deref(),
        location::SORT_KEYS,
        location::DEFAULT_SORT,
    );

    let query = ListQuery::new(location::TABLE, order)
        .filter("reference_point", params.reference_point.as_deref())
        .paginate(page.offset(), page.limit());

    let (items, total_items) = fetch_page::<LocationRecord>(pool, &query).await?;
    let data: Vec<_> = items
        .into_iter()
        .map(|record| {
            let id = record.id;
            LINKS.attach(record, id)
        })
        .collect();

    Ok(Json(ListResponse {
        meta: PageMeta::new(total_items, &page),
        data,
    }))
}

async fn show(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.db.pool().await?;
    let record = location::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("location record not found"))?;

    Ok(Json(Document {
        data: LINKS.attach(record, id),
    }))
}

async fn create(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<LocationRecordInput>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.db.pool().await?;
    let record = location::insert(pool, &input).await?;
    tracing::info!(actor = %user.email, id = record.id, "location record created");

    let id = record.id;
    Ok((
        StatusCode::CREATED,
        Json(Document {
            data: LINKS.attach(record, id),
        }),
    ))
}

async fn update(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(input): Json<LocationRecordInput>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.db.pool().await?;
    let record = location::update(pool, id, &input)
        .await?
        .ok_or_else(|| ApiError::not_found("location record not found"))?;
    tracing::info!(actor = %user.email, id, "location record updated");

    Ok(Json(Document {
        data: LINKS.attach(record, id),
    }))
}

async fn destroy(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let pool = state.db.pool().await?;

    if !location::delete(pool, id).await? {
        return Err(ApiError::not_found("location record not found"));
    }
    tracing::info!(actor = %user.email, id, "location record deleted");

    Ok(StatusCode::NO_CONTENT)
}
