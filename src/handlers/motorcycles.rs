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
use crate::store::entities::motorcycle::{self, Motorcycle, MotorcycleInput};
use crate::store::query::{fetch_page, ListQuery};

pub const BASE: &str = "/api/v1/motorcycles";

const LINKS: LinkSet = LinkSet::new(BASE);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    page: Option<i64>,
    page_size: Option<i64>,
    order_by: Option<String>,
    plate: Option<String>,
    model: Option<String>,
    manufacturer: Option<String>,
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
        motorcycle::SORT_KEYS,
        motorcycle::DEFAULT_SORT,
    );

    let query = ListQuery::new(motorcycle::TABLE, order)
        .filter("plate", params.plate.as_deref())
        .filter("model", params.model.as_deref())
        .filter("manufacturer", params.manufacturer.as_deref())
        .paginate(page.offset(), page.limit());

    let (items, total_items) = fetch_page::<Motorcycle>(pool, &query).await?;
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
    let record = motorcycle::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("motorcycle not found"))?;

    Ok(Json(Document {
        data: LINKS.attach(record, id),
    }))
}

async fn create(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<MotorcycleInput>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.db.pool().await?;
    let record = motorcycle::insert(pool, &input).await?;
    tracing::info!(actor = %user.email, id = record.id, "motorcycle created");

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
    Json(input): Json<MotorcycleInput>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.db.pool().await?;
    let record = motorcycle::update(pool, id, &input)
        .await?
        .ok_or_else(|| ApiError::not_found("motorcycle not found"))?;
    tracing::info!(actor = %user.email, id, "motorcycle updated");

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

    if !motorcycle::delete(pool, id).await? {
        return Err(ApiError::not_found("motorcycle not found"));
    }
    tracing::info!(actor = %user.email, id, "motorcycle deleted");

    Ok(StatusCode::NO_CONTENT)
}
