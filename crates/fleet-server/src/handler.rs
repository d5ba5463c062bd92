use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::json;
use tracing::debug;

use fleet_store::StoreError;
use fleet_types::{Item, ItemDraft};

use crate::error::{ApiError, ApiResult};
use crate::registry::Registry;

/// Liveness check.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /items` — full collection in insertion order.
pub async fn list_items(State(registry): State<Registry>) -> Json<Vec<Item>> {
    Json(registry.list())
}

/// `GET /items/{id}` — 200 with the record, 404 if unknown.
pub async fn get_item(
    State(registry): State<Registry>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    Ok(Json(registry.get(&id)?))
}

/// `POST /items` — 201 with the created record, 400 on missing fields.
pub async fn create_item(
    State(registry): State<Registry>,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = registry.create(&draft)?;
    debug!(id = %item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /items/{id}` — update under the optimistic version check.
///
/// A body without an id delegates to create (the client holds no stored
/// record yet). Otherwise the path id and body id must agree, the target
/// must exist (400, not 404, per the API contract), and the supplied
/// version must not be stale (409).
pub async fn put_item(
    State(registry): State<Registry>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Some(body_id) = draft.id.clone() else {
        let item = registry.create(&draft)?;
        debug!(id = %item.id, "item created via put");
        return Ok((StatusCode::CREATED, Json(item)));
    };
    if body_id != id {
        return Err(ApiError::IdMismatch);
    }

    let supplied = supplied_version(&headers, &draft);
    let item = registry
        .update(&id, &draft, supplied)
        .map_err(|err| match err {
            StoreError::NotFound { id } => ApiError::UnknownUpdateTarget(id),
            other => ApiError::from(other),
        })?;
    debug!(id = %item.id, version = item.version, "item updated");
    Ok((StatusCode::OK, Json(item)))
}

/// `DELETE /items/{id}` — always 204; broadcasts only if a record went away.
pub async fn delete_item(State(registry): State<Registry>, Path(id): Path<String>) -> StatusCode {
    if let Some(item) = registry.delete(&id) {
        debug!(id = %item.id, "item deleted");
    }
    StatusCode::NO_CONTENT
}

/// Version precedence for updates: `ETag` header, then body version, then 0.
///
/// 0 is always stale against any stored record, so a client that supplies
/// no version at all can only conflict.
fn supplied_version(headers: &HeaderMap, draft: &ItemDraft) -> u64 {
    headers
        .get("etag")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().trim_matches('"').parse().ok())
        .or(draft.version)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_etag(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("etag", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn header_takes_precedence_over_body() {
        let draft = ItemDraft {
            version: Some(3),
            ..Default::default()
        };
        assert_eq!(supplied_version(&headers_with_etag("7"), &draft), 7);
    }

    #[test]
    fn quoted_etag_is_accepted() {
        let draft = ItemDraft::default();
        assert_eq!(supplied_version(&headers_with_etag("\"4\""), &draft), 4);
    }

    #[test]
    fn unparseable_header_falls_back_to_body() {
        let draft = ItemDraft {
            version: Some(3),
            ..Default::default()
        };
        assert_eq!(supplied_version(&headers_with_etag("abc"), &draft), 3);
    }

    #[test]
    fn no_version_anywhere_means_zero() {
        assert_eq!(supplied_version(&HeaderMap::new(), &ItemDraft::default()), 0);
    }
}
