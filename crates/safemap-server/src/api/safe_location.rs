use axum::{
    extract::Query,
    response::{IntoResponse, Response},
    Extension, Json,
};
use safemap_core::SafeSpot;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::middleware::RequestId;

const MISSING_COORDINATES: &str = "Coordenadas necessárias (lat, lng)";

#[derive(Debug, Deserialize)]
pub(super) struct SafeLocationQuery {
    lat: Option<String>,
    lng: Option<String>,
}

/// Coordinates are echoed exactly as received in the query string.
#[derive(Debug, Serialize)]
struct SafeLocationResponse {
    lat: String,
    lng: String,
    locais: Vec<SafeSpot>,
}

/// Simulated lookup: every position gets the same two nearby places.
fn nearby_spots() -> Vec<SafeSpot> {
    [
        ("Delegacia da Mulher", "Rua Segura, 123", "1.2km"),
        ("Hospital Municipal", "Av. Principal, 456", "2.5km"),
    ]
    .into_iter()
    .map(|(name, address, distance)| SafeSpot {
        name: name.to_string(),
        address: address.to_string(),
        distance: distance.to_string(),
    })
    .collect()
}

fn present(value: Option<&String>) -> Option<&String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve(query: &SafeLocationQuery) -> Result<(String, String), ApiError> {
    match (present(query.lat.as_ref()), present(query.lng.as_ref())) {
        (Some(lat), Some(lng)) => Ok((lat.clone(), lng.clone())),
        _ => Err(ApiError::bad_request(MISSING_COORDINATES)),
    }
}

pub(super) async fn find_safe_spots(
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SafeLocationQuery>,
) -> Response {
    match resolve(&query) {
        Ok((lat, lng)) => Json(SafeLocationResponse {
            lat,
            lng,
            locais: nearby_spots(),
        })
        .into_response(),
        Err(e) => {
            tracing::debug!(request_id = %req_id.0, error = %e.message(), "rejected safe-location query");
            e.into_response()
        }
    }
}
