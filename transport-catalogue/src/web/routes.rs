//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::requests::{BusStats, RouteResult, StatRequest, StatResponse, StopBuses};
use crate::router::RouteError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bus/:name", get(bus_info))
        .route("/stop/:name", get(stop_info))
        .route("/route", get(route))
        .route("/map", get(map))
        .route("/stat", post(stat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Statistics for one bus.
async fn bus_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BusStats>, AppError> {
    state
        .handler
        .bus_stats(&name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("bus not found: {name}"),
        })
}

/// Buses serving one stop.
async fn stop_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StopBuses>, AppError> {
    state
        .handler
        .stop_buses(&name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("stop not found: {name}"),
        })
}

/// Fastest itinerary between two stops.
async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResult>, AppError> {
    let result = state.handler.route(&query.from, &query.to)?;

    result.map(Json).ok_or_else(|| AppError::NotFound {
        message: format!("no route from {} to {}", query.from, query.to),
    })
}

/// The network map as an SVG image.
async fn map(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        state.handler.map().map,
    )
}

/// Batch of queries in request-document form.
async fn stat(
    State(state): State<AppState>,
    Json(requests): Json<Vec<StatRequest>>,
) -> Json<Vec<StatResponse>> {
    debug!(count = requests.len(), "answering stat batch");
    Json(state.handler.answer_all(&requests))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::UnknownStop(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::{RequestHandler, ResponseBody, StatQuery};
    use crate::render::RenderSettings;
    use crate::router::RoutingSettings;
    use serde_json::json;

    fn state() -> AppState {
        let requests = serde_json::from_value::<Vec<_>>(json!([
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
             "road_distances": {"B": 1000}},
            {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 0.01,
             "road_distances": {"C": 2000}},
            {"type": "Stop", "name": "C", "latitude": 0.0, "longitude": 0.02},
            {"type": "Stop", "name": "D", "latitude": 1.0, "longitude": 1.0},
            {"type": "Bus", "name": "1", "stops": ["A", "B", "C"], "is_roundtrip": false}
        ]))
        .unwrap();

        let handler = RequestHandler::new(
            &requests,
            RoutingSettings::new(5.0, 60.0),
            RenderSettings::default(),
        )
        .unwrap();
        AppState::new(handler)
    }

    fn route_query(from: &str, to: &str) -> Query<RouteQuery> {
        Query(RouteQuery {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn bus_found() {
        let Json(stats) = bus_info(State(state()), Path("1".to_string()))
            .await
            .unwrap();

        assert_eq!(stats.stop_count, 5);
        assert_eq!(stats.unique_stop_count, 3);
        assert_eq!(stats.route_length, 6000.0);
    }

    #[tokio::test]
    async fn bus_missing_is_404() {
        let err = bus_info(State(state()), Path("2".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stop_lists_buses() {
        let Json(stop) = stop_info(State(state()), Path("B".to_string()))
            .await
            .unwrap();
        assert_eq!(stop.buses, ["1"]);

        let Json(stop) = stop_info(State(state()), Path("D".to_string()))
            .await
            .unwrap();
        assert!(stop.buses.is_empty());
    }

    #[tokio::test]
    async fn stop_missing_is_404() {
        let result = stop_info(State(state()), Path("Z".to_string())).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn route_found() {
        let Json(result) = route(State(state()), route_query("A", "C")).await.unwrap();

        // Wait 5, then 3000 m at 60 km/h
        assert_eq!(result.total_time, 8.0);
        assert_eq!(result.items.len(), 2);
    }

    #[tokio::test]
    async fn route_unknown_stop_names_it() {
        let err = route(State(state()), route_query("A", "Z")).await.unwrap_err();

        let AppError::NotFound { message } = &err;
        assert_eq!(message, "unknown stop: Z");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn route_unreachable_is_404() {
        let err = route(State(state()), route_query("A", "D")).await.unwrap_err();

        let AppError::NotFound { message } = err;
        assert_eq!(message, "no route from A to D");
    }

    #[tokio::test]
    async fn map_is_svg() {
        let response = map(State(state())).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
    }

    #[tokio::test]
    async fn stat_batch_answers_in_order() {
        let requests = vec![
            StatRequest {
                id: 10,
                query: StatQuery::Stop { name: "Z".into() },
            },
            StatRequest {
                id: 11,
                query: StatQuery::Route {
                    from: "C".into(),
                    to: "A".into(),
                },
            },
            StatRequest {
                id: 12,
                query: StatQuery::Map,
            },
        ];

        let Json(responses) = stat(State(state()), Json(requests)).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].request_id, 10);
        assert!(matches!(responses[0].body, ResponseBody::Error(_)));
        assert_eq!(responses[1].request_id, 11);
        assert!(matches!(responses[1].body, ResponseBody::Route(_)));
        assert!(matches!(responses[2].body, ResponseBody::Map(_)));
    }

    #[test]
    fn router_builds() {
        let _app = create_router(state());
    }
}
