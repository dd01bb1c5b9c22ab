use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use concierge::UserPreferences;
use std::sync::Arc;
use std::time::Instant;

/// Set to `true` when no candidate fit the budget band.
pub const BUDGET_RELAXED_HEADER: &str = "x-budget-relaxed";

/// Generate enriched gift suggestions.
///
/// Body is a camelCase `UserPreferences`; the response is a JSON array of
/// `GiftItem`s in the order the model suggested them.
pub async fn recommend(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<UserPreferences>, JsonRejection>,
) -> ServerResult<Response> {
    let Json(prefs) = payload?;
    let start = Instant::now();
    metrics::counter!("recommend_requests_total").increment(1);

    let result = state.recommender.recommend_with_report(&prefs).await;
    metrics::histogram!("recommend_duration_seconds").record(start.elapsed().as_secs_f64());

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            let err = ServerError::from(err);
            metrics::counter!("recommend_failures_total", "code" => err.error_code())
                .increment(1);
            return Err(err);
        }
    };

    if report.budget_relaxed {
        metrics::counter!("recommend_budget_relaxed_total").increment(1);
    }

    let mut response = Json(report.items).into_response();
    if report.budget_relaxed {
        response
            .headers_mut()
            .insert(BUDGET_RELAXED_HEADER, HeaderValue::from_static("true"));
    }
    Ok(response)
}
