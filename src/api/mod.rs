use axum::{
    Router,
    extract::Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::core::{
    Asset, ProjectionError, Scenario, UserQualitativeGoal, calculate_qualitative_fit_score,
    compare_scenarios, compute_scenario_results_from_year, current_year, validate_assets,
};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultsPayload {
    scenario: Scenario,
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(default)]
    goals: Vec<UserQualitativeGoal>,
    #[serde(default)]
    start_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitScorePayload {
    scenario: Scenario,
    #[serde(default)]
    goals: Vec<UserQualitativeGoal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComparePayload {
    scenarios: Vec<Scenario>,
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(default)]
    goals: Vec<UserQualitativeGoal>,
    #[serde(default)]
    start_year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct EngineErrorResponse {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/results", post(results_handler))
        .route("/api/fit-score", post(fit_score_handler))
        .route("/api/compare", post(compare_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: &ServerConfig) -> Result<(), AppError> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "relocation planner API listening");

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn results_handler(Json(payload): Json<ResultsPayload>) -> Response {
    let checked = payload
        .scenario
        .validate_fields()
        .and(validate_assets(&payload.assets));
    if let Err(msg) = checked {
        warn!(scenario_id = %payload.scenario.id, %msg, "rejected results request");
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }

    let first_year = payload.start_year.unwrap_or_else(current_year);
    match compute_scenario_results_from_year(
        first_year,
        &payload.scenario,
        &payload.assets,
        &payload.goals,
    ) {
        Ok(results) => {
            debug!(scenario_id = %results.scenario_id, "computed scenario results");
            json_response(StatusCode::OK, results)
        }
        Err(err) => engine_error_response(&err),
    }
}

async fn fit_score_handler(Json(payload): Json<FitScorePayload>) -> Response {
    let score = calculate_qualitative_fit_score(&payload.scenario, &payload.goals);
    json_response(StatusCode::OK, score)
}

async fn compare_handler(Json(payload): Json<ComparePayload>) -> Response {
    let checked = payload
        .scenarios
        .iter()
        .try_for_each(Scenario::validate_fields)
        .and(validate_assets(&payload.assets));
    if let Err(msg) = checked {
        warn!(%msg, "rejected comparison request");
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }

    let first_year = payload.start_year.unwrap_or_else(current_year);
    match compare_scenarios(
        first_year,
        &payload.scenarios,
        &payload.assets,
        &payload.goals,
    ) {
        Ok(rows) => json_response(StatusCode::OK, rows),
        Err(err) => engine_error_response(&err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn engine_error_response(err: &ProjectionError) -> Response {
    warn!(code = err.code(), %err, "scenario computation failed");
    json_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        EngineErrorResponse {
            code: err.code(),
            message: err.to_string(),
            details: err.details(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MAX_PROJECTION_YEARS;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    fn scenario_json() -> Value {
        json!({
            "id": "scenario-1",
            "name": "Lisbon",
            "projectionPeriod": 10,
            "residencyStartDate": "2024-01-01",
            "location": {"country": "Portugal"},
            "tax": {"capitalGains": {"longTermRate": 10}, "incomeRate": 20},
            "incomeSources": [
                {"id": "income-1", "name": "Salary", "type": "EMPLOYMENT",
                 "annualAmount": 100000, "startYear": 2024}
            ],
            "annualExpenses": [
                {"id": "expense-1", "name": "Rent", "amount": 10000, "startYear": 2024}
            ],
            "oneTimeExpenses": [
                {"id": "one-time-1", "name": "Moving", "amount": 20000, "year": 2024}
            ],
            "plannedAssetSales": [
                {"id": "sale-1", "assetId": "asset-1", "year": 2024, "quantity": 3,
                 "salePricePerUnit": 150000}
            ],
            "qualitativeAttributes": [
                {"id": "attr-1", "scenarioId": "scenario-1", "description": "Sunny",
                 "sentiment": "Positive", "significance": "Critical", "mappedGoalId": "climate"}
            ]
        })
    }

    fn assets_json() -> Value {
        json!([
            {"id": "asset-1", "name": "Shares", "quantity": 10, "costBasisPerUnit": 1000,
             "acquisitionDate": "2019-03-01"}
        ])
    }

    fn goals_json() -> Value {
        json!([{"id": "climate", "conceptId": "weather", "name": "Climate", "weight": "Critical"}])
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Option<String>, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");
        let response = router().oneshot(request).await.expect("router responds");
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let json = serde_json::from_slice(&bytes).expect("json body");
        (status, cache_control, json)
    }

    #[tokio::test]
    async fn results_endpoint_returns_projection_and_score() {
        let body = json!({
            "scenario": scenario_json(),
            "assets": assets_json(),
            "goals": goals_json(),
            "startYear": 2024
        });
        let (status, cache_control, json) = post_json("/api/results", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(json["yearlyProjections"].as_array().map(Vec::len), Some(10));
        assert_eq!(json["yearlyProjections"][0]["netFinancialOutcome"], 452300.0);
        assert_eq!(json["totalNetOutcome"], 1082300.0);
        assert_eq!(json["qualitativeFitScore"], 100);
        assert_eq!(json["goalAlignments"][0]["isAligned"], true);
    }

    #[tokio::test]
    async fn results_endpoint_reports_missing_asset_with_details() {
        let body = json!({"scenario": scenario_json(), "assets": [], "startYear": 2024});
        let (status, _, json) = post_json("/api/results", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "MISSING_ASSET");
        assert_eq!(json["details"]["saleId"], "sale-1");
        assert_eq!(json["details"]["assetId"], "asset-1");
        assert!(json.get("yearlyProjections").is_none());
    }

    #[tokio::test]
    async fn results_endpoint_reports_incomplete_scenario() {
        let mut scenario = scenario_json();
        scenario["projectionPeriod"] = Value::Null;
        let body = json!({"scenario": scenario, "assets": assets_json()});
        let (status, _, json) = post_json("/api/results", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "INVALID_SCENARIO");
    }

    #[tokio::test]
    async fn results_endpoint_rejects_out_of_range_rate() {
        let mut scenario = scenario_json();
        scenario["tax"]["incomeRate"] = json!(140);
        let body = json!({"scenario": scenario, "assets": assets_json()});
        let (status, _, json) = post_json("/api/results", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "tax.incomeRate must be between 0 and 100");
    }

    #[tokio::test]
    async fn fit_score_endpoint_never_fails_without_goals() {
        let body = json!({"scenario": scenario_json()});
        let (status, _, json) = post_json("/api/fit-score", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["score"], 50);
        assert_eq!(json["details"]["unmappedAttributesCount"], 1);
    }

    #[tokio::test]
    async fn compare_endpoint_ranks_scenarios() {
        let mut dubai = scenario_json();
        dubai["id"] = json!("scenario-2");
        dubai["location"]["country"] = json!("UAE");
        dubai["tax"] = json!({"capitalGains": {"longTermRate": 0}, "incomeRate": 0});
        let body = json!({
            "scenarios": [scenario_json(), dubai],
            "assets": assets_json(),
            "goals": goals_json(),
            "startYear": 2024
        });
        let (status, _, json) = post_json("/api/compare", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["scenarioId"], "scenario-2");
        assert_eq!(json[0]["rank"], 1);
        assert_eq!(json[1]["scenarioId"], "scenario-1");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .expect("request builds");
        let response = router().oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn results_endpoint_rejects_period_past_last_representable_year() {
        let mut scenario = scenario_json();
        scenario["projectionPeriod"] = json!(2);
        scenario["plannedAssetSales"] = json!([]);
        let body = json!({"scenario": scenario, "startYear": i32::MAX});
        let (status, _, json) = post_json("/api/results", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "INVALID_SCENARIO");
        assert_eq!(json["details"]["scenarioId"], "scenario-1");
    }

    #[tokio::test]
    async fn compare_endpoint_rejects_overlong_projection() {
        let mut scenario = scenario_json();
        scenario["projectionPeriod"] = json!(MAX_PROJECTION_YEARS + 1);
        let body = json!({"scenarios": [scenario], "assets": assets_json()});
        let (status, _, json) = post_json("/api/compare", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "projectionPeriod must be <= 100");
    }
}
