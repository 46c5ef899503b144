use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Matcher, ScoredPairs};
use crate::error::PairingError;
use crate::models::{DualPairResponse, ErrorResponse, HealthResponse, PairRequest, PairResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub max_pairs: usize,
}

/// Configure all pairing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/pairs/stable", web::post().to(stable_pairing))
        .route("/pairs/dual", web::post().to(dual_pairing));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Stable pairing endpoint
///
/// POST /api/v1/pairs/stable
///
/// Request body:
/// ```json
/// {
///   "requesters": ["r1", "r1", "r2"],
///   "acceptors": ["a1", "a2", "a1"],
///   "scores": [0.9, 0.1, 0.8],
///   "extraRequesters": [],
///   "extraAcceptors": []
/// }
/// ```
async fn stable_pairing(
    state: web::Data<AppState>,
    req: web::Json<PairRequest>,
) -> impl Responder {
    let pairs = match checked_input(&state, &req) {
        Ok(pairs) => pairs,
        Err(response) => return response,
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Pairing run {}: {} scored pairs", run_id, pairs.len());

    match state.matcher.pair(&pairs) {
        Ok(result) => {
            tracing::info!(
                "Pairing run {} matched {} pairs in {} rounds",
                run_id,
                result.matched_count(),
                result.rounds
            );
            HttpResponse::Ok().json(PairResponse {
                run_id,
                pairing: result.into(),
                computed_at: chrono::Utc::now(),
            })
        }
        Err(e) => pairing_error(e),
    }
}

/// Role-swap pairing endpoint
///
/// POST /api/v1/pairs/dual
///
/// Runs the same body twice, once with requesters proposing and once with
/// the roles exchanged, and reports whether the two runs mirror each other.
async fn dual_pairing(
    state: web::Data<AppState>,
    req: web::Json<PairRequest>,
) -> impl Responder {
    let pairs = match checked_input(&state, &req) {
        Ok(pairs) => pairs,
        Err(response) => return response,
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Dual pairing run {}: {} scored pairs", run_id, pairs.len());

    match state.matcher.pair_both_ways(&pairs) {
        Ok(dual) => {
            let response = DualPairResponse::new(run_id, dual);
            tracing::info!(
                "Dual pairing run {} mirrored: {}",
                response.run_id,
                response.mirrored
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => pairing_error(e),
    }
}

/// Validate the body and turn it into a pairing record
fn checked_input(
    state: &AppState,
    req: &PairRequest,
) -> Result<ScoredPairs<String>, HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for pairing request: field_errors={:?}", errors);
        return Err(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    let entry_count = req.entry_count();
    if entry_count > state.max_pairs {
        tracing::warn!(
            "Rejecting pairing request with {} entries (limit {})",
            entry_count,
            state.max_pairs
        );
        return Err(HttpResponse::PayloadTooLarge().json(ErrorResponse {
            error: "Too many pairs".to_string(),
            message: format!(
                "Request carries {} entries, limit is {}",
                entry_count, state.max_pairs
            ),
            status_code: 413,
        }));
    }

    req.to_scored_pairs().map_err(pairing_error)
}

fn pairing_error(e: PairingError) -> HttpResponse {
    tracing::info!("Rejected pairing input: {}", e);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: e.code().to_string(),
        message: e.to_string(),
        status_code: 400,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use crate::core::DuplicatePairs;

    fn app_state(max_pairs: usize) -> AppState {
        AppState {
            matcher: Matcher::new(DuplicatePairs::Keep),
            max_pairs,
        }
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(10)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
    }

    #[actix_web::test]
    async fn test_pair_limit_enforced() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(1)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/pairs/stable")
            .set_json(serde_json::json!({
                "requesters": ["r1", "r2"],
                "acceptors": ["a1", "a1"],
                "scores": [0.1, 0.2]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn test_registered_extras_count_toward_limit() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(2)))
                .configure(configure),
        )
        .await;

        let within = test::TestRequest::post()
            .uri("/pairs/stable")
            .set_json(serde_json::json!({
                "requesters": ["r1"],
                "acceptors": ["a1"],
                "scores": [0.1],
                "extraRequesters": ["r2"]
            }))
            .to_request();
        assert_eq!(test::call_service(&app, within).await.status(), StatusCode::OK);

        let over = test::TestRequest::post()
            .uri("/pairs/stable")
            .set_json(serde_json::json!({
                "requesters": ["r1"],
                "acceptors": ["a1"],
                "scores": [0.1],
                "extraRequesters": ["r2"],
                "extraAcceptors": ["a2"]
            }))
            .to_request();
        let resp = test::call_service(&app, over).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.status_code, 413);
    }
}
