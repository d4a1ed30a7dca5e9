use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Recommender;
use crate::error::RecommendError;
use crate::models::{
    Algorithm, CandidateId, CustomRecommendRequest, ErrorResponse, HealthResponse, HouseholdId,
    HouseholdQuery, ModelSnapshot, RecommendRequest, RecommendationResponse, SimilarQuery,
    SimilarResponse,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<ModelSnapshot>,
    pub recommender: Recommender,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/recommendations/custom", web::post().to(recommend_custom))
        .route("/recommendations/household/{id}", web::get().to(recommend_for_household))
        .route("/recommendations/similar/{id}", web::get().to(similar));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Map a scoring outcome to a status code and the success/failure document
fn outcome(result: Result<crate::models::Recommendations, RecommendError>) -> HttpResponse {
    match result {
        Ok(recommendations) => HttpResponse::Ok().json(RecommendationResponse::from(recommendations)),
        Err(e) if e.is_client_error() => {
            HttpResponse::BadRequest().json(RecommendationResponse::failure(e))
        }
        Err(e @ RecommendError::CollaborativeUnavailable) => {
            HttpResponse::ServiceUnavailable().json(RecommendationResponse::failure(e))
        }
        Err(e) => {
            tracing::error!("Recommendation failed: {}", e);
            HttpResponse::InternalServerError().json(RecommendationResponse::failure(e))
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let summary = state.snapshot.summary();
    let status = if summary.materialized { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        model: summary,
    })
}

/// Recommend endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "algorithm": "content|collaborative|hybrid",
///   "limit": 10,
///   "parent_id": 1,
///   "parent_requirements": { "skills": ["Memasak"], "location": "Jakarta", "gender": "Perempuan" }
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return validation_failed(errors);
    }

    outcome(state.recommender.recommend(&state.snapshot, &req))
}

/// Recommend for a stored household
///
/// GET /api/v1/recommendations/household/{id}?algorithm=hybrid&limit=10
async fn recommend_for_household(
    state: web::Data<AppState>,
    path: web::Path<HouseholdId>,
    query: web::Query<HouseholdQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let household_id = path.into_inner();
    let algorithm: Algorithm = match query.algorithm.as_deref() {
        Some(selector) => match selector.parse() {
            Ok(algorithm) => algorithm,
            Err(e) => return outcome(Err(e)),
        },
        None => Algorithm::default(),
    };

    tracing::info!(
        "Recommending for household {} with {} algorithm, limit: {}",
        household_id,
        algorithm.label(),
        query.limit
    );

    outcome(
        state
            .recommender
            .recommend_for_household(&state.snapshot, household_id, algorithm, query.limit),
    )
}

/// Custom criteria endpoint
///
/// POST /api/v1/recommendations/custom
///
/// Request body:
/// ```json
/// {
///   "requirements": { "skills": ["Memasak", "Berenang"], "location": "Jawa Barat" },
///   "min_rating": 4.0,
///   "max_age": 25,
///   "min_experience": 1,
///   "limit": 10
/// }
/// ```
async fn recommend_custom(
    state: web::Data<AppState>,
    req: web::Json<CustomRecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    outcome(state.recommender.recommend_custom(&state.snapshot, &req))
}

/// Similar au pairs endpoint
///
/// GET /api/v1/recommendations/similar/{id}?limit=5
async fn similar(
    state: web::Data<AppState>,
    path: web::Path<CandidateId>,
    query: web::Query<SimilarQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let reference_id = path.into_inner();
    match state.recommender.similar(&state.snapshot, reference_id, query.limit) {
        Ok(similar) => HttpResponse::Ok().json(SimilarResponse {
            success: true,
            total_found: similar.len(),
            similar,
            reference_id,
        }),
        Err(e) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Au pair not found".to_string(),
            message: e.to_string(),
            status_code: 404,
        }),
    }
}
