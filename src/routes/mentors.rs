use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Gatekeeper, Recommender};
use crate::models::{
    ChatRequest, ChatResponse, ChatTurn, ErrorResponse, FieldQuery, HealthResponse,
    MentorListResponse, MentorProfile, NameQuery, RecommendRequest, SearchQuery,
};
use crate::services::{MentorStore, StoreError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MentorStore>,
    pub recommender: Recommender,
    pub gatekeeper: Gatekeeper,
}

/// Configure all mentor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/mentors", web::get().to(list_mentors))
        .route("/mentors/search", web::get().to(search_mentors))
        .route("/mentors/by-field", web::get().to(mentors_by_field))
        .route("/mentors/by-name", web::get().to(mentor_by_name))
        .route("/mentors/{id}", web::get().to(get_mentor))
        .route("/recommendations", web::post().to(recommend_mentors))
        .route("/chat", web::post().to(chat));
}

fn store_failure(context: &str, e: StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

fn not_found(message: String) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Mentor not found".to_string(),
        message,
        status_code: 404,
    })
}

fn single_mentor(result: Result<Option<MentorProfile>, StoreError>, missing: String) -> HttpResponse {
    match result {
        Ok(Some(mentor)) => HttpResponse::Ok().json(mentor),
        Ok(None) => not_found(missing),
        Err(e) => store_failure("Failed to fetch mentor", e),
    }
}

fn mentor_list(result: Result<Vec<MentorProfile>, StoreError>) -> HttpResponse {
    match result {
        Ok(mentors) => HttpResponse::Ok().json(MentorListResponse::from(mentors)),
        Err(e) => store_failure("Failed to query mentors", e),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, mentors) = match state.store.get_all().await {
        Ok(all) => ("healthy", all.len()),
        Err(e) => {
            tracing::warn!("Mentor store unavailable during health check: {}", e);
            ("degraded", 0)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        mentors,
    })
}

/// GET /api/v1/mentors
async fn list_mentors(state: web::Data<AppState>) -> impl Responder {
    mentor_list(state.store.get_all().await)
}

/// GET /api/v1/mentors/{id}
async fn get_mentor(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let result = state.store.get_by_id(&id).await;
    single_mentor(result, format!("No mentor with id {}", id))
}

/// GET /api/v1/mentors/search?q={query}
async fn search_mentors(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> impl Responder {
    mentor_list(state.store.search(&query.q).await)
}

/// GET /api/v1/mentors/by-field?field={field}
async fn mentors_by_field(state: web::Data<AppState>, query: web::Query<FieldQuery>) -> impl Responder {
    mentor_list(state.store.find_by_field(&query.field).await)
}

/// GET /api/v1/mentors/by-name?name={name}
async fn mentor_by_name(state: web::Data<AppState>, query: web::Query<NameQuery>) -> impl Responder {
    let result = state.store.find_by_name(&query.name).await;
    single_mentor(result, format!("No mentor named like {:?}", query.name))
}

/// Mentor recommendation endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// { "userQuery": "string" }
/// ```
///
/// Always answers 200 once the request validates; failures show up as an
/// empty list with an `analysis` message.
async fn recommend_mentors(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let result = state.recommender.recommend(&req.user_query).await;
    HttpResponse::Ok().json(result)
}

/// Chat endpoint
///
/// POST /api/v1/chat
///
/// Request body:
/// ```json
/// { "query": "string" }
/// ```
async fn chat(state: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    let reply = state.gatekeeper.reply(req.query_text()).await;

    HttpResponse::Ok().json(ChatResponse {
        message: ChatTurn::assistant(reply.text.clone()),
        reply: reply.text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use crate::core::{RecommenderSettings, TopicPolicy};
    use crate::services::{CompletionError, CompletionRequest, CompletionService, InMemoryMentorStore};

    struct EchoCompletion;

    #[async_trait]
    impl CompletionService for EchoCompletion {
        async fn generate(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            Ok(r#"{"recommendations":[{"mentorId":"mentor-4","mentorName":"Robert Chen","justification":"Robotics veteran."}]}"#.to_string())
        }
    }

    fn state() -> AppState {
        let store: Arc<dyn MentorStore> = Arc::new(InMemoryMentorStore::with_default_seed());
        let completion: Arc<dyn CompletionService> = Arc::new(EchoCompletion);
        AppState {
            recommender: Recommender::new(store.clone(), completion.clone(), RecommenderSettings::default()),
            gatekeeper: Gatekeeper::new(completion, TopicPolicy::python()),
            store,
        }
    }

    #[actix_web::test]
    async fn test_get_mentor_not_found() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/mentors/mentor-999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_search_endpoint() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/mentors/search?q=python").to_request();
        let body: MentorListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total, 2);
    }

    #[actix_web::test]
    async fn test_recommendations_endpoint() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommendations")
            .set_json(serde_json::json!({ "userQuery": "build robots" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["recommendations"][0]["mentorId"], "mentor-4");
    }

    #[actix_web::test]
    async fn test_recommendations_rejects_empty_query() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommendations")
            .set_json(serde_json::json!({ "userQuery": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_chat_non_string_query() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(serde_json::json!({ "query": 42 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let reply = body["reply"].as_str().unwrap();
        assert!(!reply.trim().is_empty());
    }
}
