use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;
use wisdom_bridge::config::Settings;
use wisdom_bridge::core::{Gatekeeper, Recommender, TopicPolicy};
use wisdom_bridge::routes::{self, mentors::AppState};
use wisdom_bridge::services::{
    load_seed_file, CompletionService, GeminiClient, InMemoryMentorStore, MentorStore,
};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &Settings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn config_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        config_error(e)
    })?;

    init_logging(&settings);

    info!("Starting Wisdom Bridge service...");

    // Build mentor store
    let seed = match &settings.store.seed_path {
        Some(path) => load_seed_file(path).map_err(|e| {
            error!("Failed to load mentor seed: {}", e);
            config_error(e)
        })?,
        None => wisdom_bridge::services::default_mentors(),
    };

    let store = InMemoryMentorStore::new(seed)
        .map_err(|e| {
            error!("Invalid mentor seed: {}", e);
            config_error(e)
        })?
        .with_latency(Duration::from_millis(settings.store.simulated_latency_ms));

    info!("Mentor store initialized with {} mentors", store.len());
    let store: Arc<dyn MentorStore> = Arc::new(store);

    // Initialize completion client
    if settings.completion.api_key.is_empty() {
        error!("No completion API key configured; AI features will answer with fallback messages");
    }

    let completion: Arc<dyn CompletionService> = Arc::new(
        GeminiClient::new(
            settings.completion.endpoint.clone(),
            settings.completion.api_key.clone(),
            settings.completion.model.clone(),
            Duration::from_secs(settings.completion.timeout_secs),
        )
        .map_err(|e| {
            error!("Failed to create completion client: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?,
    );

    info!("Completion client initialized (model: {})", settings.completion.model);

    let recommender_settings = settings.matching.recommender_settings().map_err(|e| {
        error!("Invalid matching settings: {}", e);
        config_error(e)
    })?;

    info!(
        "Recommender initialized (strategy: {:?}, max: {})",
        recommender_settings.strategy, recommender_settings.max_recommendations
    );

    let app_state = AppState {
        recommender: Recommender::new(store.clone(), completion.clone(), recommender_settings),
        gatekeeper: Gatekeeper::new(completion, TopicPolicy::python()),
        store,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
