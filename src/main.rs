use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use flatmate_match::config::Settings;
use flatmate_match::core::Matcher;
use flatmate_match::routes::{self, AppState};
use flatmate_match::services::{
    seed_if_empty, InMemoryProfileRepository, LogTransport, MokaSessionStore, PhoneVerifier,
    ProfileRepository,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

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
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT win over the config file
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
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings);

    info!("Starting flatmate matching service...");
    info!("Configuration loaded successfully");

    // Profile store, seeded once when empty
    let repository: Arc<dyn ProfileRepository> = Arc::new(InMemoryProfileRepository::new());

    if let Some(data_file) = settings.seed.data_file.as_deref() {
        match seed_if_empty(repository.as_ref(), Path::new(data_file)).await {
            Ok(count) => info!("Seed complete ({} profiles inserted)", count),
            Err(e) => error!("Failed to seed profiles from {}: {}", data_file, e),
        }
    }

    // Phone verification
    let otp_ttl = Duration::from_secs(settings.verification.otp_ttl_secs);
    let sessions = Arc::new(MokaSessionStore::for_ttl(settings.verification.max_sessions, otp_ttl));
    let verifier = PhoneVerifier::new(
        sessions,
        Arc::new(LogTransport),
        chrono::Duration::seconds(settings.verification.otp_ttl_secs as i64),
    );

    info!(
        "Phone verifier initialized (TTL: {}s, max sessions: {})",
        settings.verification.otp_ttl_secs, settings.verification.max_sessions
    );

    // Initialize matcher with configured baseline
    let baseline = settings.scoring_baseline();
    let matcher = Matcher::new(baseline);

    info!("Matcher initialized with baseline: {:?}", baseline);

    // Build application state
    let app_state = AppState {
        repository,
        verifier,
        matcher,
        matching: settings.matching.clone(),
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
