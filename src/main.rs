//! ActiveCore API server binary.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use activecore::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use activecore::adapters::email::ResendEmailSender;
use activecore::adapters::http::{router, AppState};
use activecore::adapters::openai::OpenAiProvider;
use activecore::adapters::paymongo::PayMongoClient;
use activecore::adapters::postgres::{
    PgAttendanceRepository, PgDishCatalog, PgMealPlanRepository, PgNotificationLog,
    PgPaymentRepository, PgRewardRepository, PgUserRepository,
};
use activecore::application::{InactivitySweep, MealPlanService, PaymentService};
use activecore::config::AppConfig;
use activecore::ports::{
    AttendanceRepository, DishCatalog, EmailSender, MealPlanAi, MealPlanRepository,
    NotificationLog, PasswordHasher, PaymentGateway, PaymentRepository, RewardRepository,
    TokenService, UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting ActiveCore API"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Ports
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let payments: Arc<dyn PaymentRepository> = Arc::new(PgPaymentRepository::new(pool.clone()));
    let attendance: Arc<dyn AttendanceRepository> =
        Arc::new(PgAttendanceRepository::new(pool.clone()));
    let rewards: Arc<dyn RewardRepository> = Arc::new(PgRewardRepository::new(pool.clone()));
    let notification_log: Arc<dyn NotificationLog> =
        Arc::new(PgNotificationLog::new(pool.clone()));
    let plans: Arc<dyn MealPlanRepository> = Arc::new(PgMealPlanRepository::new(pool.clone()));
    let catalog: Arc<dyn DishCatalog> = Arc::new(PgDishCatalog::new(pool.clone()));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(PayMongoClient::new(&config.payment));
    let ai: Arc<dyn MealPlanAi> =
        Arc::new(OpenAiProvider::new(&config.ai).with_timeout(config.ai.timeout()));
    let email: Arc<dyn EmailSender> = Arc::new(ResendEmailSender::new(&config.email));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(&config.auth));

    if config.ai.is_enabled() {
        tracing::info!(model = %config.ai.model, "AI meal planning enabled");
    } else {
        tracing::info!("AI meal planning disabled; using deterministic rotation");
    }

    // Application services
    let payment_service = Arc::new(PaymentService::new(
        users.clone(),
        payments.clone(),
        gateway,
    ));
    let meal_plans = Arc::new(MealPlanService::new(catalog, ai, plans));
    let sweep = Arc::new(InactivitySweep::new(
        users.clone(),
        notification_log,
        email.clone(),
        &config.notifications,
    ));
    if config.notifications.sweep_enabled {
        sweep.clone().spawn();
    }

    let state = AppState {
        users,
        payments,
        attendance,
        rewards,
        email,
        hasher,
        tokens,
        payment_service,
        meal_plans,
        sweep,
        checkout_success_url: config.payment.success_redirect_url.clone(),
        checkout_failed_url: config.payment.failed_redirect_url.clone(),
    };

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        origins => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        }
    };

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
