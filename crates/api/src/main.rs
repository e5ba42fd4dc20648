use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auriga_api::config::{ScriptConfig, ServerConfig};
use auriga_api::router::build_app_router;
use auriga_api::scripting::orchestrator::ScriptOrchestrator;
use auriga_api::state::AppState;
use auriga_db::store::{PgJobStore, PgScriptStore};
use auriga_scripts::cache::LocalScriptCache;
use auriga_scripts::fetcher::ScriptFetcher;
use auriga_scripts::resolver::ScriptResolver;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auriga_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let script_config = ScriptConfig::from_env();
    tracing::info!(
        raw_base_url = %script_config.raw_base_url,
        cache_dir = %script_config.cache_dir.display(),
        "Loaded script configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = auriga_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    auriga_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    auriga_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Script resolution ---
    let resolver = Arc::new(ScriptResolver::new(
        ScriptFetcher::new(
            script_config.raw_base_url.clone(),
            script_config.api_base_url.clone(),
        ),
        LocalScriptCache::new(script_config.cache_dir.clone()),
    ));

    // --- Orchestrator ---
    let orchestrator = Arc::new(ScriptOrchestrator::new(
        Arc::clone(&resolver),
        Arc::new(PgScriptStore::new(pool.clone())),
        Arc::new(PgJobStore::new(pool.clone())),
        script_config.token.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        scripts: Arc::new(script_config),
        resolver,
        orchestrator,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid bind address");
    tracing::info!(%addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
