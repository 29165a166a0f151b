use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use question_bank_server::adapter::handler::{self, AppDependencies, AppState};
use question_bank_server::adapter::repository::{
    InMemoryJobRepository, InMemoryQuestionRepository, InMemoryUserRepository,
    JobPostgresRepository, QuestionPostgresRepository, UserPostgresRepository,
};
use question_bank_server::domain::repository::{
    JobRepository, QuestionRepository, UserRepository,
};
use question_bank_server::infrastructure::config::Config;
use question_bank_server::infrastructure::database;
use question_bank_server::infrastructure::metrics::Metrics;
use question_bank_server::infrastructure::password::Argon2PasswordHasher;
use question_bank_server::infrastructure::telemetry;
use question_bank_server::infrastructure::token::JwtTokenIssuer;

static MIGRATOR: sqlx::migrate::Migrator =
    sqlx::migrate!("../../../database/question-bank-db/migrations");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    // Telemetry
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    telemetry::init_tracing(&cfg.app.environment, &log_format);

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting question bank server"
    );

    let metrics = Arc::new(Metrics::new(&cfg.app.name));

    // Repositories: PostgreSQL if DATABASE_URL or database config is set, otherwise in-memory
    let use_database = cfg.database.is_some() || std::env::var("DATABASE_URL").is_ok();
    let (job_repo, question_repo, user_repo, db_pool): (
        Arc<dyn JobRepository>,
        Arc<dyn QuestionRepository>,
        Arc<dyn UserRepository>,
        _,
    ) = if use_database {
        info!("connecting to PostgreSQL...");
        let pool = database::connect(cfg.database.as_ref()).await?;
        MIGRATOR.run(&pool).await?;
        info!("connected to PostgreSQL, migrations applied");
        (
            Arc::new(JobPostgresRepository::with_metrics(pool.clone(), metrics.clone())),
            Arc::new(QuestionPostgresRepository::with_metrics(
                pool.clone(),
                metrics.clone(),
            )),
            Arc::new(UserPostgresRepository::new(pool.clone())),
            Some(pool),
        )
    } else {
        info!("no database configured, using in-memory repositories");
        (
            Arc::new(InMemoryJobRepository::new()),
            Arc::new(InMemoryQuestionRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            None,
        )
    };

    let token_issuer = Arc::new(JwtTokenIssuer::new(
        cfg.auth.jwt_secret.clone(),
        cfg.auth.issuer.clone(),
        cfg.auth.token_ttl_secs,
    ));

    let mut state = AppState::new(AppDependencies {
        job_repo,
        question_repo,
        user_repo,
        password_hasher: Arc::new(Argon2PasswordHasher),
        token_issuer,
        metrics,
    })
    .with_require_token(cfg.auth.require_token)
    .with_upload_limit(cfg.import.body_limit_bytes());
    if let Some(pool) = db_pool {
        state = state.with_db_pool(pool);
    }

    let app = handler::router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "REST server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
