pub mod auth_handler;
pub mod error;
pub mod health;
pub mod job_handler;
pub mod question_handler;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::adapter::middleware::auth::auth_middleware;
use crate::adapter::middleware::metrics::track_http_metrics;
use crate::domain::repository::{JobRepository, QuestionRepository, UserRepository};
use crate::domain::service::{PasswordHasher, QuestionCsvImporter, TokenIssuer};
use crate::infrastructure::metrics::Metrics;
use crate::usecase::{
    CreateJobUseCase, GetJobUseCase, ImportQuestionsUseCase, ListJobsUseCase, ListQuestionsUseCase,
    SigninUseCase, SignupUseCase, UpdateJobUseCase,
};

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub create_job_uc: Arc<CreateJobUseCase>,
    pub list_jobs_uc: Arc<ListJobsUseCase>,
    pub get_job_uc: Arc<GetJobUseCase>,
    pub update_job_uc: Arc<UpdateJobUseCase>,
    pub list_questions_uc: Arc<ListQuestionsUseCase>,
    pub import_questions_uc: Arc<ImportQuestionsUseCase>,
    pub signup_uc: Arc<SignupUseCase>,
    pub signin_uc: Arc<SigninUseCase>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub metrics: Arc<Metrics>,
    /// None の場合はインメモリリポジトリで動作している
    pub db_pool: Option<PgPool>,
    pub require_token: bool,
    pub upload_limit_bytes: usize,
}

/// AppDependencies は AppState の構築に必要なリポジトリとドメインサービス。
pub struct AppDependencies {
    pub job_repo: Arc<dyn JobRepository>,
    pub question_repo: Arc<dyn QuestionRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub metrics: Arc<Metrics>,
}

/// アップロードのリクエストボディ上限のデフォルト値（10 MiB）。
const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

impl AppState {
    pub fn new(deps: AppDependencies) -> Self {
        let importer = Arc::new(QuestionCsvImporter::new(deps.job_repo.clone()));
        Self {
            create_job_uc: Arc::new(CreateJobUseCase::new(deps.job_repo.clone())),
            list_jobs_uc: Arc::new(ListJobsUseCase::new(deps.job_repo.clone())),
            get_job_uc: Arc::new(GetJobUseCase::new(deps.job_repo.clone())),
            update_job_uc: Arc::new(UpdateJobUseCase::new(deps.job_repo)),
            list_questions_uc: Arc::new(ListQuestionsUseCase::new(deps.question_repo.clone())),
            import_questions_uc: Arc::new(ImportQuestionsUseCase::new(
                importer,
                deps.question_repo,
            )),
            signup_uc: Arc::new(SignupUseCase::new(
                deps.user_repo.clone(),
                deps.password_hasher.clone(),
                deps.token_issuer.clone(),
            )),
            signin_uc: Arc::new(SigninUseCase::new(
                deps.user_repo,
                deps.password_hasher,
                deps.token_issuer.clone(),
            )),
            token_issuer: deps.token_issuer,
            metrics: deps.metrics,
            db_pool: None,
            require_token: false,
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn with_require_token(mut self, require_token: bool) -> Self {
        self.require_token = require_token;
        self
    }

    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit_bytes = bytes;
        self
    }
}

/// REST API ルーターを構築する。
pub fn router(state: AppState) -> Router {
    // 認証不要のエンドポイント
    let public_routes = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/api/v1/auth/signup", post(auth_handler::signup))
        .route("/api/v1/auth/signin", post(auth_handler::signin));

    let api_routes = Router::new()
        .route(
            "/api/v1/jobs",
            get(job_handler::list_jobs).post(job_handler::create_job),
        )
        .route("/api/v1/jobs/{id}", get(job_handler::get_job_by_id))
        .route(
            "/api/v1/jobs/code/{code}",
            get(job_handler::get_job_by_code).put(job_handler::update_job),
        )
        .route(
            "/api/v1/questions/job/{job_id}",
            get(question_handler::list_by_job),
        )
        .route(
            "/api/v1/questions/job/{job_id}/count",
            get(question_handler::count_by_job),
        )
        .route(
            "/api/v1/questions/upload-csv",
            post(question_handler::upload_csv)
                .layer(DefaultBodyLimit::max(state.upload_limit_bytes)),
        );

    // require_token が有効な場合のみ Bearer 認証を適用する（dev モード / テストではオープンアクセス）
    let api_routes = if state.require_token {
        api_routes.route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
    } else {
        api_routes
    };

    public_routes
        .merge(api_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            track_http_metrics,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
