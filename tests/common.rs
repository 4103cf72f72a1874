use tourops_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_tenant_repo::SqliteTenantRepo,
        sqlite_tour_repo::SqliteTourRepo,
        sqlite_pricing_tier_repo::SqlitePricingTierRepo,
        sqlite_variant_repo::SqliteVariantRepo,
        sqlite_schedule_repo::SqliteScheduleRepo,
        sqlite_blackout_repo::SqliteBlackoutRepo,
        sqlite_customer_repo::SqliteCustomerRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_payment_repo::SqlitePaymentRepo,
        sqlite_settings_repo::SqliteSettingsRepo,
        sqlite_job_repo::SqliteJobRepo,
        sqlite_mail_log_repo::SqliteMailLogRepo,
    },
    domain::services::defaults::{
        get_default_template, DEFAULT_CANCELLATION_SUBJECT, DEFAULT_CONFIRMATION_SUBJECT,
        DEFAULT_REMINDER_SUBJECT,
    },
    domain::ports::EmailService,
    background::start_background_worker,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::Router;
use std::str::FromStr;
use async_trait::async_trait;
use tera::Tera;

pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        _recipient: &str,
        _subject: &str,
        _html_body: &str,
        _attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>
    ) -> Result<(), AppError> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        // The worker renders the real MJML defaults, so the test templates
        // must be the real ones as well.
        let mut tera = Tera::default();
        for name in ["confirmation", "reminder", "cancellation"] {
            tera.add_raw_template(name, &get_default_template(name)).unwrap();
        }
        tera.add_raw_template("confirmation_subject", DEFAULT_CONFIRMATION_SUBJECT).unwrap();
        tera.add_raw_template("reminder_subject", DEFAULT_REMINDER_SUBJECT).unwrap();
        tera.add_raw_template("cancellation_subject", DEFAULT_CANCELLATION_SUBJECT).unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            mail_from_alias: "bookings".to_string(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
            tour_repo: Arc::new(SqliteTourRepo::new(pool.clone())),
            pricing_tier_repo: Arc::new(SqlitePricingTierRepo::new(pool.clone())),
            variant_repo: Arc::new(SqliteVariantRepo::new(pool.clone())),
            schedule_repo: Arc::new(SqliteScheduleRepo::new(pool.clone())),
            blackout_repo: Arc::new(SqliteBlackoutRepo::new(pool.clone())),
            customer_repo: Arc::new(SqliteCustomerRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            settings_repo: Arc::new(SqliteSettingsRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            mail_log_repo: Arc::new(SqliteMailLogRepo::new(pool.clone())),
            email_service: Arc::new(MockEmailService),
            templates,
        });

        // Start Background Worker
        let worker_state = state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
