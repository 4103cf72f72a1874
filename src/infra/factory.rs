use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::domain::services::defaults::{
    get_default_template, DEFAULT_CANCELLATION_SUBJECT, DEFAULT_CONFIRMATION_SUBJECT,
    DEFAULT_REMINDER_SUBJECT,
};
use crate::infra::repositories::{
    postgres_tenant_repo::PostgresTenantRepo, postgres_tour_repo::PostgresTourRepo,
    postgres_pricing_tier_repo::PostgresPricingTierRepo, postgres_variant_repo::PostgresVariantRepo,
    postgres_schedule_repo::PostgresScheduleRepo, postgres_blackout_repo::PostgresBlackoutRepo,
    postgres_customer_repo::PostgresCustomerRepo, postgres_booking_repo::PostgresBookingRepo,
    postgres_payment_repo::PostgresPaymentRepo, postgres_settings_repo::PostgresSettingsRepo,
    postgres_job_repo::PostgresJobRepo, postgres_mail_log_repo::PostgresMailLogRepo,
    sqlite_tenant_repo::SqliteTenantRepo, sqlite_tour_repo::SqliteTourRepo,
    sqlite_pricing_tier_repo::SqlitePricingTierRepo, sqlite_variant_repo::SqliteVariantRepo,
    sqlite_schedule_repo::SqliteScheduleRepo, sqlite_blackout_repo::SqliteBlackoutRepo,
    sqlite_customer_repo::SqliteCustomerRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_payment_repo::SqlitePaymentRepo, sqlite_settings_repo::SqliteSettingsRepo,
    sqlite_job_repo::SqliteJobRepo, sqlite_mail_log_repo::SqliteMailLogRepo,
};

fn load_templates() -> Tera {
    let mut tera = Tera::default();
    for name in ["confirmation", "reminder", "cancellation"] {
        tera.add_raw_template(name, &get_default_template(name))
            .expect("Failed to load default template");
    }
    tera.add_raw_template("confirmation_subject", DEFAULT_CONFIRMATION_SUBJECT)
        .expect("Failed to load confirmation subject");
    tera.add_raw_template("reminder_subject", DEFAULT_REMINDER_SUBJECT)
        .expect("Failed to load reminder subject");
    tera.add_raw_template("cancellation_subject", DEFAULT_CANCELLATION_SUBJECT)
        .expect("Failed to load cancellation subject");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
        config.mail_from_alias.clone(),
    ));

    let templates = Arc::new(load_templates());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            tenant_repo: Arc::new(PostgresTenantRepo::new(pool.clone())),
            tour_repo: Arc::new(PostgresTourRepo::new(pool.clone())),
            pricing_tier_repo: Arc::new(PostgresPricingTierRepo::new(pool.clone())),
            variant_repo: Arc::new(PostgresVariantRepo::new(pool.clone())),
            schedule_repo: Arc::new(PostgresScheduleRepo::new(pool.clone())),
            blackout_repo: Arc::new(PostgresBlackoutRepo::new(pool.clone())),
            customer_repo: Arc::new(PostgresCustomerRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            payment_repo: Arc::new(PostgresPaymentRepo::new(pool.clone())),
            settings_repo: Arc::new(PostgresSettingsRepo::new(pool.clone())),
            job_repo: Arc::new(PostgresJobRepo::new(pool.clone())),
            mail_log_repo: Arc::new(PostgresMailLogRepo::new(pool.clone())),
            email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
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
            email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
