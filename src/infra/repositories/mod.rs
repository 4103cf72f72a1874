pub mod sqlite_tenant_repo;
pub mod sqlite_tour_repo;
pub mod sqlite_pricing_tier_repo;
pub mod sqlite_variant_repo;
pub mod sqlite_schedule_repo;
pub mod sqlite_blackout_repo;
pub mod sqlite_customer_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_payment_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_job_repo;
pub mod sqlite_mail_log_repo;

pub mod postgres_tenant_repo;
pub mod postgres_tour_repo;
pub mod postgres_pricing_tier_repo;
pub mod postgres_variant_repo;
pub mod postgres_schedule_repo;
pub mod postgres_blackout_repo;
pub mod postgres_customer_repo;
pub mod postgres_booking_repo;
pub mod postgres_payment_repo;
pub mod postgres_settings_repo;
pub mod postgres_job_repo;
pub mod postgres_mail_log_repo;
