use std::sync::Arc;
use crate::domain::ports::{
    BlackoutRepository, BookingRepository, CustomerRepository, EmailService,
    JobRepository, MailLogRepository, PaymentRepository, PricingTierRepository,
    ScheduleRepository, SettingsRepository, TenantRepository, TourRepository,
    VariantRepository,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub tour_repo: Arc<dyn TourRepository>,
    pub pricing_tier_repo: Arc<dyn PricingTierRepository>,
    pub variant_repo: Arc<dyn VariantRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub blackout_repo: Arc<dyn BlackoutRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub mail_log_repo: Arc<dyn MailLogRepository>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
