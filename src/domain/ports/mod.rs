use crate::domain::models::{
    blackout::BlackoutDate, booking::{Booking, SlotSeats}, customer::Customer, job::Job,
    mail_log::MailLog, payment::Payment, pricing_tier::PricingTier, schedule::Schedule,
    settings::OrganizationSettings, tenant::Tenant, tour::Tour, variant::TourVariant,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError>;
    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
}

#[async_trait]
pub trait TourRepository: Send + Sync {
    async fn create(&self, tour: &Tour) -> Result<Tour, AppError>;
    async fn find_by_slug(&self, tenant_id: &str, slug: &str) -> Result<Option<Tour>, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Tour>, AppError>;
    async fn list(&self, tenant_id: &str) -> Result<Vec<Tour>, AppError>;
    async fn update(&self, tour: &Tour) -> Result<Tour, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PricingTierRepository: Send + Sync {
    async fn create(&self, tier: &PricingTier) -> Result<PricingTier, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<PricingTier>, AppError>;
    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<PricingTier>, AppError>;
    async fn update(&self, tier: &PricingTier) -> Result<PricingTier, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait VariantRepository: Send + Sync {
    async fn create(&self, variant: &TourVariant) -> Result<TourVariant, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<TourVariant>, AppError>;
    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<TourVariant>, AppError>;
    async fn update(&self, variant: &TourVariant) -> Result<TourVariant, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, schedule: &Schedule) -> Result<Schedule, AppError>;
    /// Bulk insert for generation runs. Slots that already exist are left
    /// alone; returns how many rows were actually inserted.
    async fn create_many(&self, schedules: &[Schedule]) -> Result<i64, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Schedule>, AppError>;
    async fn find_by_slot(&self, tour_id: &str, date: NaiveDate, time: &str) -> Result<Option<Schedule>, AppError>;
    async fn list_by_range(&self, tour_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Schedule>, AppError>;
    async fn update(&self, schedule: &Schedule) -> Result<Schedule, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BlackoutRepository: Send + Sync {
    async fn upsert(&self, blackout: &BlackoutDate) -> Result<BlackoutDate, AppError>;
    async fn find_by_date(&self, tour_id: &str, date: NaiveDate) -> Result<Option<BlackoutDate>, AppError>;
    async fn list_by_range(&self, tour_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<BlackoutDate>, AppError>;
    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<BlackoutDate>, AppError>;
    async fn delete(&self, tour_id: &str, date: NaiveDate) -> Result<(), AppError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Customer>, AppError>;
    async fn list(&self, tenant_id: &str, search: Option<&str>) -> Result<Vec<Customer>, AppError>;
    async fn update(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Creates the booking, reserves its seats on the schedule row and
    /// queues the given jobs in one transaction. Fails with a conflict when
    /// the slot no longer has the seats.
    async fn create_with_jobs(&self, booking: &Booking, seats: &SlotSeats, jobs: Vec<Job>) -> Result<Booking, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_reference(&self, tenant_id: &str, reference: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Persists an edited booking, releasing seats on the old slot and
    /// reserving on the new one when the update moves or resizes the party.
    async fn update(&self, booking: &Booking, release: Option<&SlotSeats>, reserve: Option<&SlotSeats>) -> Result<Booking, AppError>;
    /// Marks the booking cancelled, releases its seats and queues the given
    /// jobs in one transaction.
    async fn cancel(&self, booking: &Booking, seats: &SlotSeats, jobs: Vec<Job>) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn list_by_booking(&self, tenant_id: &str, booking_id: &str) -> Result<Vec<Payment>, AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Settings row for the tenant, created with defaults on first access.
    async fn get_or_create(&self, tenant_id: &str) -> Result<OrganizationSettings, AppError>;
    async fn update(&self, settings: &OrganizationSettings) -> Result<OrganizationSettings, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn claim_due(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
    async fn cancel_pending_for_booking(&self, booking_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait MailLogRepository: Send + Sync {
    async fn log_mail(&self, log: &MailLog) -> Result<(), AppError>;
    async fn has_mail_been_sent(&self, recipient: &str, template_name: &str, context_hash: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}
