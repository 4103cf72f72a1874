pub mod tenant;
pub mod tour;
pub mod pricing_tier;
pub mod variant;
pub mod schedule;
pub mod blackout;
pub mod customer;
pub mod booking;
pub mod payment;
pub mod settings;
pub mod job;
pub mod mail_log;
