pub mod availability;
pub mod blackout;
pub mod booking;
pub mod customer;
pub mod health;
pub mod payment;
pub mod pricing_tier;
pub mod schedule;
pub mod settings;
pub mod tenant;
pub mod tour;
pub mod variant;
