pub mod availability;
pub mod booking_flow;
pub mod calendar;
pub mod defaults;
pub mod deposit;
pub mod pricing;
pub mod tax;
