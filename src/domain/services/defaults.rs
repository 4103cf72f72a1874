pub fn get_default_template(name: &str) -> String {
    match name {
        "confirmation" => include_str!("../../templates/defaults/confirmation.mjml").to_string(),
        "reminder" => include_str!("../../templates/defaults/reminder.mjml").to_string(),
        "cancellation" => include_str!("../../templates/defaults/cancellation.mjml").to_string(),
        _ => format!("<mjml><mj-body><mj-text>Default template for {} not found.</mj-text></mj-body></mjml>", name),
    }
}

pub const DEFAULT_CONFIRMATION_SUBJECT: &str = "Booking Confirmed: {{ tour_name }}";
pub const DEFAULT_REMINDER_SUBJECT: &str = "Reminder: {{ tour_name }} departs soon";
pub const DEFAULT_CANCELLATION_SUBJECT: &str = "Cancelled: {{ tour_name }}";
