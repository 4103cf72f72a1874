use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::domain::models::{job::Job, mail_log::MailLog};
use crate::domain::services::availability::departure_instant;
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;
use crate::state::AppState;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        match state.job_repo.claim_due(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let job_id = job.id.clone();
                    let job_type = job.job_type.clone();
                    let tenant_id = job.payload.tenant_id.clone();

                    let span = info_span!(
                        "background_job",
                        job_id = %job_id,
                        job_type = %job_type,
                        tenant_id = %tenant_id
                    );

                    let state = state.clone();

                    async move {
                        info!("Processing job: {}", job_type);
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed successfully");
                                if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            },
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed with error: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

fn mjml_to_html(body: &str) -> Result<String, AppError> {
    match mrml::parse(body) {
        Ok(root) => {
            let opts = mrml::prelude::render::RenderOptions::default();
            match root.render(&opts) {
                Ok(html) => Ok(html),
                Err(e) => {
                    error!("MJML Render Error: {:?}", e);
                    Err(AppError::Internal(format!("MJML Render Error: {:?}", e)))
                }
            }
        },
        Err(e) => {
            error!("MJML Parse Error: {:?}", e);
            Err(AppError::Internal(format!("MJML Parse Error: {:?}", e)))
        }
    }
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    let booking_id = &job.payload.booking_id;
    let tenant_id = &job.payload.tenant_id;

    let template_name = match job.job_type.as_str() {
        "CONFIRMATION" => "confirmation",
        "REMINDER" => "reminder",
        "CANCELLATION" => "cancellation",
        other => return Err(AppError::Internal(format!("Unknown job type {}", other))),
    };

    let tenant = state.tenant_repo.find_by_id(tenant_id).await?
        .ok_or(AppError::NotFound(format!("Tenant {} not found", tenant_id)))?;
    let booking = state.booking_repo.find_by_id(tenant_id, booking_id).await?
        .ok_or(AppError::NotFound(format!("Booking {} not found", booking_id)))?;

    // A reminder can still be claimed after its booking was cancelled when
    // the cancellation raced the worker's pickup.
    if job.job_type == "REMINDER" && booking.status == "cancelled" {
        info!("Skipping reminder for cancelled booking {}", booking.reference);
        return Ok(());
    }

    let tour = state.tour_repo.find_by_id(tenant_id, &booking.tour_id).await?
        .ok_or(AppError::NotFound(format!("Tour {} not found", booking.tour_id)))?;
    let customer = state.customer_repo.find_by_id(tenant_id, &booking.customer_id).await?
        .ok_or(AppError::NotFound(format!("Customer {} not found", booking.customer_id)))?;

    let mut context = tera::Context::new();
    context.insert("customer_name", &customer.name);
    context.insert("tour_name", &tour.name);
    context.insert("tour_description", &tour.description);
    context.insert("tenant_name", &tenant.name);
    context.insert("logo_url", &tenant.logo_url.clone().unwrap_or_default());
    context.insert("reference", &booking.reference);
    context.insert("booking_date", &booking.booking_date.format("%Y-%m-%d").to_string());
    context.insert("booking_time", &booking.booking_time);
    context.insert("location", &tour.location);
    context.insert("timezone", &tour.timezone);
    context.insert("party_size", &booking.party_size());
    context.insert("total", &booking.total);
    let context_val = context.into_json();

    // Idempotency: the same template over the same context goes out once.
    let context_json = serde_json::to_string(&context_val).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(template_name.as_bytes());
    hasher.update(context_json.as_bytes());
    let hash = hex::encode(hasher.finalize());

    if state.mail_log_repo.has_mail_been_sent(&customer.email, template_name, &hash).await? {
        info!("Email skipped (idempotency) for job {}. Recipient: {}, Template: {}", job.id, customer.email, template_name);
        let log = MailLog {
            id: uuid::Uuid::new_v4().to_string(),
            job_id: job.id.clone(),
            recipient: customer.email.clone(),
            template_name: template_name.to_string(),
            context_hash: hash,
            sent_at: Utc::now(),
            status: "SKIPPED_DUPLICATE".to_string(),
        };
        state.mail_log_repo.log_mail(&log).await?;
        return Ok(());
    }

    let tera_context = tera::Context::from_value(context_val.clone())
        .map_err(|e| AppError::Internal(format!("Tera context error: {:?}", e)))?;
    let body_with_vars = state.templates.render(template_name, &tera_context)
        .map_err(|e| {
            error!("Tera render error: {:?}", e);
            AppError::Internal(format!("Tera render error: {:?}", e))
        })?;
    let final_html = mjml_to_html(&body_with_vars)?;
    let final_subject = state.templates.render(&format!("{}_subject", template_name), &tera_context)
        .map_err(|e| AppError::Internal(format!("Tera subject render error: {:?}", e)))?;

    let (attachment_name, attachment_data) = if job.job_type == "CONFIRMATION" {
        match departure_instant(booking.booking_date, &booking.booking_time, &tour.timezone) {
            Some(start) => {
                let end = start + chrono::Duration::minutes(tour.duration_min as i64);
                let ics_string = generate_ics(&tour, &booking, start, end);
                (Some("invite.ics"), Some(ics_string.into_bytes()))
            }
            None => (None, None),
        }
    } else {
        (None, None)
    };

    info!("Sending {} email to {}", template_name, customer.email);
    state.email_service.send(&customer.email, &final_subject, &final_html, attachment_name, attachment_data.as_deref()).await?;

    let log = MailLog {
        id: uuid::Uuid::new_v4().to_string(),
        job_id: job.id.clone(),
        recipient: customer.email.clone(),
        template_name: template_name.to_string(),
        context_hash: hash,
        sent_at: Utc::now(),
        status: "SENT".to_string(),
    };
    state.mail_log_repo.log_mail(&log).await?;

    Ok(())
}
