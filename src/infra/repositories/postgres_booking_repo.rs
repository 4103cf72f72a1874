use crate::domain::{models::{booking::{Booking, SlotSeats}, job::Job}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Conditional seat reservation: the guard in the WHERE clause makes
/// concurrent bookings for the last seats serialize at the database.
async fn reserve_seats(tx: &mut Transaction<'_, Postgres>, seats: &SlotSeats) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE schedules SET booked_count = booked_count + $1
         WHERE tour_id = $2 AND date = $3 AND time = $4 AND booked_count + $1 <= max_participants"
    )
        .bind(seats.seats)
        .bind(&seats.tour_id)
        .bind(seats.date)
        .bind(&seats.time)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;
    if result.rows_affected() == 0 {
        return Err(AppError::Conflict("Not enough spots remaining for this departure".to_string()));
    }
    Ok(())
}

async fn release_seats(tx: &mut Transaction<'_, Postgres>, seats: &SlotSeats) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE schedules SET booked_count = GREATEST(booked_count - $1, 0)
         WHERE tour_id = $2 AND date = $3 AND time = $4"
    )
        .bind(seats.seats)
        .bind(&seats.tour_id)
        .bind(seats.date)
        .bind(&seats.time)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;
    Ok(())
}

async fn queue_jobs(tx: &mut Transaction<'_, Postgres>, jobs: Vec<Job>) -> Result<(), AppError> {
    for job in jobs {
        sqlx::query("INSERT INTO jobs (id, job_type, payload, execute_at, status, error_message, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)")
            .bind(&job.id).bind(&job.job_type).bind(&job.payload).bind(job.execute_at)
            .bind(&job.status).bind(&job.error_message).bind(job.created_at)
            .execute(&mut **tx).await.map_err(AppError::Database)?;
    }
    Ok(())
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_with_jobs(&self, booking: &Booking, seats: &SlotSeats, jobs: Vec<Job>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        reserve_seats(&mut tx, seats).await?;
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, tenant_id, tour_id, customer_id, variant_id, reference, booking_date, booking_time, adult_count, child_count, infant_count, subtotal, discount, tax, total, special_requests, source, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.tenant_id).bind(&booking.tour_id).bind(&booking.customer_id)
            .bind(&booking.variant_id).bind(&booking.reference).bind(booking.booking_date).bind(&booking.booking_time)
            .bind(booking.adult_count).bind(booking.child_count).bind(booking.infant_count)
            .bind(&booking.subtotal).bind(&booking.discount).bind(&booking.tax).bind(&booking.total)
            .bind(&booking.special_requests).bind(&booking.source).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        queue_jobs(&mut tx, jobs).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE tenant_id = $1 AND id = $2").bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_reference(&self, tenant_id: &str, reference: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE tenant_id = $1 AND reference = $2").bind(tenant_id).bind(reference).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE tenant_id = $1 ORDER BY booking_date ASC, booking_time ASC").bind(tenant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking, release: Option<&SlotSeats>, reserve: Option<&SlotSeats>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        if let Some(seats) = release {
            release_seats(&mut tx, seats).await?;
        }
        if let Some(seats) = reserve {
            reserve_seats(&mut tx, seats).await?;
        }
        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET booking_date=$1, booking_time=$2, adult_count=$3, child_count=$4, infant_count=$5, subtotal=$6, discount=$7, tax=$8, total=$9, special_requests=$10, source=$11, variant_id=$12
             WHERE id=$13 AND tenant_id=$14
             RETURNING *"
        )
            .bind(booking.booking_date).bind(&booking.booking_time)
            .bind(booking.adult_count).bind(booking.child_count).bind(booking.infant_count)
            .bind(&booking.subtotal).bind(&booking.discount).bind(&booking.tax).bind(&booking.total)
            .bind(&booking.special_requests).bind(&booking.source).bind(&booking.variant_id)
            .bind(&booking.id).bind(&booking.tenant_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn cancel(&self, booking: &Booking, seats: &SlotSeats, jobs: Vec<Job>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let cancelled = sqlx::query_as::<_, Booking>("UPDATE bookings SET status = 'cancelled' WHERE id = $1 RETURNING *")
            .bind(&booking.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        release_seats(&mut tx, seats).await?;
        queue_jobs(&mut tx, jobs).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }
}
