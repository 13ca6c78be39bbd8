use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use ipwatch_application::ports::JobQueue;
use ipwatch_domain::{DomainError, JobItem, QueueStats, QueuedJob};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Durable queue stored next to the domain records.
///
/// A reserved row gets `leased_until` set in the future; rows whose lease
/// has run out are handed out again, giving at-least-once delivery across
/// crashes and restarts.
pub struct SqliteJobQueue {
    pool: SqlitePool,
}

impl SqliteJobQueue {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn queue_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!(error = %e, "{}", context);
        DomainError::QueueError(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl JobQueue for SqliteJobQueue {
    #[instrument(skip(self), fields(domain = %item.domain))]
    async fn enqueue(&self, item: JobItem) -> Result<i64, DomainError> {
        let enqueued_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let result = sqlx::query(
            "INSERT INTO job_queue (domain, requested_at, enqueued_at) VALUES (?, ?, ?)",
        )
        .bind(&item.domain)
        .bind(&item.date)
        .bind(&enqueued_at)
        .execute(&self.pool)
        .await
        .map_err(queue_error("Failed to enqueue job"))?;

        Ok(result.last_insert_rowid())
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn enqueue_batch(&self, items: Vec<JobItem>) -> Result<u64, DomainError> {
        if items.is_empty() {
            return Ok(0);
        }

        let enqueued_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(queue_error("Failed to start enqueue transaction"))?;

        for item in &items {
            sqlx::query(
                "INSERT INTO job_queue (domain, requested_at, enqueued_at) VALUES (?, ?, ?)",
            )
            .bind(&item.domain)
            .bind(&item.date)
            .bind(&enqueued_at)
            .execute(&mut *tx)
            .await
            .map_err(queue_error("Failed to enqueue job"))?;
        }

        tx.commit()
            .await
            .map_err(queue_error("Failed to commit enqueue transaction"))?;

        debug!(count = items.len(), "Jobs enqueued");
        Ok(items.len() as u64)
    }

    async fn reserve(&self, limit: usize, lease: Duration) -> Result<Vec<QueuedJob>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let now_ms = Utc::now().timestamp_millis();
        let lease_until = now_ms + lease.as_millis() as i64;

        let mut rows = sqlx::query_as::<_, (i64, String, String, i64)>(
            "UPDATE job_queue
             SET leased_until = ?1, attempts = attempts + 1
             WHERE id IN (
                 SELECT id FROM job_queue
                 WHERE leased_until IS NULL OR leased_until <= ?2
                 ORDER BY id
                 LIMIT ?3
             )
             RETURNING id, domain, requested_at, attempts",
        )
        .bind(lease_until)
        .bind(now_ms)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(queue_error("Failed to reserve jobs"))?;

        rows.sort_by_key(|(id, ..)| *id);

        Ok(rows
            .into_iter()
            .map(|(id, domain, date, attempts)| QueuedJob {
                id,
                item: JobItem::new(domain, date),
                attempts: attempts as u32,
            })
            .collect())
    }

    async fn remove(&self, job_id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM job_queue WHERE id = ?")
            .bind(job_id)
            .execute(&self.pool)
            .await
            .map_err(queue_error("Failed to remove job"))?;

        if result.rows_affected() == 0 {
            debug!(job_id, "Job already removed");
        }
        Ok(())
    }

    async fn stats(&self) -> Result<QueueStats, DomainError> {
        let now_ms = Utc::now().timestamp_millis();
        let (total, leased) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*),
                    COALESCE(SUM(CASE WHEN leased_until > ? THEN 1 ELSE 0 END), 0)
             FROM job_queue",
        )
        .bind(now_ms)
        .fetch_one(&self.pool)
        .await
        .map_err(queue_error("Failed to read queue stats"))?;

        Ok(QueueStats {
            pending: (total - leased) as u64,
            leased: leased as u64,
        })
    }
}
