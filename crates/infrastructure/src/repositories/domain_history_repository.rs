use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use ipwatch_application::ports::DomainHistoryRepository;
use ipwatch_domain::{DomainError, DomainRecord, JobResult, ReconcileOutcome};
use sqlx::SqlitePool;
use std::collections::BTreeSet;
use tracing::{debug, error, instrument};

/// SQLite-backed domain store.
///
/// Writes go through `write_pool`; every reconcile is one transaction that
/// opens with a write, so SQLite serializes reconciles of the same domain.
pub struct SqliteDomainHistoryRepository {
    write_pool: SqlitePool,
    read_pool: SqlitePool,
}

impl SqliteDomainHistoryRepository {
    pub fn new(write_pool: SqlitePool, read_pool: SqlitePool) -> Self {
        Self {
            write_pool,
            read_pool,
        }
    }

    async fn reconcile_success(
        &self,
        domain_name: &str,
        new_ip: &str,
        now: &str,
    ) -> Result<ReconcileOutcome, sqlx::Error> {
        let mut tx = self.write_pool.begin().await?;

        // Archive the outgoing current IP before it is overwritten.
        sqlx::query(
            "INSERT INTO domain_ip_history (domain_name, ipv4, recorded_at)
             SELECT domain_name, current_ipv4, ?3 FROM domains
             WHERE domain_name = ?1 AND current_ipv4 IS NOT NULL AND current_ipv4 <> ?2
             ON CONFLICT(domain_name, ipv4) DO NOTHING",
        )
        .bind(domain_name)
        .bind(new_ip)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let previous = sqlx::query_as::<_, (Option<String>,)>(
            "SELECT current_ipv4 FROM domains WHERE domain_name = ?",
        )
        .bind(domain_name)
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO domains (domain_name, current_ipv4, last_checked, error)
             VALUES (?1, ?2, ?3, NULL)
             ON CONFLICT(domain_name) DO UPDATE SET
                 current_ipv4 = excluded.current_ipv4,
                 last_checked = excluded.last_checked,
                 error = NULL",
        )
        .bind(domain_name)
        .bind(new_ip)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM domain_ip_history WHERE domain_name = ? AND ipv4 = ?")
            .bind(domain_name)
            .bind(new_ip)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(match previous {
            None => ReconcileOutcome::Created,
            Some((Some(prev),)) if prev == new_ip => ReconcileOutcome::Confirmed,
            Some((previous,)) => ReconcileOutcome::Changed { previous },
        })
    }

    async fn reconcile_failure(
        &self,
        domain_name: &str,
        message: &str,
        now: &str,
    ) -> Result<ReconcileOutcome, sqlx::Error> {
        let mut tx = self.write_pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO domains (domain_name, current_ipv4, last_checked, error)
             VALUES (?, NULL, ?, ?)
             ON CONFLICT(domain_name) DO NOTHING",
        )
        .bind(domain_name)
        .bind(now)
        .bind(message)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            sqlx::query("UPDATE domains SET error = ?, last_checked = ? WHERE domain_name = ?")
                .bind(message)
                .bind(now)
                .bind(domain_name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(ReconcileOutcome::FailureRecorded {
            created: inserted > 0,
        })
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DomainError::DatabaseError(format!("Corrupt timestamp '{}': {}", raw, e)))
}

#[async_trait]
impl DomainHistoryRepository for SqliteDomainHistoryRepository {
    #[instrument(skip(self, result), fields(success = result.success))]
    async fn reconcile(
        &self,
        domain_name: &str,
        result: &JobResult,
    ) -> Result<ReconcileOutcome, DomainError> {
        let now = format_timestamp(Utc::now());

        let outcome = match result.authoritative_ip() {
            Some(new_ip) => self.reconcile_success(domain_name, new_ip, &now).await,
            None => {
                self.reconcile_failure(domain_name, result.error_message(), &now)
                    .await
            }
        }
        .map_err(|e| {
            error!(error = %e, domain = %domain_name, "Failed to reconcile domain");
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!(domain = %domain_name, outcome = outcome.as_str(), "Domain reconciled");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn get_domains_by_ip(&self, ip: &str) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT domain_name FROM domains WHERE current_ipv4 = ? ORDER BY domain_name",
        )
        .bind(ip)
        .fetch_all(&self.read_pool)
        .await
        .map_err(|e| {
            error!(error = %e, ip = %ip, "Failed to look up domains by IP");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, domain_name: &str) -> Result<Option<DomainRecord>, DomainError> {
        let row = sqlx::query_as::<_, (String, Option<String>, String, Option<String>)>(
            "SELECT domain_name, current_ipv4, last_checked, error
             FROM domains WHERE domain_name = ?",
        )
        .bind(domain_name)
        .fetch_optional(&self.read_pool)
        .await
        .map_err(|e| {
            error!(error = %e, domain = %domain_name, "Failed to fetch domain");
            DomainError::DatabaseError(e.to_string())
        })?;

        let Some((domain_name, current_ipv4, last_checked, error)) = row else {
            return Ok(None);
        };

        let history = sqlx::query_as::<_, (String,)>(
            "SELECT ipv4 FROM domain_ip_history WHERE domain_name = ?",
        )
        .bind(&domain_name)
        .fetch_all(&self.read_pool)
        .await
        .map_err(|e| {
            error!(error = %e, domain = %domain_name, "Failed to fetch IP history");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(Some(DomainRecord {
            domain_name,
            current_ipv4,
            historical_ipv4s: history.into_iter().map(|(ip,)| ip).collect::<BTreeSet<_>>(),
            last_checked: parse_timestamp(&last_checked)?,
            error,
        }))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM domains")
            .fetch_one(&self.read_pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        Ok(count as u64)
    }
}
