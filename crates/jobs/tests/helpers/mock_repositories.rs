#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use ipwatch_application::ports::{DomainFeed, DomainHistoryRepository, DomainResolver, JobQueue};
use ipwatch_domain::{
    DomainError, DomainRecord, JobItem, JobResult, QueueStats, QueuedJob, ReconcileOutcome,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub struct MockDomainHistoryRepository {
    records: Arc<RwLock<HashMap<String, DomainRecord>>>,
    reconcile_calls: Arc<AtomicU64>,
    should_fail: Arc<AtomicBool>,
}

impl MockDomainHistoryRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            reconcile_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub fn reconcile_calls(&self) -> u64 {
        self.reconcile_calls.load(Ordering::Relaxed)
    }

    pub async fn record(&self, domain: &str) -> Option<DomainRecord> {
        self.records.read().await.get(domain).cloned()
    }
}

#[async_trait]
impl DomainHistoryRepository for MockDomainHistoryRepository {
    async fn reconcile(
        &self,
        domain_name: &str,
        result: &JobResult,
    ) -> Result<ReconcileOutcome, DomainError> {
        self.reconcile_calls.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("store unavailable".to_string()));
        }
        let mut records = self.records.write().await;
        let existing = records.remove(domain_name);
        let (record, outcome) = DomainRecord::reconcile(existing, domain_name, result, Utc::now());
        records.insert(domain_name.to_string(), record);
        Ok(outcome)
    }

    async fn get_domains_by_ip(&self, ip: &str) -> Result<Vec<String>, DomainError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("store unavailable".to_string()));
        }
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.current_ipv4.as_deref() == Some(ip))
            .map(|r| r.domain_name.clone())
            .collect())
    }

    async fn get(&self, domain_name: &str) -> Result<Option<DomainRecord>, DomainError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("store unavailable".to_string()));
        }
        Ok(self.records.read().await.get(domain_name).cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.records.read().await.len() as u64)
    }
}

struct QueueEntry {
    id: i64,
    item: JobItem,
    attempts: u32,
    leased_until: Option<Instant>,
}

pub struct MockJobQueue {
    entries: Arc<RwLock<Vec<QueueEntry>>>,
    next_id: Arc<AtomicU64>,
    remove_calls: Arc<AtomicU64>,
    fail_reserve: Arc<AtomicBool>,
}

impl MockJobQueue {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            remove_calls: Arc::new(AtomicU64::new(0)),
            fail_reserve: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn with_domains(domains: Vec<&str>) -> Self {
        let queue = Self::new();
        for domain in domains {
            queue
                .enqueue(JobItem::new(domain, "2024-01-01"))
                .await
                .unwrap();
        }
        queue
    }

    pub fn set_fail_reserve(&self, fail: bool) {
        self.fail_reserve.store(fail, Ordering::Relaxed);
    }

    pub fn remove_calls(&self) -> u64 {
        self.remove_calls.load(Ordering::Relaxed)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn items(&self) -> Vec<JobItem> {
        self.entries
            .read()
            .await
            .iter()
            .map(|e| e.item.clone())
            .collect()
    }

    /// Makes every leased job immediately available again.
    pub async fn expire_leases(&self) {
        for entry in self.entries.write().await.iter_mut() {
            entry.leased_until = None;
        }
    }
}

#[async_trait]
impl JobQueue for MockJobQueue {
    async fn enqueue(&self, item: JobItem) -> Result<i64, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) as i64;
        self.entries.write().await.push(QueueEntry {
            id,
            item,
            attempts: 0,
            leased_until: None,
        });
        Ok(id)
    }

    async fn enqueue_batch(&self, items: Vec<JobItem>) -> Result<u64, DomainError> {
        let count = items.len() as u64;
        for item in items {
            self.enqueue(item).await?;
        }
        Ok(count)
    }

    async fn reserve(&self, limit: usize, lease: Duration) -> Result<Vec<QueuedJob>, DomainError> {
        if self.fail_reserve.load(Ordering::Relaxed) {
            return Err(DomainError::QueueError("queue unavailable".to_string()));
        }
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let mut reserved = Vec::new();
        for entry in entries.iter_mut() {
            if reserved.len() >= limit {
                break;
            }
            if entry.leased_until.is_some_and(|until| until > now) {
                continue;
            }
            entry.leased_until = Some(now + lease);
            entry.attempts += 1;
            reserved.push(QueuedJob {
                id: entry.id,
                item: entry.item.clone(),
                attempts: entry.attempts,
            });
        }
        Ok(reserved)
    }

    async fn remove(&self, job_id: i64) -> Result<(), DomainError> {
        self.remove_calls.fetch_add(1, Ordering::Relaxed);
        self.entries.write().await.retain(|e| e.id != job_id);
        Ok(())
    }

    async fn stats(&self) -> Result<QueueStats, DomainError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        let leased = entries
            .iter()
            .filter(|e| e.leased_until.is_some_and(|until| until > now))
            .count() as u64;
        Ok(QueueStats {
            pending: entries.len() as u64 - leased,
            leased,
        })
    }
}

pub struct MockDomainResolver {
    responses: Arc<RwLock<HashMap<String, JobResult>>>,
    call_count: Arc<AtomicU64>,
    in_flight: Arc<AtomicU64>,
    max_in_flight: Arc<AtomicU64>,
    delay: Duration,
    panic_on: Option<String>,
}

impl MockDomainResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicU64::new(0)),
            max_in_flight: Arc::new(AtomicU64::new(0)),
            delay: Duration::ZERO,
            panic_on: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Resolving `domain` panics inside the worker task.
    pub fn panicking_on(mut self, domain: &str) -> Self {
        self.panic_on = Some(domain.to_string());
        self
    }

    pub async fn set_ip(&self, domain: &str, ip: &str) {
        self.responses
            .write()
            .await
            .insert(domain.to_string(), JobResult::resolved(vec![ip.to_string()]));
    }

    pub async fn set_response(&self, domain: &str, result: JobResult) {
        self.responses
            .write()
            .await
            .insert(domain.to_string(), result);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn max_in_flight(&self) -> u64 {
        self.max_in_flight.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DomainResolver for MockDomainResolver {
    async fn resolve_ipv4(&self, domain: &str) -> JobResult {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.panic_on.as_deref() == Some(domain) {
            panic!("resolver blew up on {domain}");
        }
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = self
            .responses
            .read()
            .await
            .get(domain)
            .cloned()
            .unwrap_or_else(|| JobResult::failed(format!("queryA ENOTFOUND {domain}")));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub struct MockDomainFeed {
    domains: Vec<String>,
    requested: Arc<RwLock<Vec<NaiveDate>>>,
    should_fail: bool,
}

impl MockDomainFeed {
    pub fn new(domains: Vec<&str>) -> Self {
        Self {
            domains: domains.into_iter().map(String::from).collect(),
            requested: Arc::new(RwLock::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            domains: vec![],
            requested: Arc::new(RwLock::new(Vec::new())),
            should_fail: true,
        }
    }

    pub async fn requested_dates(&self) -> Vec<NaiveDate> {
        self.requested.read().await.clone()
    }
}

#[async_trait]
impl DomainFeed for MockDomainFeed {
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<String>, DomainError> {
        self.requested.write().await.push(date);
        if self.should_fail {
            return Err(DomainError::FeedError("download failed".to_string()));
        }
        Ok(self.domains.clone())
    }
}
