//! Discovery -> queue -> worker -> store -> lookup, wired with the real
//! SQLite adapters and scripted DNS answers.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use ipwatch_api::{create_api_routes, create_lookup_routes, AppState};
use ipwatch_application::ports::{DomainFeed, DomainHistoryRepository, DomainResolver, JobQueue};
use ipwatch_application::use_cases::*;
use ipwatch_domain::config::DatabaseConfig;
use ipwatch_domain::{DomainError, JobItem, JobResult};
use ipwatch_infrastructure::database::{create_read_pool, create_write_pool, run_migrations};
use ipwatch_infrastructure::queue::SqliteJobQueue;
use ipwatch_infrastructure::repositories::SqliteDomainHistoryRepository;
use ipwatch_jobs::DomainCheckWorker;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::RwLock;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

struct ScriptedResolver {
    answers: RwLock<HashMap<String, JobResult>>,
}

impl ScriptedResolver {
    fn new() -> Self {
        Self {
            answers: RwLock::new(HashMap::new()),
        }
    }

    async fn answer(&self, domain: &str, ip: &str) {
        self.answers
            .write()
            .await
            .insert(domain.to_string(), JobResult::resolved(vec![ip.to_string()]));
    }

    async fn fail(&self, domain: &str, error: &str) {
        self.answers
            .write()
            .await
            .insert(domain.to_string(), JobResult::failed(error));
    }
}

#[async_trait]
impl DomainResolver for ScriptedResolver {
    async fn resolve_ipv4(&self, domain: &str) -> JobResult {
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.answers
            .read()
            .await
            .get(domain)
            .cloned()
            .unwrap_or_else(|| JobResult::failed(format!("queryA ENOTFOUND {}", domain)))
    }
}

struct StaticFeed(Vec<String>);

#[async_trait]
impl DomainFeed for StaticFeed {
    async fn fetch(&self, _date: NaiveDate) -> Result<Vec<String>, DomainError> {
        Ok(self.0.clone())
    }
}

struct Pipeline {
    repo: Arc<SqliteDomainHistoryRepository>,
    queue: Arc<SqliteJobQueue>,
    resolver: Arc<ScriptedResolver>,
    app: Router,
    discover: Arc<DiscoverDomainsUseCase>,
    enqueue: Arc<EnqueueDomainsUseCase>,
    resolve: Arc<ResolveDomainUseCase>,
    complete: Arc<CompleteJobUseCase>,
    _dir: TempDir,
}

async fn build_pipeline(feed: Vec<&str>) -> Pipeline {
    let dir = tempfile::tempdir().unwrap();
    let cfg = DatabaseConfig {
        path: dir.path().join("ipwatch.db").display().to_string(),
        ..Default::default()
    };
    let write_pool = create_write_pool(&cfg).await.unwrap();
    run_migrations(&write_pool).await.unwrap();
    let read_pool = create_read_pool(&cfg).await.unwrap();

    let repo = Arc::new(SqliteDomainHistoryRepository::new(
        write_pool.clone(),
        read_pool,
    ));
    let queue = Arc::new(SqliteJobQueue::new(write_pool));
    let resolver = Arc::new(ScriptedResolver::new());
    let feed = Arc::new(StaticFeed(feed.into_iter().map(String::from).collect()));

    let reconcile = Arc::new(ReconcileDomainUseCase::new(repo.clone()));
    let enqueue = Arc::new(EnqueueDomainsUseCase::new(queue.clone()));

    let state = AppState {
        get_domains_by_ip: Arc::new(GetDomainsByIpUseCase::new(repo.clone())),
        get_domain_record: Arc::new(GetDomainRecordUseCase::new(repo.clone())),
        get_queue_stats: Arc::new(GetQueueStatsUseCase::new(queue.clone())),
    };
    let app = Router::new()
        .nest("/api", create_api_routes(state.clone()))
        .merge(create_lookup_routes(state));

    Pipeline {
        discover: Arc::new(DiscoverDomainsUseCase::new(
            feed,
            enqueue.clone(),
            queue.clone(),
        )),
        resolve: Arc::new(ResolveDomainUseCase::new(resolver.clone())),
        complete: Arc::new(CompleteJobUseCase::new(reconcile, queue.clone())),
        enqueue,
        repo,
        queue,
        resolver,
        app,
        _dir: dir,
    }
}

impl Pipeline {
    /// Runs a worker until the queue is empty, then shuts it down.
    async fn drain(&self, concurrency: usize) {
        let token = CancellationToken::new();
        let worker = Arc::new(
            DomainCheckWorker::new(self.queue.clone(), self.resolve.clone(), self.complete.clone())
                .with_concurrency(concurrency)
                .with_poll_interval(Duration::from_millis(10))
                .with_lease(Duration::from_secs(30))
                .with_cancellation(token.clone()),
        );
        let handle = tokio::spawn(worker.run());

        timeout(Duration::from_secs(20), async {
            while self.queue.stats().await.unwrap().total() > 0 {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("queue not drained");

        token.cancel();
        handle.await.unwrap();
    }

    async fn lookup(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}

fn march_fourth() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

#[tokio::test]
async fn test_discovered_domains_become_searchable_by_ip() {
    let pipeline = build_pipeline(vec!["alpha.com", "beta.net", "gamma.org", "", "Alpha.com"]).await;
    pipeline.resolver.answer("alpha.com", "203.0.113.10").await;
    pipeline.resolver.answer("beta.net", "203.0.113.10").await;
    pipeline.resolver.fail("gamma.org", "queryA ESERVFAIL gamma.org").await;

    let report = pipeline.discover.execute(march_fourth()).await.unwrap();
    assert_eq!(report.summary.enqueued, 3);
    assert_eq!(report.summary.duplicates, 1);
    assert_eq!(report.queue_length, 3);

    pipeline.drain(4).await;

    let (status, body) = pipeline.lookup("/203.0.113.10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "alpha.com\nbeta.net");

    let (_, body) = pipeline.lookup("/203.0.113.10?json=true").await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["count"], 2);

    let gamma = pipeline.repo.get("gamma.org").await.unwrap().unwrap();
    assert!(gamma.current_ipv4.is_none());
    assert_eq!(gamma.error.as_deref(), Some("queryA ESERVFAIL gamma.org"));
}

#[tokio::test]
async fn test_recheck_tracks_ip_changes() {
    let pipeline = build_pipeline(vec!["moving.com"]).await;
    pipeline.resolver.answer("moving.com", "198.51.100.1").await;
    pipeline.discover.execute(march_fourth()).await.unwrap();
    pipeline.drain(2).await;

    pipeline.resolver.answer("moving.com", "198.51.100.2").await;
    pipeline
        .enqueue
        .execute(vec!["moving.com".to_string()], march_fourth())
        .await
        .unwrap();
    pipeline.drain(2).await;

    pipeline.resolver.fail("moving.com", "timeout").await;
    pipeline
        .queue
        .enqueue(JobItem::new("moving.com", "2024-03-05"))
        .await
        .unwrap();
    pipeline.drain(2).await;

    let (_, old) = pipeline.lookup("/198.51.100.1").await;
    assert_eq!(old, "");
    let (_, new) = pipeline.lookup("/198.51.100.2").await;
    assert_eq!(new, "moving.com");

    let (status, body) = pipeline.lookup("/api/domains/moving.com").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["current_ipv4"], "198.51.100.2");
    assert_eq!(json["historical_ipv4s"], serde_json::json!(["198.51.100.1"]));
    assert_eq!(json["error"], "timeout");
}

#[tokio::test]
async fn test_abandoned_lease_is_picked_up_by_next_worker() {
    let pipeline = build_pipeline(vec![]).await;
    pipeline.resolver.answer("orphan.com", "192.0.2.7").await;
    pipeline
        .queue
        .enqueue(JobItem::new("orphan.com", "2024-03-04"))
        .await
        .unwrap();

    // A worker that leased the job and died before acknowledging it.
    let leased = pipeline
        .queue
        .reserve(1, Duration::from_millis(50))
        .await
        .unwrap();
    assert_eq!(leased.len(), 1);
    sleep(Duration::from_millis(80)).await;

    pipeline.drain(1).await;

    let (_, body) = pipeline.lookup("/192.0.2.7").await;
    assert_eq!(body, "orphan.com");
}

#[tokio::test]
async fn test_invalid_lookup_is_rejected() {
    let pipeline = build_pipeline(vec![]).await;

    let (status, body) = pipeline.lookup("/999.1.1.1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Invalid IP address");
}
