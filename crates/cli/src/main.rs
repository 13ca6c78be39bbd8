use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use ipwatch_api::AppState;
use ipwatch_domain::{CliOverrides, Config};
use ipwatch_jobs::{
    discovery::feed_date, DiscoveryJob, DomainCheckWorker, JobRunner, QueueMaintenanceJob,
};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ipwatch")]
#[command(version)]
#[command(about = "ipwatch - tracks the IPv4 address of newly registered domains")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Number of concurrent resolutions
    #[arg(long)]
    concurrency: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the lookup server, the worker pool and scheduled discovery (default)
    Serve,

    /// Download one day of newly registered domains and enqueue them
    Discover {
        /// Feed date (YYYY-MM-DD); defaults to yesterday (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Enqueue domains by hand
    Enqueue {
        /// Domains to check
        domains: Vec<String>,

        /// Read additional domains from a file, one per line
        #[arg(short = 'f', long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Date stamped on the jobs (YYYY-MM-DD); defaults to today (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
        concurrency: cli.concurrency,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting ipwatch v{}", env!("CARGO_PKG_VERSION"));

    let (write_pool, read_pool) = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(write_pool.clone(), read_pool.clone(), &config)?;
    let use_cases = di::UseCases::new(&repos);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, &repos, &use_cases).await,
        Command::Discover { date } => discover(&use_cases, date).await,
        Command::Enqueue {
            domains,
            file,
            date,
        } => enqueue(&use_cases, domains, file, date).await,
    };

    close_pools(write_pool, read_pool).await;

    if let Err(e) = &result {
        error!(error = %e, "ipwatch exited with an error");
    }
    result
}

async fn serve(
    config: &Config,
    repos: &di::Repositories,
    use_cases: &di::UseCases,
) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone());

    let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());

    if config.worker.enabled {
        runner = runner.with_worker(
            DomainCheckWorker::new(
                repos.job_queue.clone(),
                use_cases.resolve.clone(),
                use_cases.complete_job.clone(),
            )
            .with_concurrency(config.worker.concurrency)
            .with_poll_interval(Duration::from_millis(config.worker.poll_interval_ms))
            .with_lease(Duration::from_secs(config.worker.lease_secs)),
        );
    } else {
        warn!("Worker disabled; queued domains will not be resolved");
    }

    if config.discovery.enabled {
        runner = runner.with_discovery(DiscoveryJob::new(
            use_cases.discover.clone(),
            config.discovery.run_at_hour_utc,
        ));
    }

    if config.worker.stats_interval_secs > 0 {
        runner = runner.with_queue_maintenance(
            QueueMaintenanceJob::new(use_cases.get_queue_stats.clone())
                .with_interval(config.worker.stats_interval_secs),
        );
    }

    let running = runner.start().await;

    let app_state = AppState {
        get_domains_by_ip: use_cases.get_domains_by_ip.clone(),
        get_domain_record: use_cases.get_domain_record.clone(),
        get_queue_stats: use_cases.get_queue_stats.clone(),
    };

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.web_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let served = server::start_web_server(web_addr, app_state, shutdown.clone()).await;

    // A web server failure must still stop the background jobs.
    shutdown.cancel();
    info!("Waiting for in-flight jobs to finish");
    running.wait().await;

    served?;
    info!("Server shutdown complete");
    Ok(())
}

async fn discover(use_cases: &di::UseCases, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(|| feed_date(Utc::now().date_naive()));
    let report = use_cases.discover.execute(date).await?;

    info!(
        %date,
        fetched = report.fetched,
        enqueued = report.summary.enqueued,
        duplicates = report.summary.duplicates,
        rejected = report.summary.rejected,
        queue_length = report.queue_length,
        "Discovery finished"
    );
    Ok(())
}

async fn enqueue(
    use_cases: &di::UseCases,
    mut domains: Vec<String>,
    file: Option<PathBuf>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    if let Some(path) = file {
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        domains.extend(contents.lines().map(str::to_string));
    }

    if domains.is_empty() {
        anyhow::bail!("No domains given; pass them as arguments or with --file");
    }

    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let summary = use_cases.enqueue.execute(domains, date).await?;
    let stats = use_cases.get_queue_stats.execute().await?;

    info!(
        enqueued = summary.enqueued,
        duplicates = summary.duplicates,
        rejected = summary.rejected,
        queue_length = stats.total(),
        "Domains enqueued"
    );
    Ok(())
}

fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });
}

async fn close_pools(write_pool: SqlitePool, read_pool: SqlitePool) {
    read_pool.close().await;
    write_pool.close().await;
    info!("Database pools closed");
}
