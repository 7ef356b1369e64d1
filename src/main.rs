use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use jobverse::config::AppConfig;
use jobverse::error::AppError;
use jobverse::pipeline::{
    hydrate, pipeline_router, projections, seed, Actor, ApplicationPipeline, ApplicationStatus,
    InMemoryApplications, InMemoryListings, LogNotifier, ReviewSurface,
};
use jobverse::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

type DemoPipeline = ApplicationPipeline<InMemoryApplications, InMemoryListings, LogNotifier>;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Jobverse",
    about = "Run the Jobverse candidate pipeline service and inspection commands",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render an employer's kanban board snapshot
    Board(BoardArgs),
    /// Print the admin platform report
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct BoardArgs {
    /// Employer whose board to render
    #[arg(long, default_value = seed::EMPLOYER_TECHCORP)]
    employer: String,
    /// Optional CSV application export to hydrate instead of the demo data
    #[arg(long)]
    applications_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Optional CSV application export to hydrate instead of the demo data
    #[arg(long)]
    applications_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Board(args) => run_board(args),
        Command::Report(args) => run_report(args),
    }
}

/// Build the demo pipeline: seeded in-memory stores, or a store hydrated from
/// a CSV export when one is supplied.
fn build_pipeline(applications_csv: Option<PathBuf>) -> Result<DemoPipeline, AppError> {
    let listings = Arc::new(InMemoryListings::new(seed::demo_listings()));
    let store = match applications_csv {
        Some(path) => {
            let file = File::open(path)?;
            let store = InMemoryApplications::default();
            let loaded = hydrate(file, &store, listings.as_ref())?;
            info!(loaded, "hydrated applications from CSV export");
            Arc::new(store)
        }
        None => Arc::new(InMemoryApplications::new(seed::demo_applications())),
    };

    Ok(ApplicationPipeline::new(
        store,
        listings,
        Arc::new(LogNotifier),
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let pipeline = Arc::new(build_pipeline(None)?);

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(pipeline_router(pipeline))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "jobverse pipeline service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_board(args: BoardArgs) -> Result<(), AppError> {
    let pipeline = build_pipeline(args.applications_csv)?;
    let applications = pipeline.applications_for_employer(&Actor::employer(&args.employer))?;
    let buckets = projections::by_status_buckets(&applications);

    println!("Candidate board for employer {}", args.employer);
    println!("{} application(s) total", buckets.total());

    for status in ApplicationStatus::ALL {
        let column = buckets.bucket(status);
        println!("\n{} ({})", status.column_title(), column.len());
        if column.is_empty() {
            println!("- no candidates");
            continue;
        }
        for app in column {
            let actions = ReviewSurface::Kanban
                .actions(status)
                .iter()
                .map(|target| target.label())
                .collect::<Vec<_>>()
                .join(", ");
            let actions_note = if actions.is_empty() {
                String::new()
            } else {
                format!(" | next: {actions}")
            };
            println!(
                "- {} | {} | applied {}{}",
                app.applicant_name,
                app.job_title,
                app.applied_at.date_naive(),
                actions_note
            );
        }
    }

    Ok(())
}

fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let pipeline = build_pipeline(args.applications_csv)?;
    let report = pipeline.platform_report()?;

    println!("Jobverse platform report");
    println!("- job postings: {}", report.job_postings);
    println!("- active jobs: {}", report.active_jobs);
    println!("- total applications: {}", report.total_applications);
    println!("- by status:");
    let counts = report.applications_by_status;
    println!("  - pending: {}", counts.pending);
    println!("  - reviewing: {}", counts.reviewing);
    println!("  - accepted: {}", counts.accepted);
    println!("  - rejected: {}", counts.rejected);

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
