//! CLI driver for the pipeline benchmark routes.
//!
//! Maps each subcommand onto the façade's route table against a live Redis
//! and prints the JSON body.
//!
//! Usage: `cargo run --bin pipectl -- --url redis://127.0.0.1:6379/ compare`

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use redis_pipeline_bench::facade::{Facade, Method};
use redis_pipeline_bench::harness::{Harness, DEFAULT_TTL_SECS};
use redis_pipeline_bench::redis_store::RedisExecutor;

#[derive(Parser)]
#[command(name = "pipectl", about = "Pipelined vs one-by-one Redis benchmarks")]
struct Cli {
    /// Redis connection URL.
    #[arg(long, default_value = "redis://127.0.0.1:6379/")]
    url: String,

    /// Records per benchmark run.
    #[arg(long, default_value_t = 10_000)]
    records: usize,

    /// TTL in seconds applied to inserted keys.
    #[arg(long, default_value_t = DEFAULT_TTL_SECS)]
    ttl: u64,

    #[command(subcommand)]
    route: Route,
}

#[derive(Subcommand)]
enum Route {
    /// Insert records through a single pipelined batch.
    InsertPipeline,
    /// Insert records one command at a time.
    InsertNormal,
    /// Read the pipelined namespace in one batch.
    Read,
    /// Delete the pipelined namespace in one batch.
    Delete,
    /// Database size and sample-key existence.
    Info,
    /// Run both insert modes and report the speedup.
    Compare,
    /// Fetch one record by sequence id.
    User { id: u64 },
    /// Service liveness.
    Health,
}

impl Route {
    fn request(&self) -> (Method, String) {
        match self {
            Route::InsertPipeline => (Method::Post, "/api/redis/pipeline/insert".into()),
            Route::InsertNormal => (Method::Post, "/api/redis/normal/insert".into()),
            Route::Read => (Method::Get, "/api/redis/pipeline/read".into()),
            Route::Delete => (Method::Delete, "/api/redis/pipeline/delete".into()),
            Route::Info => (Method::Get, "/api/redis/info".into()),
            Route::Compare => (Method::Post, "/api/redis/performance/compare".into()),
            Route::User { id } => (Method::Get, format!("/api/redis/user/{}", id)),
            Route::Health => (Method::Get, "/api/redis/health".into()),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exec = match RedisExecutor::connect(&cli.url) {
        Ok(exec) => exec,
        Err(e) => {
            eprintln!("Error connecting to {}: {}", cli.url, e);
            std::process::exit(1);
        }
    };

    let harness = Harness::with_ttl(exec, cli.ttl);
    let mut facade = Facade::with_records(harness, cli.records);

    let (method, path) = cli.route.request();
    let body = match facade.handle(method, &path) {
        Some(body) => body,
        None => {
            eprintln!("No route for {:?} {}", method, path);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&body) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("Error rendering response: {}", e);
            std::process::exit(1);
        }
    }
}
