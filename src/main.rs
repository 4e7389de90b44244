//! Transactor demo driver
//!
//! Spawns a handful of producer threads that register randomly-prioritized
//! requests against a shared clerk, while an arbiter thread drains the queue
//! and echoes payloads back. Producers then collect their results with
//! spinning reads. This is the out-of-process view of the engine; the
//! library is the product.

use clap::{Parser, Subcommand};
use rand::seq::SliceRandom;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};
use transactor::config::TransactorConfig;
use transactor::handler::{Handler, HandlerFailure};
use transactor::observability::{init_default_logging, metrics};
use transactor::protocol::{Completion, Envelope, Priority, Request, Retrieval};
use transactor::RequestClerk;
use uuid::Uuid;

/// In-process admission and dispatch engine demo
#[derive(Parser)]
#[command(name = "transactor")]
#[command(about = "In-process admission and dispatch engine demo")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the producer/arbiter demo
    Run,
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run => run_demo(config),
        Commands::Config { show } => handle_config_command(config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {e}");
        process::exit(1);
    }
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<TransactorConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(TransactorConfig::load_from_file(path)?)
        }
        None => {
            let default_paths = ["transactor.toml", "config/transactor.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(TransactorConfig::load_from_file(&path)?);
                }
            }

            info!("No configuration file found, using defaults");
            Ok(TransactorConfig::default())
        }
    }
}

fn handle_config_command(
    config: TransactorConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    if show {
        println!("{}", toml::to_string_pretty(&config)?);
    } else {
        info!("Configuration is valid");
    }
    Ok(())
}

/// Demo handler: echo the payload back with a success code.
struct DemoHandler;

impl Handler for DemoHandler {
    fn handle(&self, envelope: Envelope) -> Result<Completion, HandlerFailure> {
        Ok(Completion::new(envelope.request, 200))
    }
}

fn run_demo(config: TransactorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let clerk = Arc::new(RequestClerk::with_capacities(config.queue.clone()));
    let producers = config.demo.producers;
    let per_producer = config.demo.requests_per_producer;
    let total = producers * per_producer;
    let order = config.demo.order;

    // Registration attempts and acceptances, shared with the arbiter so it
    // knows when the queue has gone quiet for good.
    let attempted = Arc::new(AtomicUsize::new(0));
    let accepted = Arc::new(AtomicUsize::new(0));

    info!(producers, per_producer, "starting demo run");

    let arbiter = {
        let clerk = Arc::clone(&clerk);
        let attempted = Arc::clone(&attempted);
        let accepted = Arc::clone(&accepted);
        thread::spawn(move || {
            let mut served = 0usize;
            loop {
                if clerk
                    .dispatch_one_with(&DemoHandler, order, false, false)
                    .is_some()
                {
                    served += 1;
                    continue;
                }
                if attempted.load(Ordering::SeqCst) == total
                    && served == accepted.load(Ordering::SeqCst)
                {
                    break;
                }
                thread::yield_now();
            }
            info!(served, "arbiter drained all accepted requests");
        })
    };

    let mut producer_handles = Vec::new();
    for producer in 0..producers {
        let clerk = Arc::clone(&clerk);
        let attempted = Arc::clone(&attempted);
        let accepted = Arc::clone(&accepted);
        producer_handles.push(thread::spawn(move || {
            let mut rng = rand::thread_rng();
            let mut keys = Vec::with_capacity(per_producer);

            for _ in 0..per_producer {
                let id = Uuid::new_v4().to_string();
                let want = *Priority::ALL.choose(&mut rng).unwrap_or(&Priority::Normal);
                let request = Request::new(id.clone(), serde_json::json!({"producer": producer}))
                    .with_priority(want);

                match clerk.register(request) {
                    Ok(placed) => {
                        accepted.fetch_add(1, Ordering::SeqCst);
                        info!(%id, %want, %placed, "registered");
                        keys.push(id);
                    }
                    Err(e) => warn!(%id, error = %e, "registration rejected"),
                }
                attempted.fetch_add(1, Ordering::SeqCst);
                thread::yield_now();
            }

            // Come back later for the results.
            for id in keys {
                let response = clerk.get_response(&id, true, false);
                let status = clerk.get_status(&id, false, false);
                if let (Retrieval::Ready(value), Retrieval::Ready(descriptor)) = (response, status)
                {
                    info!(%id, code = descriptor.code, %value, "collected result");
                }
            }
        }));
    }

    for handle in producer_handles {
        handle.join().map_err(|_| "producer thread panicked")?;
    }
    arbiter.join().map_err(|_| "arbiter thread panicked")?;

    let snapshot = metrics().snapshot();
    info!(
        registered = snapshot.requests_registered,
        settled = snapshot.requests_settled,
        rejected = snapshot.requests_rejected,
        dispatched = snapshot.dispatches_completed,
        "demo complete"
    );

    Ok(())
}
