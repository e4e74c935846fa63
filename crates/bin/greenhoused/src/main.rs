//! # greenhoused: greenhouse gateway daemon
//!
//! Composition root that wires all adapters together and runs the gateway.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Construct the process state, outputs, history store and address space
//! - Start the MQTT listener, the OPC UA server and the control cycle
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use anyhow::Context as _;
use greenhouse_adapter_mqtt::SensorListener;
use greenhouse_adapter_opcua::GreenhouseServer;
use greenhouse_adapter_storage_json::JsonHistoryStore;
use greenhouse_app::address_space::InMemoryAddressSpace;
use greenhouse_app::ports::{AddressSpace, OutputPort};
use greenhouse_app::process_state::ProcessState;
use greenhouse_app::services::actuator_driver::ActuatorDriver;
use greenhouse_app::services::control_cycle::{ControlCycle, CycleTiming};
use greenhouse_domain::process_image::ProcessImage;
use tokio::task::JoinHandle;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    // flushes buffered file output on drop
    let _log_guard = init_tracing(&config.logging);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting greenhoused");

    let state = ProcessState::new(ProcessImage::with_setpoints(config.control.setpoints));

    let store = config
        .storage
        .clone()
        .build()
        .await
        .context("failed to prepare data directory")?;

    let outputs = greenhouse_adapter_gpio::open(&config.hardware);
    let mut driver = ActuatorDriver::new(outputs, state.clone());
    driver.initialize();

    let listener = SensorListener::start(config.mqtt.clone(), state.clone());

    let timing = config.control.timing();
    let cycle = if config.opcua.enabled {
        let server = GreenhouseServer::build(&config.opcua, &state.read())
            .context("failed to build OPC UA server")?;
        let space = server.address_space();
        server.start().context("failed to start OPC UA server")?;
        spawn_cycle(state, space, driver, store, timing)
    } else {
        tracing::warn!("OPC UA disabled, serving an in-memory address space");
        let space = InMemoryAddressSpace::new(&state.read());
        spawn_cycle(state, space, driver, store, timing)
    };

    shutdown_signal().await;
    tracing::info!("shutting down");
    listener.abort();
    cycle.abort();
    Ok(())
}

fn spawn_cycle<A, O>(
    state: ProcessState,
    space: A,
    driver: ActuatorDriver<O>,
    store: JsonHistoryStore,
    timing: CycleTiming,
) -> JoinHandle<()>
where
    A: AddressSpace + 'static,
    O: OutputPort + 'static,
{
    tokio::spawn(ControlCycle::new(state, space, driver, store, timing).run())
}

fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = config.filter.as_str();
    let (env_filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };

    let mut guard = None;
    let mut file_error = None;
    let file_layer = if config.to_file {
        match open_log_file(config) {
            Ok((writer, worker)) => {
                guard = Some(worker);
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
            }
            Err(err) => {
                file_error = Some(err);
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(err) = rejected {
        tracing::warn!(filter, %err, "invalid log filter, falling back to info");
    }
    if let Some(err) = file_error {
        tracing::warn!(
            directory = %config.directory.display(),
            %err,
            "cannot open log file, logging to stdout only"
        );
    }
    guard
}

fn open_log_file(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard), InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.file_prefix.as_str())
        .filename_suffix("log")
        .max_log_files(config.max_files)
        .build(&config.directory)?;
    Ok(tracing_appender::non_blocking(appender))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
