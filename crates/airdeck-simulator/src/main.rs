//! Desktop simulator for the airdeck telemetry panel.
//!
//! Runs the airdeck-core view engine and ingestion task on the embassy std
//! executor. The OLED is drawn in the terminal, swipes are typed on stdin and
//! an in-process back-end publishes per-city readings like the real one.
//! Logs go to stderr (`RUST_LOG=debug` for transitions), so redirect them
//! away from the terminal showing the panel: `2>airdeck.log`.
//!
//! # Input
//!
//! | Key             | Gesture                        |
//! |-----------------|--------------------------------|
//! | w / k / up      | UP (next entry)                |
//! | s / j / down    | DOWN (previous entry)          |
//! | a / h / left    | LEFT (enter / confirm)         |
//! | d / l / right   | RIGHT (back / cancel)          |
//! | !               | Inject a sensor fault (restart) |
//! | q or end of input | Quit                         |
//!
//! # Environment
//!
//! `AIRDECK_SETTLE_MS` and `AIRDECK_STATUS_SECS` override the list settle
//! delay and the status interval.

mod broker;
mod input;
mod terminal;

use std::str::FromStr;

use airdeck_core::app_state::{AppError, TelemetryStore};
use airdeck_core::config::Config;
use airdeck_core::gesture::{ChannelGestureSource, GestureChannel};
use airdeck_core::ingestion::Ingestion;
use airdeck_core::view_engine::ViewEngine;
use embassy_executor::Spawner;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration};
use log::{error, info, warn};
use static_cell::StaticCell;

use broker::{BrokerLink, Downlink, MockBackend, Uplink};
use terminal::TerminalPanel;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

static STORE: StaticCell<TelemetryStore> = StaticCell::new();
static GESTURES: GestureChannel = GestureChannel::new();
static DOWNLINK: Downlink = Channel::new();
static UPLINK: Uplink = Channel::new();

type PanelEngine = ViewEngine<'static, TerminalPanel<std::io::Stdout>, ChannelGestureSource<'static>, Delay>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn env_override<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(" Ignoring {}={:?}: not a number", name, raw);
            None
        }
    }
}

fn load_config() -> Config {
    let mut config = Config::default();
    if let Some(ms) = env_override::<u32>("AIRDECK_SETTLE_MS") {
        config.settle_ms = ms;
    }
    if let Some(secs) = env_override::<u64>("AIRDECK_STATUS_SECS") {
        config.status_interval = Duration::from_secs(secs.max(1));
    }
    config
}

// ---------------------------------------------------------------------------
// Restart
// ---------------------------------------------------------------------------

/// Start over from the welcome screen by replacing this process with a
/// fresh copy of itself.
fn restart(fault: &AppError) -> ! {
    error!(" Fatal: {}. Restarting", fault);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        match std::env::current_exe() {
            Ok(exe) => {
                let err = std::process::Command::new(exe)
                    .args(std::env::args_os().skip(1))
                    .exec();
                error!(" Restart failed: {}", err);
            }
            Err(err) => error!(" Cannot locate own executable: {}", err),
        }
    }

    std::process::exit(1);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[embassy_executor::task]
async fn ui_task(mut engine: PanelEngine) {
    if let Err(fault) = engine.run().await {
        restart(&fault);
    }
}

#[embassy_executor::task]
async fn ingestion_task(store: &'static TelemetryStore, config: Config) {
    let ingestion = Ingestion::new(store, &config);
    let mut link = BrokerLink::new(&DOWNLINK, &UPLINK);
    if let Err(fault) = ingestion.run(&mut link).await {
        restart(&fault);
    }
}

#[embassy_executor::task]
async fn backend_task(interval: Duration) {
    MockBackend::new(&DOWNLINK, &UPLINK, interval).run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    info!(
        " Starting airdeck simulator (settle {} ms, status every {} s)",
        config.settle_ms,
        config.status_interval.as_secs()
    );

    let store: &'static TelemetryStore = STORE.init(TelemetryStore::new(config.cities));

    if let Err(err) = input::spawn(&GESTURES) {
        error!(" Cannot start input thread: {}", err);
        return;
    }

    let engine = ViewEngine::new(
        TerminalPanel::stdout(),
        GESTURES.source(),
        Delay,
        store,
        config,
    );

    if let Err(err) = spawner.spawn(ui_task(engine)) {
        error!(" Failed to spawn UI task: {:?}", err);
    }
    if let Err(err) = spawner.spawn(ingestion_task(store, config)) {
        error!(" Failed to spawn ingestion task: {:?}", err);
    }
    if let Err(err) = spawner.spawn(backend_task(config.status_interval)) {
        error!(" Failed to spawn back-end task: {:?}", err);
    }
}
