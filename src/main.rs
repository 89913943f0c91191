//! skyctl — rig controller entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  SimGpio / HalGpio   LogEventSink   JsonConfigStore        │
//! │  (GpioPort)          (EventSink)    (ConfigPort)           │
//! │  ThreadDelay (DelayNs)                                     │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ───────────────      │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │          DeviceLoop (Rig · Phase · StateId)      │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The GPIO backend is picked once from the config; the loop then runs
//! until the proximity sensor trips or a GPIO fault stops it.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use skyctl::adapters::config_file::JsonConfigStore;
use skyctl::adapters::log_sink::LogEventSink;
use skyctl::adapters::sim_gpio::SimGpio;
use skyctl::adapters::time::ThreadDelay;
use skyctl::app::ports::{ConfigPort, GpioPort};
use skyctl::app::service::{DeviceLoop, RunSummary};
use skyctl::config::{DeviceConfig, GpioBackend};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("skyctl v{}", env!("CARGO_PKG_VERSION"));

    let store = JsonConfigStore::from_env();
    let config = store
        .load()
        .with_context(|| format!("loading config from {}", store.path().display()))?;

    let summary = match config.backend {
        GpioBackend::Sim => run(SimGpio::new(), &config)?,
        GpioBackend::Hardware => run_hardware(&config)?,
    };

    info!(
        "skyctl stopped: {:?} after {} cycles",
        summary.reason, summary.cycles
    );
    Ok(())
}

fn run<G: GpioPort>(gpio: G, config: &DeviceConfig) -> Result<RunSummary> {
    let mut sink = LogEventSink::new();
    let mut delay = ThreadDelay::new();
    let mut device = DeviceLoop::new(gpio, config).context("initialising rig")?;
    device.start(&mut sink);
    let summary = device
        .run(&mut delay, &mut sink)
        .context("device loop halted on GPIO fault")?;
    info!("uptime {} ms", delay.uptime_ms());
    Ok(summary)
}

#[cfg(feature = "rpi")]
fn run_hardware(config: &DeviceConfig) -> Result<RunSummary> {
    let gpio = skyctl::adapters::rpi::open().context("opening Raspberry Pi GPIO")?;
    run(gpio, config)
}

#[cfg(not(feature = "rpi"))]
fn run_hardware(_config: &DeviceConfig) -> Result<RunSummary> {
    anyhow::bail!("config selects the hardware backend but skyctl was built without the `rpi` feature")
}
