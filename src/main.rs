//! Rainwatch Firmware: Main Entry Point
//!
//! Hexagonal architecture with a fixed set of pinned tasks sharing one
//! lock-free state word.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  AdcSensors     LedcBuzzers     GpioIndicators   RmtSerializer │
//! │  (Analog)       (Tone)          (BinaryOutput)   (Serializer)  │
//! │  LogTextSurface LogEventSink                                   │
//! │  (TextSurface)  (EventSink)                                    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │ Acquisition ─▶ SampleQueue ─▶ Distributor ─▶ State     │    │
//! │  │ Display · Alarm · Indicators · Matrix render           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Supervisor (main thread): watchdog + periodic stats           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use rainwatch::adapters::hardware::{AdcSensors, GpioIndicators, LedcBuzzers};
use rainwatch::adapters::log_sink::LogEventSink;
use rainwatch::adapters::text_surface::LogTextSurface;
use rainwatch::app::events::StationEvent;
use rainwatch::app::ports::EventSink;
use rainwatch::config::StationConfig;
use rainwatch::diagnostics::{self, PipelineStats};
use rainwatch::drivers::hw_init;
use rainwatch::drivers::led_matrix::LedMatrixDriver;
use rainwatch::drivers::rmt_serializer::RmtSerializer;
use rainwatch::drivers::task_pin::{TaskSpec, spawn_on_core};
use rainwatch::drivers::watchdog::Watchdog;
use rainwatch::error::Error;
use rainwatch::pins;
use rainwatch::pipeline::{SAMPLE_QUEUE, SHARED_STATE};
use rainwatch::tasks::acquisition::SensorAcquisition;
use rainwatch::tasks::alarm::AlarmTask;
use rainwatch::tasks::display::DisplayTask;
use rainwatch::tasks::distributor::Distributor;
use rainwatch::tasks::indicator::IndicatorTask;
use rainwatch::tasks::matrix::MatrixRenderTask;
use rainwatch::tasks::{
    ACQUISITION_TASK, ALARM_TASK, DISPLAY_TASK, DISTRIBUTOR_TASK, INDICATOR_TASK, MATRIX_TASK,
};

/// Spawn one never-returning task, mapping a creation failure to its name.
fn spawn(spec: &TaskSpec, f: impl FnOnce() + Send + 'static) -> Result<(), Error> {
    spawn_on_core(spec, f)
        .map(drop)
        .map_err(|e| {
            error!("spawn '{}' failed: {}", spec.display_name(), e);
            Error::Spawn(spec.display_name())
        })
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Rainwatch v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let cfg = StationConfig::default();

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;

    // Matrix init failure is fatal.
    let matrix = LedMatrixDriver::init(RmtSerializer::new(), pins::MATRIX_DATA_GPIO)
        .map_err(|e| {
            error!("LED matrix init failed: {}, halting", e);
            Error::from(e)
        })?;

    // ── 3. Pipeline tasks (APP core) ──────────────────────────
    spawn(&DISTRIBUTOR_TASK, move || {
        Distributor::new(&SAMPLE_QUEUE, &SHARED_STATE, &cfg).run()
    })?;
    spawn(&ACQUISITION_TASK, move || {
        SensorAcquisition::new(AdcSensors::new(), &SAMPLE_QUEUE, &cfg).run()
    })?;

    // ── 4. Consumer tasks (PRO core) ──────────────────────────
    spawn(&MATRIX_TASK, move || {
        MatrixRenderTask::new(matrix, LogEventSink::new(), &SHARED_STATE, &cfg).run()
    })?;
    spawn(&DISPLAY_TASK, move || {
        DisplayTask::new(LogTextSurface::new(), &SHARED_STATE, &cfg).run()
    })?;
    spawn(&ALARM_TASK, move || {
        AlarmTask::new(LedcBuzzers::new(), LogEventSink::new(), &SHARED_STATE, &cfg).run()
    })?;
    spawn(&INDICATOR_TASK, move || {
        IndicatorTask::new(GpioIndicators::new(), LogEventSink::new(), &SHARED_STATE, &cfg).run()
    })?;

    let mut sink = LogEventSink::new();
    sink.emit(&StationEvent::Started);

    // ── 5. Supervisor loop ────────────────────────────────────
    let mut watchdog = Watchdog::subscribe(cfg.watchdog_timeout_ms);
    let interval = Duration::from_secs(u64::from(cfg.stats_interval_secs));
    loop {
        std::thread::sleep(interval);
        let stats = PipelineStats::collect(diagnostics::uptime_secs(), &SAMPLE_QUEUE, &SHARED_STATE);
        sink.emit(&StationEvent::Stats(stats));
        watchdog.feed();
    }
}
