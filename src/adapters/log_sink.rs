//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured station events to the
//! ESP-IDF logger (UART / USB-CDC in production).  Each task owns its own
//! instance; the type carries no state.

use log::{info, warn};

use crate::app::events::StationEvent;
use crate::app::ports::EventSink;
use crate::tasks::alarm::AlarmState;

/// Adapter that logs every [`StationEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &StationEvent) {
        match event {
            StationEvent::Started => {
                info!("START | all station tasks running");
            }
            StationEvent::AlarmChanged { from, to } => {
                if *to == AlarmState::CriticalAlert {
                    warn!("ALARM | {:?} -> {:?}", from, to);
                } else {
                    info!("ALARM | {:?} -> {:?}", from, to);
                }
            }
            StationEvent::BandChanged { from, to } => {
                info!("LEDS | {:?} -> {:?}", from, to);
            }
            StationEvent::IntensityChanged {
                from,
                to,
                rain_volume_mm,
            } => {
                info!(
                    "MATRIX | {:?} -> {:?} ({:.1} mm)",
                    from, to, rain_volume_mm
                );
            }
            StationEvent::Stats(s) => {
                info!(
                    "STATS | up={}s | samples={} dropped={} ({:.1}%) queued={} | \
                     published={} frames={} tx_err={} | heap={}B",
                    s.uptime_secs,
                    s.samples_accepted,
                    s.samples_dropped,
                    s.drop_ratio() * 100.0,
                    s.queue_depth,
                    s.publishes,
                    s.frames_rendered,
                    s.serializer_errors,
                    s.heap_free,
                );
            }
        }
    }
}
