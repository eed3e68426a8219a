//! Outbound station events.
//!
//! Tasks emit these through the [`EventSink`](super::ports::EventSink) port
//! whenever a derived output changes, and the supervisor emits a periodic
//! [`StationEvent::Stats`].  Adapters on the other side decide what to do
//! with them.

use crate::diagnostics::PipelineStats;
use crate::tasks::alarm::AlarmState;
use crate::tasks::indicator::IndicatorBand;
use crate::tasks::matrix::RainIntensity;

/// Structured events emitted by the station tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum StationEvent {
    /// All tasks are running.
    Started,

    /// The alarm re-evaluated into a different state.
    AlarmChanged { from: AlarmState, to: AlarmState },

    /// The indicator LEDs moved to a different band.  `None` means no data yet.
    BandChanged {
        from: Option<IndicatorBand>,
        to: Option<IndicatorBand>,
    },

    /// The matrix switched pictogram.
    IntensityChanged {
        from: Option<RainIntensity>,
        to: Option<RainIntensity>,
        rain_volume_mm: f32,
    },

    /// Periodic pipeline counters.
    Stats(PipelineStats),
}
