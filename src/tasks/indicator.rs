//! Green/red indicator LEDs.
//!
//! | Water level (m)            | Band      | Green | Red |
//! |----------------------------|-----------|-------|-----|
//! | 3.0 ..= 6.0                | Normal    | on    | off |
//! | 2.0 ..< 3.0, 6.0 <..= 7.0  | Attention | on    | on  |
//! | < 2.0, > 7.0               | Critical  | off   | on  |

use std::time::Duration;

use crate::app::events::StationEvent;
use crate::app::ports::{BinaryOutputPort, EventSink, OutputPin};
use crate::config::StationConfig;
use crate::pipeline::SharedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorBand {
    Normal,
    Attention,
    Critical,
}

impl IndicatorBand {
    pub fn classify(water_level_m: f32, cfg: &StationConfig) -> Self {
        let normal = cfg.water_normal_low_m..=cfg.water_normal_high_m;
        let high_watch = water_level_m > cfg.water_normal_high_m
            && water_level_m <= cfg.water_critical_high_m;
        let low_watch = water_level_m >= cfg.water_critical_low_m
            && water_level_m < cfg.water_normal_low_m;

        if normal.contains(&water_level_m) {
            Self::Normal
        } else if high_watch || low_watch {
            Self::Attention
        } else {
            Self::Critical
        }
    }

    /// LED levels as (green, red).
    pub const fn leds(self) -> (bool, bool) {
        match self {
            Self::Normal => (true, false),
            Self::Attention => (true, true),
            Self::Critical => (false, true),
        }
    }
}

pub struct IndicatorTask<'a, O: BinaryOutputPort, E: EventSink> {
    outputs: O,
    sink: E,
    state: &'a SharedState,
    cfg: StationConfig,
    band: Option<IndicatorBand>,
}

impl<'a, O: BinaryOutputPort, E: EventSink> IndicatorTask<'a, O, E> {
    pub fn new(outputs: O, sink: E, state: &'a SharedState, cfg: &StationConfig) -> Self {
        Self {
            outputs,
            sink,
            state,
            cfg: *cfg,
            band: None,
        }
    }

    pub fn band(&self) -> Option<IndicatorBand> {
        self.band
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Both LEDs stay dark until the first snapshot is published.
    pub fn step(&mut self) -> Duration {
        let band = self
            .state
            .latest()
            .map(|s| IndicatorBand::classify(s.water_level_m_with(&self.cfg), &self.cfg));

        if band != self.band {
            self.sink.emit(&StationEvent::BandChanged {
                from: self.band,
                to: band,
            });
            self.band = band;
        }

        let (green, red) = band.map_or((false, false), IndicatorBand::leds);
        self.outputs.set_level(OutputPin::Green, green);
        self.outputs.set_level(OutputPin::Red, red);

        Duration::from_millis(u64::from(self.cfg.indicator_period_ms))
    }

    pub fn run(mut self) -> ! {
        loop {
            let pause = self.step();
            std::thread::sleep(pause);
        }
    }
}
