//! Audible alarm task.
//!
//! ```text
//!  every cycle:
//!    water < 2 m or > 7 m ──▶ CriticalAlert   buzzers A+B, hold 250 ms
//!    else rain > 64 mm    ──▶ RainAlert       buzzer A,    hold 600 ms
//!    else                 ──▶ Silent          both off
//!  then sleep 10 ms
//! ```
//!
//! No hysteresis: every iteration re-evaluates from scratch, so a reading
//! sitting on a threshold flaps between states.

use std::time::Duration;

use crate::app::events::StationEvent;
use crate::app::ports::{EventSink, ToneChannel, TonePort};
use crate::config::StationConfig;
use crate::pipeline::{SensorSnapshot, SharedState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmState {
    #[default]
    Silent,
    RainAlert,
    CriticalAlert,
}

/// Outside the operating window, with both edges excluded.
pub fn is_critical_level(water_level_m: f32, cfg: &StationConfig) -> bool {
    water_level_m > cfg.water_critical_high_m || water_level_m < cfg.water_critical_low_m
}

impl AlarmState {
    /// Critical water level wins over a rain alert.
    pub fn evaluate(snapshot: &SensorSnapshot, cfg: &StationConfig) -> Self {
        if is_critical_level(snapshot.water_level_m_with(cfg), cfg) {
            Self::CriticalAlert
        } else if snapshot.rain_volume_mm_with(cfg) > cfg.rain_alert_mm {
            Self::RainAlert
        } else {
            Self::Silent
        }
    }

    /// How long the pattern sounds before the next evaluation.
    pub fn hold(self, cfg: &StationConfig) -> Duration {
        let ms = match self {
            Self::Silent => 0,
            Self::RainAlert => cfg.alarm_rain_hold_ms,
            Self::CriticalAlert => cfg.alarm_critical_hold_ms,
        };
        Duration::from_millis(u64::from(ms))
    }

    /// Buzzer levels as (A, B).
    pub const fn buzzers(self) -> (bool, bool) {
        match self {
            Self::Silent => (false, false),
            Self::RainAlert => (true, false),
            Self::CriticalAlert => (true, true),
        }
    }
}

pub struct AlarmTask<'a, T: TonePort, E: EventSink> {
    tones: T,
    sink: E,
    state: &'a SharedState,
    cfg: StationConfig,
    current: AlarmState,
}

impl<'a, T: TonePort, E: EventSink> AlarmTask<'a, T, E> {
    pub fn new(tones: T, sink: E, state: &'a SharedState, cfg: &StationConfig) -> Self {
        Self {
            tones,
            sink,
            state,
            cfg: *cfg,
            current: AlarmState::Silent,
        }
    }

    pub fn current(&self) -> AlarmState {
        self.current
    }

    pub fn tones(&self) -> &T {
        &self.tones
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Evaluate, drive the buzzers, and return hold plus base delay.
    /// Nothing sounds until the first snapshot is published.
    pub fn step(&mut self) -> Duration {
        let next = self
            .state
            .latest()
            .map_or(AlarmState::Silent, |s| AlarmState::evaluate(&s, &self.cfg));

        if next != self.current {
            self.sink.emit(&StationEvent::AlarmChanged {
                from: self.current,
                to: next,
            });
            self.current = next;
        }

        let (a, b) = next.buzzers();
        self.drive(ToneChannel::BuzzerA, a);
        self.drive(ToneChannel::BuzzerB, b);

        next.hold(&self.cfg) + Duration::from_millis(u64::from(self.cfg.alarm_base_ms))
    }

    fn drive(&mut self, channel: ToneChannel, on: bool) {
        if on {
            self.tones.start_tone(channel);
        } else {
            self.tones.stop_tone(channel);
        }
    }

    pub fn run(mut self) -> ! {
        loop {
            let pause = self.step();
            std::thread::sleep(pause);
        }
    }
}
