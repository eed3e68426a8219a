//! Sensor acquisition task.
//!
//! Every period: oversample both analog channels, average, and offer the
//! snapshot to the sample queue.  A full queue drops the sample; the drop
//! is counted by the queue and otherwise ignored.

use std::time::Duration;

use crate::app::ports::{AnalogPort, SensorChannel};
use crate::config::StationConfig;
use crate::pipeline::{RAW_MAX, SampleQueue, SensorSnapshot};

/// Average `count` conversions of `channel`, truncating the remainder.
///
/// Conversions above 12 bits are clamped before summing.  A `count` of
/// zero is treated as one.
pub fn oversample<A: AnalogPort>(analog: &mut A, channel: SensorChannel, count: u32) -> u16 {
    let count = count.max(1);
    let sum: u32 = (0..count)
        .map(|_| u32::from(analog.read_channel(channel).min(RAW_MAX)))
        .sum();
    (sum / count) as u16
}

pub struct SensorAcquisition<'a, A: AnalogPort> {
    analog: A,
    queue: &'a SampleQueue,
    oversample_count: u32,
    period: Duration,
}

impl<'a, A: AnalogPort> SensorAcquisition<'a, A> {
    pub fn new(analog: A, queue: &'a SampleQueue, cfg: &StationConfig) -> Self {
        Self {
            analog,
            queue,
            oversample_count: cfg.oversample_count,
            period: Duration::from_millis(u64::from(cfg.acquisition_period_ms)),
        }
    }

    pub fn analog(&self) -> &A {
        &self.analog
    }

    /// Take one oversampled reading of both channels.
    pub fn sample(&mut self) -> SensorSnapshot {
        let water = oversample(&mut self.analog, SensorChannel::WaterLevel, self.oversample_count);
        let rain = oversample(&mut self.analog, SensorChannel::RainVolume, self.oversample_count);
        SensorSnapshot::new(water, rain)
    }

    /// One acquisition cycle.  Returns the sleep until the next one.
    pub fn step(&mut self) -> Duration {
        let snapshot = self.sample();
        if !self.queue.offer(snapshot) {
            log::debug!("acquire: queue full, sample dropped (total {})", self.queue.dropped());
        }
        self.period
    }

    pub fn run(mut self) -> ! {
        loop {
            let pause = self.step();
            std::thread::sleep(pause);
        }
    }
}
