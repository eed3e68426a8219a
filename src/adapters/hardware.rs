//! Hardware adapters: bridge the peripherals configured in
//! [`hw_init`](crate::drivers::hw_init) to the port traits.
//!
//! Each adapter is owned by exactly one task, so none of them needs
//! interior locking.  On non-espidf targets the `hw_init` accessors are
//! simulation stubs backed by atomics.

use crate::app::ports::{AnalogPort, BinaryOutputPort, OutputPin, SensorChannel, ToneChannel, TonePort};
use crate::drivers::hw_init::{self, ADC1_CH_RAIN, ADC1_CH_WATER_LEVEL, LEDC_CH_BUZZER_A, LEDC_CH_BUZZER_B};
use crate::pins;

// ── AnalogPort: ADC1 oneshot ──────────────────────────────────

/// Water level and rain inputs on ADC1.
#[derive(Debug, Default)]
pub struct AdcSensors;

impl AdcSensors {
    pub fn new() -> Self {
        Self
    }
}

impl AnalogPort for AdcSensors {
    fn read_channel(&mut self, channel: SensorChannel) -> u16 {
        let adc_channel = match channel {
            SensorChannel::WaterLevel => ADC1_CH_WATER_LEVEL,
            SensorChannel::RainVolume => ADC1_CH_RAIN,
        };
        hw_init::adc1_read(adc_channel)
    }
}

// ── TonePort: LEDC buzzers ────────────────────────────────────

/// Two passive buzzers on dedicated LEDC channels.  Tracks which ones are
/// sounding so repeated starts and stops skip the register writes.
#[derive(Debug, Default)]
pub struct LedcBuzzers {
    sounding: [bool; 2],
}

impl LedcBuzzers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sounding(&self, channel: ToneChannel) -> bool {
        self.sounding[slot(channel)]
    }

    fn set(&mut self, channel: ToneChannel, on: bool) {
        let slot = slot(channel);
        if self.sounding[slot] == on {
            return;
        }
        let ledc = match channel {
            ToneChannel::BuzzerA => LEDC_CH_BUZZER_A,
            ToneChannel::BuzzerB => LEDC_CH_BUZZER_B,
        };
        hw_init::ledc_set(ledc, if on { pins::BUZZER_ON_DUTY } else { 0 });
        self.sounding[slot] = on;
    }
}

const fn slot(channel: ToneChannel) -> usize {
    match channel {
        ToneChannel::BuzzerA => 0,
        ToneChannel::BuzzerB => 1,
    }
}

impl TonePort for LedcBuzzers {
    fn start_tone(&mut self, channel: ToneChannel) {
        self.set(channel, true);
    }

    fn stop_tone(&mut self, channel: ToneChannel) {
        self.set(channel, false);
    }
}

// ── BinaryOutputPort: indicator GPIO ──────────────────────────

#[derive(Debug, Default)]
pub struct GpioIndicators;

impl GpioIndicators {
    pub fn new() -> Self {
        Self
    }
}

impl BinaryOutputPort for GpioIndicators {
    fn set_level(&mut self, pin: OutputPin, high: bool) {
        let gpio = match pin {
            OutputPin::Green => pins::LED_GREEN_GPIO,
            OutputPin::Red => pins::LED_RED_GPIO,
        };
        hw_init::gpio_write(gpio, high);
    }
}
