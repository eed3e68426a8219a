//! One reading of both analog channels.

use crate::config::StationConfig;

/// Highest value a 12-bit ADC conversion can produce.
pub const RAW_MAX: u16 = 4095;

/// Immutable pair of raw readings taken in the same acquisition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorSnapshot {
    water_level_raw: u16,
    rain_volume_raw: u16,
}

impl SensorSnapshot {
    /// Build a snapshot, clamping both readings into the 12-bit range.
    pub const fn new(water_level_raw: u16, rain_volume_raw: u16) -> Self {
        Self {
            water_level_raw: clamp_raw(water_level_raw),
            rain_volume_raw: clamp_raw(rain_volume_raw),
        }
    }

    pub const fn water_level_raw(&self) -> u16 {
        self.water_level_raw
    }

    pub const fn rain_volume_raw(&self) -> u16 {
        self.rain_volume_raw
    }

    /// Water column height in metres.
    pub fn water_level_m(&self) -> f32 {
        self.water_level_m_with(&StationConfig::DEFAULT)
    }

    /// Rain volume in millimetres per day.
    pub fn rain_volume_mm(&self) -> f32 {
        self.rain_volume_mm_with(&StationConfig::DEFAULT)
    }

    pub fn water_level_m_with(&self, cfg: &StationConfig) -> f32 {
        scale(self.water_level_raw, cfg.adc_full_scale, cfg.water_level_span_m)
    }

    pub fn rain_volume_mm_with(&self, cfg: &StationConfig) -> f32 {
        scale(self.rain_volume_raw, cfg.adc_full_scale, cfg.rain_volume_span_mm)
    }
}

const fn clamp_raw(raw: u16) -> u16 {
    if raw > RAW_MAX { RAW_MAX } else { raw }
}

fn scale(raw: u16, full_scale: u16, span: f32) -> f32 {
    raw as f32 / full_scale as f32 * span
}
