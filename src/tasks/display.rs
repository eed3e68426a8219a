//! Text display task.
//!
//! Redraws the whole surface each period:
//!
//! ```text
//!  (5,10)  Rain volume
//!  (5,25)  12.34 mm
//!  (5,40)  Water level
//!  (5,55)  5.00 m
//! ```

use core::fmt::Write as _;
use std::time::Duration;

use heapless::String;

use crate::app::ports::TextSurfacePort;
use crate::config::StationConfig;
use crate::pipeline::SharedState;

pub const RAIN_LABEL: &str = "Rain volume";
pub const WATER_LABEL: &str = "Water level";
pub const NO_DATA: &str = "--";

const TEXT_X: u8 = 5;
const RAIN_LABEL_Y: u8 = 10;
const RAIN_VALUE_Y: u8 = 25;
const WATER_LABEL_Y: u8 = 40;
const WATER_VALUE_Y: u8 = 55;

/// Fits "80.00 mm" with room to spare.
pub type ValueText = String<16>;

/// Two decimals followed by the unit.
pub fn format_value(value: f32, unit: &str) -> ValueText {
    let mut out = ValueText::new();
    if write!(out, "{value:.2} {unit}").is_err() {
        return no_data();
    }
    out
}

pub struct DisplayTask<'a, T: TextSurfacePort> {
    surface: T,
    state: &'a SharedState,
    cfg: StationConfig,
}

impl<'a, T: TextSurfacePort> DisplayTask<'a, T> {
    pub fn new(surface: T, state: &'a SharedState, cfg: &StationConfig) -> Self {
        Self {
            surface,
            state,
            cfg: *cfg,
        }
    }

    pub fn surface(&self) -> &T {
        &self.surface
    }

    pub fn step(&mut self) -> Duration {
        let (rain, water) = match self.state.latest() {
            Some(s) => (
                format_value(s.rain_volume_mm_with(&self.cfg), "mm"),
                format_value(s.water_level_m_with(&self.cfg), "m"),
            ),
            None => (no_data(), no_data()),
        };

        self.surface.fill(false);
        self.surface.draw_string(RAIN_LABEL, TEXT_X, RAIN_LABEL_Y);
        self.surface.draw_string(&rain, TEXT_X, RAIN_VALUE_Y);
        self.surface.draw_string(WATER_LABEL, TEXT_X, WATER_LABEL_Y);
        self.surface.draw_string(&water, TEXT_X, WATER_VALUE_Y);
        self.surface.commit();

        Duration::from_millis(u64::from(self.cfg.display_period_ms))
    }

    pub fn run(mut self) -> ! {
        loop {
            let pause = self.step();
            std::thread::sleep(pause);
        }
    }
}

/// [`NO_DATA`] always fits a [`ValueText`].
fn no_data() -> ValueText {
    ValueText::try_from(NO_DATA).unwrap_or_default()
}
