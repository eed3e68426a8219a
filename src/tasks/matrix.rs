//! LED matrix render task.
//!
//! Every frame is a full redraw: clear, paint the pictogram for the current
//! rain intensity through the logical→physical mapping, flush all 25 cells.

use core::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::app::events::StationEvent;
use crate::app::ports::{EventSink, SerializerPort};
use crate::config::StationConfig;
use crate::drivers::led_matrix::{LedMatrixDriver, map_logical_to_physical};
use crate::drivers::sprites::{SPRITES, Sprite};
use crate::pipeline::SharedState;

/// Frames flushed by the render task since boot.
pub static FRAMES_RENDERED: AtomicU32 = AtomicU32::new(0);

/// Bytes the serializer rejected since boot.
pub static SERIALIZER_ERRORS: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RainIntensity {
    Dry = 0,
    Light = 1,
    Moderate = 2,
    Heavy = 3,
}

impl RainIntensity {
    /// Each edge is the inclusive lower bound of the next category.
    pub fn classify(rain_volume_mm: f32, cfg: &StationConfig) -> Self {
        let [light, moderate, heavy] = cfg.rain_category_edges_mm;
        if rain_volume_mm < light {
            Self::Dry
        } else if rain_volume_mm < moderate {
            Self::Light
        } else if rain_volume_mm < heavy {
            Self::Moderate
        } else {
            Self::Heavy
        }
    }

    pub const fn category(self) -> u8 {
        self as u8
    }

    pub fn sprite(self) -> &'static Sprite {
        &SPRITES[self as usize]
    }
}

/// Paint one frame into `matrix` and transmit it.  `None` flushes a dark frame.
pub fn render_frame<S: SerializerPort>(
    matrix: &mut LedMatrixDriver<S>,
    intensity: Option<RainIntensity>,
) {
    matrix.clear();
    if let Some(intensity) = intensity {
        for (row, line) in intensity.sprite().iter().enumerate() {
            for (col, &color) in line.iter().enumerate() {
                matrix.set_pixel(map_logical_to_physical(row, col), color);
            }
        }
    }
    matrix.flush();
}

pub struct MatrixRenderTask<'a, S: SerializerPort, E: EventSink> {
    matrix: LedMatrixDriver<S>,
    sink: E,
    state: &'a SharedState,
    cfg: StationConfig,
    shown: Option<RainIntensity>,
    errors_reported: u32,
}

impl<'a, S: SerializerPort, E: EventSink> MatrixRenderTask<'a, S, E> {
    pub fn new(
        matrix: LedMatrixDriver<S>,
        sink: E,
        state: &'a SharedState,
        cfg: &StationConfig,
    ) -> Self {
        Self {
            matrix,
            sink,
            state,
            cfg: *cfg,
            shown: None,
            errors_reported: 0,
        }
    }

    pub fn matrix(&self) -> &LedMatrixDriver<S> {
        &self.matrix
    }

    pub fn shown(&self) -> Option<RainIntensity> {
        self.shown
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn step(&mut self) -> Duration {
        let latest = self.state.latest();
        let rain_volume_mm = latest.map_or(0.0, |s| s.rain_volume_mm_with(&self.cfg));
        let intensity = latest.map(|_| RainIntensity::classify(rain_volume_mm, &self.cfg));

        if intensity != self.shown {
            self.sink.emit(&StationEvent::IntensityChanged {
                from: self.shown,
                to: intensity,
                rain_volume_mm,
            });
            self.shown = intensity;
        }
        log::debug!(
            "matrix: intensity={:?} rain={:.1}mm",
            intensity.map(RainIntensity::category),
            rain_volume_mm
        );

        render_frame(&mut self.matrix, intensity);
        FRAMES_RENDERED.fetch_add(1, Ordering::Relaxed);
        let errors = self.matrix.serializer_errors();
        if errors > self.errors_reported {
            SERIALIZER_ERRORS.fetch_add(errors - self.errors_reported, Ordering::Relaxed);
            self.errors_reported = errors;
        }

        Duration::from_millis(u64::from(self.cfg.matrix_frame_ms))
    }

    pub fn run(mut self) -> ! {
        loop {
            let pause = self.step();
            std::thread::sleep(pause);
        }
    }
}
