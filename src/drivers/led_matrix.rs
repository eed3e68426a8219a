//! 5×5 WS2812 matrix driver.
//!
//! The strip is wired serpentine and mounted rotated 90° relative to the
//! enclosure, so logical (row, col) coordinates go through
//! [`map_logical_to_physical`] before they index the frame buffer.
//!
//! ```text
//!  logical            physical strip index
//!  (row, col)         (mount rotated, odd rows reversed)
//!  ┌──────────┐       ┌────────────────────┐
//!  │ 0,0  0,4 │       │ 20 21 22 23 24 ──▶ │
//!  │          │  ──▶  │ 19 18 17 16 15 ◀── │
//!  │ 4,0  4,4 │       │ 10 11 12 13 14 ──▶ │
//!  └──────────┘       │  9  8  7  6  5 ◀── │
//!                     │  0  1  2  3  4 ──▶ │
//!                     └────────────────────┘
//! ```
//!
//! Wire format: 25 cells × (G, R, B), one blocking byte at a time.

use smart_leds::RGB8;

use crate::app::ports::{PinSpec, SerializerPort};
use crate::error::SerializerError;

pub const MATRIX_SIDE: usize = 5;
pub const MATRIX_CELLS: usize = MATRIX_SIDE * MATRIX_SIDE;

/// WS2812 bit rate.
pub const WS2812_BIT_RATE_HZ: u32 = 800_000;

/// Bytes on the wire for one full frame.
pub const FRAME_BYTES: usize = MATRIX_CELLS * 3;

const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Physical strip index for a logical cell.
///
/// The mount rotation maps logical (row, col) to physical
/// (row', col') = (4 − col, row); odd physical rows then run backwards.
/// Callers keep `row` and `col` within 0..=4.
pub const fn map_logical_to_physical(row: usize, col: usize) -> usize {
    let last = MATRIX_SIDE - 1;
    let phys_row = last - col;
    let phys_col = row;
    if phys_row % 2 == 0 {
        phys_row * MATRIX_SIDE + phys_col
    } else {
        phys_row * MATRIX_SIDE + (last - phys_col)
    }
}

pub struct LedMatrixDriver<S: SerializerPort> {
    serializer: S,
    handle: S::Handle,
    cells: [RGB8; MATRIX_CELLS],
    rejected_writes: u32,
    frames_flushed: u32,
    serializer_errors: u32,
}

impl<S: SerializerPort> LedMatrixDriver<S> {
    /// Claim a serializer channel for the matrix data line.
    ///
    /// There is no retry and no degraded mode: callers treat an error as
    /// fatal.
    pub fn init(mut serializer: S, gpio: i32) -> Result<Self, SerializerError> {
        let handle = serializer.claim(PinSpec {
            gpio,
            bit_rate_hz: WS2812_BIT_RATE_HZ,
        })?;
        log::info!("LedMatrix: serializer claimed on GPIO {}", gpio);
        Ok(Self {
            serializer,
            handle,
            cells: [OFF; MATRIX_CELLS],
            rejected_writes: 0,
            frames_flushed: 0,
            serializer_errors: 0,
        })
    }

    /// Store one cell.  Indices outside 0..=24 are ignored and counted.
    pub fn set_pixel(&mut self, index: usize, color: RGB8) {
        match self.cells.get_mut(index) {
            Some(cell) => *cell = color,
            None => self.rejected_writes = self.rejected_writes.saturating_add(1),
        }
    }

    /// Blank the buffer.  Nothing is transmitted.
    pub fn clear(&mut self) {
        self.cells = [OFF; MATRIX_CELLS];
    }

    /// Transmit the whole buffer in strip order, green first.
    ///
    /// A byte the serializer rejects is counted and the rest of the frame
    /// still goes out.
    pub fn flush(&mut self) {
        let mut failed = 0u32;
        let mut last_err = None;
        for cell in self.cells {
            for byte in [cell.g, cell.r, cell.b] {
                if let Err(e) = self.serializer.send_byte(&mut self.handle, byte) {
                    failed += 1;
                    last_err = Some(e);
                }
            }
        }
        if let Some(e) = last_err {
            log::debug!("LedMatrix: {} of {} bytes failed ({})", failed, FRAME_BYTES, e);
            self.serializer_errors = self.serializer_errors.saturating_add(failed);
        }
        self.frames_flushed = self.frames_flushed.wrapping_add(1);
    }

    pub fn pixel(&self, index: usize) -> Option<RGB8> {
        self.cells.get(index).copied()
    }

    /// Out-of-range writes ignored since init.
    pub fn rejected_writes(&self) -> u32 {
        self.rejected_writes
    }

    pub fn frames_flushed(&self) -> u32 {
        self.frames_flushed
    }

    /// Bytes the serializer failed to transmit since init.
    pub fn serializer_errors(&self) -> u32 {
        self.serializer_errors
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }
}
