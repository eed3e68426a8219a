//! Fuzz target: `LedMatrixDriver::set_pixel` / `flush`
//!
//! Interprets the input as a stream of (index, r, g, b) writes with an
//! occasional flush.  Asserts that out-of-range writes are rejected rather
//! than stored, and that every flush puts exactly 75 bytes on the wire in
//! G, R, B order.
//!
//! cargo fuzz run fuzz_matrix_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use rainwatch::app::ports::{PinSpec, SerializerPort};
use rainwatch::drivers::led_matrix::{FRAME_BYTES, LedMatrixDriver, MATRIX_CELLS};
use rainwatch::error::SerializerError;
use smart_leds::RGB8;

#[derive(Default)]
struct Wire {
    bytes: Vec<u8>,
}

impl SerializerPort for Wire {
    type Handle = ();

    fn claim(&mut self, _pin: PinSpec) -> Result<(), SerializerError> {
        Ok(())
    }

    fn send_byte(&mut self, _handle: &mut (), byte: u8) -> Result<(), SerializerError> {
        self.bytes.push(byte);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut matrix) = LedMatrixDriver::init(Wire::default(), 7) else {
        return;
    };
    let mut shadow = [RGB8::default(); MATRIX_CELLS];
    let mut rejected = 0u32;
    let mut flushes = 0usize;

    for chunk in data.chunks_exact(4) {
        let index = chunk[0] as usize;
        if index == 0xFF {
            matrix.flush();
            flushes += 1;
            let sent = matrix.serializer().bytes.len();
            assert_eq!(sent, flushes * FRAME_BYTES, "flush must send one full frame");
            let frame = &matrix.serializer().bytes[sent - FRAME_BYTES..];
            for (cell, grb) in shadow.iter().zip(frame.chunks_exact(3)) {
                assert_eq!(grb, [cell.g, cell.r, cell.b]);
            }
            continue;
        }
        let color = RGB8 { r: chunk[1], g: chunk[2], b: chunk[3] };
        matrix.set_pixel(index, color);
        match shadow.get_mut(index) {
            Some(cell) => *cell = color,
            None => rejected += 1,
        }
    }

    assert_eq!(matrix.rejected_writes(), rejected);
    for (i, cell) in shadow.iter().enumerate() {
        assert_eq!(matrix.pixel(i), Some(*cell));
    }
    assert_eq!(matrix.pixel(MATRIX_CELLS), None);
});
