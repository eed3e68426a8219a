//! Rain-intensity pictograms for the 5×5 matrix.
//!
//! Authored in logical orientation (row 0 at the top, col 0 on the left);
//! the matrix driver handles the mount rotation.  Brightness is kept low:
//! 25 cells at full white would exceed the USB budget.

use smart_leds::RGB8;

use super::led_matrix::MATRIX_SIDE;

pub type Sprite = [[RGB8; MATRIX_SIDE]; MATRIX_SIDE];

const O: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
const SUN: RGB8 = RGB8 { r: 40, g: 28, b: 0 };
const CLOUD: RGB8 = RGB8 { r: 12, g: 12, b: 12 };
const STORM: RGB8 = RGB8 { r: 6, g: 6, b: 14 };
const DROP: RGB8 = RGB8 { r: 0, g: 8, b: 40 };

/// Indexed by rain-intensity category (0 = dry … 3 = heavy).
pub static SPRITES: [Sprite; 4] = [
    // 0: clear sky
    [
        [SUN, O, SUN, O, SUN],
        [O, SUN, SUN, SUN, O],
        [SUN, SUN, SUN, SUN, SUN],
        [O, SUN, SUN, SUN, O],
        [SUN, O, SUN, O, SUN],
    ],
    // 1: light rain
    [
        [O, CLOUD, CLOUD, CLOUD, O],
        [CLOUD, CLOUD, CLOUD, CLOUD, CLOUD],
        [O, O, O, O, O],
        [O, O, DROP, O, O],
        [O, O, O, O, O],
    ],
    // 2: moderate rain
    [
        [O, CLOUD, CLOUD, CLOUD, O],
        [CLOUD, CLOUD, CLOUD, CLOUD, CLOUD],
        [O, DROP, O, DROP, O],
        [O, O, O, O, O],
        [DROP, O, DROP, O, DROP],
    ],
    // 3: heavy rain
    [
        [STORM, STORM, STORM, STORM, STORM],
        [STORM, STORM, STORM, STORM, STORM],
        [DROP, O, DROP, O, DROP],
        [O, DROP, O, DROP, O],
        [DROP, O, DROP, O, DROP],
    ],
];
