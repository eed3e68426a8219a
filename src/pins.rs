//! GPIO / peripheral pin assignments for the Rainwatch station board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1)
// ---------------------------------------------------------------------------

/// Pressure-type water level sensor, 0 – 10 m over full scale.
/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const WATER_LEVEL_ADC_GPIO: i32 = 1;
pub const WATER_LEVEL_ADC_CHANNEL: u32 = 0;

/// Tipping-bucket integrator output, 0 – 80 mm/day over full scale.
/// ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const RAIN_ADC_GPIO: i32 = 2;
pub const RAIN_ADC_CHANNEL: u32 = 1;

// ---------------------------------------------------------------------------
// Indicator LEDs (discrete, active HIGH)
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 11;
pub const LED_RED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Buzzers (passive piezo, LEDC driven)
// ---------------------------------------------------------------------------

pub const BUZZER_A_GPIO: i32 = 21;
pub const BUZZER_B_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// 5×5 WS2812 matrix data line (RMT)
// ---------------------------------------------------------------------------

pub const MATRIX_DATA_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Buzzer A tone (high pitch).
pub const BUZZER_A_FREQ_HZ: u32 = 2_700;
/// Buzzer B tone (low pitch).
pub const BUZZER_B_FREQ_HZ: u32 = 1_500;
/// 50 % duty at [`PWM_RESOLUTION_BITS`].
pub const BUZZER_ON_DUTY: u8 = (1u32 << (PWM_RESOLUTION_BITS - 1)) as u8;
