//! Station configuration parameters
//!
//! All tunable parameters for the Rainwatch station. Everything is fixed at
//! compile time; there is no runtime provisioning or persistence.

/// Core station configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationConfig {
    // --- Acquisition ---
    /// Acquisition period (milliseconds)
    pub acquisition_period_ms: u32,
    /// ADC reads averaged into one raw value
    pub oversample_count: u32,

    // --- Distribution ---
    /// Sleep after every publish (milliseconds)
    pub distributor_settle_ms: u32,

    // --- Scaling ---
    /// Full-scale raw ADC value (12-bit)
    pub adc_full_scale: u16,
    /// Water column height at full scale (metres)
    pub water_level_span_m: f32,
    /// Rain volume at full scale (millimetres per day)
    pub rain_volume_span_mm: f32,

    // --- Water level thresholds ---
    /// Below this level (strict) the station is critical
    pub water_critical_low_m: f32,
    /// Above this level (strict) the station is critical
    pub water_critical_high_m: f32,
    /// Lower edge of the normal band (inclusive)
    pub water_normal_low_m: f32,
    /// Upper edge of the normal band (inclusive)
    pub water_normal_high_m: f32,

    // --- Rain thresholds ---
    /// Rain volume above which the rain alarm sounds
    pub rain_alert_mm: f32,
    /// Upper (exclusive) edges of intensity categories 0, 1 and 2
    pub rain_category_edges_mm: [f32; 3],

    // --- Consumer timing ---
    /// Display refresh period (milliseconds)
    pub display_period_ms: u32,
    /// Alarm loop base delay (milliseconds)
    pub alarm_base_ms: u32,
    /// Re-evaluation hold while the critical alarm sounds (milliseconds)
    pub alarm_critical_hold_ms: u32,
    /// Re-evaluation hold while the rain alarm sounds (milliseconds)
    pub alarm_rain_hold_ms: u32,
    /// Indicator LED refresh period (milliseconds)
    pub indicator_period_ms: u32,
    /// LED matrix frame period (milliseconds)
    pub matrix_frame_ms: u32,

    // --- Supervisor ---
    /// Diagnostics report interval (seconds)
    pub stats_interval_secs: u32,
    /// Task watchdog timeout for the supervisor loop (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl StationConfig {
    pub const DEFAULT: Self = Self {
        // Acquisition
        acquisition_period_ms: 100, // 10 Hz
        oversample_count: 16,

        // Distribution
        distributor_settle_ms: 10,

        // Scaling
        adc_full_scale: 4095,
        water_level_span_m: 10.0,
        rain_volume_span_mm: 80.0,

        // Water level
        water_critical_low_m: 2.0,
        water_critical_high_m: 7.0,
        water_normal_low_m: 3.0,
        water_normal_high_m: 6.0,

        // Rain
        rain_alert_mm: 64.0,
        rain_category_edges_mm: [15.0, 30.0, 55.0],

        // Consumers
        display_period_ms: 250,
        alarm_base_ms: 10,
        alarm_critical_hold_ms: 250,
        alarm_rain_hold_ms: 600,
        indicator_period_ms: 100,
        matrix_frame_ms: 200,

        // Supervisor
        stats_interval_secs: 5,
        watchdog_timeout_ms: 10_000,
    };
}

impl Default for StationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Capacity of the acquisition → distributor queue.
///
/// Kept outside [`StationConfig`] because it sizes a static channel.
pub const SAMPLE_QUEUE_DEPTH: usize = 5;
