//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channels, indicator GPIO outputs, and the buzzer
//! LEDC timers/channels using raw ESP-IDF sys calls.  Called once from
//! `main()` before any task is spawned.  The RMT channel for the LED
//! matrix is claimed separately by the matrix driver.
//!
//! ## Dual-target design
//!
//! On ESP-IDF every accessor talks to the peripheral.  On host/test the
//! accessors read and write static atomics so tests can inject ADC values
//! and observe outputs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU8, AtomicU16, AtomicU64, Ordering};

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before tasks are spawned; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!(
        "hw_init(sim): peripheral init skipped (ADC GPIO {}/{}, {}-bit PWM)",
        pins::WATER_LEVEL_ADC_GPIO,
        pins::RAIN_ADC_GPIO,
        pins::PWM_RESOLUTION_BITS
    );
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

pub const ADC1_CH_WATER_LEVEL: u32 = pins::WATER_LEVEL_ADC_CHANNEL;
pub const ADC1_CH_RAIN: u32 = pins::RAIN_ADC_CHANNEL;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: ADC1_HANDLE is written once in `init_adc()` before any task
/// exists; afterwards only the acquisition task reads it.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_WATER_LEVEL, ADC1_CH_RAIN] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!(
        "hw_init: ADC1 configured (CH{}/GPIO{}=water level, CH{}/GPIO{}=rain)",
        ADC1_CH_WATER_LEVEL,
        pins::WATER_LEVEL_ADC_GPIO,
        ADC1_CH_RAIN,
        pins::RAIN_ADC_GPIO
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, acquisition task access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, 4095) as u16
}

#[cfg(not(target_os = "espidf"))]
static SIM_WATER_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_RAIN_ADC: AtomicU16 = AtomicU16::new(0);

/// Serialises host tests that inject simulated ADC values.
#[cfg(all(test, not(target_os = "espidf")))]
pub(crate) static SIM_ADC_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Inject the raw values the simulated ADC returns.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(water_level_raw: u16, rain_raw: u16) {
    SIM_WATER_ADC.store(water_level_raw, Ordering::Relaxed);
    SIM_RAIN_ADC.store(rain_raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    match channel {
        ADC1_CH_WATER_LEVEL => SIM_WATER_ADC.load(Ordering::Relaxed),
        ADC1_CH_RAIN => SIM_RAIN_ADC.load(Ordering::Relaxed),
        _ => 0,
    }
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [pins::LED_GREEN_GPIO, pins::LED_RED_GPIO];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (green={}, red={})", pins::LED_GREEN_GPIO, pins::LED_RED_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an output pin configured in
    // init_gpio_outputs(); only the indicator task drives these pins.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
static SIM_GPIO_LEVELS: AtomicU64 = AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    let bit = 1u64 << pin;
    if high {
        SIM_GPIO_LEVELS.fetch_or(bit, Ordering::Relaxed);
    } else {
        SIM_GPIO_LEVELS.fetch_and(!bit, Ordering::Relaxed);
    }
}

/// Last level written to `pin` (simulation only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_gpio_level(pin: i32) -> bool {
    SIM_GPIO_LEVELS.load(Ordering::Relaxed) & (1u64 << pin) != 0
}

// ── LEDC PWM (buzzers) ────────────────────────────────────────

pub const LEDC_CH_BUZZER_A: u32 = 0;
pub const LEDC_CH_BUZZER_B: u32 = 1;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // One timer per buzzer so the two tones can differ in pitch.
    let timers = [
        (ledc_timer_t_LEDC_TIMER_0, pins::BUZZER_A_FREQ_HZ),
        (ledc_timer_t_LEDC_TIMER_1, pins::BUZZER_B_FREQ_HZ),
    ];
    for (timer_num, freq_hz) in timers {
        let timer = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num,
            duty_resolution: pins::PWM_RESOLUTION_BITS as ledc_timer_bit_t,
            freq_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        // SAFETY: Called from the single boot context via init_peripherals().
        let ret = unsafe { ledc_timer_config(&timer) };
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }
    }

    let channels = [
        (LEDC_CH_BUZZER_A, ledc_timer_t_LEDC_TIMER_0, pins::BUZZER_A_GPIO),
        (LEDC_CH_BUZZER_B, ledc_timer_t_LEDC_TIMER_1, pins::BUZZER_B_GPIO),
    ];
    for (channel, timer_sel, gpio_num) in channels {
        let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel,
            gpio_num,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        }) };
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }
    }

    info!("hw_init: LEDC configured (buzzer A=CH0 {} Hz, buzzer B=CH1 {} Hz)",
        pins::BUZZER_A_FREQ_HZ, pins::BUZZER_B_FREQ_HZ);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels were configured in init_ledc(); only the alarm
    // task writes buzzer duty.
    unsafe {
        esp_idf_svc::sys::ledc_set_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            duty as u32,
        );
        esp_idf_svc::sys::ledc_update_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
        );
    }
}

#[cfg(not(target_os = "espidf"))]
static SIM_LEDC_DUTY: [AtomicU8; 2] = [AtomicU8::new(0), AtomicU8::new(0)];

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(channel: u32, duty: u8) {
    if let Some(slot) = SIM_LEDC_DUTY.get(channel as usize) {
        slot.store(duty, Ordering::Relaxed);
    }
}

/// Last duty written to `channel` (simulation only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_ledc_duty(channel: u32) -> u8 {
    SIM_LEDC_DUTY
        .get(channel as usize)
        .map_or(0, |slot| slot.load(Ordering::Relaxed))
}
