//! Integration tests for the display, alarm and indicator consumers reading
//! the shared state.

use std::time::Duration;

use rainwatch::app::events::StationEvent;
use rainwatch::app::ports::{OutputPin, ToneChannel};
use rainwatch::config::StationConfig;
use rainwatch::pipeline::{SensorSnapshot, SharedState};
use rainwatch::tasks::alarm::{AlarmState, AlarmTask};
use rainwatch::tasks::display::{DisplayTask, NO_DATA, RAIN_LABEL, WATER_LABEL};
use rainwatch::tasks::indicator::{IndicatorBand, IndicatorTask};

use super::mock_hw::{MockOutputs, MockSurface, MockTones, RecordingSink};

// Raw readings with comfortable margins from every threshold.
const WATER_1M: u16 = 410;
const WATER_2_5M: u16 = 1024;
const WATER_5M: u16 = 2048;
const WATER_6_5M: u16 = 2662;
const WATER_10M: u16 = 4095;
const RAIN_70MM: u16 = 3583;

// ── Display ───────────────────────────────────────────────────

#[test]
fn display_shows_placeholders_before_first_publish() {
    let state = SharedState::new();
    let mut display = DisplayTask::new(MockSurface::new(), &state, &StationConfig::default());

    assert_eq!(display.step(), Duration::from_millis(250));

    let surface = display.surface();
    assert_eq!(surface.fills, 1);
    assert_eq!(surface.text_at(10), Some(RAIN_LABEL));
    assert_eq!(surface.text_at(25), Some(NO_DATA));
    assert_eq!(surface.text_at(40), Some(WATER_LABEL));
    assert_eq!(surface.text_at(55), Some(NO_DATA));
}

#[test]
fn display_redraws_full_frame_with_latest_values() {
    let state = SharedState::new();
    let mut display = DisplayTask::new(MockSurface::new(), &state, &StationConfig::default());

    state.publish(SensorSnapshot::new(WATER_5M, 1000));
    display.step();
    state.publish(SensorSnapshot::new(WATER_10M, 4095));
    display.step();

    let surface = display.surface();
    assert_eq!(surface.frames.len(), 2);
    assert_eq!(surface.frames[0].len(), 4, "labels and values every frame");
    assert_eq!(surface.frames[0][1].text, "19.54 mm");
    assert_eq!(surface.frames[0][3].text, "5.00 m");
    assert_eq!(surface.text_at(25), Some("80.00 mm"));
    assert_eq!(surface.text_at(55), Some("10.00 m"));
    assert!(surface.last_frame().is_some_and(|f| f.iter().all(|d| d.x == 5)));
}

// ── Alarm ─────────────────────────────────────────────────────

#[test]
fn alarm_stays_silent_without_data() {
    let state = SharedState::new();
    let mut alarm = AlarmTask::new(
        MockTones::new(),
        RecordingSink::new(),
        &state,
        &StationConfig::default(),
    );

    assert_eq!(alarm.step(), Duration::from_millis(10));
    assert_eq!(alarm.current(), AlarmState::Silent);
    assert!(!alarm.tones().sounding(ToneChannel::BuzzerA));
    assert!(!alarm.tones().sounding(ToneChannel::BuzzerB));
    assert!(alarm.sink().events.is_empty());
}

#[test]
fn critical_level_sounds_both_buzzers() {
    let state = SharedState::new();
    let mut alarm = AlarmTask::new(
        MockTones::new(),
        RecordingSink::new(),
        &state,
        &StationConfig::default(),
    );

    state.publish(SensorSnapshot::new(WATER_10M, 0));
    assert_eq!(alarm.step(), Duration::from_millis(260));
    assert!(alarm.tones().sounding(ToneChannel::BuzzerA));
    assert!(alarm.tones().sounding(ToneChannel::BuzzerB));
    assert_eq!(
        alarm.sink().events,
        vec![StationEvent::AlarmChanged {
            from: AlarmState::Silent,
            to: AlarmState::CriticalAlert,
        }]
    );
}

#[test]
fn heavy_rain_sounds_buzzer_a_only() {
    let state = SharedState::new();
    let mut alarm = AlarmTask::new(
        MockTones::new(),
        RecordingSink::new(),
        &state,
        &StationConfig::default(),
    );

    state.publish(SensorSnapshot::new(WATER_5M, RAIN_70MM));
    assert_eq!(alarm.step(), Duration::from_millis(610));
    assert_eq!(alarm.current(), AlarmState::RainAlert);
    assert!(alarm.tones().sounding(ToneChannel::BuzzerA));
    assert!(!alarm.tones().sounding(ToneChannel::BuzzerB));
}

#[test]
fn alarm_follows_flapping_readings_without_hysteresis() {
    let state = SharedState::new();
    let mut alarm = AlarmTask::new(
        MockTones::new(),
        RecordingSink::new(),
        &state,
        &StationConfig::default(),
    );

    for _ in 0..3 {
        state.publish(SensorSnapshot::new(WATER_1M, 0));
        alarm.step();
        assert_eq!(alarm.current(), AlarmState::CriticalAlert);
        state.publish(SensorSnapshot::new(WATER_5M, 0));
        alarm.step();
        assert_eq!(alarm.current(), AlarmState::Silent);
    }

    assert_eq!(alarm.sink().events.len(), 6, "one event per transition");
    assert!(!alarm.tones().sounding(ToneChannel::BuzzerA));
}

#[test]
fn steady_state_emits_no_repeat_events() {
    let state = SharedState::new();
    let mut alarm = AlarmTask::new(
        MockTones::new(),
        RecordingSink::new(),
        &state,
        &StationConfig::default(),
    );

    state.publish(SensorSnapshot::new(WATER_5M, RAIN_70MM));
    for _ in 0..5 {
        alarm.step();
    }
    assert_eq!(alarm.sink().events.len(), 1);
    // Both channels are driven every cycle.
    assert_eq!(alarm.tones().calls.len(), 10);
}

// ── Indicator LEDs ────────────────────────────────────────────

fn indicator_levels(water_raw: u16) -> (Option<IndicatorBand>, bool, bool) {
    let state = SharedState::new();
    let mut leds = IndicatorTask::new(
        MockOutputs::new(),
        RecordingSink::new(),
        &state,
        &StationConfig::default(),
    );
    state.publish(SensorSnapshot::new(water_raw, 0));
    leds.step();
    (
        leds.band(),
        leds.outputs().level(OutputPin::Green),
        leds.outputs().level(OutputPin::Red),
    )
}

#[test]
fn indicator_bands_drive_green_and_red() {
    assert_eq!(indicator_levels(WATER_5M), (Some(IndicatorBand::Normal), true, false));
    assert_eq!(indicator_levels(WATER_2_5M), (Some(IndicatorBand::Attention), true, true));
    assert_eq!(indicator_levels(WATER_6_5M), (Some(IndicatorBand::Attention), true, true));
    assert_eq!(indicator_levels(WATER_1M), (Some(IndicatorBand::Critical), false, true));
    assert_eq!(indicator_levels(WATER_10M), (Some(IndicatorBand::Critical), false, true));
}

#[test]
fn indicator_is_dark_until_first_publish() {
    let state = SharedState::new();
    let mut leds = IndicatorTask::new(
        MockOutputs::new(),
        RecordingSink::new(),
        &state,
        &StationConfig::default(),
    );

    assert_eq!(leds.step(), Duration::from_millis(100));
    assert_eq!(leds.band(), None);
    assert!(!leds.outputs().level(OutputPin::Green));
    assert!(!leds.outputs().level(OutputPin::Red));
    assert!(leds.sink().events.is_empty());

    state.publish(SensorSnapshot::new(WATER_5M, 0));
    leds.step();
    assert_eq!(
        leds.sink().events,
        vec![StationEvent::BandChanged {
            from: None,
            to: Some(IndicatorBand::Normal),
        }]
    );
}
