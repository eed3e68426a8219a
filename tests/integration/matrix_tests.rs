//! Integration tests for the matrix render path: shared state → pictogram
//! → logical/physical mapping → GRB bytes on the serializer.

use std::time::Duration;

use rainwatch::app::events::StationEvent;
use rainwatch::config::StationConfig;
use rainwatch::diagnostics::PipelineStats;
use rainwatch::drivers::led_matrix::{
    FRAME_BYTES, LedMatrixDriver, MATRIX_CELLS, MATRIX_SIDE, WS2812_BIT_RATE_HZ,
    map_logical_to_physical,
};
use rainwatch::drivers::sprites::{SPRITES, Sprite};
use rainwatch::error::SerializerError;
use rainwatch::pins;
use rainwatch::pipeline::{SampleQueue, SensorSnapshot, SharedState};
use rainwatch::tasks::matrix::{MatrixRenderTask, RainIntensity};

use super::mock_hw::{RecordingSerializer, RecordingSink};

/// Expected wire bytes for `sprite`, built from the inverse mapping.
fn expected_frame(sprite: &Sprite) -> Vec<u8> {
    let mut by_index = [(0usize, 0usize); MATRIX_CELLS];
    for row in 0..MATRIX_SIDE {
        for col in 0..MATRIX_SIDE {
            by_index[map_logical_to_physical(row, col)] = (row, col);
        }
    }
    by_index
        .iter()
        .flat_map(|&(row, col)| {
            let c = sprite[row][col];
            [c.g, c.r, c.b]
        })
        .collect()
}

fn render_task(state: &SharedState) -> MatrixRenderTask<'_, RecordingSerializer, RecordingSink> {
    let matrix = LedMatrixDriver::init(RecordingSerializer::new(), pins::MATRIX_DATA_GPIO)
        .expect("serializer available");
    MatrixRenderTask::new(matrix, RecordingSink::new(), state, &StationConfig::default())
}

#[test]
fn init_claims_the_data_pin_at_ws2812_rate() {
    let matrix = LedMatrixDriver::init(RecordingSerializer::new(), pins::MATRIX_DATA_GPIO)
        .expect("serializer available");
    let claimed = matrix.serializer().claimed.expect("claimed");
    assert_eq!(claimed.gpio, pins::MATRIX_DATA_GPIO);
    assert_eq!(claimed.bit_rate_hz, WS2812_BIT_RATE_HZ);
}

#[test]
fn init_fails_when_no_serializer_channel_is_free() {
    let result = LedMatrixDriver::init(RecordingSerializer::exhausted(), pins::MATRIX_DATA_GPIO);
    assert!(matches!(result, Err(SerializerError::NoChannelAvailable)));
}

#[test]
fn dark_frame_before_first_publish() {
    let state = SharedState::new();
    let mut task = render_task(&state);

    assert_eq!(task.step(), Duration::from_millis(200));
    let bytes = &task.matrix().serializer().bytes;
    assert_eq!(bytes.len(), FRAME_BYTES);
    assert!(bytes.iter().all(|&b| b == 0));
    assert_eq!(task.shown(), None);
    assert!(task.sink().events.is_empty());
}

#[test]
fn full_scale_water_no_rain_shows_sun_in_grb_order() {
    let state = SharedState::new();
    let mut task = render_task(&state);

    state.publish(SensorSnapshot::new(4095, 0));
    task.step();

    assert_eq!(task.shown(), Some(RainIntensity::Dry));
    assert_eq!(task.matrix().serializer().frame(0), expected_frame(&SPRITES[0]).as_slice());
    assert_eq!(
        task.sink().events,
        vec![StationEvent::IntensityChanged {
            from: None,
            to: Some(RainIntensity::Dry),
            rain_volume_mm: 0.0,
        }]
    );
}

#[test]
fn every_frame_is_a_full_redraw() {
    let state = SharedState::new();
    let mut task = render_task(&state);

    state.publish(SensorSnapshot::new(2048, 4095));
    task.step();
    state.publish(SensorSnapshot::new(2048, 1024));
    task.step();
    task.step();

    let serializer = task.matrix().serializer();
    assert_eq!(serializer.bytes.len(), 3 * FRAME_BYTES);
    assert_eq!(serializer.frame(0), expected_frame(&SPRITES[3]).as_slice());
    assert_eq!(serializer.frame(1), expected_frame(&SPRITES[1]).as_slice());
    assert_eq!(serializer.frame(1), serializer.frame(2));
    assert_eq!(task.matrix().frames_flushed(), 3);
    assert_eq!(task.sink().events.len(), 2, "no event for an unchanged pictogram");
}

#[test]
fn rain_categories_select_matching_sprites() {
    let cases = [
        (0u16, RainIntensity::Dry),
        (800, RainIntensity::Light),
        (1600, RainIntensity::Moderate),
        (2900, RainIntensity::Heavy),
    ];
    for (rain_raw, expected) in cases {
        let state = SharedState::new();
        let mut task = render_task(&state);
        state.publish(SensorSnapshot::new(2048, rain_raw));
        task.step();
        assert_eq!(task.shown(), Some(expected), "rain raw {rain_raw}");
        assert_eq!(
            task.matrix().serializer().frame(0),
            expected_frame(expected.sprite()).as_slice()
        );
    }
}

#[test]
fn serializer_failures_reach_pipeline_stats() {
    let state = SharedState::new();
    let matrix = LedMatrixDriver::init(RecordingSerializer::failing_every(25), pins::MATRIX_DATA_GPIO)
        .expect("serializer available");
    let mut task = MatrixRenderTask::new(matrix, RecordingSink::new(), &state, &StationConfig::default());
    state.publish(SensorSnapshot::new(2048, 0));

    task.step();
    task.step();

    // Three rejected bytes per frame; the rest of each frame still goes out.
    assert_eq!(task.matrix().serializer_errors(), 6);
    assert_eq!(task.matrix().frames_flushed(), 2);
    assert_eq!(task.matrix().serializer().bytes.len(), 2 * (FRAME_BYTES - 3));

    // Other tests share the global counter, so it can only have grown.
    let stats = PipelineStats::collect(0, &SampleQueue::new(), &state);
    assert!(stats.serializer_errors >= 6);
}
