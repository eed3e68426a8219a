//! Integration tests for acquisition → sample queue → distributor → state.

use std::time::Duration;

use futures_lite::future::block_on;

use rainwatch::config::{SAMPLE_QUEUE_DEPTH, StationConfig};
use rainwatch::pipeline::{SampleQueue, SensorSnapshot, SharedState};
use rainwatch::tasks::acquisition::SensorAcquisition;
use rainwatch::tasks::distributor::Distributor;

use super::mock_hw::MockAnalog;

#[test]
fn acquisition_oversamples_both_channels_each_cycle() {
    let cfg = StationConfig::default();
    let queue = SampleQueue::new();
    let mut acq = SensorAcquisition::new(MockAnalog::new(2048, 1000), &queue, &cfg);

    assert_eq!(acq.step(), Duration::from_millis(100));
    assert_eq!(acq.analog().reads, 2 * cfg.oversample_count);
    assert_eq!(queue.try_take(), Some(SensorSnapshot::new(2048, 1000)));
}

#[test]
fn snapshot_flows_from_adc_to_shared_state() {
    let cfg = StationConfig::default();
    let queue = SampleQueue::new();
    let state = SharedState::new();
    let mut acq = SensorAcquisition::new(MockAnalog::new(4095, 0), &queue, &cfg);
    let mut dist = Distributor::new(&queue, &state, &cfg);

    assert_eq!(state.latest(), None, "nothing published before the first sample");

    acq.step();
    assert_eq!(block_on(dist.step()), Duration::from_millis(10));

    let latest = state.latest().expect("published");
    assert_eq!(latest.water_level_raw(), 4095);
    assert_eq!(latest.rain_volume_raw(), 0);
    assert!((latest.water_level_m() - 10.0).abs() < 1e-4);
    assert_eq!(state.publishes(), 1);
    assert!(queue.is_empty());
}

#[test]
fn stalled_distributor_keeps_oldest_samples() {
    let cfg = StationConfig::default();
    let queue = SampleQueue::new();
    let state = SharedState::new();

    // Eight cycles with nobody draining the queue.
    for n in 0..8u16 {
        SensorAcquisition::new(MockAnalog::new(n, 0), &queue, &cfg).step();
    }
    assert_eq!(queue.len(), SAMPLE_QUEUE_DEPTH);
    assert_eq!(queue.accepted(), 5);
    assert_eq!(queue.dropped(), 3);

    let mut dist = Distributor::new(&queue, &state, &cfg);
    for expected in 0..5u16 {
        block_on(dist.step());
        assert_eq!(state.latest().map(|s| s.water_level_raw()), Some(expected));
    }
}

#[test]
fn concurrent_producer_never_reorders_and_accounts_every_sample() {
    const OFFERED: u16 = 500;
    let queue = SampleQueue::new();
    let mut received = Vec::new();

    std::thread::scope(|s| {
        s.spawn(|| {
            for n in 0..OFFERED {
                queue.offer(SensorSnapshot::new(n, 0));
                if n % 16 == 0 {
                    std::thread::yield_now();
                }
            }
        });

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while std::time::Instant::now() < deadline {
            if let Some(s) = queue.try_take() {
                received.push(s.water_level_raw());
                if s.water_level_raw() == OFFERED - 1 {
                    break;
                }
            } else if queue.accepted() + queue.dropped() == u32::from(OFFERED) && queue.is_empty() {
                break;
            } else {
                std::thread::yield_now();
            }
        }
    });

    while let Some(s) = queue.try_take() {
        received.push(s.water_level_raw());
    }

    assert!(
        received.windows(2).all(|w| w[0] < w[1]),
        "retained samples must stay in production order"
    );
    assert_eq!(queue.accepted() + queue.dropped(), u32::from(OFFERED));
    assert_eq!(received.len() as u32, queue.accepted());
}

#[test]
fn distributor_blocks_until_a_sample_arrives() {
    static QUEUE: SampleQueue = SampleQueue::new();
    static STATE: SharedState = SharedState::new();
    let cfg = StationConfig::default();

    let producer = std::thread::spawn(|| {
        std::thread::sleep(Duration::from_millis(30));
        QUEUE.offer(SensorSnapshot::new(1234, 567));
    });

    let mut dist = Distributor::new(&QUEUE, &STATE, &cfg);
    block_on(dist.step());
    producer.join().expect("producer thread");

    assert_eq!(STATE.latest(), Some(SensorSnapshot::new(1234, 567)));
}
