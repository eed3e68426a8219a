//! Fuzz target: `SampleQueue` offer/take interleavings
//!
//! Each input byte is one operation: even bytes offer a sample, odd bytes
//! take one.  Asserts the queue never holds more than its capacity, never
//! reorders, and accounts for every offered sample.
//!
//! cargo fuzz run fuzz_sample_queue

#![no_main]

use libfuzzer_sys::fuzz_target;
use rainwatch::pipeline::{SampleQueue, SensorSnapshot};

fuzz_target!(|data: &[u8]| {
    let queue = SampleQueue::new();
    let mut offered = 0u32;
    let mut last_taken: Option<u16> = None;

    for &op in data {
        if op % 2 == 0 {
            queue.offer(SensorSnapshot::new((offered % 4096) as u16, u16::from(op)));
            offered += 1;
        } else if let Some(s) = queue.try_take() {
            if let Some(prev) = last_taken {
                assert!(
                    s.water_level_raw() > prev || offered > 4096,
                    "samples must leave in offer order"
                );
            }
            last_taken = Some(s.water_level_raw());
        }
        assert!(queue.len() <= queue.capacity());
    }

    assert_eq!(queue.accepted() + queue.dropped(), offered);
});
