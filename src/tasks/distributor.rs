//! State distributor task, the only writer of [`SharedState`].
//!
//! Waits on the sample queue with no timeout, publishes each snapshot as
//! one atomic store, then yields for the settle delay so consumers get CPU
//! time even when the queue is backed up.

use std::time::Duration;

use crate::config::StationConfig;
use crate::pipeline::{SampleQueue, SharedState};

pub struct Distributor<'a> {
    queue: &'a SampleQueue,
    state: &'a SharedState,
    settle: Duration,
}

impl<'a> Distributor<'a> {
    pub fn new(queue: &'a SampleQueue, state: &'a SharedState, cfg: &StationConfig) -> Self {
        Self {
            queue,
            state,
            settle: Duration::from_millis(u64::from(cfg.distributor_settle_ms)),
        }
    }

    /// Wait for the next sample and publish it.  Returns the settle delay.
    pub async fn step(&mut self) -> Duration {
        let snapshot = self.queue.take().await;
        self.state.publish(snapshot);
        self.settle
    }

    pub fn run(mut self) -> ! {
        loop {
            let pause = futures_lite::future::block_on(self.step());
            std::thread::sleep(pause);
        }
    }
}
