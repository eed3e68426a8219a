//! Bounded acquisition → distributor queue with drop-on-full semantics.
//!
//! Wraps an `embassy-sync` channel so the producer never blocks and the
//! distributor can wait without polling.  Rejected samples are counted
//! instead of reported.
//!
//! ```text
//! ┌──────────────┐ offer() ┌───────────────┐ take().await ┌──────────────┐
//! │ Acquisition  │───────▶│ [ · · · · · ]  │─────────────▶│ Distributor  │
//! │ (100 ms)     │  full?  │  capacity 5   │              │ (blocks)     │
//! └──────────────┘ dropped └───────────────┘              └──────────────┘
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use super::snapshot::SensorSnapshot;
use crate::config::SAMPLE_QUEUE_DEPTH;

pub struct SampleQueue {
    channel: Channel<CriticalSectionRawMutex, SensorSnapshot, SAMPLE_QUEUE_DEPTH>,
    accepted: AtomicU32,
    dropped: AtomicU32,
}

impl SampleQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            accepted: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueue without waiting.  Returns `false` if the queue was full and
    /// the sample was discarded.
    pub fn offer(&self, snapshot: SensorSnapshot) -> bool {
        match self.channel.try_send(snapshot) {
            Ok(()) => {
                self.accepted.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Wait for the oldest queued sample.
    pub async fn take(&self) -> SensorSnapshot {
        self.channel.receive().await
    }

    pub fn try_take(&self) -> Option<SensorSnapshot> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        SAMPLE_QUEUE_DEPTH
    }

    /// Samples that made it into the queue since boot.
    pub fn accepted(&self) -> u32 {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Samples discarded because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for SampleQueue {
    fn default() -> Self {
        Self::new()
    }
}
