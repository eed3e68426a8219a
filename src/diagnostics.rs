//! Pipeline health counters.
//!
//! The supervisor loop in `main()` collects a [`PipelineStats`] every
//! diagnostics interval and emits it as a `STATS` event.  Everything here
//! is a read of counters that the tasks already maintain, so collecting
//! never blocks a task.

use core::sync::atomic::Ordering;

use crate::pipeline::{SampleQueue, SharedState};
use crate::tasks::matrix::{FRAMES_RENDERED, SERIALIZER_ERRORS};

/// Point-in-time view of the sensor pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub uptime_secs: u64,
    pub samples_accepted: u32,
    pub samples_dropped: u32,
    pub queue_depth: u8,
    pub publishes: u32,
    pub frames_rendered: u32,
    pub serializer_errors: u32,
    pub heap_free: u32,
}

impl PipelineStats {
    pub fn collect(uptime_secs: u64, queue: &SampleQueue, state: &SharedState) -> Self {
        Self {
            uptime_secs,
            samples_accepted: queue.accepted(),
            samples_dropped: queue.dropped(),
            queue_depth: queue.len() as u8,
            publishes: state.publishes(),
            frames_rendered: FRAMES_RENDERED.load(Ordering::Relaxed),
            serializer_errors: SERIALIZER_ERRORS.load(Ordering::Relaxed),
            heap_free: Self::read_heap_free(uptime_secs),
        }
    }

    /// Fraction of produced samples that were dropped (0.0 – 1.0).
    pub fn drop_ratio(&self) -> f32 {
        let produced = self.samples_accepted.saturating_add(self.samples_dropped);
        if produced == 0 {
            0.0
        } else {
            self.samples_dropped as f32 / produced as f32
        }
    }

    /// Samples accepted but not yet published (in the queue or in flight).
    pub fn backlog(&self) -> u32 {
        self.samples_accepted.saturating_sub(self.publishes)
    }

    #[cfg(target_os = "espidf")]
    fn read_heap_free(_uptime_secs: u64) -> u32 {
        // SAFETY: read-only query of the allocator's free counter.
        unsafe { esp_idf_svc::sys::esp_get_free_heap_size() }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_heap_free(uptime_secs: u64) -> u32 {
        // Synthetic figure so simulation logs look like the device's.
        let base_free: u32 = 280_000;
        let decay = (uptime_secs / 60) as u32 * 64;
        base_free.saturating_sub(decay)
    }
}

/// Seconds since boot.
#[cfg(target_os = "espidf")]
pub fn uptime_secs() -> u64 {
    // SAFETY: esp_timer_get_time is a monotonic counter read.
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000_000
}

#[cfg(not(target_os = "espidf"))]
pub fn uptime_secs() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static BOOT: OnceLock<Instant> = OnceLock::new();
    BOOT.get_or_init(Instant::now).elapsed().as_secs()
}
