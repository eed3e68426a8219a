//! Sensor distribution pipeline.
//!
//! ```text
//! Acquisition ──▶ SAMPLE_QUEUE ──▶ Distributor ──▶ SHARED_STATE ──┬─▶ Display
//!                 (bounded, 5)                     (one atomic)   ├─▶ Alarm
//!                                                                 ├─▶ Indicator LEDs
//!                                                                 └─▶ Matrix render
//! ```
//!
//! Both statics are `const`-initialised so tasks can hold `&'static`
//! references without any boot-time setup.

pub mod queue;
pub mod shared_state;
pub mod snapshot;

pub use queue::SampleQueue;
pub use shared_state::SharedState;
pub use snapshot::{RAW_MAX, SensorSnapshot};

/// Acquisition → distributor queue.
pub static SAMPLE_QUEUE: SampleQueue = SampleQueue::new();

/// Latest published snapshot, read by every consumer.
pub static SHARED_STATE: SharedState = SharedState::new();
