//! Latest-value cell shared by the distributor and every consumer task.
//!
//! A snapshot is two 12-bit readings, so the whole thing fits in one
//! `AtomicU32` together with a "published" marker:
//!
//! ```text
//!  31  30     28        16 15     12        0
//! ┌───┬────────┬──────────┬────────┬──────────┐
//! │ P │  0 0 0 │  water   │ 0 0 0 0│   rain   │
//! └───┴────────┴──────────┴────────┴──────────┘
//! ```
//!
//! Publishing is one store and reading is one load, so a reader can only
//! ever see a complete snapshot.  No lock is taken on either side.

use core::sync::atomic::{AtomicU32, Ordering};

use super::snapshot::SensorSnapshot;

const PUBLISHED: u32 = 1 << 31;
const FIELD_MASK: u32 = 0x0FFF;
const WATER_SHIFT: u32 = 16;

pub struct SharedState {
    packed: AtomicU32,
    publishes: AtomicU32,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            packed: AtomicU32::new(0),
            publishes: AtomicU32::new(0),
        }
    }

    /// Replace the current snapshot.  Only the distributor calls this.
    pub fn publish(&self, snapshot: SensorSnapshot) {
        self.packed.store(pack(snapshot), Ordering::Release);
        self.publishes.fetch_add(1, Ordering::Relaxed);
    }

    /// The most recently published snapshot, or `None` before the first
    /// publish.
    pub fn latest(&self) -> Option<SensorSnapshot> {
        unpack(self.packed.load(Ordering::Acquire))
    }

    /// Number of snapshots published since boot.
    pub fn publishes(&self) -> u32 {
        self.publishes.load(Ordering::Relaxed)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

const fn pack(s: SensorSnapshot) -> u32 {
    PUBLISHED
        | ((s.water_level_raw() as u32 & FIELD_MASK) << WATER_SHIFT)
        | (s.rain_volume_raw() as u32 & FIELD_MASK)
}

fn unpack(word: u32) -> Option<SensorSnapshot> {
    if word & PUBLISHED == 0 {
        return None;
    }
    let water = ((word >> WATER_SHIFT) & FIELD_MASK) as u16;
    let rain = (word & FIELD_MASK) as u16;
    Some(SensorSnapshot::new(water, rain))
}
