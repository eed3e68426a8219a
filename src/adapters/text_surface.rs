//! Console-backed text surface.
//!
//! Collects the strings drawn during one frame and logs them on
//! [`commit`](TextSurfacePort::commit).  Identical consecutive frames are
//! not logged again, so a steady reading costs one line per change rather
//! than four lines every display period.

use heapless::{String, Vec};
use log::info;

use crate::app::ports::TextSurfacePort;

/// Longest string a single draw call keeps.
pub const MAX_TEXT: usize = 24;
/// Draw calls kept per frame.
pub const MAX_LINES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnText {
    pub x: u8,
    pub y: u8,
    pub text: String<MAX_TEXT>,
}

#[derive(Debug, Default)]
pub struct LogTextSurface {
    pending: Vec<DrawnText, MAX_LINES>,
    shown: Vec<DrawnText, MAX_LINES>,
    commits: u32,
    logged: u32,
}

impl LogTextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text visible after the last commit, top to bottom.
    pub fn shown(&self) -> &[DrawnText] {
        &self.shown
    }

    pub fn commits(&self) -> u32 {
        self.commits
    }

    /// Commits that produced a log line.
    pub fn logged(&self) -> u32 {
        self.logged
    }
}

impl TextSurfacePort for LogTextSurface {
    fn draw_string(&mut self, text: &str, x: u8, y: u8) {
        let mut kept = String::new();
        for ch in text.chars() {
            if kept.push(ch).is_err() {
                break;
            }
        }
        // A full frame silently drops further draws, as a real panel clips.
        let _ = self.pending.push(DrawnText { x, y, text: kept });
    }

    fn fill(&mut self, _lit: bool) {
        self.pending.clear();
    }

    fn commit(&mut self) {
        self.commits = self.commits.wrapping_add(1);
        self.pending.sort_unstable_by_key(|d| (d.y, d.x));
        if self.pending == self.shown {
            self.pending.clear();
            return;
        }
        self.shown = core::mem::take(&mut self.pending);
        self.logged = self.logged.wrapping_add(1);

        let mut line: String<128> = String::new();
        for (i, d) in self.shown.iter().enumerate() {
            let sep = if i == 0 { "" } else { " | " };
            if line.push_str(sep).is_err() || line.push_str(&d.text).is_err() {
                break;
            }
        }
        info!("DISPLAY | {}", line);
    }
}
