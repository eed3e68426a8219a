//! Mock hardware adapters for integration tests.
//!
//! Every adapter records what the tasks asked of it so tests can assert on
//! the full history without touching ADC, LEDC, GPIO or RMT registers.

use rainwatch::app::events::StationEvent;
use rainwatch::app::ports::{
    AnalogPort, BinaryOutputPort, EventSink, OutputPin, PinSpec, SensorChannel, SerializerPort,
    TextSurfacePort, ToneChannel, TonePort,
};
use rainwatch::error::SerializerError;

// ── MockAnalog ────────────────────────────────────────────────

/// Returns a fixed conversion per channel and counts reads.
#[derive(Debug, Default)]
pub struct MockAnalog {
    pub water_level_raw: u16,
    pub rain_volume_raw: u16,
    pub reads: u32,
}

impl MockAnalog {
    pub fn new(water_level_raw: u16, rain_volume_raw: u16) -> Self {
        Self {
            water_level_raw,
            rain_volume_raw,
            reads: 0,
        }
    }
}

impl AnalogPort for MockAnalog {
    fn read_channel(&mut self, channel: SensorChannel) -> u16 {
        self.reads += 1;
        match channel {
            SensorChannel::WaterLevel => self.water_level_raw,
            SensorChannel::RainVolume => self.rain_volume_raw,
        }
    }
}

// ── MockTones ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    Start(ToneChannel),
    Stop(ToneChannel),
}

#[derive(Debug, Default)]
pub struct MockTones {
    pub calls: Vec<ToneCall>,
}

#[allow(dead_code)]
impl MockTones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last call on `channel` left it sounding.
    pub fn sounding(&self, channel: ToneChannel) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                ToneCall::Start(ch) if ch == channel => Some(true),
                ToneCall::Stop(ch) if ch == channel => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl TonePort for MockTones {
    fn start_tone(&mut self, channel: ToneChannel) {
        self.calls.push(ToneCall::Start(channel));
    }

    fn stop_tone(&mut self, channel: ToneChannel) {
        self.calls.push(ToneCall::Stop(channel));
    }
}

// ── MockOutputs ───────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockOutputs {
    pub calls: Vec<(OutputPin, bool)>,
}

#[allow(dead_code)]
impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, pin: OutputPin) -> bool {
        self.calls
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .is_some_and(|&(_, high)| high)
    }
}

impl BinaryOutputPort for MockOutputs {
    fn set_level(&mut self, pin: OutputPin, high: bool) {
        self.calls.push((pin, high));
    }
}

// ── MockSurface ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawn {
    pub text: String,
    pub x: u8,
    pub y: u8,
}

/// Keeps every committed frame.
#[derive(Debug, Default)]
pub struct MockSurface {
    pending: Vec<Drawn>,
    pub frames: Vec<Vec<Drawn>>,
    pub fills: u32,
}

#[allow(dead_code)]
impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&[Drawn]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Text drawn at `y` in the last committed frame.
    pub fn text_at(&self, y: u8) -> Option<&str> {
        self.last_frame()?
            .iter()
            .find(|d| d.y == y)
            .map(|d| d.text.as_str())
    }
}

impl TextSurfacePort for MockSurface {
    fn draw_string(&mut self, text: &str, x: u8, y: u8) {
        self.pending.push(Drawn {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn fill(&mut self, _lit: bool) {
        self.fills += 1;
        self.pending.clear();
    }

    fn commit(&mut self) {
        self.frames.push(std::mem::take(&mut self.pending));
    }
}

// ── RecordingSerializer ───────────────────────────────────────

/// Single-channel serializer that records every byte on the wire.  With
/// `fail_every` set, every n-th byte is rejected and not recorded.
#[derive(Debug, Default)]
pub struct RecordingSerializer {
    pub claimed: Option<PinSpec>,
    pub bytes: Vec<u8>,
    pub exhausted: bool,
    pub fail_every: Option<u32>,
    pub attempts: u32,
}

#[allow(dead_code)]
impl RecordingSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A serializer with every channel already taken.
    pub fn exhausted() -> Self {
        Self {
            exhausted: true,
            ..Self::default()
        }
    }

    /// A serializer that rejects every `n`-th byte.
    pub fn failing_every(n: u32) -> Self {
        Self {
            fail_every: Some(n),
            ..Self::default()
        }
    }

    /// Wire bytes of frame `n` (75 bytes each).
    pub fn frame(&self, n: usize) -> &[u8] {
        &self.bytes[n * 75..(n + 1) * 75]
    }
}

impl SerializerPort for RecordingSerializer {
    type Handle = ();

    fn claim(&mut self, pin: PinSpec) -> Result<(), SerializerError> {
        if self.exhausted || self.claimed.is_some() {
            return Err(SerializerError::NoChannelAvailable);
        }
        self.claimed = Some(pin);
        Ok(())
    }

    fn send_byte(&mut self, _handle: &mut (), byte: u8) -> Result<(), SerializerError> {
        self.attempts += 1;
        if self.fail_every.is_some_and(|n| self.attempts % n == 0) {
            return Err(SerializerError::TransmitFailed(-1));
        }
        self.bytes.push(byte);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<StationEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &StationEvent) {
        self.events.push(event.clone());
    }
}
