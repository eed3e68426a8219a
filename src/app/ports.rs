//! Port traits: the hexagonal boundary between the station tasks and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Task (domain)
//! ```
//!
//! Driven adapters (ADC, buzzers, GPIO, RMT, log output) implement these
//! traits.  The tasks in [`crate::tasks`] consume them via generics, so the
//! pipeline never touches hardware directly and every task can be driven
//! from a host test with recording mocks.

use crate::error::SerializerError;

// ───────────────────────────────────────────────────────────────
// Analog sampling port (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

/// The two analog inputs of the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorChannel {
    WaterLevel,
    RainVolume,
}

/// One synchronous conversion per call.  Implementations may busy-wait.
pub trait AnalogPort {
    /// Raw 12-bit conversion (0–4095).
    fn read_channel(&mut self, channel: SensorChannel) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Text surface port (driven adapter: domain → display)
// ───────────────────────────────────────────────────────────────

/// Monochrome text surface.  Nothing is visible until [`commit`](Self::commit).
pub trait TextSurfacePort {
    fn draw_string(&mut self, text: &str, x: u8, y: u8);

    /// Fill the whole surface (`true` = lit).
    fn fill(&mut self, lit: bool);

    fn commit(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Tone port (driven adapter: domain → buzzers)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneChannel {
    BuzzerA,
    BuzzerB,
}

pub trait TonePort {
    /// Start the channel's tone.  Starting an already sounding channel is a no-op.
    fn start_tone(&mut self, channel: ToneChannel);

    fn stop_tone(&mut self, channel: ToneChannel);
}

// ───────────────────────────────────────────────────────────────
// Binary output port (driven adapter: domain → GPIO)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPin {
    Green,
    Red,
}

pub trait BinaryOutputPort {
    fn set_level(&mut self, pin: OutputPin, high: bool);
}

// ───────────────────────────────────────────────────────────────
// Serializer port (driven adapter: LED matrix → RMT)
// ───────────────────────────────────────────────────────────────

/// Data pin and bit rate requested from a serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSpec {
    pub gpio: i32,
    pub bit_rate_hz: u32,
}

/// Hardware that clocks bytes onto a single data line with fixed bit timing.
pub trait SerializerPort {
    /// Exclusive access to one claimed channel.
    type Handle;

    /// Claim an unused channel and configure it for `pin`.
    fn claim(&mut self, pin: PinSpec) -> Result<Self::Handle, SerializerError>;

    /// Transmit one byte.  Returns once the hardware has finished with it.
    fn send_byte(&mut self, handle: &mut Self::Handle, byte: u8) -> Result<(), SerializerError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// Tasks emit structured [`StationEvent`](super::events::StationEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::StationEvent);
}
