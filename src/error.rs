//! Unified error types for the Rainwatch firmware.
//!
//! Only initialisation can fail loudly.  Steady-state losses (a full sample
//! queue, an out-of-range pixel write) are counted where they happen and
//! never surface here.  All variants are `Copy` so they pass through the
//! boot path without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible boot step funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The LED matrix could not obtain a serializer.
    Serializer(SerializerError),
    /// A station task could not be created (carries the task name).
    Spawn(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Serializer(e) => write!(f, "serializer: {e}"),
            Self::Spawn(name) => write!(f, "spawn: task '{name}' could not be created"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Serializer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerError {
    /// Every serializer channel is already claimed.
    NoChannelAvailable,
    /// The channel was allocated but the bit encoder could not be set up.
    EncoderSetupFailed(i32),
    /// Enabling the channel failed.
    EnableFailed(i32),
    /// A byte could not be queued or did not finish transmitting.
    TransmitFailed(i32),
}

impl fmt::Display for SerializerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChannelAvailable => write!(f, "no serializer channel available"),
            Self::EncoderSetupFailed(rc) => write!(f, "bit encoder setup failed (rc={rc})"),
            Self::EnableFailed(rc) => write!(f, "channel enable failed (rc={rc})"),
            Self::TransmitFailed(rc) => write!(f, "transmit failed (rc={rc})"),
        }
    }
}

impl From<SerializerError> for Error {
    fn from(e: SerializerError) -> Self {
        Self::Serializer(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
