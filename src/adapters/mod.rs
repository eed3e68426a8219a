//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | AnalogPort         | ESP32 ADC1 oneshot       |
//! |                | TonePort           | ESP32 LEDC (buzzers)     |
//! |                | BinaryOutputPort   | ESP32 GPIO (LEDs)        |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `text_surface` | TextSurfacePort    | Serial log output        |
//!
//! The RMT serializer lives in `drivers::rmt_serializer` next to the matrix
//! driver that claims it.

pub mod hardware;
pub mod log_sink;
pub mod text_surface;
