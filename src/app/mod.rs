//! Application boundary: events and port traits, no I/O.
//!
//! The station tasks talk to hardware only through the **port traits**
//! defined in [`ports`] and report through [`events`], keeping every task
//! testable without real peripherals.

pub mod events;
pub mod ports;
