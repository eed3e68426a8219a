//! Peripheral drivers, hardware initialisation, and task placement.

pub mod hw_init;
pub mod led_matrix;
pub mod rmt_serializer;
pub mod sprites;
pub mod task_pin;
pub mod watchdog;
