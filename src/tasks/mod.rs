//! Station tasks.
//!
//! Six never-terminating loops, created once at boot:
//!
//! ```text
//!  APP core                               PRO core
//! ┌─────────────────────────────┐        ┌──────────────────────────────┐
//! │ distributor  pri 7          │        │ matrix      pri 5  200 ms    │
//! │ acquisition  pri 6  100 ms  │        │ display     pri 4  250 ms    │
//! └─────────────────────────────┘        │ alarm       pri 4  10 ms +   │
//!                                        │ indicators  pri 4  100 ms    │
//!                                        └──────────────────────────────┘
//! ```
//!
//! Every task exposes a `step()` that performs one iteration and returns
//! how long to sleep, plus a `run()` that loops forever.  Tests drive
//! `step()` directly.

pub mod acquisition;
pub mod alarm;
pub mod display;
pub mod distributor;
pub mod indicator;
pub mod matrix;

use crate::drivers::task_pin::{Core, TaskSpec};

pub const DISTRIBUTOR_TASK: TaskSpec = TaskSpec {
    name: "distrib\0",
    core: Core::App,
    priority: 7,
    stack_kb: 4,
};

pub const ACQUISITION_TASK: TaskSpec = TaskSpec {
    name: "acquire\0",
    core: Core::App,
    priority: 6,
    stack_kb: 4,
};

pub const MATRIX_TASK: TaskSpec = TaskSpec {
    name: "matrix\0",
    core: Core::Pro,
    priority: 5,
    stack_kb: 4,
};

pub const DISPLAY_TASK: TaskSpec = TaskSpec {
    name: "display\0",
    core: Core::Pro,
    priority: 4,
    stack_kb: 6,
};

pub const ALARM_TASK: TaskSpec = TaskSpec {
    name: "alarm\0",
    core: Core::Pro,
    priority: 4,
    stack_kb: 4,
};

pub const INDICATOR_TASK: TaskSpec = TaskSpec {
    name: "leds\0",
    core: Core::Pro,
    priority: 4,
    stack_kb: 4,
};

/// Every task in spawn order.
pub const STATION_TASKS: [TaskSpec; 6] = [
    DISTRIBUTOR_TASK,
    ACQUISITION_TASK,
    MATRIX_TASK,
    DISPLAY_TASK,
    ALARM_TASK,
    INDICATOR_TASK,
];
