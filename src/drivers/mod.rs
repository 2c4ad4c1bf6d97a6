//! Hardware initialisation and task placement helpers.

pub mod hw_init;
pub mod task_pin;
