//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a subsystem against
//! mock I/O. All tests run on the host (x86_64) with no real hardware
//! required.

mod burst_pipeline_tests;
mod mock_io;
mod selector_flow_tests;
