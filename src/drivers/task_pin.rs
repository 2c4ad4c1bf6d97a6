//! Core-pinned task spawning for the ESP32 dual-core.
//!
//! Wraps `esp_pthread_set_cfg()` so that `std::thread::spawn` creates a
//! FreeRTOS task pinned to a specific CPU core with explicit priority and
//! stack size. On non-ESP targets, falls back to plain thread spawn.
//!
//! `esp_pthread_set_cfg()` sets configuration that applies to the *next*
//! `pthread_create()` from the calling thread, so the config+spawn pair must
//! not be interleaved with other thread creation on the same thread. All
//! spawning here happens from `main()` during boot, which satisfies that.

/// CPU core identifiers for the ESP32 Xtensa LX6 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU): radio and protocol stacks live here.
    Pro = 0,
    /// Core 1 (APP_CPU): application logic, including the acceptor engine.
    App = 1,
}

/// Placement and sizing for a background task.
#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    /// FreeRTOS task name. Must be null-terminated (e.g. `"acceptor\0"`).
    pub name: &'static str,
    pub core: Core,
    /// FreeRTOS priority (idle = 0). Keep below the system tasks.
    pub priority: u8,
    pub stack_kb: usize,
}

/// Spawn a thread per `spec`.
///
/// On ESP-IDF the thread becomes a FreeRTOS task pinned to `spec.core`; on
/// the host, core and priority are ignored and only the stack size applies.
#[cfg(target_os = "espidf")]
pub fn spawn(spec: TaskSpec, f: impl FnOnce() + Send + 'static) -> std::thread::JoinHandle<()> {
    unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = spec.core as i32;
        cfg.prio = spec.priority as i32;
        cfg.stack_size = (spec.stack_kb * 1024) as i32;
        cfg.thread_name = spec.name.as_ptr() as *const _;
        let ret = esp_idf_sys::esp_pthread_set_cfg(&cfg);
        assert!(
            ret == esp_idf_sys::ESP_OK as i32,
            "esp_pthread_set_cfg failed: {ret}"
        );
    }

    let display_name = spec.name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        display_name,
        spec.core,
        spec.priority,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)
        .expect("task_pin::spawn: thread creation failed")
}

/// Simulation fallback that ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn(spec: TaskSpec, f: impl FnOnce() + Send + 'static) -> std::thread::JoinHandle<()> {
    let display_name = spec.name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (sim, no core pinning, stack={}KB)",
        display_name,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(spec.stack_kb * 1024)
        .spawn(f)
        .expect("task_pin::spawn(sim): thread creation failed")
}
