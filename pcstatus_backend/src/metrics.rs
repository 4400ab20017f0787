//! Host metrics via sysinfo: instantaneous CPU percent and memory snapshots.

use async_trait::async_trait;

use crate::state::AppState;

const MIB: u64 = 1024 * 1024;

/// Raw virtual-memory reading, in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySnapshot {
    pub percent: f32,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemorySnapshot {
    pub fn used_mb(&self) -> u64 {
        self.used_bytes / MIB
    }

    pub fn total_mb(&self) -> u64 {
        self.total_bytes / MIB
    }
}

/// Source of memory snapshots for a stream session. Production reads
/// sysinfo through `AppState`; tests substitute a fixed probe.
#[async_trait]
pub trait MemoryProbe: Send + Sync {
    async fn memory(&self) -> MemorySnapshot;
}

#[async_trait]
impl MemoryProbe for AppState {
    async fn memory(&self) -> MemorySnapshot {
        let mut sys = self.sys.lock().await;
        sys.refresh_memory();
        let total = sys.total_memory();
        // "used" as the dashboard understands it: total minus reclaimable.
        let used = total.saturating_sub(sys.available_memory());
        let percent = if total == 0 {
            0.0
        } else {
            (used as f64 / total as f64 * 100.0) as f32
        };
        MemorySnapshot {
            percent,
            used_bytes: used,
            total_bytes: total,
        }
    }
}

/// Instantaneous global CPU usage in [0, 100]. Non-averaged: consecutive
/// calls may read the same OS-level value.
pub async fn cpu_percent(state: &AppState) -> f32 {
    let mut sys = state.sys.lock().await;
    sys.refresh_cpu_usage();
    sys.global_cpu_usage().clamp(0.0, 100.0)
}
