//! Shared server state: one persistent sysinfo handle plus the settings.

use std::sync::Arc;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tokio::sync::Mutex;

use crate::config::Settings;

pub type SharedSystem = Arc<Mutex<System>>;

#[derive(Clone)]
pub struct AppState {
    pub sys: SharedSystem,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        // CPU usage needs a baseline refresh; the first request after start
        // then reads a meaningful delta.
        let refresh = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());
        let sys = System::new_with_specifics(refresh);

        Self {
            sys: Arc::new(Mutex::new(sys)),
            settings: Arc::new(settings),
        }
    }
}
