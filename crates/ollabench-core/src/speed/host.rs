//! Host snapshot stored next to benchmark results.

use sysinfo::System;

use crate::types::{now_timestamp, ComputerInfo};

/// Name of this machine, used as the results directory.
pub fn hostname() -> String {
    System::host_name()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "unknown-host".to_string())
}

/// Gather CPU, memory, and OS details for this machine.
pub fn collect_computer_info(service_version: Option<String>) -> ComputerInfo {
    let mut sys = System::new_all();
    sys.refresh_all();

    let cpu = sys
        .cpus()
        .first()
        .map(|c| c.brand().trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    ComputerInfo {
        timestamp: now_timestamp(),
        hostname: hostname(),
        cpu,
        cpu_cores: sys.cpus().len(),
        total_memory_bytes: sys.total_memory(),
        os: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        os_version: System::os_version().unwrap_or_default(),
        kernel_version: System::kernel_version().unwrap_or_default(),
        service_version,
    }
}
