use std::sync::{Arc, Mutex};
use std::time::Instant;

use parole_config::HealthSettings;
use serde::Serialize;
use sysinfo::System;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("System under high load (memory {memory_percent:.1}%, cpu {cpu_percent:.1}%)")]
    Overloaded {
        memory_percent: f32,
        cpu_percent: f32,
    },
    #[error("Health check failed: {0}")]
    Probe(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceUsage {
    pub memory_percent: f32,
    pub cpu_percent: f32,
}

/// Source of host resource pressure readings.
pub trait ResourceProbe: Send + Sync + 'static {
    fn sample(&self) -> Result<ResourceUsage, HealthError>;
}

/// Reads memory and CPU usage from the host via `sysinfo`.
///
/// CPU usage is measured between consecutive samples, so the first reading after startup
/// is 0%.
pub struct SystemProbe {
    sys: Mutex<System>,
}

impl SystemProbe {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu();
        Self {
            sys: Mutex::new(sys),
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProbe for SystemProbe {
    fn sample(&self) -> Result<ResourceUsage, HealthError> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|_| HealthError::Probe("system probe poisoned".to_string()))?;
        sys.refresh_memory();
        sys.refresh_cpu();

        let total = sys.total_memory();
        let memory_percent = if total == 0 {
            0.0
        } else {
            (sys.used_memory() as f64 / total as f64 * 100.0) as f32
        };

        Ok(ResourceUsage {
            memory_percent,
            cpu_percent: sys.global_cpu_info().cpu_usage(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub stt: &'static str,
    pub tts: &'static str,
    pub llm: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: f64,
    pub response_time: f64,
    pub memory_usage: String,
    pub cpu_usage: String,
    pub services: ServiceStatus,
}

/// Compares host resource usage against fixed thresholds.
#[derive(Clone)]
pub struct HealthMonitor {
    probe: Arc<dyn ResourceProbe>,
    max_memory_percent: f32,
    max_cpu_percent: f32,
}

impl HealthMonitor {
    pub fn new(probe: Arc<dyn ResourceProbe>, settings: &HealthSettings) -> Self {
        Self {
            probe,
            max_memory_percent: settings.max_memory_percent,
            max_cpu_percent: settings.max_cpu_percent,
        }
    }

    pub fn check(&self) -> Result<HealthReport, HealthError> {
        let started = Instant::now();
        let usage = self.probe.sample()?;

        if usage.memory_percent > self.max_memory_percent || usage.cpu_percent > self.max_cpu_percent {
            return Err(HealthError::Overloaded {
                memory_percent: usage.memory_percent,
                cpu_percent: usage.cpu_percent,
            });
        }

        Ok(HealthReport {
            status: "healthy",
            timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
            response_time: started.elapsed().as_secs_f64(),
            memory_usage: format!("{:.1}%", usage.memory_percent),
            cpu_usage: format!("{:.1}%", usage.cpu_percent),
            services: ServiceStatus {
                stt: "operational",
                tts: "operational",
                llm: "operational",
            },
        })
    }
}

/// Probe returning a fixed reading.
pub struct StaticProbe(pub ResourceUsage);

impl ResourceProbe for StaticProbe {
    fn sample(&self) -> Result<ResourceUsage, HealthError> {
        Ok(self.0)
    }
}
