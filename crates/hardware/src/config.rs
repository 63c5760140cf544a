//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation. It provides:
//! 1. **Defaults:** Baseline settings (no per-cycle tracing, all policies, sequential runs).
//! 2. **Structures:** Hierarchical config for general and pipeline settings.
//!
//! Configuration is supplied as JSON via `--config`, or `Config::default()` is used.

use serde::Deserialize;

use crate::core::pipeline::engine::PipelineKind;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::core::pipeline::engine::PipelineKind;

    /// Per-cycle occupancy tracing is off unless requested.
    pub const TRACE_CYCLES: bool = false;

    /// Policies run, in reporting order, when none are configured.
    pub const POLICIES: [PipelineKind; 3] = PipelineKind::ALL;

    /// Policies run one after another unless parallel execution is requested.
    pub const PARALLEL: bool = false;
}

/// Root configuration object.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
/// use pipesim_core::core::pipeline::PipelineKind;
///
/// let json = r#"{
///     "general": { "trace_cycles": true },
///     "pipeline": { "policies": ["STALL", "Forwarding"], "parallel": true }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace_cycles);
/// assert_eq!(
///     config.pipeline.selected(),
///     vec![PipelineKind::Stall, PipelineKind::Forwarding]
/// );
/// assert!(config.pipeline.parallel);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline policy selection
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit stage occupancy every cycle at trace level.
    #[serde(default = "GeneralConfig::default_trace_cycles")]
    pub trace_cycles: bool,
}

impl GeneralConfig {
    fn default_trace_cycles() -> bool {
        defaults::TRACE_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_cycles: defaults::TRACE_CYCLES,
        }
    }
}

/// Which pipeline policies to run and how.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    /// Policies to run; empty means all of them.
    #[serde(default = "PipelineConfig::default_policies")]
    pub policies: Vec<PipelineKind>,

    /// Run each policy on its own thread.
    #[serde(default = "PipelineConfig::default_parallel")]
    pub parallel: bool,
}

impl PipelineConfig {
    fn default_policies() -> Vec<PipelineKind> {
        defaults::POLICIES.to_vec()
    }

    fn default_parallel() -> bool {
        defaults::PARALLEL
    }

    /// Policies to run in order, duplicates removed.
    ///
    /// An empty list selects every policy.
    pub fn selected(&self) -> Vec<PipelineKind> {
        if self.policies.is_empty() {
            return defaults::POLICIES.to_vec();
        }
        let mut out: Vec<PipelineKind> = Vec::with_capacity(self.policies.len());
        for &kind in &self.policies {
            if !out.contains(&kind) {
                out.push(kind);
            }
        }
        out
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            policies: Self::default_policies(),
            parallel: defaults::PARALLEL,
        }
    }
}
