//! Container options.
//!
//! Options tune the resolution guard rails only; they never change which
//! object a registration produces.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Default maximum nesting of `resolve`/`make` frames.
///
/// Resolution recurses on the calling thread's stack. This limit keeps a
/// full-depth chain well inside a 2 MiB thread stack in debug builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Environment variable overriding [`ContainerOptions::max_depth`].
pub const ENV_MAX_DEPTH: &str = "AUTOWIRE_MAX_DEPTH";
/// Environment variable overriding [`ContainerOptions::detect_cycles`].
pub const ENV_DETECT_CYCLES: &str = "AUTOWIRE_DETECT_CYCLES";

/// Tunables for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```
/// use autowire::{Container, ContainerOptions, TypeCatalog};
///
/// let options = ContainerOptions::default().with_max_depth(64);
/// let container = Container::with_options(TypeCatalog::new(), options);
/// assert_eq!(container.options().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Maximum number of nested resolution frames before `DepthExceeded`
    pub max_depth: usize,
    /// Report re-entrant resolution as `Circular` instead of recursing until
    /// the depth limit
    pub detect_cycles: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            detect_cycles: true,
        }
    }
}

impl ContainerOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_detection(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self
    }

    /// Defaults overlaid with `AUTOWIRE_*` environment variables.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(raw) = env::var(ENV_MAX_DEPTH) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => options.max_depth = depth,
                _ => tracing::warn!(target: "autowire", var = ENV_MAX_DEPTH, value = %raw, "ignoring invalid value"),
            }
        }

        if let Ok(raw) = env::var(ENV_DETECT_CYCLES) {
            match parse_flag(&raw) {
                Some(flag) => options.detect_cycles = flag,
                None => tracing::warn!(target: "autowire", var = ENV_DETECT_CYCLES, value = %raw, "ignoring invalid value"),
            }
        }

        options
    }

    /// Parses options from JSON; missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
