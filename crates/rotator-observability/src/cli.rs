//! Per-crate debug flag parsing
//!
//! Crate names come from a `--debug a,b` CLI option (`all` enables every known
//! crate) and from the `ROTATOR_DEBUG` environment variable.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (comma-separated, or `all`)
pub const DEBUG_ENV: &str = "ROTATOR_DEBUG";

/// Crates with debug logging enabled
///
/// # Example
/// ```rust
/// use rotator_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_crate_names(["rotator-api"]);
/// assert!(flags.is_enabled("rotator-api"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Build flags from bare crate names; `all` enables every known crate
    pub fn from_crate_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = CrateDebugFlags::default();
        for name in names {
            flags.enable(name.as_ref());
        }
        flags
    }

    /// Enable one crate (or all of them for `all`)
    pub fn enable(&mut self, crate_name: &str) {
        let crate_name = crate_name.trim();
        if crate_name.is_empty() {
            return;
        }
        if crate_name == "all" {
            for known in KNOWN_CRATES {
                self.enabled_crates.insert(known.to_string(), true);
            }
        } else {
            self.enabled_crates.insert(crate_name.to_string(), true);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Create a tracing filter from debug flags
    ///
    /// Returns a filter string usable with `EnvFilter`, e.g.
    /// `"rotator-api=debug,info"`, or just `default_level` if nothing is enabled.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        if self.enabled_crates.is_empty() {
            return default_level.to_string();
        }

        let mut crates: Vec<&String> = self.enabled_crates.keys().collect();
        crates.sort();

        let mut filters: Vec<String> = crates
            .into_iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Merge CLI-provided crate names with the `ROTATOR_DEBUG` environment variable
pub fn parse_debug_flags<I, S>(cli_crates: I) -> CrateDebugFlags
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = CrateDebugFlags::from_crate_names(cli_crates);

    if let Ok(env_var) = env::var(DEBUG_ENV) {
        for crate_name in env_var.split(',') {
            flags.enable(crate_name);
        }
    }

    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug all                    Enable debug logging for all crates
  --debug {{crate-name}}[,...]    Enable debug logging for specific crates

Available crates:
  {}

Environment Variable:
  {}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {}=all                           Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        DEBUG_ENV,
        DEBUG_ENV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_crate_names(["rotator-api"]);
        assert!(flags.is_enabled("rotator-api"));
        assert!(!flags.is_enabled("rotator-services"));
    }

    #[test]
    fn test_no_flags() {
        let flags = CrateDebugFlags::from_crate_names(Vec::<String>::new());
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_crate_names(["all"]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_crate_names() {
        let flags = CrateDebugFlags::from_crate_names(["rotator-services", " ", "rotator-bin"]);
        assert!(flags.is_enabled("rotator-services"));
        assert!(flags.is_enabled("rotator-bin"));
        assert_eq!(flags.enabled_crates.len(), 2);
    }

    #[test]
    fn test_binary_target_does_not_cover_library_crates() {
        // EnvFilter matches targets by prefix, so no known target may prefix another
        for a in KNOWN_CRATES {
            for b in KNOWN_CRATES {
                if a != b {
                    assert!(!b.starts_with(a), "{} is a prefix of {}", a, b);
                }
            }
        }
        let flags = CrateDebugFlags::from_crate_names(["rotator-bin"]);
        assert_eq!(flags.to_filter_string("info"), "rotator-bin=debug,info");
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_crate_names(["rotator-services", "rotator-api"]);
        assert_eq!(
            flags.to_filter_string("warn"),
            "rotator-api=debug,rotator-services=debug,warn"
        );
        assert_eq!(CrateDebugFlags::default().to_filter_string("info"), "info");
    }
}
