//! Configuration shared by the formatter and runtime functions.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Widest indentation step accepted by `validate`.
pub const MAX_TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrConfig {
    /// Columns of indentation per nesting level in canonical output.
    pub tab_width: usize,

    /// Upper bound on memoized record shapes held by `nest_dotted`.
    /// `None` keeps every shape for the lifetime of the function.
    pub nest_dotted_cache_limit: Option<usize>,
}

impl Default for IrConfig {
    fn default() -> Self {
        Self {
            tab_width: 2,
            nest_dotted_cache_limit: None,
        }
    }
}

impl IrConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `FLOWIR_TAB_WIDTH`: indentation columns per nesting level
    /// - `FLOWIR_NEST_DOTTED_CACHE_LIMIT`: max memoized record shapes
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("FLOWIR_TAB_WIDTH") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.tab_width = v;
            }
        }

        if let Ok(s) = std::env::var("FLOWIR_NEST_DOTTED_CACHE_LIMIT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.nest_dotted_cache_limit = Some(v);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 || self.tab_width > MAX_TAB_WIDTH {
            return Err(Error::Config(format!(
                "tab width must be between 1 and {}, got {}",
                MAX_TAB_WIDTH, self.tab_width
            )));
        }
        if self.nest_dotted_cache_limit == Some(0) {
            return Err(Error::Config(
                "nest_dotted cache limit must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = IrConfig::default();
        assert_eq!(cfg.tab_width, 2);
        assert!(cfg.nest_dotted_cache_limit.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_tab_width() {
        let cfg = IrConfig {
            tab_width: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));

        let cfg = IrConfig {
            tab_width: 12,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_cache_limit() {
        let cfg = IrConfig {
            nest_dotted_cache_limit: Some(0),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: IrConfig = serde_yaml::from_str("tab_width: 4").unwrap();
        assert_eq!(cfg.tab_width, 4);
        assert!(cfg.nest_dotted_cache_limit.is_none());
    }
}
