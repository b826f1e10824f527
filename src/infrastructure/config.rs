//! Runtime configuration read from `EVENUP_*` environment variables.

pub const DEFAULT_AVATAR_BASE: &str = "https://i.pravatar.cc/48";
pub const DEFAULT_CURRENCY: &str = "$";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON file with the initial contacts (`EVENUP_SEED`)
    pub seed_path: Option<String>,
    /// Avatar URL prefilled in the add form (`EVENUP_AVATAR_BASE`)
    pub avatar_base: String,
    /// Log file; no logging without one (`EVENUP_LOG`)
    pub log_path: Option<String>,
    /// Shown after every amount (`EVENUP_CURRENCY`)
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_path: None,
            avatar_base: DEFAULT_AVATAR_BASE.to_string(),
            log_path: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            seed_path: get("EVENUP_SEED"),
            avatar_base: get("EVENUP_AVATAR_BASE").unwrap_or(defaults.avatar_base),
            log_path: get("EVENUP_LOG"),
            currency: get("EVENUP_CURRENCY").unwrap_or(defaults.currency),
        }
    }
}
