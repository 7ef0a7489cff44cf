use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ListingProfitCalculator";
const APP_NAME: &str = "ListingProfitCalculator";

/// Overrides where calculations and preferences are stored.
pub const DATA_DIR_ENV: &str = "PROFIT_CALCULATOR_DATA_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` when no storage directory could be resolved; saving then fails
    /// with a persistence error instead of silently dropping data.
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_dir = resolve_data_dir(env::var_os(DATA_DIR_ENV).map(PathBuf::from));
        match &data_dir {
            Some(dir) => tracing::info!(dir = %dir.display(), "using data directory"),
            None => tracing::warn!("no data directory available; saves will fail"),
        }
        Self { data_dir }
    }
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| {
            ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let dir = PathBuf::from("/tmp/profit-calculator");
        assert_eq!(resolve_data_dir(Some(dir.clone())), Some(dir));
    }

    #[test]
    fn empty_override_is_ignored() {
        let resolved = resolve_data_dir(Some(PathBuf::new()));
        assert_ne!(resolved, Some(PathBuf::new()));
    }
}
