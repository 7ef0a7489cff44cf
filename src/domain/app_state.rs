use serde::{Deserialize, Serialize};

use super::{
    dates::DateStyle,
    fees::{compute, FeeBreakdown},
    form::CostForm,
    ledger::Ledger,
};
use crate::util::{
    config::AppConfig,
    persistence::{load_preferences, FileStore},
};

/// Settings the user can change; persisted beside the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub date_style: DateStyle,
}

/// Everything the UI works on: the form being edited, the saved history and
/// the user's preferences.
#[derive(Clone, Debug)]
pub struct AppState {
    pub form: CostForm,
    pub ledger: Ledger<FileStore>,
    pub preferences: Preferences,
}

impl AppState {
    /// Opens storage described by `config` and hydrates the ledger.
    pub fn open(config: &AppConfig) -> Self {
        let store = FileStore::new(config.data_dir.clone());
        let preferences = load_preferences(&store);
        let mut ledger = Ledger::new(store).with_date_style(preferences.date_style);
        ledger.load();

        Self {
            form: CostForm::default(),
            ledger,
            preferences,
        }
    }

    /// Live estimate for whatever is currently typed in the form.
    pub fn preview(&self) -> FeeBreakdown {
        compute(&self.form.to_inputs())
    }

    pub fn set_date_style(&mut self, date_style: DateStyle) {
        self.preferences.date_style = date_style;
        self.ledger.set_date_style(date_style);
    }
}
