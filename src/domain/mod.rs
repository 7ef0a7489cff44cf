//! Fee calculation and the saved-estimate ledger live here.

pub mod app_state;
pub mod dates;
pub mod fees;
pub mod form;
pub mod ledger;

pub use app_state::AppState;
pub use dates::DateStyle;
pub use fees::{compute, FeeBreakdown, ProfitMargin};
pub use form::{parse_amount, CostField};
pub use ledger::{CalculationRecord, LedgerError};
