pub mod ledger_service;
pub mod prediction_service;
pub mod reconcile_service;
pub mod stats_service;

pub use ledger_service::*;
pub use prediction_service::*;
pub use reconcile_service::*;
pub use stats_service::*;
