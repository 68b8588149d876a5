//! Domain core for the school plastic-waste audit.
//!
//! Pure logic only: the audit data model, the static room/item catalog,
//! metric derivation, legacy room-selection inference, step validation,
//! the wizard state machine, reduction promises and upload checks. All
//! network access lives in `ecoaudit-client`.

pub mod audit;
pub mod catalog;
pub mod count;
pub mod error;
pub mod metrics;
pub mod promise;
pub mod school;
pub mod selection;
pub mod status;
pub mod types;
pub mod upload;
pub mod validation;
pub mod wizard;
