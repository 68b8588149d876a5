//! Async side of the audit wizard.
//!
//! [`backend::AuditBackend`] describes the REST contract the wizard relies
//! on, [`http::HttpBackend`] implements it with [`reqwest`], and
//! [`wizard::WizardController`] drives an audit through its steps against
//! any backend. Uploads of printable forms live in [`upload`].

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod upload;
pub mod wizard;
