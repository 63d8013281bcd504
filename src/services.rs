pub mod access_policy;
pub mod auth_service;
pub mod ledger_service;
pub mod report_service;
