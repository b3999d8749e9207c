//! mdex: terminal admin for a catalog of mechanical keyboard switches
//! stored in a Firebase Realtime Database.
//!
//! - [`store`] - Data-access contract and its Firebase/in-memory backends
//! - [`controller`] - CRUD controller holding selection and snapshot
//! - [`app`], [`event`], [`ui`] - Terminal front end

pub mod app;
pub mod config;
pub mod controller;
pub mod event;
pub mod model;
pub mod notification;
pub mod sample;
pub mod store;
pub mod ui;

/// Version injected at compile time via MDEX_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("MDEX_VERSION") {
    Some(v) => v,
    None => "dev",
};
