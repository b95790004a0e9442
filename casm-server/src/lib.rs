//! # casm-server
//!
//! The web playground around [`casm_rs`]: a visitor pastes CASM, `/compile` validates it and
//! returns a numbered listing, `/normalize` rewrites it, and `/emit` echoes an emission trace.
//!
//! Compiles are metered per visitor. Each visitor is identified by an anonymous cookie and their
//! compile count lives in a [`UsageStore`]; once it reaches the configured free limit, further
//! compiles are refused without running the validator.
//!
//! ```rust,ignore
//! use casm_server::{server::{self, AppState}, Config};
//!
//! let state = AppState::with_json_ledger(Config::from_env()?)?;
//! server::run(state).await?;
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod server;
pub mod types;
pub mod usage;

pub use config::Config;
pub use error::{Error, Result};
pub use usage::{InMemoryUsageStore, JsonFileUsageStore, UsageStore};
