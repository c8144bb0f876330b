//! Command workflows for the factory CLI.
//!
//! Each command resolves configuration, wires the concrete generator and
//! validator, and delegates the real work to the library modules.
mod run;
mod show_config;
mod validate;

pub use run::run_factory;
pub use show_config::run_config;
pub use validate::run_validate;
