//! Command implementations.

pub mod config;
pub mod model;
pub mod run;

pub use self::config::execute_config;
pub use self::model::execute_model;
pub use self::run::execute_run;
