//! Configuration management for the SGC_USB backend
//!
//! Settings are resolved from three layers, later layers winning:
//!
//! - **Defaults**: [`SgcConfig::default`]
//! - **File**: an optional YAML, TOML or JSON file (`sgc.yaml` by default)
//! - **Environment**: variables named `SGC__<SECTION>__<KEY>`
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigValidator, SgcConfig};
//! use std::path::Path;
//!
//! let config = SgcConfig::load(Some(Path::new("sgc.yaml")))?;
//! config.validate()?;
//! println!("listening on {}", config.server.bind_address());
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod error;
pub mod settings;
pub mod validation;

pub use error::*;
pub use settings::*;
pub use validation::*;
