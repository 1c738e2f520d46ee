//! Kernel utilities shared by every consumer of the toolchain configuration.
//! Keep this crate lightweight: loading, the error type, and opt-in checks.
//!
//! ## Config loading
//! ```rust
//! use forge_kernel::config::{FileFormat, load_config_str};
//! use forge_kernel::config::validation::require_profile_set;
//! use forge_kernel::domain::config::ForgeConfig;
//!
//! let cfg: ForgeConfig = load_config_str(
//!     r#"
//!     slicer = { location = "/opt/superslicer/superslicer" }
//!     print_server = { address = "192.168.1.93" }
//!     helper_tool = { location = "./platerbinary/plater_cli" }
//!
//!     [profile_sets]
//!     titanx = ["printer/K3.ini", "filament/TitanX.ini", "print/TitanX.ini"]
//!     "#,
//!     FileFormat::Toml,
//! )
//! .unwrap();
//!
//! let set = require_profile_set(&cfg, "titanx").unwrap();
//! assert_eq!(set.len(), 3);
//! ```
pub mod config;
pub mod error;

pub use error::{ConfigError, ConfigErrorExt};
pub use forge_domain as domain;
