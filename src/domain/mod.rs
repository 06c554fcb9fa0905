//! Domain types for app-config.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Variable kinds** ([`VarKind`]) - the closed set of five storable types
//! - **Typed values** ([`Value`]) - what a declared variable holds at runtime
//! - **Error types** ([`AppConfigError`], [`CoercionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AppConfigError>`]:
//!
//! ```rust
//! use app_config::domain::{AppConfigError, Result};
//!
//! fn example() -> Result<()> {
//!     let declaration = app_config::config::load_declaration("app-config.toml")?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod errors;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::{AppConfigError, CoercionError};
pub use result::Result;
pub use value::{Value, VarKind};
