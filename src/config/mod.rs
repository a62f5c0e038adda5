//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! RpcOptions (code or TOML file via loader.rs)
//! EnvSnapshot (env.rs, captured once by the caller)
//!     → loader.rs (precedence: option > environment > default)
//!     → validation.rs (URL scheme checks, list filtering)
//!     → headers.rs (JSON object or k=v pairs)
//!     → ClientConfiguration (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Resolution is a pure function of options and snapshot
//! - Every option is optional; defaults live in schema.rs
//! - A list of URLs tolerates bad entries, a single URL does not

pub mod env;
pub mod headers;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::EnvSnapshot;
pub use headers::parse_headers;
pub use loader::{load_config, load_options_file};
pub use schema::{ClientConfiguration, RpcOptions, RpcPolicy, UrlSource};
pub use validation::{is_valid_url, parse_url_list, parse_urls, validate_network_config, validate_url};
