//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, authority construction, map dataset
//! loading and per-mode runtime setup that any front-end crate can reuse.
pub mod authority;
pub mod config;
pub mod dataset;
pub mod session;

pub use authority::{AuthorityFactory, HttpAuthorityFactory};
pub use config::{ApiConfig, BootstrapConfig, ChannelConfig, ConfigError, DatasetSource};
pub use dataset::DatasetLoader;
pub use session::SessionFactory;
