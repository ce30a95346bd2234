pub mod app_config;
pub mod config;
pub mod error;
pub mod queries;
pub mod regions;

pub use app_config::AppConfig;
pub use config::load_app_config_from_env;
pub use error::ConfigError;
pub use queries::{generate_queries, Query, QueryOptions};
pub use regions::{builtin_region, builtin_regions, load_region, Language, RegionDefinition};
