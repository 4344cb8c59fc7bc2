pub mod app_config;
pub mod config;
pub mod error;
pub mod filter;
pub mod records;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ValidationError};
pub use filter::{filter, CategoryFilter};
pub use records::{
    parse_collection, Category, ContactRecord, Coordinates, LocationRecord, Record, SafeSpot,
    TipRecord,
};
