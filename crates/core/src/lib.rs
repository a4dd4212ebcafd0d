pub mod config;
pub mod context;
pub mod domain;

pub use config::{
    AiConfig, AppConfig, ConfigError, ConfigOverrides, Environment, LoadOptions, LogFormat,
};
pub use context::AiContext;
pub use domain::rep::{Client, Deal, DealStatus, RepId, SalesRep};
