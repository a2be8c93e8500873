// Remède dictionary query engine
//
// Word lookup, prefix autocomplete/search, word-of-the-day rotation and
// startup schema validation over static SQLite word datasets.

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod dictionary;
pub mod normalize;
pub mod query;
pub mod registry;
pub mod turso;
pub mod validation;
pub mod word_of_day;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use config::ServiceConfig;
pub use query::{QueryError, QueryService};
pub use registry::DatasetRegistry;

/// Install the logger. Level comes from `RUST_LOG`, else debug/info by build type.
pub fn init_logging() {
    let default_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .try_init();
}

/// Open every dataset, validate it and return the ready service.
///
/// Blocks until validation is complete; nothing should be served before.
pub async fn start(config: &ServiceConfig) -> QueryService {
    info!("Starting Remède query engine {}", query::VERSION);
    let registry = Arc::new(DatasetRegistry::build(config).await);
    let service = QueryService::new(registry);
    if service.is_healthy() {
        info!("Query engine ready");
    } else {
        warn!("Primary dataset is missing or empty, service is not healthy");
    }
    service
}

/// Application entry point: start the engine and print its info payload.
/// Note: HTTP routing lives outside this crate.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn run() {
    init_logging();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    let service = runtime.block_on(start(&config));
    match serde_json::to_string_pretty(&service.info()) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize service info: {}", e),
    }

    if !service.is_healthy() {
        std::process::exit(2);
    }
}
