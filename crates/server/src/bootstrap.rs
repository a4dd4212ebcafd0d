use std::sync::Arc;

use repdash_agent::AiGateway;
use repdash_core::config::{AppConfig, ConfigError, LoadOptions};
use repdash_data::SalesDataStore;
use thiserror::Error;
use tracing::info;

use crate::api::AppState;

pub struct Application {
    pub config: AppConfig,
    pub store: Arc<SalesDataStore>,
    pub gateway: Arc<AiGateway>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    Ok(bootstrap_with_config(config))
}

/// Assemble the application from an already-validated config. Nothing here
/// can fail: a bad dataset file degrades to an empty store, and incomplete
/// AI settings are reported per request.
pub fn bootstrap_with_config(config: AppConfig) -> Application {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let store = Arc::new(SalesDataStore::load(&config.data.path));
    info!(
        event_name = "system.bootstrap.dataset_loaded",
        path = %config.data.path.display(),
        reps_loaded = store.len(),
        "sales dataset loaded"
    );

    let gateway = Arc::new(AiGateway::new(config.ai.clone()));

    Application { config, store, gateway }
}

impl Application {
    pub fn state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            gateway: self.gateway.clone(),
            environment: self.config.server.environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use repdash_core::config::{ConfigOverrides, Environment, LoadOptions};
    use tempfile::TempDir;

    use crate::bootstrap::bootstrap;

    fn options_with(overrides: ConfigOverrides) -> LoadOptions {
        LoadOptions { overrides, ..LoadOptions::default() }
    }

    #[test]
    fn bootstrap_tolerates_a_missing_dataset_file() {
        let app = bootstrap(options_with(ConfigOverrides {
            data_path: Some(PathBuf::from("/nonexistent/dummyData.json")),
            ..ConfigOverrides::default()
        }))
        .expect("bootstrap should succeed without a dataset");

        assert!(app.store.is_empty());
        assert_eq!(app.config.server.environment, Environment::Development);
    }

    #[test]
    fn bootstrap_starts_without_ai_settings() {
        let app = bootstrap(options_with(ConfigOverrides {
            data_path: Some(PathBuf::from("/nonexistent/dummyData.json")),
            ..ConfigOverrides::default()
        }))
        .expect("missing AI settings must not block startup");

        assert!(app.config.ai.api_key.is_none());
        assert!(app.config.ai.model.is_none());
    }

    #[test]
    fn bootstrap_loads_the_dataset_into_the_store() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("dummyData.json");
        fs::write(
            &path,
            r#"{
                "salesReps": [
                    {
                        "id": 1,
                        "name": "Alice",
                        "role": "Senior Sales Executive",
                        "region": "West",
                        "skills": [],
                        "deals": [],
                        "clients": []
                    }
                ]
            }"#,
        )
        .expect("dataset fixture should be writable");

        let app = bootstrap(options_with(ConfigOverrides {
            data_path: Some(path),
            ..ConfigOverrides::default()
        }))
        .expect("bootstrap should succeed with a dataset");

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.state().store.all()[0].name, "Alice");
    }

    #[test]
    fn bootstrap_fails_fast_on_invalid_config() {
        let result = bootstrap(options_with(ConfigOverrides {
            allowed_origin: Some("not-a-url".to_string()),
            ..ConfigOverrides::default()
        }));

        assert!(result.is_err());
        let message = result.err().expect("error").to_string();
        assert!(message.contains("cors.allowed_origin"));
    }
}
