use crate::config::AppConfig;
use crate::users::store::{MemoryStore, UserStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(MemoryStore::new()) as Arc<dyn UserStore>;

        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(MemoryStore::new()),
            Arc::new(AppConfig {
                host: "127.0.0.1".into(),
                port: 0,
            }),
        )
    }
}
