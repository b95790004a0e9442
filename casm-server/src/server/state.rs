use std::sync::Arc;

use tokio::sync::Mutex;

use crate::identity::VisitorId;
use crate::usage::{JsonFileUsageStore, UsageStore};
use crate::{Config, Result};

/// Shared application state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    usage: Arc<dyn UsageStore>,
    /// Held across the check-then-increment of a compile admission.
    admission: Mutex<()>,
}

/// Whether a visitor may run another compile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Admitted; this is the visitor's `n`th compile.
    Admitted(u64),
    /// The visitor has already used every free compile.
    LimitReached,
}

impl AppState {
    pub fn new(config: Config, usage: Arc<dyn UsageStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                usage,
                admission: Mutex::new(()),
            }),
        }
    }

    /// State backed by the JSON ledger at `config.usage_file`, created if missing.
    pub fn with_json_ledger(config: Config) -> Result<Self> {
        let usage = JsonFileUsageStore::open(&config.usage_file)?;
        Ok(Self::new(config, Arc::new(usage)))
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn usage(&self) -> &dyn UsageStore {
        self.inner.usage.as_ref()
    }

    /// Count one compile against `visitor`, unless they have reached the free limit.
    pub async fn admit(&self, visitor: &VisitorId) -> Result<Admission> {
        let _guard = self.inner.admission.lock().await;

        let count = self.usage().count(visitor.as_str())?;
        if count >= self.config().free_compile_limit {
            return Ok(Admission::LimitReached);
        }

        let count = self.usage().increment(visitor.as_str())?;
        Ok(Admission::Admitted(count))
    }
}
