//! Test helpers for integration tests
//!
//! Provides a fully wired application over in-memory repositories, with an
//! event recorder attached to the dispatcher.

use std::sync::Arc;

use anyhow::Result;
use instalike_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use instalike_core::{DomainEvent, Snowflake};
use instalike_service::dto::RegisterUserRequest;
use instalike_service::events::{EventHandler, EventRecorder};
use instalike_service::{
    in_memory_context, AccountService, NotificationService, PostService, ServiceContext,
    ServiceError, SocialService,
};

use crate::fixtures::registration;

/// Application instance for one test
pub struct TestApp {
    pub ctx: ServiceContext,
    pub recorder: Arc<EventRecorder>,
}

impl TestApp {
    /// Start with the default configuration
    pub fn start() -> Self {
        Self::start_with_config(test_config())
    }

    /// Start with a custom config
    pub fn start_with_config(config: AppConfig) -> Self {
        // Several tests share the process; only the first init wins
        try_init_tracing_with_config(&TracingConfig::from_logging(&config.logging)).ok();

        let recorder = Arc::new(EventRecorder::new());
        let ctx = in_memory_context(config, vec![recorder.clone() as Arc<dyn EventHandler>]);

        Self { ctx, recorder }
    }

    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(&self.ctx)
    }

    pub fn social(&self) -> SocialService<'_> {
        SocialService::new(&self.ctx)
    }

    pub fn posts(&self) -> PostService<'_> {
        PostService::new(&self.ctx)
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService::new(&self.ctx)
    }

    /// Register `nickname` with the fixture password
    pub async fn register(&self, nickname: &str) -> Result<Snowflake> {
        self.register_with(registration(nickname)).await
    }

    pub async fn register_with(&self, request: RegisterUserRequest) -> Result<Snowflake> {
        Ok(self.accounts().register(request).await?)
    }

    /// Recorded events, oldest first
    pub async fn events(&self) -> Vec<DomainEvent> {
        self.recorder.events().await
    }

    pub async fn event_types(&self) -> Vec<&'static str> {
        self.recorder.event_types().await
    }
}

/// Create a test configuration
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.site.base_url = "https://insta.test".to_string();
    config.logging.level = "warn".to_string();
    config
}

/// Assert that a failed call maps to `expected_status`
pub fn assert_status<T: std::fmt::Debug>(
    result: Result<T, ServiceError>,
    expected_status: u16,
) -> Result<ServiceError> {
    match result {
        Ok(value) => anyhow::bail!("Expected status {expected_status}, got success: {value:?}"),
        Err(err) if err.status_code() == expected_status => Ok(err),
        Err(err) => anyhow::bail!(
            "Expected status {}, got {}. Error: {}",
            expected_status,
            err.status_code(),
            err
        ),
    }
}
