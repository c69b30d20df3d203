//! Event dispatcher

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use instalike_core::DomainEvent;
use tracing::{debug, error, instrument};

use crate::services::ServiceResult;

/// Reaction to domain events
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Handle one event; events the handler does not care about return `Ok`
    async fn handle(&self, event: &DomainEvent) -> ServiceResult<()>;
}

/// Ordered fan-out of domain events to handlers
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler; handlers run in the order they were added
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver `event` to every handler
    ///
    /// Stops at the first failing handler and returns its error.
    #[instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn dispatch(&self, event: &DomainEvent) -> ServiceResult<()> {
        debug!(handlers = self.handlers.len(), "Dispatching domain event");

        for handler in &self.handlers {
            if let Err(e) = handler.handle(event).await {
                error!(
                    handler = handler.name(),
                    error = %e,
                    "Event handler failed"
                );
                return Err(e);
            }
        }

        Ok(())
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        f.debug_struct("EventDispatcher")
            .field("handlers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use instalike_core::events::UserLoggedOutEvent;
    use instalike_core::{Nickname, Snowflake};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn handle(&self, _event: &DomainEvent) -> ServiceResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn handle(&self, _event: &DomainEvent) -> ServiceResult<()> {
            Err(ServiceError::internal("handler exploded"))
        }
    }

    fn logout_event() -> DomainEvent {
        DomainEvent::UserLoggedOut(UserLoggedOutEvent::new(
            Snowflake::new(1),
            Nickname::create("user1").unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_dispatch_reaches_every_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = EventDispatcher::new()
            .with_handler(Arc::new(CountingHandler {
                calls: calls.clone(),
            }))
            .with_handler(Arc::new(CountingHandler {
                calls: calls.clone(),
            }));

        dispatcher.dispatch(&logout_event()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(dispatcher.handler_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_stops_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = EventDispatcher::new()
            .with_handler(Arc::new(FailingHandler))
            .with_handler(Arc::new(CountingHandler {
                calls: calls.clone(),
            }));

        let err = dispatcher.dispatch(&logout_event()).await.unwrap_err();

        assert!(err.to_string().contains("handler exploded"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_dispatcher_is_noop() {
        assert!(EventDispatcher::default()
            .dispatch(&logout_event())
            .await
            .is_ok());
    }
}
