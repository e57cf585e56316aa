// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery handlers for queued actions.
//!
//! A handler wraps a single backend call. The queue treats handlers as
//! opaque: it hands over the payload exactly as enqueued and only
//! looks at success or failure.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Errors from a delivery attempt
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("delivery failed: {0}")]
    Failed(String),
    #[error("delivery timed out")]
    TimedOut,
}

/// Delivers one queued action's payload to the backend
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn deliver(&self, payload: &Value) -> Result<(), HandlerError>;
}

/// Maps action kinds to delivery handlers.
///
/// The integration layer supplies a registry on every processing pass;
/// the queue never stores one.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an action kind, replacing any previous one
    pub fn register(&mut self, kind: impl Into<String>, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(kind.into(), handler);
    }

    /// Register an async closure as the handler for an action kind
    pub fn register_fn<F, Fut>(&mut self, kind: impl Into<String>, f: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        self.register(kind, Arc::new(FnHandler(f)));
    }

    pub fn get(&self, kind: &str) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> ActionHandler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn deliver(&self, payload: &Value) -> Result<(), HandlerError> {
        (self.0)(payload.clone()).await
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
