//! Scoped-resource disposal.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A resource with an explicit async teardown.
#[async_trait]
pub trait Disposable: Send + Sync {
    /// Release the resource.
    ///
    /// Must be idempotent; registries may dispose defensively.
    async fn dispose(&self);
}

/// Registry of scoped resources created during resolution.
///
/// Process services built for activated environments register here so their
/// subprocess plumbing is released when the owning scope ends. The registry
/// itself is cheap shared state; disposal happens on [`Self::dispose_all`].
#[derive(Default)]
pub struct DisposalRegistry {
    items: Mutex<Vec<Arc<dyn Disposable>>>,
}

impl DisposalRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource for later disposal.
    pub fn register(&self, item: Arc<dyn Disposable>) {
        self.items.lock().unwrap().push(item);
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispose and drop every registered resource, in registration order.
    pub async fn dispose_all(&self) {
        let drained: Vec<_> = {
            let mut items = self.items.lock().unwrap();
            items.drain(..).collect()
        };
        for item in drained {
            item.dispose().await;
        }
    }
}
