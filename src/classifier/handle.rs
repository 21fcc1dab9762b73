//! Shared classifier handle
//!
//! Loaded once at startup; request handlers fall back to loading it
//! themselves if startup did not. `OnceCell` guarantees a single
//! initializer runs even under concurrent first access.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::{Classifier, ClassifierError, NewsCategoryClassifier};

type Loader = dyn Fn() -> Result<Arc<dyn Classifier>, ClassifierError> + Send + Sync;

struct Inner {
    cell: OnceCell<Arc<dyn Classifier>>,
    loader: Box<Loader>,
}

#[derive(Clone)]
pub struct ClassifierHandle {
    inner: Arc<Inner>,
}

impl ClassifierHandle {
    /// Handle that runs `loader` on first use
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Classifier>, ClassifierError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                cell: OnceCell::new(),
                loader: Box::new(loader),
            }),
        }
    }

    /// Handle that loads a [`NewsCategoryClassifier`] artifact from `path`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(move || {
            let classifier = NewsCategoryClassifier::load(&path)?;
            Ok(Arc::new(classifier) as Arc<dyn Classifier>)
        })
    }

    /// Handle wrapping an already constructed classifier
    pub fn preloaded(classifier: Arc<dyn Classifier>) -> Self {
        let loader = {
            let classifier = classifier.clone();
            move || -> Result<Arc<dyn Classifier>, ClassifierError> { Ok(classifier.clone()) }
        };

        Self {
            inner: Arc::new(Inner {
                cell: OnceCell::with_value(classifier),
                loader: Box::new(loader),
            }),
        }
    }

    /// Eagerly load the classifier (startup path)
    pub fn init(&self) -> Result<(), ClassifierError> {
        self.get().map(|_| ())
    }

    /// Get the classifier, loading it if nothing has yet.
    ///
    /// Concurrent callers block until the single initializer finishes. A
    /// failed load leaves the handle empty so a later call may retry.
    pub fn get(&self) -> Result<Arc<dyn Classifier>, ClassifierError> {
        self.inner
            .cell
            .get_or_try_init(|| {
                tracing::debug!("Classifier not loaded yet, initializing");
                (self.inner.loader)()
            })
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.cell.get().is_some()
    }
}
