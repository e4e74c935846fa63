//! Shared process state: the single container every task reads and mutates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use greenhouse_domain::process_image::ProcessImage;

/// Cloneable handle over the live [`ProcessImage`].
///
/// Every access takes the one lock for the duration of a closure, so no
/// caller can hold it across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct ProcessState {
    inner: Arc<Mutex<ProcessImage>>,
}

impl ProcessState {
    #[must_use]
    pub fn new(image: ProcessImage) -> Self {
        Self {
            inner: Arc::new(Mutex::new(image)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProcessImage> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Point-in-time copy of the whole image.
    #[must_use]
    pub fn read(&self) -> ProcessImage {
        self.lock().clone()
    }

    /// Mutate the image atomically and return whatever the closure returns.
    pub fn update<R>(&self, mutator: impl FnOnce(&mut ProcessImage) -> R) -> R {
        mutator(&mut self.lock())
    }
}
