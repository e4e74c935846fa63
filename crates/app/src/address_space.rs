//! In-memory address space.
//!
//! Holds one value per tag behind a mutex and applies the same access rules
//! as the network server: remote writes to read-only tags are rejected.
//! Used in tests and when the gateway runs without the OPC UA server.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use greenhouse_domain::error::{GreenhouseError, ValidationError};
use greenhouse_domain::process_image::ProcessImage;
use greenhouse_domain::tag::{Tag, TagValue};

use crate::ports::AddressSpace;

pub struct InMemoryAddressSpace {
    values: Mutex<HashMap<Tag, TagValue>>,
}

impl InMemoryAddressSpace {
    /// Create the full tag set, seeded from `image`.
    #[must_use]
    pub fn new(image: &ProcessImage) -> Self {
        let values = Tag::catalogue()
            .into_iter()
            .map(|tag| (tag, image.tag_value(tag)))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Tag, TagValue>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write a tag the way a remote client would.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ReadOnlyTag`] when the tag is not writable
    /// by remote clients.
    pub fn remote_write(&self, tag: Tag, value: TagValue) -> Result<(), ValidationError> {
        if !tag.access().is_writable() {
            return Err(ValidationError::ReadOnlyTag(tag.name()));
        }
        self.lock().insert(tag, value);
        Ok(())
    }

    /// Read a tag the way a remote client would.
    #[must_use]
    pub fn remote_read(&self, tag: Tag) -> TagValue {
        self.lock().get(&tag).copied().unwrap_or(TagValue::Empty)
    }
}

impl AddressSpace for InMemoryAddressSpace {
    fn write(
        &self,
        tag: Tag,
        value: TagValue,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
        self.lock().insert(tag, value);
        async { Ok(()) }
    }

    fn read(&self, tag: Tag) -> impl Future<Output = Result<TagValue, GreenhouseError>> + Send {
        let value = self.remote_read(tag);
        async move { Ok(value) }
    }
}
