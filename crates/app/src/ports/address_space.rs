//! Address-space port: the remote view of the process image.
//!
//! An address space holds one variable per [`Tag`]. Remote clients read and
//! write those variables through the protocol server; the gateway reads and
//! writes them through this port. Access rights apply to remote clients
//! only: the gateway itself may write read-only tags.

use std::future::Future;

use greenhouse_domain::error::GreenhouseError;
use greenhouse_domain::tag::{Tag, TagValue};

/// Local access to the variables exposed to remote clients.
pub trait AddressSpace: Send + Sync {
    /// Publish a new value for a tag.
    fn write(
        &self,
        tag: Tag,
        value: TagValue,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send;

    /// Read the current value of a tag, including values written remotely.
    fn read(&self, tag: Tag) -> impl Future<Output = Result<TagValue, GreenhouseError>> + Send;
}

impl<T: AddressSpace> AddressSpace for std::sync::Arc<T> {
    fn write(
        &self,
        tag: Tag,
        value: TagValue,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
        (**self).write(tag, value)
    }

    fn read(&self, tag: Tag) -> impl Future<Output = Result<TagValue, GreenhouseError>> + Send {
        (**self).read(tag)
    }
}
