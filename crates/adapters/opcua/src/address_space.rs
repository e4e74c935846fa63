//! [`AddressSpace`] port backed by the OPC UA server's address space.

use std::future::Future;
use std::sync::Arc;

use greenhouse_app::ports::AddressSpace;
use greenhouse_domain::error::GreenhouseError;
use greenhouse_domain::process_image::ProcessImage;
use greenhouse_domain::tag::{Tag, TagValue};
use opcua::server::prelude::{
    self as ua, DateTime, NodeType, NumericRange, QualifiedName, TimestampsToReturn,
};
use opcua::sync::RwLock;

use crate::config::OpcUaConfig;
use crate::error::OpcUaError;
use crate::nodes;

/// Handle on the greenhouse variables of a running (or not yet started)
/// OPC UA server. Cheap to clone.
#[derive(Clone)]
pub struct OpcUaAddressSpace {
    space: Arc<RwLock<ua::AddressSpace>>,
    namespace: u16,
}

impl OpcUaAddressSpace {
    /// Register the namespace and create every variable, seeded from `image`.
    ///
    /// # Errors
    ///
    /// Returns [`OpcUaError::Namespace`] or [`OpcUaError::NodeCreation`]
    /// when the address space rejects the layout.
    pub fn install(
        space: Arc<RwLock<ua::AddressSpace>>,
        config: &OpcUaConfig,
        image: &ProcessImage,
    ) -> Result<Self, OpcUaError> {
        let namespace = {
            let mut guard = space.write();
            let namespace = guard
                .register_namespace(&config.namespace)
                .map_err(|()| OpcUaError::Namespace(config.namespace.clone()))?;
            nodes::populate(&mut guard, namespace, &config.object_name, image)?;
            namespace
        };
        tracing::debug!(namespace, uri = %config.namespace, "greenhouse variables created");
        Ok(Self { space, namespace })
    }

    fn write_value(&self, tag: Tag, value: TagValue) -> Result<(), OpcUaError> {
        let now = DateTime::now();
        let updated = self.space.write().set_variable_value(
            nodes::node_id(self.namespace, tag),
            nodes::to_variant(value),
            &now,
            &now,
        );
        if updated {
            Ok(())
        } else {
            Err(OpcUaError::UnknownNode(tag.name()))
        }
    }

    fn read_value(&self, tag: Tag) -> Result<TagValue, OpcUaError> {
        let space = self.space.read();
        let Some(NodeType::Variable(variable)) = space.find_node(&nodes::node_id(self.namespace, tag))
        else {
            return Err(OpcUaError::UnknownNode(tag.name()));
        };
        let data = variable.value(
            TimestampsToReturn::Neither,
            NumericRange::None,
            &QualifiedName::null(),
            0.0,
        );
        match data.value {
            None => Ok(TagValue::Empty),
            Some(variant) => {
                nodes::from_variant(&variant).ok_or_else(|| OpcUaError::UnsupportedValue(tag.name()))
            }
        }
    }
}

impl AddressSpace for OpcUaAddressSpace {
    fn write(
        &self,
        tag: Tag,
        value: TagValue,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
        let result = self.write_value(tag, value).map_err(OpcUaError::into_domain);
        async move { result }
    }

    fn read(&self, tag: Tag) -> impl Future<Output = Result<TagValue, GreenhouseError>> + Send {
        let result = self.read_value(tag).map_err(OpcUaError::into_domain);
        async move { result }
    }
}
