//! Node layout and value conversion between tags and OPC UA variables.

use greenhouse_domain::process_image::ProcessImage;
use greenhouse_domain::sensor::SensorChannel;
use greenhouse_domain::tag::{Tag, TagValue};
use opcua::server::prelude::{
    AddressSpace, DataTypeId, NodeId, ObjectBuilder, ObjectId, VariableBuilder, Variant,
};

use crate::error::OpcUaError;

/// String node id of a tag: its browse name in the greenhouse namespace.
pub(crate) fn node_id(namespace: u16, tag: Tag) -> NodeId {
    NodeId::new(namespace, tag.name())
}

fn data_type(tag: Tag) -> DataTypeId {
    match tag {
        Tag::Sensor(SensorChannel::LowLevel | SensorChannel::HighLevel) => DataTypeId::Boolean,
        Tag::Sensor(_) | Tag::Setpoint(_) => DataTypeId::Double,
        Tag::ActuatorState(_)
        | Tag::Command(..)
        | Tag::Feedback(..)
        | Tag::Alarm(..)
        | Tag::Mode(_) => DataTypeId::Boolean,
    }
}

pub(crate) fn to_variant(value: TagValue) -> Variant {
    match value {
        TagValue::Empty => Variant::Empty,
        TagValue::Boolean(b) => Variant::Boolean(b),
        TagValue::Double(v) => Variant::Double(v),
    }
}

/// Numeric variants are widened to `Double` so clients may write setpoints
/// with any numeric type.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn from_variant(variant: &Variant) -> Option<TagValue> {
    let value = match *variant {
        Variant::Empty => TagValue::Empty,
        Variant::Boolean(b) => TagValue::Boolean(b),
        Variant::Double(v) => TagValue::Double(v),
        Variant::Float(v) => TagValue::Double(f64::from(v)),
        Variant::SByte(v) => TagValue::Double(f64::from(v)),
        Variant::Byte(v) => TagValue::Double(f64::from(v)),
        Variant::Int16(v) => TagValue::Double(f64::from(v)),
        Variant::UInt16(v) => TagValue::Double(f64::from(v)),
        Variant::Int32(v) => TagValue::Double(f64::from(v)),
        Variant::UInt32(v) => TagValue::Double(f64::from(v)),
        Variant::Int64(v) => TagValue::Double(v as f64),
        Variant::UInt64(v) => TagValue::Double(v as f64),
        _ => return None,
    };
    Some(value)
}

/// Create the greenhouse object and one variable per tag under it.
///
/// Only setpoints, modes and commands are writable by clients.
pub(crate) fn populate(
    space: &mut AddressSpace,
    namespace: u16,
    object_name: &str,
    image: &ProcessImage,
) -> Result<(), OpcUaError> {
    let object_id = NodeId::new(namespace, object_name.to_string());
    if !ObjectBuilder::new(&object_id, object_name, object_name)
        .organized_by(ObjectId::ObjectsFolder)
        .insert(space)
    {
        return Err(OpcUaError::NodeCreation(object_name.to_string()));
    }

    for tag in Tag::catalogue() {
        let name = tag.name();
        let mut builder = VariableBuilder::new(&node_id(namespace, tag), name.as_str(), name.as_str())
            .data_type(data_type(tag))
            .value(to_variant(image.tag_value(tag)))
            .organized_by(&object_id);
        if tag.access().is_writable() {
            builder = builder.writable();
        }
        if !builder.insert(space) {
            return Err(OpcUaError::NodeCreation(name));
        }
    }
    Ok(())
}
