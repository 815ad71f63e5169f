//! PCI capability and its sub-capabilities

use crate::{
	parser::ParseElementMaybeList,
	Element,
};

macro_rules! id_names {
	($($name:ident => $tag:tt,)*) => {$(
		/// Numeric id with a human readable name: `<tag id="0x8086">Intel Corporation</tag>`
		#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			#[xml_data(attr, default)]
			pub id: String,
			#[xml_data(text)]
			pub name: String,
		}
	)*};
}

id_names! {
	NodeDeviceProduct => "product",
	NodeDeviceVendor => "vendor",
}

/// PCI address with the textual (hex) components as libvirt reports them
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "address")]
pub struct NodeDevicePciAddress {
	#[xml_data(attr, default)]
	pub domain: String,
	#[xml_data(attr, default)]
	pub bus: String,
	#[xml_data(attr, default)]
	pub slot: String,
	#[xml_data(attr, default)]
	pub function: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "iommuGroup")]
pub struct NodeDeviceIommuGroup {
	#[xml_data(attr, default)]
	pub number: i32,
	pub address: Option<NodeDevicePciAddress>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "numa")]
pub struct NodeDeviceNuma {
	#[xml_data(attr, default)]
	pub node: i32,
}

/// Link of a PCI express device; `speed` is in GT/s (`"2.5"`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "link")]
pub struct NodeDevicePciExpressLink {
	#[xml_data(attr)]
	pub validity: Option<String>,
	#[xml_data(attr)]
	pub port: Option<u32>,
	#[xml_data(attr)]
	pub speed: Option<String>,
	#[xml_data(attr)]
	pub width: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "pci-express")]
pub struct NodeDevicePciExpress {
	pub links: Vec<NodeDevicePciExpressLink>,
}

/// SR-IOV virtual functions of a physical function
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDevicePciVirtFunctionsCapability {
	#[xml_data(attr = "maxCount")]
	pub max_count: Option<u32>,
	pub addresses: Vec<NodeDevicePciAddress>,
}

/// Physical function of an SR-IOV virtual function
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDevicePciPhysFunctionCapability {
	#[xml_data(default)]
	pub address: NodeDevicePciAddress,
}

/// Mediated device type a PCI device can instantiate
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "type")]
pub struct NodeDevicePciMdevType {
	#[xml_data(attr, default)]
	pub id: String,
	#[xml_data(child)]
	pub name: String,
	#[xml_data(child = "deviceAPI")]
	pub device_api: String,
	#[xml_data(child = "availableInstances")]
	pub available_instances: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDevicePciMdevTypesCapability {
	pub types: Vec<NodeDevicePciMdevType>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDevicePciBridgeCapability;

capability_kinds! {
	/// Nested `<capability type="...">` of a PCI device
	NodeDevicePciSubCapability, NodeDevicePciSubCapabilityState, SubCapabilityState {
		VirtFunctions(NodeDevicePciVirtFunctionsCapability) => "virt_functions",
		PhysFunction(NodeDevicePciPhysFunctionCapability) => "phys_function",
		MdevTypes(NodeDevicePciMdevTypesCapability) => "mdev_types",
		Bridge(NodeDevicePciBridgeCapability) => "pci-bridge",
	}
}

/// `<capability type="pci">`
///
/// `product` and `vendor` are always written, even when empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDevicePciCapability {
	#[xml_data(child)]
	pub domain: Option<u64>,
	#[xml_data(child)]
	pub bus: Option<u64>,
	#[xml_data(child)]
	pub slot: Option<u64>,
	#[xml_data(child)]
	pub function: Option<u64>,
	#[xml_data(default)]
	pub product: NodeDeviceProduct,
	#[xml_data(default)]
	pub vendor: NodeDeviceVendor,
	pub iommu_group: Option<NodeDeviceIommuGroup>,
	pub numa: Option<NodeDeviceNuma>,
	pub pci_express: Option<NodeDevicePciExpress>,
	#[xml_data(state = "ParseElementMaybeList<NodeDevicePciSubCapabilityState>")]
	pub capabilities: Vec<NodeDevicePciSubCapability>,
}
