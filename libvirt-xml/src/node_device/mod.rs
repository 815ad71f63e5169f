#![allow(missing_docs)] // element and attribute names document the fields
//! Host node device descriptions (`<device>`)
//!
//! The shape of a `<capability>` depends on its `type` attribute; capabilities (and PCI
//! sub-capabilities) of unknown types are skipped with everything below them.

// Generates the enum of `<capability type="...">` payloads together with its serializer and a
// parse state producing `None` for unknown types.
macro_rules! capability_kinds {
	(
		$(#[$enum_meta:meta])*
		$name:ident, $state:ident, $kind_state:ident {
			$($(#[$meta:meta])* $variant:ident($payload:ty) => $kind:tt,)*
		}
	) => {
		$(#[$enum_meta])*
		#[derive(Clone, Debug, PartialEq, Eq)]
		pub enum $name {
			$($(#[$meta])* $variant($payload),)*
		}

		impl $name {
			/// Value of the `type` attribute
			pub fn kind(&self) -> &'static str {
				match self {
					$($name::$variant(_) => $kind,)*
				}
			}
		}

		impl $crate::serializer::FixedElement for $name {
			const TAG: &'static str = "capability";

			fn serialize_attributes<S: $crate::serializer::Serializer>(&self, serializer: &mut S) -> $crate::Result<()> {
				serializer.serialize_attribute("type", ::std::borrow::Cow::Borrowed(self.kind()))?;
				match self {
					$($name::$variant(payload) => $crate::serializer::FixedElement::serialize_attributes(payload, serializer),)*
				}
			}

			fn serialize_content<S: $crate::serializer::Serializer>(&self, serializer: &mut S) -> $crate::Result<()> {
				match self {
					$($name::$variant(payload) => $crate::serializer::FixedElement::serialize_content(payload, serializer),)*
				}
			}
		}

		enum $kind_state {
			$($variant($crate::parser::ElementDefaultParseState<$payload>),)*
		}

		#[doc(hidden)]
		#[derive(Default)]
		pub struct $state {
			kind: Option<$kind_state>,
		}

		impl $crate::parser::FixedElementState for $state {
			type Output = Option<$name>;

			const TAG: &'static str = "capability";

			fn parse_element_attributes(&mut self, attributes: &$crate::parser::Attributes) -> $crate::Result<()> {
				let kind = attributes.get("type").ok_or_else(|| $crate::errors::missing_attribute("type"))?;
				self.kind = match kind {
					$($kind => {
						let mut state = <$crate::parser::ElementDefaultParseState<$payload>>::default();
						attributes.forward(&mut state, &["type"])?;
						Some($kind_state::$variant(state))
					},)*
					_ => {
						tracing::debug!(kind, element = stringify!($name), "skipping capability of unknown type");
						None
					},
				};
				Ok(())
			}

			fn parse_element_inner_text(&mut self, text: ::std::borrow::Cow<'_, str>) -> $crate::Result<()> {
				match &mut self.kind {
					$(Some($kind_state::$variant(state)) => $crate::parser::ElementState::parse_element_inner_text(state, text),)*
					None => Ok(()),
				}
			}

			fn parse_element_inner_node<P: $crate::parser::ElementParser>(&mut self, tag: &str, parser: P) -> $crate::Result<()> {
				match &mut self.kind {
					$(Some($kind_state::$variant(state)) => $crate::parser::ElementState::parse_element_inner_node(state, tag, parser),)*
					None => $crate::parser::ElementParserExt::skip_element(parser),
				}
			}

			fn parse_element_finish(self) -> $crate::Result<Self::Output> {
				Ok(match self.kind {
					$(Some($kind_state::$variant(state)) => Some($name::$variant($crate::parser::ElementState::parse_element_finish(state)?)),)*
					None => None,
				})
			}
		}
	};
}

mod caps;
mod ccw;
mod pci;

pub use self::{
	caps::*,
	ccw::*,
	pci::*,
};

use crate::{
	parser::{
		ElementParser,
		InnerParseResult,
		InnerState,
		ParseElementMaybeList,
	},
	Element,
	Result,
};

/// `<devnode type="dev">/dev/...</devnode>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "devnode")]
pub struct NodeDeviceDevNode {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(text)]
	pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "driver")]
pub struct NodeDeviceDriver {
	#[xml_data(child)]
	pub name: String,
}

capability_kinds! {
	/// Capability of a node device, selected by `type`
	NodeDeviceCapability, NodeDeviceCapabilityState, CapabilityState {
		System(NodeDeviceSystemCapability) => "system",
		Pci(NodeDevicePciCapability) => "pci",
		UsbDevice(NodeDeviceUsbDeviceCapability) => "usb_device",
		Usb(NodeDeviceUsbCapability) => "usb",
		Net(NodeDeviceNetCapability) => "net",
		ScsiHost(NodeDeviceScsiHostCapability) => "scsi_host",
		Scsi(NodeDeviceScsiCapability) => "scsi",
		Storage(NodeDeviceStorageCapability) => "storage",
		Drm(NodeDeviceDrmCapability) => "drm",
		/// s390 channel subsystem device
		Ccw(NodeDeviceCcwCapability) => "ccw",
		/// Mediated device
		Mdev(NodeDeviceMdevCapability) => "mdev",
	}
}

impl NodeDeviceCapability {
	/// Capability kinds in the order one is picked when a device lists several
	pub const PRIORITY: [&'static str; 11] = [
		"pci",
		"system",
		"usb",
		"usb_device",
		"net",
		"scsi",
		"scsi_host",
		"storage",
		"drm",
		"ccw",
		"mdev",
	];

	fn priority(&self) -> usize {
		let kind = self.kind();
		Self::PRIORITY.iter().position(|k| *k == kind).unwrap_or(Self::PRIORITY.len())
	}
}

/// Collects all `<capability>` children and keeps the one of highest priority; among
/// capabilities of the same kind the last one wins.
#[doc(hidden)]
#[derive(Default)]
pub struct NodeDeviceCapabilitySelectState {
	capabilities: ParseElementMaybeList<NodeDeviceCapabilityState>,
}

impl InnerState for NodeDeviceCapabilitySelectState {
	type Output = Option<NodeDeviceCapability>;

	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<InnerParseResult<P>> {
		self.capabilities.parse_inner_node(tag, parser)
	}

	fn parse_inner_finish(self) -> Result<Self::Output> {
		let capabilities = self.capabilities.parse_inner_finish()?;
		if capabilities.len() > 1 {
			tracing::debug!(count = capabilities.len(), "device lists several capabilities, keeping one");
		}
		Ok(capabilities.into_iter().rev().min_by_key(NodeDeviceCapability::priority))
	}
}

/// `<device>` document
///
/// Only one capability is kept, see [`NodeDeviceCapability::PRIORITY`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "device")]
pub struct NodeDevice {
	#[xml_data(child)]
	pub name: String,
	#[xml_data(child)]
	pub path: Option<String>,
	pub devnodes: Vec<NodeDeviceDevNode>,
	#[xml_data(child)]
	pub parent: Option<String>,
	pub driver: Option<NodeDeviceDriver>,
	#[xml_data(state = "NodeDeviceCapabilitySelectState")]
	pub capability: Option<NodeDeviceCapability>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		Document,
		Error,
	};

	#[test]
	fn pci_device() {
		let xml = [
			r#"<device>"#,
			r#"  <name>pci_0000_81_00_0</name>"#,
			r#"  <path>/sys/devices/pci0000:80/0000:80:02.0/0000:81:00.0</path>"#,
			r#"  <parent>pci_0000_80_02_0</parent>"#,
			r#"  <driver>"#,
			r#"    <name>igb</name>"#,
			r#"  </driver>"#,
			r#"  <capability type="pci">"#,
			r#"    <domain>0</domain>"#,
			r#"    <bus>129</bus>"#,
			r#"    <slot>0</slot>"#,
			r#"    <function>0</function>"#,
			r#"    <product id="0x10c9">82576 Gigabit Network Connection</product>"#,
			r#"    <vendor id="0x8086">Intel Corporation</vendor>"#,
			r#"    <iommuGroup number="15">"#,
			r#"      <address domain="0x0000" bus="0x81" slot="0x00" function="0x0"></address>"#,
			r#"    </iommuGroup>"#,
			r#"    <numa node="1"></numa>"#,
			r#"    <pci-express>"#,
			r#"      <link validity="cap" port="0" speed="2.5" width="4"></link>"#,
			r#"      <link validity="sta" speed="2.5" width="4"></link>"#,
			r#"    </pci-express>"#,
			r#"    <capability type="virt_functions" maxCount="7">"#,
			r#"      <address domain="0x0000" bus="0x82" slot="0x10" function="0x0"></address>"#,
			r#"      <address domain="0x0000" bus="0x82" slot="0x10" function="0x2"></address>"#,
			r#"    </capability>"#,
			r#"  </capability>"#,
			r#"</device>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&xml).unwrap();
		assert_eq!(device.driver.as_ref().map(|d| d.name.as_str()), Some("igb"));
		match &device.capability {
			Some(NodeDeviceCapability::Pci(pci)) => {
				assert_eq!(pci.bus, Some(129));
				assert_eq!(pci.vendor.id, "0x8086");
				assert_eq!(pci.vendor.name, "Intel Corporation");
				assert_eq!(pci.iommu_group.as_ref().map(|g| g.number), Some(15));
				assert_eq!(pci.numa, Some(NodeDeviceNuma { node: 1 }));
				match pci.capabilities.as_slice() {
					[NodeDevicePciSubCapability::VirtFunctions(vfs)] => {
						assert_eq!(vfs.max_count, Some(7));
						assert_eq!(vfs.addresses[1].function, "0x2");
					},
					other => panic!("unexpected sub-capabilities {:?}", other),
				}
			},
			other => panic!("unexpected capability {:?}", other),
		}
		assert_eq!(device.to_xml().unwrap(), xml);
	}

	#[test]
	fn unknown_capabilities_are_skipped() {
		let device = NodeDevice::from_xml(
			r#"<device>
				<name>mystery</name>
				<capability type="vdpa"><chardev>/dev/vhost-vdpa-0</chardev></capability>
				<parent>computer</parent>
			</device>"#,
		)
		.unwrap();
		assert_eq!(device.parent.as_deref(), Some("computer"));
		assert_eq!(device.capability, None);
		assert_eq!(
			device.to_xml().unwrap(),
			"<device>\n  <name>mystery</name>\n  <parent>computer</parent>\n</device>",
		);

		let device = NodeDevice::from_xml(
			r#"<device>
				<name>pci_0000_00_02_0</name>
				<capability type="pci">
					<bus>0</bus>
					<capability type="vpd"><name>Example</name><fields access="readonly"/></capability>
					<capability type="pci-bridge"/>
					<numa node="0"/>
				</capability>
			</device>"#,
		)
		.unwrap();
		match &device.capability {
			Some(NodeDeviceCapability::Pci(pci)) => {
				assert_eq!(pci.capabilities, vec![NodeDevicePciSubCapability::Bridge(NodeDevicePciBridgeCapability)]);
				assert_eq!(pci.numa, Some(NodeDeviceNuma { node: 0 }));
			},
			other => panic!("unexpected capability {:?}", other),
		}
	}

	#[test]
	fn capability_picked_by_priority() {
		let device = NodeDevice::from_xml(
			r#"<device><name>x</name><capability type="future"/><capability type="drm"><type>render</type></capability><capability type="system"/></device>"#,
		)
		.unwrap();
		assert_eq!(device.capability.as_ref().map(NodeDeviceCapability::kind), Some("system"));
		assert_eq!(
			device.to_xml().unwrap(),
			"<device>\n  <name>x</name>\n  <capability type=\"system\"></capability>\n</device>",
		);

		let device = NodeDevice::from_xml(
			r#"<device>
				<name>x</name>
				<capability type="mdev"><type id="first"/></capability>
				<capability type="drm"><type>primary</type></capability>
				<capability type="drm"><type>render</type></capability>
			</device>"#,
		)
		.unwrap();
		assert_eq!(
			device.capability,
			Some(NodeDeviceCapability::Drm(NodeDeviceDrmCapability { kind: "render".into() }))
		);
	}

	#[test]
	fn capability_type_is_mandatory() {
		match NodeDevice::from_xml(r#"<device><name>x</name><capability/></device>"#).unwrap_err() {
			Error::MissingAttribute { key } => assert_eq!(key, "type"),
			other => panic!("unexpected error {:?}", other),
		}
	}

	#[test]
	fn devnodes() {
		let xml = [
			r#"<device>"#,
			r#"  <name>drm_renderD128</name>"#,
			r#"  <devnode type="dev">/dev/dri/renderD128</devnode>"#,
			r#"  <devnode type="link">/dev/dri/by-path/pci-0000:00:02.0-render</devnode>"#,
			r#"  <parent>pci_0000_00_02_0</parent>"#,
			r#"  <capability type="drm">"#,
			r#"    <type>render</type>"#,
			r#"  </capability>"#,
			r#"</device>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&xml).unwrap();
		assert_eq!(device.devnodes.len(), 2);
		assert_eq!(device.devnodes[1].kind.as_deref(), Some("link"));
		assert_eq!(
			device.capability,
			Some(NodeDeviceCapability::Drm(NodeDeviceDrmCapability { kind: "render".into() }))
		);
		assert_eq!(device.to_xml().unwrap(), xml);
	}
}
