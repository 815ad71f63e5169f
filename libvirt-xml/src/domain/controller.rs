//! `<controller type="...">`
//!
//! The `pci`, `usb` and `virtio-serial` controller types carry extra attributes and children
//! which sit next to the common fields in the same element.

use crate::{
	domain::Address,
	errors,
	number::{
		parse_uint,
		serialize_uint_attribute,
		NumberFormat,
		Radix,
	},
	parser::{
		self,
		Attributes,
		ElementDefaultParseState,
		ElementParser,
		ElementParserExt,
		ElementState,
		FixedElementState,
		InnerDefaultParseState,
		InnerState,
		TextContent,
	},
	serializer::{
		FixedElement,
		Inner,
		Serializer,
		TextElement,
	},
	Element,
	Result,
};
use std::borrow::Cow;

/// `<model name="..."/>` of PCI controllers
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "model")]
pub struct ControllerPciModel {
	#[xml_data(attr, default)]
	pub name: String,
}

/// `<target>` of PCI controllers
///
/// `node` is the only field written as child element (`<node>1</node>`); the others are
/// attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControllerPciTarget {
	pub chassis_nr: Option<u32>,
	pub chassis: Option<u32>,
	pub port: Option<u32>,
	pub bus_nr: Option<u32>,
	pub index: Option<u32>,
	pub numa_node: Option<u32>,
}

#[doc(hidden)]
#[derive(Default)]
pub struct ControllerPciTargetState {
	target: ControllerPciTarget,
}

impl FixedElementState for ControllerPciTargetState {
	type Output = ControllerPciTarget;

	const TAG: &'static str = "target";

	fn parse_element_attribute(&mut self, key: &str, value: Cow<'_, str>) -> Result<()> {
		let target = &mut self.target;
		let (field, radix) = match key {
			"chassisNr" => (&mut target.chassis_nr, Radix::Decimal),
			"chassis" => (&mut target.chassis, Radix::Decimal),
			"port" => (&mut target.port, Radix::Auto),
			"busNr" => (&mut target.bus_nr, Radix::Decimal),
			"index" => (&mut target.index, Radix::Decimal),
			_ => return Ok(()),
		};
		*field = Some(parse_uint(key, &value, radix)?);
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		if tag == "node" {
			let text = parser.parse_element::<TextContent>(tag)?;
			self.target.numa_node = Some(parse_uint(tag, text.trim(), Radix::Decimal)?);
			Ok(())
		} else {
			parser.skip_element()
		}
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(self.target)
	}
}

impl parser::Element for ControllerPciTarget {
	type ParseState = ControllerPciTargetState;
}

impl FixedElement for ControllerPciTarget {
	const TAG: &'static str = "target";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "chassisNr", self.chassis_nr, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "chassis", self.chassis, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "port", self.port, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "busNr", self.bus_nr, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "index", self.index, NumberFormat::Decimal)
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		if let Some(node) = self.numa_node {
			serializer.serialize_element(&TextElement::new("node", node.to_string()))?;
		}
		Ok(())
	}
}

/// `<pcihole64 unit="KiB">1048576</pcihole64>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "pcihole64")]
pub struct ControllerPciHole64 {
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(text)]
	pub size: u64,
}

/// Payload of `type="pci"` controllers
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "controller")]
pub struct ControllerPci {
	pub model: Option<ControllerPciModel>,
	pub target: Option<ControllerPciTarget>,
	pub hole64: Option<ControllerPciHole64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "master")]
pub struct ControllerUsbMaster {
	#[xml_data(attr = "startport", default)]
	pub start_port: u32,
}

/// Payload of `type="usb"` controllers
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "controller")]
pub struct ControllerUsb {
	#[xml_data(attr = "ports")]
	pub ports: Option<u32>,
	pub master: Option<ControllerUsbMaster>,
}

/// Payload of `type="virtio-serial"` controllers
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "controller")]
pub struct ControllerVirtioSerial {
	#[xml_data(attr)]
	pub ports: Option<u32>,
	#[xml_data(attr)]
	pub vectors: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "driver")]
pub struct ControllerDriver {
	#[xml_data(attr)]
	pub queues: Option<u32>,
	#[xml_data(attr)]
	pub cmd_per_lun: Option<u32>,
	#[xml_data(attr)]
	pub max_sectors: Option<u32>,
	#[xml_data(attr)]
	pub ioeventfd: Option<String>,
	#[xml_data(attr)]
	pub iothread: Option<u32>,
	#[xml_data(attr)]
	pub iommu: Option<String>,
	#[xml_data(attr)]
	pub ats: Option<String>,
}

/// Controller type with its specific payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerKind {
	Pci(ControllerPci),
	Usb(ControllerUsb),
	VirtioSerial(ControllerVirtioSerial),
	/// Any other type (`ide`, `scsi`, `sata`, ...); only the common fields apply
	Other(String),
}

impl ControllerKind {
	/// Value of the `type` attribute
	pub fn as_str(&self) -> &str {
		match self {
			ControllerKind::Pci(_) => "pci",
			ControllerKind::Usb(_) => "usb",
			ControllerKind::VirtioSerial(_) => "virtio-serial",
			ControllerKind::Other(kind) => kind,
		}
	}
}

/// `<controller>` device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controller {
	pub kind: ControllerKind,
	pub index: Option<u32>,
	pub model: Option<String>,
	pub driver: Option<ControllerDriver>,
	pub address: Option<Address>,
}

impl Controller {
	/// Controller of the given type without payload or common fields
	pub fn new(kind: ControllerKind) -> Self {
		Self {
			kind,
			index: None,
			model: None,
			driver: None,
			address: None,
		}
	}
}

enum KindState {
	Pci(ElementDefaultParseState<ControllerPci>),
	Usb(ElementDefaultParseState<ControllerUsb>),
	VirtioSerial(ElementDefaultParseState<ControllerVirtioSerial>),
	Other(String),
}

impl KindState {
	fn new(kind: &str) -> Self {
		match kind {
			"pci" => KindState::Pci(Default::default()),
			"usb" => KindState::Usb(Default::default()),
			"virtio-serial" => KindState::VirtioSerial(Default::default()),
			_ => {
				tracing::debug!(kind, "controller type without specific fields");
				KindState::Other(kind.to_owned())
			},
		}
	}

	fn parse_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		let skip = &["type", "index", "model"];
		match self {
			KindState::Pci(state) => attributes.forward(state, skip),
			KindState::Usb(state) => attributes.forward(state, skip),
			KindState::VirtioSerial(state) => attributes.forward(state, skip),
			KindState::Other(_) => Ok(()),
		}
	}

	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		match self {
			KindState::Pci(state) => ElementState::parse_element_inner_node(state, tag, parser),
			KindState::Usb(state) => ElementState::parse_element_inner_node(state, tag, parser),
			KindState::VirtioSerial(state) => ElementState::parse_element_inner_node(state, tag, parser),
			KindState::Other(_) => parser.skip_element(),
		}
	}

	fn finish(self) -> Result<ControllerKind> {
		Ok(match self {
			KindState::Pci(state) => ControllerKind::Pci(ElementState::parse_element_finish(state)?),
			KindState::Usb(state) => ControllerKind::Usb(ElementState::parse_element_finish(state)?),
			KindState::VirtioSerial(state) => {
				ControllerKind::VirtioSerial(ElementState::parse_element_finish(state)?)
			},
			KindState::Other(kind) => ControllerKind::Other(kind),
		})
	}
}

#[doc(hidden)]
#[derive(Default)]
pub struct ControllerState {
	kind: Option<KindState>,
	index: Option<u32>,
	model: Option<String>,
	driver: InnerDefaultParseState<Option<ControllerDriver>>,
	address: InnerDefaultParseState<Option<Address>>,
}

impl FixedElementState for ControllerState {
	type Output = Controller;

	const TAG: &'static str = "controller";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		let kind = attributes.get("type").ok_or_else(|| errors::missing_attribute("type"))?;
		let mut kind = KindState::new(kind);
		kind.parse_attributes(attributes)?;
		self.kind = Some(kind);
		if let Some(index) = attributes.get("index") {
			self.index = Some(parse_uint("index", index.trim(), Radix::Decimal)?);
		}
		self.model = attributes.get("model").map(str::to_owned);
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		let parser = try_inner!(self.driver, tag, parser);
		let parser = try_inner!(self.address, tag, parser);
		match &mut self.kind {
			Some(kind) => kind.parse_inner_node(tag, parser),
			None => parser.skip_element(),
		}
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		let kind = self.kind.ok_or_else(|| errors::missing_attribute("type"))?;
		Ok(Controller {
			kind: kind.finish()?,
			index: self.index,
			model: self.model,
			driver: self.driver.parse_inner_finish()?,
			address: self.address.parse_inner_finish()?,
		})
	}
}

impl parser::Element for Controller {
	type ParseState = ControllerState;
}

impl FixedElement for Controller {
	const TAG: &'static str = "controller";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		match &self.kind {
			ControllerKind::Pci(pci) => pci.serialize_attributes(serializer)?,
			ControllerKind::Usb(usb) => usb.serialize_attributes(serializer)?,
			ControllerKind::VirtioSerial(vs) => vs.serialize_attributes(serializer)?,
			ControllerKind::Other(_) => (),
		}
		serializer.serialize_attribute("type", Cow::Borrowed(self.kind.as_str()))?;
		serialize_uint_attribute(serializer, "index", self.index, NumberFormat::Decimal)?;
		if let Some(model) = &self.model {
			serializer.serialize_attribute("model", Cow::Borrowed(model))?;
		}
		Ok(())
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		match &self.kind {
			ControllerKind::Pci(pci) => pci.serialize_content(serializer)?,
			ControllerKind::Usb(usb) => usb.serialize_content(serializer)?,
			ControllerKind::VirtioSerial(vs) => vs.serialize_content(serializer)?,
			ControllerKind::Other(_) => (),
		}
		self.driver.serialize_elements(serializer)?;
		self.address.serialize_elements(serializer)
	}
}


#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		domain::PciAddress,
		Document,
		Error,
	};

	#[test]
	fn missing_type() {
		match Controller::from_xml("<controller/>").unwrap_err() {
			Error::MissingAttribute { key } => assert_eq!(key, "type"),
			other => panic!("unexpected error {:?}", other),
		}
	}

	#[test]
	fn usb_attributes_first() {
		let mut controller = Controller::new(ControllerKind::Usb(ControllerUsb {
			ports: Some(8),
			master: None,
		}));
		controller.index = Some(0);
		let xml = r#"<controller ports="8" type="usb" index="0"></controller>"#;
		assert_eq!(controller.to_xml().unwrap(), xml);
		assert_eq!(Controller::from_xml(xml).unwrap(), controller);
	}

	#[test]
	fn pci_children_before_common() {
		let xml = [
			r#"<controller type="pci" index="1" model="pci-bridge">"#,
			r#"  <model name="pci-bridge"></model>"#,
			r#"  <target chassisNr="1" port="16">"#,
			r#"    <node>1</node>"#,
			r#"  </target>"#,
			r#"  <pcihole64 unit="KiB">1048576</pcihole64>"#,
			r#"  <driver queues="4"></driver>"#,
			r#"  <address type="pci" domain="0x0000" bus="0x00" slot="0x03" function="0x0"></address>"#,
			r#"</controller>"#,
		]
		.join("\n");
		let controller = Controller::from_xml(&xml).unwrap();
		assert_eq!(controller.index, Some(1));
		assert_eq!(controller.model.as_deref(), Some("pci-bridge"));
		assert_eq!(controller.driver.as_ref().and_then(|d| d.queues), Some(4));
		assert_eq!(
			controller.address,
			Some(Address::Pci(PciAddress {
				domain: Some(0),
				bus: Some(0),
				slot: Some(3),
				function: Some(0),
				multifunction: None,
			}))
		);
		match &controller.kind {
			ControllerKind::Pci(pci) => {
				assert_eq!(pci.model.as_ref().map(|m| m.name.as_str()), Some("pci-bridge"));
				let target = pci.target.as_ref().unwrap();
				assert_eq!(target.chassis_nr, Some(1));
				assert_eq!(target.port, Some(16));
				assert_eq!(target.numa_node, Some(1));
				assert_eq!(pci.hole64.as_ref().map(|h| h.size), Some(1048576));
			},
			other => panic!("unexpected kind {:?}", other),
		}
		assert_eq!(controller.to_xml().unwrap(), xml);
	}

	#[test]
	fn pci_target_port_radix() {
		let target = ControllerPciTarget::from_xml(r#"<target port="0x10" chassis="2"/>"#).unwrap();
		assert_eq!(target.port, Some(16));
		assert_eq!(target.chassis, Some(2));
		assert_eq!(target.to_xml().unwrap(), r#"<target chassis="2" port="16"></target>"#);
		assert!(matches!(
			ControllerPciTarget::from_xml(r#"<target busNr="0x1"/>"#).unwrap_err(),
			Error::Format { .. }
		));
	}

	#[test]
	fn virtio_serial() {
		let xml = r#"<controller ports="16" vectors="4" type="virtio-serial" index="0"></controller>"#;
		let controller = Controller::from_xml(r#"<controller type="virtio-serial" index="0" ports="16" vectors="4"/>"#).unwrap();
		assert_eq!(
			controller.kind,
			ControllerKind::VirtioSerial(ControllerVirtioSerial {
				ports: Some(16),
				vectors: Some(4),
			})
		);
		assert_eq!(controller.to_xml().unwrap(), xml);
	}

	#[test]
	fn other_type_keeps_common_fields() {
		let xml = [
			r#"<controller type="scsi" index="0" model="virtio-scsi">"#,
			r#"  <driver queues="2" iothread="1"></driver>"#,
			r#"</controller>"#,
		]
		.join("\n");
		let controller = Controller::from_xml(&xml).unwrap();
		assert_eq!(controller.kind, ControllerKind::Other("scsi".into()));
		assert_eq!(controller.driver.as_ref().and_then(|d| d.iothread), Some(1));
		assert_eq!(controller.to_xml().unwrap(), xml);

		// payload fields of other types are dropped
		let controller = Controller::from_xml(r#"<controller type="ide" ports="8"><master startport="0"/></controller>"#).unwrap();
		assert_eq!(controller.to_xml().unwrap(), r#"<controller type="ide"></controller>"#);
	}

	#[test]
	fn usb_master() {
		let xml = [
			r#"<controller type="usb" index="0" model="ich9-uhci1">"#,
			r#"  <master startport="0"></master>"#,
			r#"</controller>"#,
		]
		.join("\n");
		let controller = Controller::from_xml(&xml).unwrap();
		assert_eq!(
			controller.kind,
			ControllerKind::Usb(ControllerUsb {
				ports: None,
				master: Some(ControllerUsbMaster { start_port: 0 }),
			})
		);
		assert_eq!(controller.to_xml().unwrap(), xml);
	}
}
