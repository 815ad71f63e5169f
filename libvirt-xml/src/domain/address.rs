//! `<address type="...">` of guest devices
//!
//! Each address kind has its own attribute set and number formatting; the kind is selected by
//! the `type` attribute. Unknown kinds decode to `Address::Unspecified`.

use crate::{
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
		ElementParser,
		ElementParserExt,
		FixedElementState,
	},
	serializer::{
		self,
		Serializer,
	},
	Result,
};
use std::borrow::Cow;

/// Attribute set of a single address kind
pub trait AddressAttributes: Default {
	/// Value of the `type` attribute selecting this kind
	const KIND: &'static str;

	/// Parse one attribute; unknown attributes are ignored.
	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()>;

	/// Serialize all attributes (without `type`)
	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()>;

	/// Parse all attributes of a start tag
	fn from_attributes(attributes: &Attributes) -> Result<Self> {
		let mut address = Self::default();
		for (key, value) in attributes.iter() {
			address.parse_attribute(key, value)?;
		}
		Ok(address)
	}
}

fn set_uint<T: std::convert::TryFrom<u64>>(target: &mut Option<T>, key: &str, value: &str, radix: Radix) -> Result<()> {
	*target = Some(parse_uint(key, value, radix)?);
	Ok(())
}

/// `type="pci"`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PciAddress {
	pub domain: Option<u64>,
	pub bus: Option<u64>,
	pub slot: Option<u64>,
	pub function: Option<u64>,
	pub multifunction: Option<String>,
}

impl AddressAttributes for PciAddress {
	const KIND: &'static str = "pci";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"domain" => set_uint(&mut self.domain, key, value, Radix::Auto),
			"bus" => set_uint(&mut self.bus, key, value, Radix::Auto),
			"slot" => set_uint(&mut self.slot, key, value, Radix::Auto),
			"function" => set_uint(&mut self.function, key, value, Radix::Auto),
			"multifunction" => {
				self.multifunction = Some(value.to_owned());
				Ok(())
			},
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "domain", self.domain, NumberFormat::Hex { width: 4 })?;
		serialize_uint_attribute(serializer, "bus", self.bus, NumberFormat::Hex { width: 2 })?;
		serialize_uint_attribute(serializer, "slot", self.slot, NumberFormat::Hex { width: 2 })?;
		serialize_uint_attribute(serializer, "function", self.function, NumberFormat::HEX)?;
		if let Some(multifunction) = &self.multifunction {
			serializer.serialize_attribute("multifunction", Cow::Borrowed(multifunction))?;
		}
		Ok(())
	}
}

/// `type="usb"`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsbAddress {
	pub bus: Option<u64>,
	/// Hub port path like `1.2`
	pub port: Option<String>,
	pub device: Option<u64>,
}

impl AddressAttributes for UsbAddress {
	const KIND: &'static str = "usb";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"bus" => set_uint(&mut self.bus, key, value, Radix::Decimal),
			"port" => {
				self.port = Some(value.to_owned());
				Ok(())
			},
			"device" => set_uint(&mut self.device, key, value, Radix::Decimal),
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "bus", self.bus, NumberFormat::Decimal)?;
		if let Some(port) = &self.port {
			serializer.serialize_attribute("port", Cow::Borrowed(port))?;
		}
		serialize_uint_attribute(serializer, "device", self.device, NumberFormat::Decimal)
	}
}

/// `type="drive"`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriveAddress {
	pub controller: Option<u64>,
	pub bus: Option<u64>,
	pub target: Option<u64>,
	pub unit: Option<u64>,
}

impl AddressAttributes for DriveAddress {
	const KIND: &'static str = "drive";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"controller" => set_uint(&mut self.controller, key, value, Radix::Decimal),
			"bus" => set_uint(&mut self.bus, key, value, Radix::Decimal),
			"target" => set_uint(&mut self.target, key, value, Radix::Decimal),
			"unit" => set_uint(&mut self.unit, key, value, Radix::Decimal),
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "controller", self.controller, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "bus", self.bus, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "target", self.target, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "unit", self.unit, NumberFormat::Decimal)
	}
}

/// `type="dimm"`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DimmAddress {
	pub slot: Option<u64>,
	pub base: Option<u64>,
}

impl AddressAttributes for DimmAddress {
	const KIND: &'static str = "dimm";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"slot" => set_uint(&mut self.slot, key, value, Radix::Decimal),
			"base" => set_uint(&mut self.base, key, value, Radix::Hex),
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "slot", self.slot, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "base", self.base, NumberFormat::HEX)
	}
}

/// `type="isa"`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IsaAddress {
	pub iobase: Option<u64>,
	pub irq: Option<u64>,
}

impl AddressAttributes for IsaAddress {
	const KIND: &'static str = "isa";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"iobase" => set_uint(&mut self.iobase, key, value, Radix::Hex),
			"irq" => set_uint(&mut self.irq, key, value, Radix::Hex),
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "iobase", self.iobase, NumberFormat::HEX)?;
		serialize_uint_attribute(serializer, "irq", self.irq, NumberFormat::HEX)
	}
}

/// `type="virtio-mmio"`; carries no attributes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtioMmioAddress;

impl AddressAttributes for VirtioMmioAddress {
	const KIND: &'static str = "virtio-mmio";

	fn parse_attribute(&mut self, _key: &str, _value: &str) -> Result<()> {
		Ok(())
	}

	fn serialize_attributes<S: Serializer>(&self, _serializer: &mut S) -> Result<()> {
		Ok(())
	}
}

/// `type="ccw"` (s390 channel subsystem)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CcwAddress {
	pub cssid: Option<u64>,
	pub ssid: Option<u64>,
	pub devno: Option<u64>,
}

impl AddressAttributes for CcwAddress {
	const KIND: &'static str = "ccw";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"cssid" => set_uint(&mut self.cssid, key, value, Radix::Auto),
			"ssid" => set_uint(&mut self.ssid, key, value, Radix::Auto),
			"devno" => set_uint(&mut self.devno, key, value, Radix::Auto),
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "cssid", self.cssid, NumberFormat::HEX)?;
		serialize_uint_attribute(serializer, "ssid", self.ssid, NumberFormat::HEX)?;
		serialize_uint_attribute(serializer, "devno", self.devno, NumberFormat::Hex { width: 4 })
	}
}

/// `type="virtio-serial"`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtioSerialAddress {
	pub controller: Option<u64>,
	pub bus: Option<u64>,
	pub port: Option<u64>,
}

impl AddressAttributes for VirtioSerialAddress {
	const KIND: &'static str = "virtio-serial";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"controller" => set_uint(&mut self.controller, key, value, Radix::Decimal),
			"bus" => set_uint(&mut self.bus, key, value, Radix::Decimal),
			"port" => set_uint(&mut self.port, key, value, Radix::Decimal),
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "controller", self.controller, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "bus", self.bus, NumberFormat::Decimal)?;
		serialize_uint_attribute(serializer, "port", self.port, NumberFormat::Decimal)
	}
}

/// `type="spapr-vio"` (pSeries)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpaprVioAddress {
	pub reg: Option<u64>,
}

impl AddressAttributes for SpaprVioAddress {
	const KIND: &'static str = "spapr-vio";

	fn parse_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"reg" => set_uint(&mut self.reg, key, value, Radix::Hex),
			_ => Ok(()),
		}
	}

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serialize_uint_attribute(serializer, "reg", self.reg, NumberFormat::HEX)
	}
}

/// Device address
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
	/// No (or an unknown) `type`; renders as `<address></address>`
	Unspecified,
	Usb(UsbAddress),
	Pci(PciAddress),
	Drive(DriveAddress),
	Dimm(DimmAddress),
	Isa(IsaAddress),
	VirtioMmio(VirtioMmioAddress),
	Ccw(CcwAddress),
	VirtioSerial(VirtioSerialAddress),
	SpaprVio(SpaprVioAddress),
}

impl Default for Address {
	fn default() -> Self {
		Address::Unspecified
	}
}

impl Address {
	/// Value of the `type` attribute
	pub fn kind(&self) -> Option<&'static str> {
		Some(match self {
			Address::Unspecified => return None,
			Address::Usb(_) => UsbAddress::KIND,
			Address::Pci(_) => PciAddress::KIND,
			Address::Drive(_) => DriveAddress::KIND,
			Address::Dimm(_) => DimmAddress::KIND,
			Address::Isa(_) => IsaAddress::KIND,
			Address::VirtioMmio(_) => VirtioMmioAddress::KIND,
			Address::Ccw(_) => CcwAddress::KIND,
			Address::VirtioSerial(_) => VirtioSerialAddress::KIND,
			Address::SpaprVio(_) => SpaprVioAddress::KIND,
		})
	}

	fn from_attributes(attributes: &Attributes) -> Result<Self> {
		let kind = match attributes.get("type") {
			Some(kind) => kind,
			None => return Ok(Address::Unspecified),
		};
		Ok(match kind {
			UsbAddress::KIND => Address::Usb(AddressAttributes::from_attributes(attributes)?),
			PciAddress::KIND => Address::Pci(AddressAttributes::from_attributes(attributes)?),
			DriveAddress::KIND => Address::Drive(AddressAttributes::from_attributes(attributes)?),
			DimmAddress::KIND => Address::Dimm(AddressAttributes::from_attributes(attributes)?),
			IsaAddress::KIND => Address::Isa(AddressAttributes::from_attributes(attributes)?),
			VirtioMmioAddress::KIND => Address::VirtioMmio(VirtioMmioAddress),
			CcwAddress::KIND => Address::Ccw(AddressAttributes::from_attributes(attributes)?),
			VirtioSerialAddress::KIND => Address::VirtioSerial(AddressAttributes::from_attributes(attributes)?),
			SpaprVioAddress::KIND => Address::SpaprVio(AddressAttributes::from_attributes(attributes)?),
			_ => {
				tracing::debug!(kind, "ignoring address of unknown type");
				Address::Unspecified
			},
		})
	}
}

#[doc(hidden)]
#[derive(Default)]
pub struct AddressState {
	address: Address,
}

impl FixedElementState for AddressState {
	type Output = Address;

	const TAG: &'static str = "address";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		self.address = Address::from_attributes(attributes)?;
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, _tag: &str, parser: P) -> Result<()> {
		parser.skip_element()
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(self.address)
	}
}

impl parser::Element for Address {
	type ParseState = AddressState;
}

impl serializer::FixedElement for Address {
	const TAG: &'static str = "address";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		if let Some(kind) = self.kind() {
			serializer.serialize_attribute("type", Cow::Borrowed(kind))?;
		}
		match self {
			Address::Unspecified => Ok(()),
			Address::Usb(a) => AddressAttributes::serialize_attributes(a, serializer),
			Address::Pci(a) => AddressAttributes::serialize_attributes(a, serializer),
			Address::Drive(a) => AddressAttributes::serialize_attributes(a, serializer),
			Address::Dimm(a) => a.serialize_attributes(serializer),
			Address::Isa(a) => a.serialize_attributes(serializer),
			Address::VirtioMmio(a) => a.serialize_attributes(serializer),
			Address::Ccw(a) => a.serialize_attributes(serializer),
			Address::VirtioSerial(a) => a.serialize_attributes(serializer),
			Address::SpaprVio(a) => a.serialize_attributes(serializer),
		}
	}
}

/// Parse state for an address kind used as plain `<address>` element (without `type`), like in
/// host device sources.
#[doc(hidden)]
#[derive(Default)]
pub struct AddressAttributesState<A> {
	address: A,
}

impl<A: AddressAttributes> FixedElementState for AddressAttributesState<A> {
	type Output = A;

	const TAG: &'static str = "address";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		self.address = A::from_attributes(attributes)?;
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, _tag: &str, parser: P) -> Result<()> {
		parser.skip_element()
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(self.address)
	}
}

macro_rules! plain_address_element {
	($($name:ident,)*) => {$(
		impl parser::Element for $name {
			type ParseState = AddressAttributesState<$name>;
		}

		impl serializer::FixedElement for $name {
			const TAG: &'static str = "address";

			fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
				AddressAttributes::serialize_attributes(self, serializer)
			}
		}
	)*};
}

plain_address_element! {
	PciAddress,
	UsbAddress,
	DriveAddress,
}

impl std::convert::TryFrom<Address> for PciAddress {
	type Error = crate::Error;

	fn try_from(address: Address) -> Result<Self> {
		match address {
			Address::Pci(pci) => Ok(pci),
			other => Err(errors::unsupported_variant("type", other.kind().unwrap_or(""))),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		Document,
		Error,
	};
	use std::convert::TryFrom;

	#[test]
	fn pci_round_trip() {
		let xml = r#"<address type="pci" domain="0x0000" bus="0x00" slot="0x03" function="0x0"></address>"#;
		let address = Address::from_xml(xml).unwrap();
		assert_eq!(
			address,
			Address::Pci(PciAddress {
				domain: Some(0),
				bus: Some(0),
				slot: Some(3),
				function: Some(0),
				multifunction: None,
			})
		);
		assert_eq!(address.to_xml().unwrap(), xml);
		assert_eq!(PciAddress::try_from(address).unwrap().slot, Some(3));
	}

	#[test]
	fn hex_widths() {
		let address = Address::Pci(PciAddress {
			domain: Some(0),
			bus: Some(0),
			slot: Some(0x1f),
			function: Some(0),
			multifunction: Some("on".into()),
		});
		assert_eq!(
			address.to_xml().unwrap(),
			r#"<address type="pci" domain="0x0000" bus="0x00" slot="0x1f" function="0x0" multifunction="on"></address>"#,
		);
	}

	#[test]
	fn wide_pci_domain() {
		let xml = r#"<address type="pci" domain="0x100000000" bus="0x00" slot="0x00" function="0x0"></address>"#;
		let address = Address::from_xml(xml).unwrap();
		match &address {
			Address::Pci(pci) => assert_eq!(pci.domain, Some(0x1_0000_0000)),
			other => panic!("unexpected address {:?}", other),
		}
		assert_eq!(address.to_xml().unwrap(), xml);
	}

	#[test]
	fn type_needs_not_come_first() {
		let address = Address::from_xml(r#"<address bus="1" port="2.1" type="usb"/>"#).unwrap();
		assert_eq!(
			address,
			Address::Usb(UsbAddress {
				bus: Some(1),
				port: Some("2.1".into()),
				device: None,
			})
		);
		assert_eq!(address.to_xml().unwrap(), r#"<address type="usb" bus="1" port="2.1"></address>"#);
	}

	#[test]
	fn every_kind() {
		for xml in &[
			r#"<address type="drive" controller="0" bus="1" target="2" unit="3"></address>"#,
			r#"<address type="dimm" slot="1" base="0x100000000"></address>"#,
			r#"<address type="isa" iobase="0x505" irq="0x4"></address>"#,
			r#"<address type="virtio-mmio"></address>"#,
			r#"<address type="ccw" cssid="0xfe" ssid="0x0" devno="0x0001"></address>"#,
			r#"<address type="virtio-serial" controller="0" bus="0" port="1"></address>"#,
			r#"<address type="spapr-vio" reg="0x30000000"></address>"#,
		] {
			let address = Address::from_xml(xml).unwrap();
			assert_ne!(address, Address::Unspecified, "{}", xml);
			assert_eq!(&address.to_xml().unwrap(), xml);
		}
	}

	#[test]
	fn radix_per_field() {
		// iobase is always hex, ccw numbers detect the prefix
		let address = Address::from_xml(r#"<address type="isa" iobase="505" irq="4"/>"#).unwrap();
		assert_eq!(address, Address::Isa(IsaAddress { iobase: Some(0x505), irq: Some(4) }));
		let address = Address::from_xml(r#"<address type="ccw" cssid="254" ssid="0" devno="0x0a"/>"#).unwrap();
		assert_eq!(
			address,
			Address::Ccw(CcwAddress {
				cssid: Some(254),
				ssid: Some(0),
				devno: Some(10),
			})
		);
		assert_eq!(
			address.to_xml().unwrap(),
			r#"<address type="ccw" cssid="0xfe" ssid="0x0" devno="0x000a"></address>"#,
		);
	}

	#[test]
	fn unknown_type_is_empty() {
		let address = Address::from_xml(r#"<address type="bogus" foo="1"><child/></address>"#).unwrap();
		assert_eq!(address, Address::Unspecified);
		assert_eq!(address.to_xml().unwrap(), "<address></address>");

		let address = Address::from_xml("<address/>").unwrap();
		assert_eq!(address, Address::Unspecified);
	}

	#[test]
	fn invalid_number() {
		match Address::from_xml(r#"<address type="pci" bus="zz"/>"#).unwrap_err() {
			Error::Format { key, value } => {
				assert_eq!(key, "bus");
				assert_eq!(value, "zz");
			},
			other => panic!("unexpected error {:?}", other),
		}
		assert!(matches!(
			Address::from_xml(r#"<address type="drive" unit="0x1"/>"#).unwrap_err(),
			Error::Format { .. }
		));
	}

	#[test]
	fn plain_element_without_type() {
		let address = PciAddress::from_xml(r#"<address domain="0x0000" bus="0x03" slot="0x0e" function="0x5"/>"#).unwrap();
		assert_eq!(address.bus, Some(3));
		assert_eq!(address.slot, Some(14));
		assert_eq!(
			address.to_xml().unwrap(),
			r#"<address domain="0x0000" bus="0x03" slot="0x0e" function="0x5"></address>"#,
		);
		assert!(PciAddress::try_from(Address::Unspecified).is_err());
	}
}
