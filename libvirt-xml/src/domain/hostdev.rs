//! `<hostdev mode="..." type="...">`: host devices assigned to the guest
//!
//! The pair of `mode` and `type` selects the payload; its attributes and children are written
//! into the `<hostdev>` element itself, before the common `managed`, `<boot>` and `<address>`.

use crate::{
	domain::{
		Address,
		DeviceBoot,
		DiskAuth,
		DiskSourceHost,
		DriveAddress,
		PciAddress,
		ReadOnly,
		Shareable,
		UsbAddress,
	},
	errors,
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
		ParseElementMaybe,
	},
	serializer::{
		FixedElement,
		Inner,
		Serializer,
	},
	Element,
	Result,
};
use std::borrow::Cow;

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "adapter")]
pub struct HostdevScsiAdapter {
	#[xml_data(attr, default)]
	pub name: String,
}

/// SCSI device on a host adapter
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevScsiSourceHost {
	pub adapter: Option<HostdevScsiAdapter>,
	pub address: Option<DriveAddress>,
}

/// SCSI device reached through iSCSI
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevScsiSourceIscsi {
	#[xml_data(attr, default)]
	pub name: String,
	pub hosts: Vec<DiskSourceHost>,
	pub auth: Option<DiskAuth>,
}

/// `<source>` of SCSI host devices; `protocol="iscsi"` selects the iSCSI form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostdevScsiSource {
	Host(HostdevScsiSourceHost),
	Iscsi(HostdevScsiSourceIscsi),
}

impl FixedElement for HostdevScsiSource {
	const TAG: &'static str = "source";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		match self {
			HostdevScsiSource::Host(host) => host.serialize_attributes(serializer),
			HostdevScsiSource::Iscsi(iscsi) => {
				serializer.serialize_attribute("protocol", Cow::Borrowed("iscsi"))?;
				iscsi.serialize_attributes(serializer)
			},
		}
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		match self {
			HostdevScsiSource::Host(host) => host.serialize_content(serializer),
			HostdevScsiSource::Iscsi(iscsi) => iscsi.serialize_content(serializer),
		}
	}
}

enum ScsiSourceState {
	Host(ElementDefaultParseState<HostdevScsiSourceHost>),
	Iscsi(ElementDefaultParseState<HostdevScsiSourceIscsi>),
}

#[doc(hidden)]
#[derive(Default)]
pub struct HostdevScsiSourceState {
	source: Option<ScsiSourceState>,
}

impl FixedElementState for HostdevScsiSourceState {
	type Output = Option<HostdevScsiSource>;

	const TAG: &'static str = "source";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		self.source = match attributes.get("protocol") {
			None => {
				let mut state = ElementDefaultParseState::<HostdevScsiSourceHost>::default();
				attributes.forward(&mut state, &[])?;
				Some(ScsiSourceState::Host(state))
			},
			Some("iscsi") => {
				let mut state = ElementDefaultParseState::<HostdevScsiSourceIscsi>::default();
				attributes.forward(&mut state, &["protocol"])?;
				Some(ScsiSourceState::Iscsi(state))
			},
			Some(protocol) => {
				tracing::debug!(protocol, "ignoring scsi hostdev source of unknown protocol");
				None
			},
		};
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		match &mut self.source {
			Some(ScsiSourceState::Host(state)) => ElementState::parse_element_inner_node(state, tag, parser),
			Some(ScsiSourceState::Iscsi(state)) => ElementState::parse_element_inner_node(state, tag, parser),
			None => parser.skip_element(),
		}
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(match self.source {
			Some(ScsiSourceState::Host(state)) => Some(HostdevScsiSource::Host(ElementState::parse_element_finish(state)?)),
			Some(ScsiSourceState::Iscsi(state)) => {
				Some(HostdevScsiSource::Iscsi(ElementState::parse_element_finish(state)?))
			},
			None => None,
		})
	}
}

/// `mode="subsystem" type="scsi"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevSubsysScsi {
	#[xml_data(attr)]
	pub sgio: Option<String>,
	#[xml_data(attr)]
	pub rawio: Option<String>,
	#[xml_data(state = "ParseElementMaybe<HostdevScsiSourceState>")]
	pub source: Option<HostdevScsiSource>,
	pub read_only: Option<ReadOnly>,
	pub shareable: Option<Shareable>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevScsiHostSource {
	#[xml_data(attr)]
	pub protocol: Option<String>,
	#[xml_data(attr)]
	pub wwpn: Option<String>,
}

/// `mode="subsystem" type="scsi_host"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevSubsysScsiHost {
	pub source: Option<HostdevScsiHostSource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevUsbSource {
	pub address: Option<UsbAddress>,
}

/// `mode="subsystem" type="usb"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevSubsysUsb {
	pub source: Option<HostdevUsbSource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "driver")]
pub struct HostdevPciDriver {
	#[xml_data(attr)]
	pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevPciSource {
	pub address: Option<PciAddress>,
}

/// `mode="subsystem" type="pci"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevSubsysPci {
	pub driver: Option<HostdevPciDriver>,
	pub source: Option<HostdevPciSource>,
}

/// Mediated device address: `<address uuid="..."/>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "address")]
pub struct MdevAddress {
	#[xml_data(attr, default)]
	pub uuid: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevMdevSource {
	pub address: Option<MdevAddress>,
}

/// `mode="subsystem" type="mdev"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevSubsysMdev {
	#[xml_data(attr)]
	pub model: Option<String>,
	pub source: Option<HostdevMdevSource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevStorageSource {
	#[xml_data(child)]
	pub block: String,
}

/// `mode="capabilities" type="storage"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevCapsStorage {
	pub source: Option<HostdevStorageSource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevMiscSource {
	#[xml_data(child = "char")]
	pub char_dev: String,
}

/// `mode="capabilities" type="misc"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevCapsMisc {
	pub source: Option<HostdevMiscSource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct HostdevNetSource {
	#[xml_data(child)]
	pub interface: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "ip")]
pub struct HostdevIp {
	#[xml_data(attr)]
	pub address: Option<String>,
	#[xml_data(attr)]
	pub family: Option<String>,
	#[xml_data(attr)]
	pub prefix: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "route")]
pub struct HostdevRoute {
	#[xml_data(attr)]
	pub family: Option<String>,
	#[xml_data(attr)]
	pub address: Option<String>,
	#[xml_data(attr)]
	pub gateway: Option<String>,
}

/// `mode="capabilities" type="net"`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hostdev")]
pub struct HostdevCapsNet {
	pub source: Option<HostdevNetSource>,
	pub ips: Vec<HostdevIp>,
	pub routes: Vec<HostdevRoute>,
}

macro_rules! hostdev_kinds {
	($($(#[$meta:meta])* $variant:ident($payload:ty) => ($mode:tt, $kind:tt),)*) => {
		/// Host device payload, selected by `mode` and `type`
		#[derive(Clone, Debug, PartialEq, Eq)]
		pub enum HostdevKind {
			$($(#[$meta])* $variant($payload),)*
		}

		impl HostdevKind {
			/// Value of the `mode` attribute
			pub fn mode(&self) -> &'static str {
				match self {
					$(HostdevKind::$variant(_) => $mode,)*
				}
			}

			/// Value of the `type` attribute
			pub fn kind(&self) -> &'static str {
				match self {
					$(HostdevKind::$variant(_) => $kind,)*
				}
			}

			fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
				match self {
					$(HostdevKind::$variant(payload) => payload.serialize_attributes(serializer),)*
				}
			}

			fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
				match self {
					$(HostdevKind::$variant(payload) => payload.serialize_content(serializer),)*
				}
			}
		}

		enum KindState {
			$($variant(ElementDefaultParseState<$payload>),)*
		}

		impl KindState {
			fn new(mode: &str, kind: &str) -> Option<Self> {
				match (mode, kind) {
					$(($mode, $kind) => Some(KindState::$variant(Default::default())),)*
					_ => None,
				}
			}

			fn parse_attributes(&mut self, attributes: &Attributes) -> Result<()> {
				match self {
					$(KindState::$variant(state) => attributes.forward(state, &["mode", "type", "managed"]),)*
				}
			}

			fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
				match self {
					$(KindState::$variant(state) => ElementState::parse_element_inner_node(state, tag, parser),)*
				}
			}

			fn finish(self) -> Result<HostdevKind> {
				Ok(match self {
					$(KindState::$variant(state) => HostdevKind::$variant(ElementState::parse_element_finish(state)?),)*
				})
			}
		}
	};
}

hostdev_kinds! {
	SubsysScsi(HostdevSubsysScsi) => ("subsystem", "scsi"),
	SubsysScsiHost(HostdevSubsysScsiHost) => ("subsystem", "scsi_host"),
	SubsysUsb(HostdevSubsysUsb) => ("subsystem", "usb"),
	SubsysPci(HostdevSubsysPci) => ("subsystem", "pci"),
	SubsysMdev(HostdevSubsysMdev) => ("subsystem", "mdev"),
	CapsStorage(HostdevCapsStorage) => ("capabilities", "storage"),
	CapsMisc(HostdevCapsMisc) => ("capabilities", "misc"),
	/// Network interface of a container host
	CapsNet(HostdevCapsNet) => ("capabilities", "net"),
}

/// `<hostdev>` device
///
/// Without `kind` neither `mode` nor `type` are written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hostdev {
	pub managed: Option<String>,
	pub kind: Option<HostdevKind>,
	pub boot: Option<DeviceBoot>,
	pub address: Option<Address>,
}

#[doc(hidden)]
#[derive(Default)]
pub struct HostdevState {
	managed: Option<String>,
	kind: Option<KindState>,
	boot: InnerDefaultParseState<Option<DeviceBoot>>,
	address: InnerDefaultParseState<Option<Address>>,
}

impl FixedElementState for HostdevState {
	type Output = Hostdev;

	const TAG: &'static str = "hostdev";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		let mode = attributes.get("mode").ok_or_else(|| errors::missing_attribute("mode"))?;
		let kind = attributes.get("type").ok_or_else(|| errors::missing_attribute("type"))?;
		self.kind = KindState::new(mode, kind);
		match &mut self.kind {
			Some(state) => state.parse_attributes(attributes)?,
			None => tracing::debug!(mode, kind, "hostdev of unknown mode and type"),
		}
		self.managed = attributes.get("managed").map(str::to_owned);
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		let parser = try_inner!(self.boot, tag, parser);
		let parser = try_inner!(self.address, tag, parser);
		match &mut self.kind {
			Some(state) => state.parse_inner_node(tag, parser),
			None => parser.skip_element(),
		}
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(Hostdev {
			managed: self.managed,
			kind: self.kind.map(KindState::finish).transpose()?,
			boot: self.boot.parse_inner_finish()?,
			address: self.address.parse_inner_finish()?,
		})
	}
}

impl parser::Element for Hostdev {
	type ParseState = HostdevState;
}

impl FixedElement for Hostdev {
	const TAG: &'static str = "hostdev";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		if let Some(kind) = &self.kind {
			serializer.serialize_attribute("mode", Cow::Borrowed(kind.mode()))?;
			serializer.serialize_attribute("type", Cow::Borrowed(kind.kind()))?;
			kind.serialize_attributes(serializer)?;
		}
		if let Some(managed) = &self.managed {
			serializer.serialize_attribute("managed", Cow::Borrowed(managed))?;
		}
		Ok(())
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		if let Some(kind) = &self.kind {
			kind.serialize_content(serializer)?;
		}
		self.boot.serialize_elements(serializer)?;
		self.address.serialize_elements(serializer)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		Document,
		Error,
	};

	#[test]
	fn subsystem_pci() {
		let xml = r#"<hostdev mode="subsystem" type="pci"><source><address domain="0x0000" bus="0x03" slot="0x0e" function="0x5"/></source></hostdev>"#;
		let hostdev = Hostdev::from_xml(xml).unwrap();
		assert_eq!(
			hostdev.kind,
			Some(HostdevKind::SubsysPci(HostdevSubsysPci {
				driver: None,
				source: Some(HostdevPciSource {
					address: Some(PciAddress {
						domain: Some(0),
						bus: Some(3),
						slot: Some(14),
						function: Some(5),
						multifunction: None,
					}),
				}),
			}))
		);
		let rendered = [
			r#"<hostdev mode="subsystem" type="pci">"#,
			r#"  <source>"#,
			r#"    <address domain="0x0000" bus="0x03" slot="0x0e" function="0x5"></address>"#,
			r#"  </source>"#,
			r#"</hostdev>"#,
		]
		.join("\n");
		assert_eq!(hostdev.to_xml().unwrap(), rendered);
		assert_eq!(Hostdev::from_xml(&rendered).unwrap(), hostdev);
	}

	#[test]
	fn mandatory_attributes() {
		match Hostdev::from_xml(r#"<hostdev type="pci"/>"#).unwrap_err() {
			Error::MissingAttribute { key } => assert_eq!(key, "mode"),
			other => panic!("unexpected error {:?}", other),
		}
		match Hostdev::from_xml(r#"<hostdev mode="subsystem"/>"#).unwrap_err() {
			Error::MissingAttribute { key } => assert_eq!(key, "type"),
			other => panic!("unexpected error {:?}", other),
		}
	}

	#[test]
	fn attribute_order() {
		let xml = [
			r#"<hostdev mode="subsystem" type="scsi" sgio="unfiltered" rawio="yes" managed="yes">"#,
			r#"  <source>"#,
			r#"    <adapter name="scsi_host0"></adapter>"#,
			r#"    <address bus="0" target="0" unit="0"></address>"#,
			r#"  </source>"#,
			r#"  <readonly></readonly>"#,
			r#"  <boot order="2"></boot>"#,
			r#"  <address type="drive" controller="0" bus="0" target="0" unit="1"></address>"#,
			r#"</hostdev>"#,
		]
		.join("\n");
		let hostdev = Hostdev::from_xml(&xml).unwrap();
		assert_eq!(hostdev.managed.as_deref(), Some("yes"));
		assert_eq!(hostdev.boot, Some(DeviceBoot { order: 2 }));
		match &hostdev.kind {
			Some(HostdevKind::SubsysScsi(scsi)) => {
				assert_eq!(scsi.rawio.as_deref(), Some("yes"));
				assert!(scsi.read_only.is_some());
				match &scsi.source {
					Some(HostdevScsiSource::Host(host)) => {
						assert_eq!(host.adapter.as_ref().map(|a| a.name.as_str()), Some("scsi_host0"));
						assert_eq!(host.address.as_ref().and_then(|a| a.unit), Some(0));
					},
					other => panic!("unexpected source {:?}", other),
				}
			},
			other => panic!("unexpected kind {:?}", other),
		}
		assert_eq!(hostdev.to_xml().unwrap(), xml);
	}

	#[test]
	fn scsi_iscsi_source() {
		let xml = [
			r#"<hostdev mode="subsystem" type="scsi">"#,
			r#"  <source protocol="iscsi" name="iqn.2014-08.com.example:iscsi-nopool/1">"#,
			r#"    <host name="example.org" port="3260"></host>"#,
			r#"    <auth username="myname">"#,
			r#"      <secret type="iscsi" usage="mycluster_myname"></secret>"#,
			r#"    </auth>"#,
			r#"  </source>"#,
			r#"</hostdev>"#,
		]
		.join("\n");
		let hostdev = Hostdev::from_xml(&xml).unwrap();
		match &hostdev.kind {
			Some(HostdevKind::SubsysScsi(HostdevSubsysScsi {
				source: Some(HostdevScsiSource::Iscsi(iscsi)),
				..
			})) => {
				assert_eq!(iscsi.name, "iqn.2014-08.com.example:iscsi-nopool/1");
				assert_eq!(iscsi.hosts.len(), 1);
				assert_eq!(iscsi.auth.as_ref().and_then(|a| a.username.as_deref()), Some("myname"));
			},
			other => panic!("unexpected kind {:?}", other),
		}
		assert_eq!(hostdev.to_xml().unwrap(), xml);
	}

	#[test]
	fn scsi_unknown_protocol() {
		let hostdev = Hostdev::from_xml(
			r#"<hostdev mode="subsystem" type="scsi"><source protocol="nbd" name="x"><host name="y"/></source><shareable/></hostdev>"#,
		)
		.unwrap();
		match &hostdev.kind {
			Some(HostdevKind::SubsysScsi(scsi)) => {
				assert_eq!(scsi.source, None);
				assert!(scsi.shareable.is_some());
			},
			other => panic!("unexpected kind {:?}", other),
		}
	}

	#[test]
	fn capabilities() {
		for xml in &[
			"<hostdev mode=\"capabilities\" type=\"storage\">\n  <source>\n    <block>/dev/sdf1</block>\n  </source>\n</hostdev>",
			"<hostdev mode=\"capabilities\" type=\"misc\">\n  <source>\n    <char>/dev/input/event3</char>\n  </source>\n</hostdev>",
			concat!(
				"<hostdev mode=\"capabilities\" type=\"net\">\n",
				"  <source>\n",
				"    <interface>eth0</interface>\n",
				"  </source>\n",
				"  <ip address=\"192.168.122.2\" family=\"ipv4\"></ip>\n",
				"  <ip address=\"2003:db8:1:0:214:1234:fe0b:3596\" family=\"ipv6\" prefix=\"24\"></ip>\n",
				"  <route family=\"ipv4\" address=\"0.0.0.0\" gateway=\"192.168.122.1\"></route>\n",
				"</hostdev>",
			),
		] {
			let hostdev = Hostdev::from_xml(xml).unwrap();
			assert_eq!(hostdev.kind.as_ref().map(HostdevKind::mode), Some("capabilities"));
			assert_eq!(&hostdev.to_xml().unwrap(), xml);
		}
	}

	#[test]
	fn usb_and_mdev() {
		let xml = [
			r#"<hostdev mode="subsystem" type="usb" managed="yes">"#,
			r#"  <source>"#,
			r#"    <address bus="1" device="3"></address>"#,
			r#"  </source>"#,
			r#"</hostdev>"#,
		]
		.join("\n");
		let hostdev = Hostdev::from_xml(&xml).unwrap();
		assert_eq!(hostdev.to_xml().unwrap(), xml);

		let xml = [
			r#"<hostdev mode="subsystem" type="mdev" model="vfio-pci">"#,
			r#"  <source>"#,
			r#"    <address uuid="c2177883-f1bb-47f0-914d-32a22e3a8804"></address>"#,
			r#"  </source>"#,
			r#"</hostdev>"#,
		]
		.join("\n");
		let hostdev = Hostdev::from_xml(&xml).unwrap();
		assert_eq!(hostdev.kind.as_ref().map(HostdevKind::kind), Some("mdev"));
		assert_eq!(hostdev.to_xml().unwrap(), xml);
	}

	#[test]
	fn unknown_pair_keeps_common_fields() {
		let hostdev = Hostdev::from_xml(
			r#"<hostdev mode="capabilities" type="pci" managed="no"><source><x/></source><boot order="1"/></hostdev>"#,
		)
		.unwrap();
		assert_eq!(hostdev.kind, None);
		assert_eq!(hostdev.boot, Some(DeviceBoot { order: 1 }));
		assert_eq!(
			hostdev.to_xml().unwrap(),
			"<hostdev managed=\"no\">\n  <boot order=\"1\"></boot>\n</hostdev>",
		);
	}
}
