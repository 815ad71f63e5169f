//! `<interface>` network devices

use crate::{
	domain::{
		Address,
		Alias,
		DeviceBoot,
	},
	Element,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "mac")]
pub struct InterfaceMac {
	#[xml_data(attr, default)]
	pub address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "model")]
pub struct InterfaceModel {
	#[xml_data(attr = "type", default)]
	pub kind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "local")]
pub struct InterfaceSourceLocal {
	#[xml_data(attr)]
	pub address: Option<String>,
	#[xml_data(attr)]
	pub port: Option<u32>,
}

/// `<source>` of an interface
///
/// Also used for the character device sources of egd rng backends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct InterfaceSource {
	#[xml_data(attr)]
	pub bridge: Option<String>,
	#[xml_data(attr)]
	pub dev: Option<String>,
	#[xml_data(attr)]
	pub network: Option<String>,
	#[xml_data(attr)]
	pub address: Option<String>,
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub path: Option<String>,
	#[xml_data(attr)]
	pub mode: Option<String>,
	#[xml_data(attr)]
	pub port: Option<u32>,
	#[xml_data(attr)]
	pub service: Option<String>,
	#[xml_data(attr)]
	pub host: Option<String>,
	pub local: Option<InterfaceSourceLocal>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "target")]
pub struct InterfaceTarget {
	#[xml_data(attr, default)]
	pub dev: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "link")]
pub struct InterfaceLink {
	#[xml_data(attr, default)]
	pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "script")]
pub struct InterfaceScript {
	#[xml_data(attr, default)]
	pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "driver")]
pub struct InterfaceDriver {
	#[xml_data(attr, default)]
	pub name: String,
	#[xml_data(attr)]
	pub queues: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "virtualport")]
pub struct InterfaceVirtualport {
	#[xml_data(attr = "type", default)]
	pub kind: String,
}

macro_rules! bandwidth_params {
	($($(#[$meta:meta])* $name:ident => $tag:tt,)*) => {$(
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			#[xml_data(attr)]
			pub average: Option<i32>,
			#[xml_data(attr)]
			pub peak: Option<i32>,
			#[xml_data(attr)]
			pub burst: Option<i32>,
			#[xml_data(attr)]
			pub floor: Option<i32>,
		}
	)*};
}

bandwidth_params! {
	/// Traffic shaping towards the guest
	InterfaceBandwidthInbound => "inbound",
	/// Traffic shaping from the guest
	InterfaceBandwidthOutbound => "outbound",
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "bandwidth")]
pub struct InterfaceBandwidth {
	pub inbound: Option<InterfaceBandwidthInbound>,
	pub outbound: Option<InterfaceBandwidthOutbound>,
}

/// `<interface>` device
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "interface")]
pub struct Interface {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	pub mac: Option<InterfaceMac>,
	pub model: Option<InterfaceModel>,
	pub source: Option<InterfaceSource>,
	pub target: Option<InterfaceTarget>,
	pub alias: Option<Alias>,
	pub link: Option<InterfaceLink>,
	pub boot: Option<DeviceBoot>,
	pub script: Option<InterfaceScript>,
	pub driver: Option<InterfaceDriver>,
	pub virtualport: Option<InterfaceVirtualport>,
	pub bandwidth: Option<InterfaceBandwidth>,
	pub address: Option<Address>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn bridge() {
		let xml = [
			r#"<interface type="bridge">"#,
			r#"  <mac address="52:54:00:39:97:ac"></mac>"#,
			r#"  <model type="virtio"></model>"#,
			r#"  <source bridge="br0"></source>"#,
			r#"  <target dev="vnet0"></target>"#,
			r#"  <alias name="net0"></alias>"#,
			r#"  <link state="up"></link>"#,
			r#"  <boot order="2"></boot>"#,
			r#"  <driver name="vhost" queues="5"></driver>"#,
			r#"  <bandwidth>"#,
			r#"    <inbound average="1000" peak="5000" burst="1024"></inbound>"#,
			r#"    <outbound average="128" floor="1"></outbound>"#,
			r#"  </bandwidth>"#,
			r#"  <address type="pci" domain="0x0000" bus="0x00" slot="0x03" function="0x0"></address>"#,
			r#"</interface>"#,
		]
		.join("\n");
		let interface = Interface::from_xml(&xml).unwrap();
		assert_eq!(interface.driver.as_ref().and_then(|d| d.queues), Some(5));
		assert_eq!(
			interface.bandwidth.and_then(|b| b.inbound),
			Some(InterfaceBandwidthInbound {
				average: Some(1000),
				peak: Some(5000),
				burst: Some(1024),
				floor: None,
			})
		);
		assert_eq!(interface.to_xml().unwrap(), xml);
	}

	#[test]
	fn udp_source_attribute_order() {
		let interface = Interface::from_xml(
			r#"<interface type="udp"><source port="5555" address="192.168.1.1"><local port="5556" address="127.0.0.1"/></source></interface>"#,
		)
		.unwrap();
		assert_eq!(
			interface.to_xml().unwrap(),
			[
				r#"<interface type="udp">"#,
				r#"  <source address="192.168.1.1" port="5555">"#,
				r#"    <local address="127.0.0.1" port="5556"></local>"#,
				r#"  </source>"#,
				r#"</interface>"#,
			]
			.join("\n"),
		);
	}
}
