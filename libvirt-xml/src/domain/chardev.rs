//! Character devices: `<console>`, `<serial>` and `<channel>`

use crate::{
	domain::{
		Address,
		Alias,
	},
	Element,
};

/// Host side of a character device
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct ChardevSource {
	#[xml_data(attr)]
	pub mode: Option<String>,
	#[xml_data(attr)]
	pub path: Option<String>,
	#[xml_data(attr)]
	pub append: Option<String>,
	#[xml_data(attr)]
	pub host: Option<String>,
	#[xml_data(attr)]
	pub service: Option<String>,
	#[xml_data(attr)]
	pub tls: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "log")]
pub struct ChardevLog {
	#[xml_data(attr, default)]
	pub file: String,
	#[xml_data(attr)]
	pub append: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "target")]
pub struct ConsoleTarget {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub port: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "target")]
pub struct SerialTarget {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub port: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "target")]
pub struct ChannelTarget {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub name: Option<String>,
	/// Whether the guest agent is connected
	#[xml_data(attr)]
	pub state: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "protocol")]
pub struct SerialProtocol {
	#[xml_data(attr = "type", default)]
	pub kind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "console")]
pub struct Console {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	pub source: Option<ChardevSource>,
	pub target: Option<ConsoleTarget>,
	pub log: Option<ChardevLog>,
	pub alias: Option<Alias>,
	pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "serial")]
pub struct Serial {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	pub source: Option<ChardevSource>,
	pub protocol: Option<SerialProtocol>,
	pub target: Option<SerialTarget>,
	pub log: Option<ChardevLog>,
	pub alias: Option<Alias>,
	pub address: Option<Address>,
}

/// Guest/host communication channel (guest agent, spice vdagent, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "channel")]
pub struct Channel {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	pub source: Option<ChardevSource>,
	pub target: Option<ChannelTarget>,
	pub log: Option<ChardevLog>,
	pub alias: Option<Alias>,
	pub address: Option<Address>,
}
