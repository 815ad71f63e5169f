//! `<devices>` list and the devices without a discriminated payload

use crate::{
	domain::{
		Address,
		Channel,
		Console,
		Controller,
		Disk,
		Filesystem,
		Hostdev,
		Interface,
		Rng,
		Serial,
	},
	Element,
};

/// `<boot order="N"/>` on bootable devices
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "boot")]
pub struct DeviceBoot {
	#[xml_data(attr, default)]
	pub order: u32,
}

/// Presence flag `<readonly/>`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "readonly")]
pub struct ReadOnly;

/// Presence flag `<shareable/>`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "shareable")]
pub struct Shareable;

/// User visible device alias
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "alias")]
pub struct Alias {
	#[xml_data(attr, default)]
	pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "input")]
pub struct Input {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(attr)]
	pub bus: Option<String>,
	pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "listen")]
pub struct GraphicListener {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(attr)]
	pub address: Option<String>,
	#[xml_data(attr)]
	pub network: Option<String>,
	#[xml_data(attr)]
	pub socket: Option<String>,
}

/// `<graphics>` display
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "graphics")]
pub struct Graphics {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(attr = "autoport")]
	pub auto_port: Option<String>,
	#[xml_data(attr)]
	pub port: Option<i32>,
	#[xml_data(attr = "tlsPort")]
	pub tls_port: Option<i32>,
	#[xml_data(attr)]
	pub websocket: Option<i32>,
	#[xml_data(attr)]
	pub listen: Option<String>,
	#[xml_data(attr)]
	pub socket: Option<String>,
	#[xml_data(attr)]
	pub keymap: Option<String>,
	#[xml_data(attr)]
	pub passwd: Option<String>,
	#[xml_data(attr = "passwdValidTo")]
	pub passwd_valid_to: Option<String>,
	#[xml_data(attr)]
	pub connected: Option<String>,
	#[xml_data(attr = "sharePolicy")]
	pub share_policy: Option<String>,
	#[xml_data(attr = "defaultMode")]
	pub default_mode: Option<String>,
	#[xml_data(attr)]
	pub display: Option<String>,
	#[xml_data(attr)]
	pub xauth: Option<String>,
	#[xml_data(attr)]
	pub fullscreen: Option<String>,
	#[xml_data(attr = "replaceUser")]
	pub replace_user: Option<String>,
	#[xml_data(attr = "multiUser")]
	pub multi_user: Option<String>,
	pub listeners: Vec<GraphicListener>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "acceleration")]
pub struct VideoAccel {
	#[xml_data(attr)]
	pub accel3d: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "model")]
pub struct VideoModel {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(attr)]
	pub heads: Option<u32>,
	#[xml_data(attr)]
	pub ram: Option<u32>,
	#[xml_data(attr)]
	pub vram: Option<u32>,
	#[xml_data(attr)]
	pub vram64: Option<u32>,
	#[xml_data(attr)]
	pub vgamem: Option<u32>,
	#[xml_data(attr)]
	pub primary: Option<String>,
	pub accel: Option<VideoAccel>,
}

/// `<video>`; the model is always written
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "video")]
pub struct Video {
	#[xml_data(default)]
	pub model: VideoModel,
	pub address: Option<Address>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "stats")]
pub struct MemBalloonStats {
	#[xml_data(attr, default)]
	pub period: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "memballoon")]
pub struct MemBalloon {
	#[xml_data(attr, default)]
	pub model: String,
	#[xml_data(attr = "autodeflate")]
	pub auto_deflate: Option<String>,
	pub stats: Option<MemBalloonStats>,
	pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "panic")]
pub struct Panic {
	#[xml_data(attr, default)]
	pub model: String,
	pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "codec")]
pub struct SoundCodec {
	#[xml_data(attr = "type", default)]
	pub kind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "sound")]
pub struct Sound {
	#[xml_data(attr, default)]
	pub model: String,
	pub codec: Option<SoundCodec>,
	pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "pagesize")]
pub struct MemorydevPageSize {
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(text)]
	pub value: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct MemorydevSource {
	#[xml_data(child = "nodemask")]
	pub node_mask: Option<String>,
	pub page_size: Option<MemorydevPageSize>,
	#[xml_data(child)]
	pub path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "size")]
pub struct MemorydevSize {
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(text)]
	pub value: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "label")]
pub struct MemorydevLabel {
	pub size: Option<MemorydevSize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "target")]
pub struct MemorydevTarget {
	pub size: Option<MemorydevSize>,
	#[xml_data(child)]
	pub node: Option<u32>,
	pub label: Option<MemorydevLabel>,
}

/// Hot-pluggable memory module (`<memory model="dimm">`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "memory")]
pub struct Memorydev {
	#[xml_data(attr, default)]
	pub model: String,
	#[xml_data(attr)]
	pub access: Option<String>,
	pub source: Option<MemorydevSource>,
	pub target: Option<MemorydevTarget>,
	pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "watchdog")]
pub struct Watchdog {
	#[xml_data(attr, default)]
	pub model: String,
	#[xml_data(attr)]
	pub action: Option<String>,
	pub address: Option<Address>,
}

/// `<devices>` of a domain
///
/// Device kinds are written grouped, in this field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "devices")]
pub struct DeviceList {
	#[xml_data(child)]
	pub emulator: Option<String>,
	pub controllers: Vec<Controller>,
	pub disks: Vec<Disk>,
	pub filesystems: Vec<Filesystem>,
	pub interfaces: Vec<Interface>,
	pub serials: Vec<Serial>,
	pub consoles: Vec<Console>,
	pub inputs: Vec<Input>,
	pub graphics: Vec<Graphics>,
	pub videos: Vec<Video>,
	pub channels: Vec<Channel>,
	pub mem_balloon: Option<MemBalloon>,
	pub panics: Vec<Panic>,
	pub sounds: Vec<Sound>,
	pub rngs: Vec<Rng>,
	pub hostdevs: Vec<Hostdev>,
	pub memorydevs: Vec<Memorydev>,
	pub watchdog: Option<Watchdog>,
}
