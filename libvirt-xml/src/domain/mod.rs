#![allow(missing_docs)] // element and attribute names document the fields
//! Domain (guest) definitions and the device elements used for hot-plugging
//!
//! Most types are plain records deriving [`Element`](crate::Element); the devices whose shape
//! depends on a discriminator ([`Address`], [`Controller`], [`Filesystem`], [`Rng`],
//! [`Hostdev`]) carry enums with hand-written codecs.

mod address;
mod chardev;
mod clock;
mod controller;
mod cpu;
mod devices;
mod disk;
mod features;
mod filesystem;
mod hostdev;
mod interface;
mod memory;
mod os;
mod rng;
mod security;

pub use self::{
	address::*,
	chardev::*,
	clock::*,
	controller::*,
	cpu::*,
	devices::*,
	disk::*,
	features::*,
	filesystem::*,
	hostdev::*,
	interface::*,
	memory::*,
	os::*,
	rng::*,
	security::*,
};

use crate::Element;

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "resource")]
pub struct Resource {
	#[xml_data(child)]
	pub partition: Option<String>,
}

/// `<domain>` document
///
/// Fields are in the order libvirt writes the elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "domain")]
pub struct Domain {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub id: Option<i32>,
	#[xml_data(child)]
	pub name: String,
	#[xml_data(child)]
	pub uuid: Option<String>,
	#[xml_data(child)]
	pub title: Option<String>,
	#[xml_data(child)]
	pub description: Option<String>,
	pub max_memory: Option<MaxMemory>,
	pub memory: Option<Memory>,
	pub current_memory: Option<CurrentMemory>,
	pub block_io_tune: Option<BlockIoTune>,
	pub memory_tune: Option<MemoryTune>,
	pub memory_backing: Option<MemoryBacking>,
	pub vcpu: Option<Vcpu>,
	pub vcpus: Option<Vcpus>,
	#[xml_data(child)]
	pub iothreads: Option<u32>,
	pub iothread_ids: Option<IoThreadIds>,
	pub cpu_tune: Option<CpuTune>,
	pub numa_tune: Option<NumaTune>,
	pub resource: Option<Resource>,
	pub sysinfo: Option<SysInfo>,
	#[xml_data(child)]
	pub bootloader: Option<String>,
	#[xml_data(child)]
	pub bootloader_args: Option<String>,
	pub os: Option<Os>,
	pub idmap: Option<IdMap>,
	pub features: Option<FeatureList>,
	pub cpu: Option<Cpu>,
	pub clock: Option<Clock>,
	#[xml_data(child)]
	pub on_poweroff: Option<String>,
	#[xml_data(child)]
	pub on_reboot: Option<String>,
	#[xml_data(child)]
	pub on_crash: Option<String>,
	pub pm: Option<Pm>,
	pub devices: Option<DeviceList>,
	pub seclabels: Vec<SecLabel>,
	pub keywrap: Option<KeyWrap>,
}
