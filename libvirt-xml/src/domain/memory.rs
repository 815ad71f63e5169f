//! Memory sizing, backing and tuning of a domain

use crate::Element;

/// `<memory>`: maximum allocation at boot
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "memory")]
pub struct Memory {
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(attr = "dumpCore")]
	pub dump_core: Option<String>,
	#[xml_data(text)]
	pub value: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "currentMemory")]
pub struct CurrentMemory {
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(text)]
	pub value: u64,
}

/// `<maxMemory>`: run time maximum including hotplug slots
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "maxMemory")]
pub struct MaxMemory {
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(attr)]
	pub slots: Option<u32>,
	#[xml_data(text)]
	pub value: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "page")]
pub struct MemoryHugepage {
	#[xml_data(attr, default)]
	pub size: u64,
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(attr)]
	pub nodeset: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hugepages")]
pub struct MemoryHugepages {
	pub pages: Vec<MemoryHugepage>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "nosharepages")]
pub struct MemoryNoSharePages;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "locked")]
pub struct MemoryLocked;

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct MemorySource {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "access")]
pub struct MemoryAccess {
	#[xml_data(attr)]
	pub mode: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "allocation")]
pub struct MemoryAllocation {
	#[xml_data(attr)]
	pub mode: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "memoryBacking")]
pub struct MemoryBacking {
	pub hugepages: Option<MemoryHugepages>,
	pub no_share_pages: Option<MemoryNoSharePages>,
	pub locked: Option<MemoryLocked>,
	pub source: Option<MemorySource>,
	pub access: Option<MemoryAccess>,
	pub allocation: Option<MemoryAllocation>,
}

macro_rules! memory_tune_limits {
	($($name:ident => $tag:tt,)*) => {$(
		#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			#[xml_data(attr)]
			pub unit: Option<String>,
			#[xml_data(text)]
			pub value: u64,
		}
	)*};
}

memory_tune_limits! {
	MemoryHardLimit => "hard_limit",
	MemorySoftLimit => "soft_limit",
	MemoryMinGuarantee => "min_guarantee",
	MemorySwapHardLimit => "swap_hard_limit",
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "memtune")]
pub struct MemoryTune {
	pub hard_limit: Option<MemoryHardLimit>,
	pub soft_limit: Option<MemorySoftLimit>,
	pub min_guarantee: Option<MemoryMinGuarantee>,
	pub swap_hard_limit: Option<MemorySwapHardLimit>,
}

/// Per-device weights and throttles; the throttles are always written
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "device")]
pub struct BlockIoTuneDevice {
	#[xml_data(child)]
	pub path: String,
	#[xml_data(child)]
	pub weight: Option<u32>,
	#[xml_data(child)]
	pub read_iops_sec: u32,
	#[xml_data(child)]
	pub write_iops_sec: u32,
	#[xml_data(child)]
	pub read_bytes_sec: u32,
	#[xml_data(child)]
	pub write_bytes_sec: u32,
}

/// `<blkiotune>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "blkiotune")]
pub struct BlockIoTune {
	#[xml_data(child)]
	pub weight: Option<u32>,
	pub devices: Vec<BlockIoTuneDevice>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn memory_value_and_unit() {
		let memory = Memory::from_xml(r#"<memory unit="KiB" dumpCore="on"> 1048576 </memory>"#).unwrap();
		assert_eq!(memory.value, 1048576);
		assert_eq!(memory.to_xml().unwrap(), r#"<memory unit="KiB" dumpCore="on">1048576</memory>"#);

		match MaxMemory::from_xml(r#"<maxMemory slots="16">lots</maxMemory>"#).unwrap_err() {
			crate::Error::Format { key, value } => {
				assert_eq!(key, "maxMemory");
				assert_eq!(value, "lots");
			},
			other => panic!("unexpected error {:?}", other),
		}
	}

	#[test]
	fn backing() {
		let xml = [
			r#"<memoryBacking>"#,
			r#"  <hugepages>"#,
			r#"    <page size="1" unit="G" nodeset="0-3,5"></page>"#,
			r#"    <page size="2" unit="M" nodeset="4"></page>"#,
			r#"  </hugepages>"#,
			r#"  <nosharepages></nosharepages>"#,
			r#"  <locked></locked>"#,
			r#"  <source type="file"></source>"#,
			r#"  <access mode="shared"></access>"#,
			r#"  <allocation mode="immediate"></allocation>"#,
			r#"</memoryBacking>"#,
		]
		.join("\n");
		let backing = MemoryBacking::from_xml(&xml).unwrap();
		assert_eq!(backing.hugepages.as_ref().map(|h| h.pages.len()), Some(2));
		assert!(backing.locked.is_some());
		assert_eq!(backing.to_xml().unwrap(), xml);
	}

	#[test]
	fn tuning() {
		let xml = [
			r#"<memtune>"#,
			r#"  <hard_limit unit="KiB">9437184</hard_limit>"#,
			r#"  <swap_hard_limit unit="KiB">10485760</swap_hard_limit>"#,
			r#"</memtune>"#,
		]
		.join("\n");
		let tune = MemoryTune::from_xml(&xml).unwrap();
		assert_eq!(tune.soft_limit, None);
		assert_eq!(tune.to_xml().unwrap(), xml);

		let xml = [
			r#"<blkiotune>"#,
			r#"  <weight>800</weight>"#,
			r#"  <device>"#,
			r#"    <path>/dev/sda</path>"#,
			r#"    <weight>1000</weight>"#,
			r#"    <read_iops_sec>0</read_iops_sec>"#,
			r#"    <write_iops_sec>0</write_iops_sec>"#,
			r#"    <read_bytes_sec>0</read_bytes_sec>"#,
			r#"    <write_bytes_sec>0</write_bytes_sec>"#,
			r#"  </device>"#,
			r#"</blkiotune>"#,
		]
		.join("\n");
		let tune = BlockIoTune::from_xml(&xml).unwrap();
		assert_eq!(tune.devices[0].weight, Some(1000));
		assert_eq!(tune.to_xml().unwrap(), xml);
	}
}
