//! `<disk>` devices

use crate::{
	domain::{
		Address,
		Alias,
		DeviceBoot,
		ReadOnly,
		Shareable,
	},
	number::{
		parse_uint,
		serialize_uint_attribute,
		NumberFormat,
		Radix,
	},
	parser::{
		self,
		ElementParser,
		ElementParserExt,
		FixedElementState,
		InnerDefaultParseState,
		InnerState,
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
#[xml_data(tag = "secret")]
pub struct DiskSecret {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub usage: Option<String>,
	#[xml_data(attr)]
	pub uuid: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "auth")]
pub struct DiskAuth {
	#[xml_data(attr)]
	pub username: Option<String>,
	pub secret: Option<DiskSecret>,
}

/// Remote host of a network disk
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "host")]
pub struct DiskSourceHost {
	#[xml_data(attr)]
	pub transport: Option<String>,
	#[xml_data(attr)]
	pub name: Option<String>,
	#[xml_data(attr)]
	pub port: Option<String>,
	#[xml_data(attr)]
	pub socket: Option<String>,
}

/// `<source>` of a disk; which attributes are used depends on the disk type
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "source")]
pub struct DiskSource {
	#[xml_data(attr)]
	pub file: Option<String>,
	#[xml_data(attr = "dev")]
	pub device: Option<String>,
	#[xml_data(attr)]
	pub protocol: Option<String>,
	#[xml_data(attr)]
	pub name: Option<String>,
	#[xml_data(attr)]
	pub pool: Option<String>,
	#[xml_data(attr)]
	pub volume: Option<String>,
	#[xml_data(attr = "startupPolicy")]
	pub startup_policy: Option<String>,
	pub hosts: Vec<DiskSourceHost>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "driver")]
pub struct DiskDriver {
	#[xml_data(attr)]
	pub name: Option<String>,
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub cache: Option<String>,
	#[xml_data(attr)]
	pub io: Option<String>,
	#[xml_data(attr)]
	pub error_policy: Option<String>,
	#[xml_data(attr)]
	pub discard: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "target")]
pub struct DiskTarget {
	#[xml_data(attr)]
	pub dev: Option<String>,
	#[xml_data(attr)]
	pub bus: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "format")]
pub struct DiskFormat {
	#[xml_data(attr = "type", default)]
	pub kind: String,
}

/// BIOS geometry override
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "geometry")]
pub struct DiskGeometry {
	#[xml_data(attr, default)]
	pub cyls: u32,
	#[xml_data(attr, default)]
	pub heads: u32,
	#[xml_data(attr, default)]
	pub secs: u32,
	#[xml_data(attr)]
	pub trans: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "blockio")]
pub struct DiskBlockIo {
	#[xml_data(attr)]
	pub logical_block_size: Option<u32>,
	#[xml_data(attr)]
	pub physical_block_size: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "encryption")]
pub struct DiskEncryption {
	#[xml_data(attr)]
	pub format: Option<String>,
	pub secrets: Vec<DiskSecret>,
}

/// I/O throttling; every limit is always written
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "iotune")]
pub struct DiskIoTune {
	#[xml_data(child)]
	pub total_bytes_sec: u64,
	#[xml_data(child)]
	pub read_bytes_sec: u64,
	#[xml_data(child)]
	pub write_bytes_sec: u64,
	#[xml_data(child)]
	pub total_iops_sec: u64,
	#[xml_data(child)]
	pub read_iops_sec: u64,
	#[xml_data(child)]
	pub write_iops_sec: u64,
	#[xml_data(child)]
	pub total_bytes_sec_max: u64,
	#[xml_data(child)]
	pub read_bytes_sec_max: u64,
	#[xml_data(child)]
	pub write_bytes_sec_max: u64,
	#[xml_data(child)]
	pub total_iops_sec_max: u64,
	#[xml_data(child)]
	pub read_iops_sec_max: u64,
	#[xml_data(child)]
	pub write_iops_sec_max: u64,
	#[xml_data(child)]
	pub total_bytes_sec_max_length: u64,
	#[xml_data(child)]
	pub read_bytes_sec_max_length: u64,
	#[xml_data(child)]
	pub write_bytes_sec_max_length: u64,
	#[xml_data(child)]
	pub total_iops_sec_max_length: u64,
	#[xml_data(child)]
	pub read_iops_sec_max_length: u64,
	#[xml_data(child)]
	pub write_iops_sec_max_length: u64,
	#[xml_data(child)]
	pub size_iops_sec: u64,
	#[xml_data(child)]
	pub group_name: String,
}

/// Layer of a backing chain, linking to the next lower layer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiskBackingStore {
	pub kind: Option<String>,
	pub index: Option<u32>,
	pub format: Option<DiskFormat>,
	pub source: Option<DiskSource>,
	pub backing_store: Option<Box<DiskBackingStore>>,
}

#[doc(hidden)]
#[derive(Default)]
pub struct DiskBackingStoreState {
	kind: Option<String>,
	index: Option<u32>,
	format: InnerDefaultParseState<Option<DiskFormat>>,
	source: InnerDefaultParseState<Option<DiskSource>>,
	backing_store: InnerDefaultParseState<Option<Box<DiskBackingStore>>>,
}

impl FixedElementState for DiskBackingStoreState {
	type Output = DiskBackingStore;

	const TAG: &'static str = "backingStore";

	fn parse_element_attribute(&mut self, key: &str, value: Cow<'_, str>) -> Result<()> {
		match key {
			"type" => self.kind = Some(value.into_owned()),
			"index" => self.index = Some(parse_uint(key, &value, Radix::Decimal)?),
			_ => (),
		}
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		let parser = try_inner!(self.format, tag, parser);
		let parser = try_inner!(self.source, tag, parser);
		let parser = try_inner!(self.backing_store, tag, parser);
		parser.skip_element()
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(DiskBackingStore {
			kind: self.kind,
			index: self.index,
			format: self.format.parse_inner_finish()?,
			source: self.source.parse_inner_finish()?,
			backing_store: self.backing_store.parse_inner_finish()?,
		})
	}
}

impl parser::Element for DiskBackingStore {
	type ParseState = DiskBackingStoreState;
}

impl FixedElement for DiskBackingStore {
	const TAG: &'static str = "backingStore";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		if let Some(kind) = &self.kind {
			serializer.serialize_attribute("type", Cow::Borrowed(kind))?;
		}
		serialize_uint_attribute(serializer, "index", self.index, NumberFormat::Decimal)
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		self.format.serialize_elements(serializer)?;
		self.source.serialize_elements(serializer)?;
		self.backing_store.serialize_elements(serializer)
	}
}

/// `<disk>` device
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "disk")]
pub struct Disk {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(attr, default)]
	pub device: String,
	#[xml_data(attr)]
	pub snapshot: Option<String>,
	pub driver: Option<DiskDriver>,
	pub auth: Option<DiskAuth>,
	pub source: Option<DiskSource>,
	pub backing_store: Option<DiskBackingStore>,
	pub geometry: Option<DiskGeometry>,
	pub block_io: Option<DiskBlockIo>,
	pub target: Option<DiskTarget>,
	pub io_tune: Option<DiskIoTune>,
	#[xml_data(child)]
	pub serial: Option<String>,
	pub read_only: Option<ReadOnly>,
	pub shareable: Option<Shareable>,
	pub encryption: Option<DiskEncryption>,
	pub alias: Option<Alias>,
	pub address: Option<Address>,
	pub boot: Option<DeviceBoot>,
	#[xml_data(child)]
	pub wwn: Option<String>,
	#[xml_data(child)]
	pub vendor: Option<String>,
	#[xml_data(child)]
	pub product: Option<String>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn file_cdrom() {
		let disk = Disk {
			kind: "file".into(),
			device: "cdrom".into(),
			driver: Some(DiskDriver {
				name: Some("qemu".into()),
				kind: Some("qcow2".into()),
				..Default::default()
			}),
			source: Some(DiskSource {
				file: Some("/var/lib/libvirt/images/demo.qcow2".into()),
				..Default::default()
			}),
			..Default::default()
		};
		let xml = [
			r#"<disk type="file" device="cdrom">"#,
			r#"  <driver name="qemu" type="qcow2"></driver>"#,
			r#"  <source file="/var/lib/libvirt/images/demo.qcow2"></source>"#,
			r#"</disk>"#,
		]
		.join("\n");
		assert_eq!(disk.to_xml().unwrap(), xml);
		assert_eq!(Disk::from_xml(&xml).unwrap(), disk);
	}

	#[test]
	fn network_disk() {
		let xml = [
			r#"<disk type="network" device="disk">"#,
			r#"  <driver name="qemu" type="raw" cache="none" io="native"></driver>"#,
			r#"  <auth username="admin">"#,
			r#"    <secret type="ceph" usage="mypassid"></secret>"#,
			r#"  </auth>"#,
			r#"  <source protocol="rbd" name="pool/image">"#,
			r#"    <host name="mon1.example.org" port="6321"></host>"#,
			r#"    <host name="mon2.example.org" port="6322"></host>"#,
			r#"  </source>"#,
			r#"  <target dev="vdb" bus="virtio"></target>"#,
			r#"  <serial>WD-WMAP9A966149</serial>"#,
			r#"  <shareable></shareable>"#,
			r#"  <address type="pci" domain="0x0000" bus="0x00" slot="0x05" function="0x0"></address>"#,
			r#"  <boot order="1"></boot>"#,
			r#"</disk>"#,
		]
		.join("\n");
		let disk = Disk::from_xml(&xml).unwrap();
		assert_eq!(disk.source.as_ref().map(|s| s.hosts.len()), Some(2));
		assert_eq!(disk.serial.as_deref(), Some("WD-WMAP9A966149"));
		assert!(disk.read_only.is_none());
		assert_eq!(disk.to_xml().unwrap(), xml);
	}

	#[test]
	fn iotune_writes_every_limit() {
		let disk = Disk::from_xml(
			r#"<disk type="block" device="disk"><iotune><total_bytes_sec>1000</total_bytes_sec><group_name>g</group_name></iotune></disk>"#,
		)
		.unwrap();
		let tune = disk.io_tune.clone().unwrap_or_default();
		assert_eq!(tune.total_bytes_sec, 1000);
		assert_eq!(tune.group_name, "g");
		let xml = disk.to_xml().unwrap();
		assert!(xml.contains("    <read_iops_sec>0</read_iops_sec>\n"));
		assert!(xml.contains("    <size_iops_sec>0</size_iops_sec>\n    <group_name>g</group_name>\n  </iotune>"));
		assert_eq!(Disk::from_xml(&xml).unwrap(), disk);
	}

	#[test]
	fn backing_chain() {
		let xml = [
			r#"<disk type="file" device="disk">"#,
			r#"  <source file="/tmp/top.qcow2"></source>"#,
			r#"  <backingStore type="file" index="1">"#,
			r#"    <format type="qcow2"></format>"#,
			r#"    <source file="/tmp/middle.qcow2"></source>"#,
			r#"    <backingStore type="file" index="2">"#,
			r#"      <format type="raw"></format>"#,
			r#"      <source file="/tmp/base.img"></source>"#,
			r#"    </backingStore>"#,
			r#"  </backingStore>"#,
			r#"  <geometry cyls="16383" heads="16" secs="63" trans="lba"></geometry>"#,
			r#"  <blockio logical_block_size="512" physical_block_size="4096"></blockio>"#,
			r#"  <target dev="vda"></target>"#,
			r#"</disk>"#,
		]
		.join("\n");
		let disk = Disk::from_xml(&xml).unwrap();
		let middle = disk.backing_store.as_ref().unwrap();
		assert_eq!(middle.index, Some(1));
		let base = middle.backing_store.as_deref().unwrap();
		assert_eq!(base.format.as_ref().map(|f| f.kind.as_str()), Some("raw"));
		assert_eq!(base.backing_store, None);
		assert_eq!(disk.to_xml().unwrap(), xml);
	}

	#[test]
	fn backing_store_index_format() {
		match Disk::from_xml(r#"<disk type="file" device="disk"><backingStore index="one"/></disk>"#).unwrap_err() {
			crate::Error::Format { key, value } => {
				assert_eq!(key, "index");
				assert_eq!(value, "one");
			},
			other => panic!("unexpected error {:?}", other),
		}
	}
}
