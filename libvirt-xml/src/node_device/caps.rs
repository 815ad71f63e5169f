//! Capabilities of non-PCI node devices

use crate::{
	node_device::{
		NodeDeviceIommuGroup,
		NodeDeviceProduct,
		NodeDeviceVendor,
	},
	Element,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hardware")]
pub struct NodeDeviceSystemHardware {
	#[xml_data(child)]
	pub vendor: String,
	#[xml_data(child)]
	pub version: String,
	#[xml_data(child)]
	pub serial: String,
	#[xml_data(child)]
	pub uuid: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "firmware")]
pub struct NodeDeviceSystemFirmware {
	#[xml_data(child)]
	pub vendor: String,
	#[xml_data(child)]
	pub version: String,
	#[xml_data(child)]
	pub release_date: String,
}

/// `<capability type="system">` of the `computer` device
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceSystemCapability {
	#[xml_data(child)]
	pub product: Option<String>,
	pub hardware: Option<NodeDeviceSystemHardware>,
	pub firmware: Option<NodeDeviceSystemFirmware>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceUsbDeviceCapability {
	#[xml_data(child)]
	pub bus: i32,
	#[xml_data(child)]
	pub device: i32,
	#[xml_data(default)]
	pub product: NodeDeviceProduct,
	#[xml_data(default)]
	pub vendor: NodeDeviceVendor,
}

/// USB interface
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceUsbCapability {
	#[xml_data(child)]
	pub number: i32,
	#[xml_data(child)]
	pub class: i32,
	#[xml_data(child)]
	pub subclass: i32,
	#[xml_data(child)]
	pub protocol: i32,
	#[xml_data(child)]
	pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "link")]
pub struct NodeDeviceNetLink {
	#[xml_data(attr, default)]
	pub state: String,
	#[xml_data(attr)]
	pub speed: Option<String>,
}

/// Offload feature (`rx`, `tso`, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "feature")]
pub struct NodeDeviceNetFeature {
	#[xml_data(attr, default)]
	pub name: String,
}

/// Nested `<capability type="80203"/>` naming the link layer
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceNetSubCapability {
	#[xml_data(attr = "type", default)]
	pub kind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceNetCapability {
	#[xml_data(child)]
	pub interface: String,
	#[xml_data(child)]
	pub address: String,
	pub link: Option<NodeDeviceNetLink>,
	pub features: Vec<NodeDeviceNetFeature>,
	pub capability: Option<NodeDeviceNetSubCapability>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "vports_ops")]
pub struct NodeDeviceScsiVportsOps {
	#[xml_data(child)]
	pub vports: Option<i32>,
	#[xml_data(child = "maxvports")]
	pub max_vports: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "fc_host")]
pub struct NodeDeviceScsiFcHost {
	#[xml_data(child)]
	pub wwnn: Option<String>,
	#[xml_data(child)]
	pub wwpn: Option<String>,
	#[xml_data(child)]
	pub fabric_wwn: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceScsiHostSubCapability {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	pub vports_ops: Option<NodeDeviceScsiVportsOps>,
	pub fc_host: Option<NodeDeviceScsiFcHost>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceScsiHostCapability {
	#[xml_data(child)]
	pub host: i32,
	#[xml_data(child)]
	pub unique_id: i32,
	pub capability: Option<NodeDeviceScsiHostSubCapability>,
}

/// SCSI logical unit
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceScsiCapability {
	#[xml_data(child)]
	pub host: i32,
	#[xml_data(child)]
	pub bus: i32,
	#[xml_data(child)]
	pub target: i32,
	#[xml_data(child)]
	pub lun: i32,
	#[xml_data(child = "type")]
	pub kind: String,
}

/// Removable media state of a storage device
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceStorageSubCapability {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(child)]
	pub media_available: Option<u32>,
	#[xml_data(child)]
	pub media_size: Option<u64>,
	#[xml_data(child)]
	pub media_label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceStorageCapability {
	#[xml_data(child)]
	pub block: Option<String>,
	#[xml_data(child)]
	pub bus: Option<String>,
	#[xml_data(child)]
	pub drive_type: Option<String>,
	#[xml_data(child)]
	pub model: Option<String>,
	#[xml_data(child)]
	pub vendor: Option<String>,
	#[xml_data(child)]
	pub serial: Option<String>,
	#[xml_data(child)]
	pub size: Option<u64>,
	pub capability: Option<NodeDeviceStorageSubCapability>,
}

/// Direct rendering device; `kind` is `primary`, `control` or `render`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceDrmCapability {
	#[xml_data(child = "type")]
	pub kind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "type")]
pub struct NodeDeviceMdevType {
	#[xml_data(attr, default)]
	pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "capability")]
pub struct NodeDeviceMdevCapability {
	pub mdev_type: Option<NodeDeviceMdevType>,
	pub iommu_group: Option<NodeDeviceIommuGroup>,
}

#[cfg(test)]
mod test {
	use crate::{
		node_device::*,
		Document,
	};

	#[test]
	fn system() {
		let xml = [
			r#"<device>"#,
			r#"  <name>computer</name>"#,
			r#"  <capability type="system">"#,
			r#"    <product>2241B36</product>"#,
			r#"    <hardware>"#,
			r#"      <vendor>LENOVO</vendor>"#,
			r#"      <version>ThinkPad T500</version>"#,
			r#"      <serial>R89055N</serial>"#,
			r#"      <uuid>c9488981-5049-11cb-9c1c-993d0230b4cd</uuid>"#,
			r#"    </hardware>"#,
			r#"    <firmware>"#,
			r#"      <vendor>LENOVO</vendor>"#,
			r#"      <version>6FET82WW (3.12 )</version>"#,
			r#"      <release_date>11/26/2009</release_date>"#,
			r#"    </firmware>"#,
			r#"  </capability>"#,
			r#"</device>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&xml).unwrap();
		match &device.capability {
			Some(NodeDeviceCapability::System(system)) => {
				assert_eq!(system.hardware.as_ref().map(|h| h.serial.as_str()), Some("R89055N"));
				assert_eq!(system.firmware.as_ref().map(|f| f.version.as_str()), Some("6FET82WW (3.12 )"));
			},
			other => panic!("unexpected capability {:?}", other),
		}
		assert_eq!(device.to_xml().unwrap(), xml);
	}

	#[test]
	fn usb() {
		let xml = [
			r#"<device>"#,
			r#"  <name>usb_1_1_1_0</name>"#,
			r#"  <parent>usb_1_1</parent>"#,
			r#"  <capability type="usb">"#,
			r#"    <number>0</number>"#,
			r#"    <class>9</class>"#,
			r#"    <subclass>0</subclass>"#,
			r#"    <protocol>0</protocol>"#,
			r#"  </capability>"#,
			r#"</device>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&xml).unwrap();
		assert_eq!(
			device.capability,
			Some(NodeDeviceCapability::Usb(NodeDeviceUsbCapability {
				class: 9,
				..Default::default()
			}))
		);
		assert_eq!(device.to_xml().unwrap(), xml);

		let xml = [
			r#"<capability>"#,
			r#"  <bus>1</bus>"#,
			r#"  <device>2</device>"#,
			r#"  <product id="0x0024">Integrated Rate Matching Hub</product>"#,
			r#"  <vendor id="0x8087">Intel Corp.</vendor>"#,
			r#"</capability>"#,
		]
		.join("\n");
		let device = NodeDeviceUsbDeviceCapability::from_xml(&xml).unwrap();
		assert_eq!(device.product.id, "0x0024");
		assert_eq!(device.to_xml().unwrap(), xml);
	}

	#[test]
	fn net() {
		let xml = [
			r#"<capability type="net">"#,
			r#"  <interface>eth0</interface>"#,
			r#"  <address>00:13:02:b9:f9:d3</address>"#,
			r#"  <link state="up" speed="1000"></link>"#,
			r#"  <feature name="rx"></feature>"#,
			r#"  <feature name="tso"></feature>"#,
			r#"  <capability type="80211"></capability>"#,
			r#"</capability>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&format!("<device><name>net_eth0</name>{}</device>", xml)).unwrap();
		match &device.capability {
			Some(NodeDeviceCapability::Net(net)) => {
				assert_eq!(net.features.len(), 2);
				assert_eq!(net.capability.as_ref().map(|c| c.kind.as_str()), Some("80211"));
				let rendered = net.to_xml().unwrap();
				assert_eq!(rendered, xml.replacen(r#"<capability type="net">"#, "<capability>", 1));
			},
			other => panic!("unexpected capability {:?}", other),
		}
	}

	#[test]
	fn scsi_host_and_scsi() {
		let xml = [
			r#"<capability type="scsi_host">"#,
			r#"  <host>4</host>"#,
			r#"  <unique_id>5</unique_id>"#,
			r#"  <capability type="fc_host">"#,
			r#"    <fc_host>"#,
			r#"      <wwnn>20000000c9831b4b</wwnn>"#,
			r#"      <wwpn>10000000c9831b4b</wwpn>"#,
			r#"    </fc_host>"#,
			r#"  </capability>"#,
			r#"</capability>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&format!("<device><name>scsi_host4</name>{}</device>", xml)).unwrap();
		match &device.capability {
			Some(NodeDeviceCapability::ScsiHost(host)) => {
				assert_eq!(host.unique_id, 5);
				let fc = host.capability.as_ref().and_then(|c| c.fc_host.as_ref());
				assert_eq!(fc.and_then(|f| f.wwpn.as_deref()), Some("10000000c9831b4b"));
				assert_eq!(fc.and_then(|f| f.fabric_wwn.as_deref()), None);
			},
			other => panic!("unexpected capability {:?}", other),
		}

		let device = NodeDevice::from_xml(
			r#"<device><name>scsi_0_0_0_0</name><capability type="scsi"><host>0</host><bus>0</bus><target>0</target><lun>0</lun><type>disk</type></capability></device>"#,
		)
		.unwrap();
		assert_eq!(
			device.capability,
			Some(NodeDeviceCapability::Scsi(NodeDeviceScsiCapability {
				kind: "disk".into(),
				..Default::default()
			}))
		);
	}

	#[test]
	fn storage() {
		let xml = [
			r#"<device>"#,
			r#"  <name>storage_serial_SATA_WDC_WD1600AAJS__WD_WCAP95327154</name>"#,
			r#"  <capability type="storage">"#,
			r#"    <block>/dev/sr0</block>"#,
			r#"    <bus>ata</bus>"#,
			r#"    <drive_type>cdrom</drive_type>"#,
			r#"    <model>DVDRAM GSA-U20N</model>"#,
			r#"    <vendor>HL-DT-ST</vendor>"#,
			r#"    <capability type="removable">"#,
			r#"      <media_available>1</media_available>"#,
			r#"      <media_size>12345678</media_size>"#,
			r#"      <media_label>Fedora-Live</media_label>"#,
			r#"    </capability>"#,
			r#"  </capability>"#,
			r#"</device>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&xml).unwrap();
		match &device.capability {
			Some(NodeDeviceCapability::Storage(storage)) => {
				assert_eq!(storage.size, None);
				let removable = storage.capability.as_ref().unwrap();
				assert_eq!(removable.kind, "removable");
				assert_eq!(removable.media_size, Some(12_345_678));
			},
			other => panic!("unexpected capability {:?}", other),
		}
		assert_eq!(device.to_xml().unwrap(), xml);
	}

	#[test]
	fn mdev() {
		let xml = [
			r#"<device>"#,
			r#"  <name>mdev_4b20d080_1b54_4048_85b3_a6a62d165c01</name>"#,
			r#"  <parent>pci_0000_06_00_0</parent>"#,
			r#"  <capability type="mdev">"#,
			r#"    <type id="nvidia-11"></type>"#,
			r#"    <iommuGroup number="12"></iommuGroup>"#,
			r#"  </capability>"#,
			r#"</device>"#,
		]
		.join("\n");
		let device = NodeDevice::from_xml(&xml).unwrap();
		match &device.capability {
			Some(NodeDeviceCapability::Mdev(mdev)) => {
				assert_eq!(mdev.mdev_type.as_ref().map(|t| t.id.as_str()), Some("nvidia-11"));
				assert_eq!(mdev.iommu_group.as_ref().map(|g| g.number), Some(12));
			},
			other => panic!("unexpected capability {:?}", other),
		}
		assert_eq!(device.to_xml().unwrap(), xml);
	}
}
