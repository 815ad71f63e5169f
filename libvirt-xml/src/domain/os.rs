//! `<os>` boot configuration and `<sysinfo>` tables

use crate::Element;

/// `<type arch=".." machine="..">hvm</type>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "type")]
pub struct OsType {
	#[xml_data(attr)]
	pub arch: Option<String>,
	#[xml_data(attr)]
	pub machine: Option<String>,
	#[xml_data(text)]
	pub kind: String,
}

/// Firmware image
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "loader")]
pub struct Loader {
	#[xml_data(attr)]
	pub readonly: Option<String>,
	#[xml_data(attr)]
	pub secure: Option<String>,
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(text)]
	pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "nvram")]
pub struct NvRam {
	#[xml_data(attr)]
	pub template: Option<String>,
	#[xml_data(text)]
	pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "boot")]
pub struct BootDevice {
	#[xml_data(attr, default)]
	pub dev: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "bootmenu")]
pub struct BootMenu {
	#[xml_data(attr)]
	pub enable: Option<String>,
	#[xml_data(attr)]
	pub timeout: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "bios")]
pub struct Bios {
	#[xml_data(attr = "useserial")]
	pub use_serial: Option<String>,
	#[xml_data(attr = "rebootTimeout")]
	pub reboot_timeout: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "smbios")]
pub struct Smbios {
	#[xml_data(attr, default)]
	pub mode: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "table")]
pub struct AcpiTable {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(text)]
	pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "acpi")]
pub struct Acpi {
	pub tables: Vec<AcpiTable>,
}

/// Environment variable for container init
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "initenv")]
pub struct InitEnv {
	#[xml_data(attr, default)]
	pub name: String,
	#[xml_data(text)]
	pub value: String,
}

/// `<os>`
///
/// Covers BIOS/UEFI boot, direct kernel boot and container init.
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "os")]
pub struct Os {
	pub os_type: Option<OsType>,
	#[xml_data(child)]
	pub init: Option<String>,
	#[xml_data(child = "initarg")]
	pub init_args: Vec<String>,
	pub init_env: Vec<InitEnv>,
	#[xml_data(child = "initdir")]
	pub init_dir: Option<String>,
	#[xml_data(child = "inituser")]
	pub init_user: Option<String>,
	#[xml_data(child = "initgroup")]
	pub init_group: Option<String>,
	pub loader: Option<Loader>,
	pub nvram: Option<NvRam>,
	#[xml_data(child)]
	pub kernel: Option<String>,
	#[xml_data(child)]
	pub initrd: Option<String>,
	#[xml_data(child)]
	pub cmdline: Option<String>,
	#[xml_data(child)]
	pub dtb: Option<String>,
	pub acpi: Option<Acpi>,
	pub boot_devices: Vec<BootDevice>,
	pub boot_menu: Option<BootMenu>,
	pub bios: Option<Bios>,
	pub smbios: Option<Smbios>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "entry")]
pub struct SysInfoEntry {
	#[xml_data(attr, default)]
	pub name: String,
	#[xml_data(text)]
	pub value: String,
}

macro_rules! sysinfo_sections {
	($($name:ident => $tag:tt,)*) => {$(
		#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			pub entries: Vec<SysInfoEntry>,
		}
	)*};
}

sysinfo_sections! {
	SysInfoSystem => "system",
	SysInfoBios => "bios",
	SysInfoBaseBoard => "baseBoard",
}

/// SMBIOS values presented to the guest
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "sysinfo")]
pub struct SysInfo {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	pub system: Option<SysInfoSystem>,
	pub bios: Option<SysInfoBios>,
	pub base_board: Option<SysInfoBaseBoard>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn bios_boot() {
		let xml = [
			r#"<os>"#,
			r#"  <type arch="x86_64" machine="pc-i440fx-2.9">hvm</type>"#,
			r#"  <loader readonly="yes" secure="no" type="pflash">/usr/share/OVMF/OVMF_CODE.fd</loader>"#,
			r#"  <nvram template="/usr/share/OVMF/OVMF_VARS.fd">/var/lib/libvirt/nvram/guest_VARS.fd</nvram>"#,
			r#"  <boot dev="hd"></boot>"#,
			r#"  <boot dev="cdrom"></boot>"#,
			r#"  <bootmenu enable="yes" timeout="3000"></bootmenu>"#,
			r#"  <bios useserial="yes" rebootTimeout="0"></bios>"#,
			r#"  <smbios mode="sysinfo"></smbios>"#,
			r#"</os>"#,
		]
		.join("\n");
		let os = Os::from_xml(&xml).unwrap();
		assert_eq!(os.os_type.as_ref().map(|t| t.kind.as_str()), Some("hvm"));
		assert_eq!(os.boot_devices.len(), 2);
		assert_eq!(os.bios.as_ref().and_then(|b| b.reboot_timeout), Some(0));
		assert_eq!(os.to_xml().unwrap(), xml);
	}

	#[test]
	fn container_init() {
		let xml = [
			r#"<os>"#,
			r#"  <type>exe</type>"#,
			r#"  <init>/bin/systemd</init>"#,
			r#"  <initarg>--unit</initarg>"#,
			r#"  <initarg>emergency.service</initarg>"#,
			r#"  <initenv name="MYENV">some value</initenv>"#,
			r#"  <initdir>/my/custom/cwd</initdir>"#,
			r#"  <inituser>tester</inituser>"#,
			r#"  <initgroup>1000</initgroup>"#,
			r#"</os>"#,
		]
		.join("\n");
		let os = Os::from_xml(&xml).unwrap();
		assert_eq!(os.init_args, vec!["--unit".to_owned(), "emergency.service".to_owned()]);
		assert_eq!(os.init_env[0].value, "some value");
		assert_eq!(os.to_xml().unwrap(), xml);
	}

	#[test]
	fn sysinfo() {
		let xml = [
			r#"<sysinfo type="smbios">"#,
			r#"  <system>"#,
			r#"    <entry name="manufacturer">Fedora</entry>"#,
			r#"    <entry name="product">Virt-Manager</entry>"#,
			r#"  </system>"#,
			r#"  <baseBoard>"#,
			r#"    <entry name="serial">65535</entry>"#,
			r#"  </baseBoard>"#,
			r#"</sysinfo>"#,
		]
		.join("\n");
		let sysinfo = SysInfo::from_xml(&xml).unwrap();
		assert_eq!(sysinfo.bios, None);
		assert_eq!(sysinfo.system.as_ref().map(|s| s.entries.len()), Some(2));
		assert_eq!(sysinfo.to_xml().unwrap(), xml);
	}
}
