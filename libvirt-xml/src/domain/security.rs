//! Security labels, key wrapping and user namespace id maps

use crate::Element;

/// `<seclabel>` of one security driver
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "seclabel")]
pub struct SecLabel {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	#[xml_data(attr)]
	pub model: Option<String>,
	#[xml_data(attr)]
	pub relabel: Option<String>,
	#[xml_data(child)]
	pub label: Option<String>,
	#[xml_data(child = "imagelabel")]
	pub image_label: Option<String>,
	#[xml_data(child = "baselabel")]
	pub base_label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "cipher")]
pub struct KeyWrapCipher {
	#[xml_data(attr, default)]
	pub name: String,
	#[xml_data(attr, default)]
	pub state: String,
}

/// s390 AES/DEA key wrapping
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "keywrap")]
pub struct KeyWrap {
	pub ciphers: Vec<KeyWrapCipher>,
}

macro_rules! id_map_ranges {
	($($name:ident => $tag:tt,)*) => {$(
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			#[xml_data(attr, default)]
			pub start: u32,
			#[xml_data(attr, default)]
			pub target: u32,
			#[xml_data(attr, default)]
			pub count: u32,
		}
	)*};
}

id_map_ranges! {
	IdMapUid => "uid",
	IdMapGid => "gid",
}

/// Container user namespace mapping
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "idmap")]
pub struct IdMap {
	pub uids: Vec<IdMapUid>,
	pub gids: Vec<IdMapGid>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn seclabel() {
		let xml = [
			r#"<seclabel type="dynamic" model="selinux" relabel="yes">"#,
			r#"  <label>system_u:system_r:svirt_t:s0:c392,c662</label>"#,
			r#"  <imagelabel>system_u:object_r:svirt_image_t:s0:c392,c662</imagelabel>"#,
			r#"</seclabel>"#,
		]
		.join("\n");
		let label = SecLabel::from_xml(&xml).unwrap();
		assert_eq!(label.base_label, None);
		assert_eq!(label.to_xml().unwrap(), xml);
	}

	#[test]
	fn idmap_and_keywrap() {
		let idmap = IdMap::from_xml(
			r#"<idmap><gid start="0" target="1000" count="10"/><uid start="0" target="1000" count="10"/></idmap>"#,
		)
		.unwrap();
		assert_eq!(idmap.uids, vec![IdMapUid { start: 0, target: 1000, count: 10 }]);
		assert_eq!(
			idmap.to_xml().unwrap(),
			[
				r#"<idmap>"#,
				r#"  <uid start="0" target="1000" count="10"></uid>"#,
				r#"  <gid start="0" target="1000" count="10"></gid>"#,
				r#"</idmap>"#,
			]
			.join("\n"),
		);

		let keywrap = KeyWrap::from_xml(r#"<keywrap><cipher name="aes" state="off"/></keywrap>"#).unwrap();
		assert_eq!(keywrap.ciphers[0].state, "off");
	}
}
