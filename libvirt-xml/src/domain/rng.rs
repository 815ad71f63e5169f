//! `<rng>` device and its `<backend model="...">`

use crate::{
	domain::{
		Address,
		InterfaceSource,
	},
	parser::{
		Attributes,
		ElementDefaultParseState,
		ElementParser,
		ElementParserExt,
		ElementState,
		FixedElementState,
		ParseElementMaybe,
	},
	serializer::{
		FixedElement,
		Serializer,
	},
	Element,
	Result,
};
use std::borrow::Cow;

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "rate")]
pub struct RngRate {
	#[xml_data(attr, default)]
	pub bytes: u32,
	#[xml_data(attr)]
	pub period: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "protocol")]
pub struct RngProtocol {
	#[xml_data(attr = "type", default)]
	pub kind: String,
}

/// Payload of `model="egd"` backends
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "backend")]
pub struct RngBackendEgd {
	#[xml_data(attr = "type")]
	pub kind: Option<String>,
	pub sources: Vec<InterfaceSource>,
	pub protocol: Option<RngProtocol>,
}

/// Entropy source of the guest RNG
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RngBackend {
	/// `model="random"`: host device path as text
	Random(String),
	/// `model="egd"`: entropy gathering daemon reached through a character device
	Egd(RngBackendEgd),
}

impl RngBackend {
	/// Value of the `model` attribute
	pub fn model(&self) -> &'static str {
		match self {
			RngBackend::Random(_) => "random",
			RngBackend::Egd(_) => "egd",
		}
	}
}

impl FixedElement for RngBackend {
	const TAG: &'static str = "backend";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serializer.serialize_attribute("model", Cow::Borrowed(self.model()))?;
		match self {
			RngBackend::Random(_) => Ok(()),
			RngBackend::Egd(egd) => egd.serialize_attributes(serializer),
		}
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		match self {
			RngBackend::Random(device) => serializer.serialize_text(Cow::Borrowed(device)),
			RngBackend::Egd(egd) => egd.serialize_content(serializer),
		}
	}
}

enum BackendState {
	Random(String),
	Egd(ElementDefaultParseState<RngBackendEgd>),
}

/// Parses `<backend>`; unknown (or missing) models result in `None`.
#[doc(hidden)]
#[derive(Default)]
pub struct RngBackendState {
	backend: Option<BackendState>,
}

impl FixedElementState for RngBackendState {
	type Output = Option<RngBackend>;

	const TAG: &'static str = "backend";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		self.backend = match attributes.get("model") {
			Some("random") => Some(BackendState::Random(String::new())),
			Some("egd") => {
				let mut state = ElementDefaultParseState::<RngBackendEgd>::default();
				attributes.forward(&mut state, &["model"])?;
				Some(BackendState::Egd(state))
			},
			model => {
				tracing::debug!(?model, "ignoring rng backend of unknown model");
				None
			},
		};
		Ok(())
	}

	fn parse_element_inner_text(&mut self, text: Cow<'_, str>) -> Result<()> {
		match &mut self.backend {
			Some(BackendState::Random(device)) => {
				device.push_str(&text);
				Ok(())
			},
			Some(BackendState::Egd(state)) => ElementState::parse_element_inner_text(state, text),
			None => Ok(()),
		}
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		match &mut self.backend {
			Some(BackendState::Egd(state)) => ElementState::parse_element_inner_node(state, tag, parser),
			_ => parser.skip_element(),
		}
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(match self.backend {
			Some(BackendState::Random(device)) => Some(RngBackend::Random(device)),
			Some(BackendState::Egd(state)) => Some(RngBackend::Egd(ElementState::parse_element_finish(state)?)),
			None => None,
		})
	}
}

/// `<rng>` device
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "rng")]
pub struct Rng {
	#[xml_data(attr, default)]
	pub model: String,
	pub rate: Option<RngRate>,
	#[xml_data(state = "ParseElementMaybe<RngBackendState>")]
	pub backend: Option<RngBackend>,
	pub address: Option<Address>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn random() {
		let xml = [
			r#"<rng model="virtio">"#,
			r#"  <rate bytes="1234" period="2000"></rate>"#,
			r#"  <backend model="random">/dev/random</backend>"#,
			r#"</rng>"#,
		]
		.join("\n");
		let rng = Rng::from_xml(&xml).unwrap();
		assert_eq!(rng.backend, Some(RngBackend::Random("/dev/random".into())));
		assert_eq!(
			rng.rate,
			Some(RngRate {
				bytes: 1234,
				period: Some(2000),
			})
		);
		assert_eq!(rng.to_xml().unwrap(), xml);
	}

	#[test]
	fn egd() {
		let xml = [
			r#"<rng model="virtio">"#,
			r#"  <backend model="egd" type="udp">"#,
			r#"    <source mode="bind" service="1234"></source>"#,
			r#"    <source mode="connect" service="1234" host="1.2.3.4"></source>"#,
			r#"    <protocol type="raw"></protocol>"#,
			r#"  </backend>"#,
			r#"</rng>"#,
		]
		.join("\n");
		let rng = Rng::from_xml(&xml).unwrap();
		match &rng.backend {
			Some(RngBackend::Egd(egd)) => {
				assert_eq!(egd.kind.as_deref(), Some("udp"));
				assert_eq!(egd.sources.len(), 2);
				assert_eq!(egd.sources[1].host.as_deref(), Some("1.2.3.4"));
				assert_eq!(egd.protocol.as_ref().map(|p| p.kind.as_str()), Some("raw"));
			},
			other => panic!("unexpected backend {:?}", other),
		}
		assert_eq!(rng.to_xml().unwrap(), xml);
	}

	#[test]
	fn unknown_model_is_skipped() {
		let rng = Rng::from_xml(
			r#"<rng model="virtio"><backend model="builtin"><source/></backend><address type="virtio-mmio"/></rng>"#,
		)
		.unwrap();
		assert_eq!(rng.backend, None);
		assert_eq!(rng.address, Some(Address::VirtioMmio(Default::default())));

		let rng = Rng::from_xml(r#"<rng model="virtio"><backend>/dev/urandom</backend></rng>"#).unwrap();
		assert_eq!(rng.backend, None);
		assert_eq!(rng.to_xml().unwrap(), r#"<rng model="virtio"></rng>"#);
	}
}
