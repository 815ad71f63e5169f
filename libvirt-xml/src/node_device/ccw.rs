//! `<capability type="ccw">`: channel subsystem ids as hex text children

use crate::{
	number::{
		parse_uint,
		NumberFormat,
		Radix,
	},
	parser::{
		self,
		ElementParser,
		ElementParserExt,
		FixedElementState,
		TextContent,
	},
	serializer::{
		FixedElement,
		Serializer,
		TextElement,
	},
	Result,
};
use std::borrow::Cow;

/// Address of an s390 channel subsystem device
///
/// Written as `<cssid>0xfe</cssid><ssid>0x0</ssid><devno>0x0001</devno>`; the `0x` prefix is
/// optional when reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeDeviceCcwCapability {
	pub cssid: Option<u64>,
	pub ssid: Option<u64>,
	pub devno: Option<u64>,
}

const CCW_FIELDS: [(&str, NumberFormat); 3] = [
	("cssid", NumberFormat::HEX),
	("ssid", NumberFormat::HEX),
	("devno", NumberFormat::Hex { width: 4 }),
];

impl NodeDeviceCcwCapability {
	fn field_mut(&mut self, tag: &str) -> Option<&mut Option<u64>> {
		match tag {
			"cssid" => Some(&mut self.cssid),
			"ssid" => Some(&mut self.ssid),
			"devno" => Some(&mut self.devno),
			_ => None,
		}
	}

	fn fields(&self) -> [Option<u64>; 3] {
		[self.cssid, self.ssid, self.devno]
	}
}

#[doc(hidden)]
#[derive(Default)]
pub struct NodeDeviceCcwCapabilityState {
	capability: NodeDeviceCcwCapability,
}

impl FixedElementState for NodeDeviceCcwCapabilityState {
	type Output = NodeDeviceCcwCapability;

	const TAG: &'static str = "capability";

	fn parse_element_attribute(&mut self, _key: &str, _value: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		match self.capability.field_mut(tag) {
			Some(field) => {
				let text = parser.parse_element::<TextContent>(tag)?;
				*field = Some(parse_uint(tag, text.trim(), Radix::Hex)?);
				Ok(())
			},
			None => parser.skip_element(),
		}
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(self.capability)
	}
}

impl parser::Element for NodeDeviceCcwCapability {
	type ParseState = NodeDeviceCcwCapabilityState;
}

impl FixedElement for NodeDeviceCcwCapability {
	const TAG: &'static str = "capability";

	fn serialize_attributes<S: Serializer>(&self, _serializer: &mut S) -> Result<()> {
		Ok(())
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		for ((tag, format), value) in CCW_FIELDS.iter().zip(self.fields().iter()) {
			if let Some(value) = value {
				serializer.serialize_element(&TextElement::new(tag, format.format(*value)))?;
			}
		}
		Ok(())
	}
}
