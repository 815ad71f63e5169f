//! `<filesystem type="...">` with its `<source>`
//!
//! The `type` attribute of the filesystem decides how the attributes of `<source>` are read.

use crate::{
	domain::{
		Address,
		ReadOnly,
	},
	errors,
	number::{
		parse_uint,
		Radix,
	},
	parser::{
		self,
		Attributes,
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

/// Filesystem source, selected by the `type` attribute of `<filesystem>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilesystemSource {
	/// `type="mount"`: host directory
	Mount { dir: String },
	/// `type="block"`: host block device
	Block { dev: String },
	/// `type="file"`: image file
	File { file: String },
	/// `type="template"`: OpenVZ template
	Template { name: String },
	/// `type="ram"`: in-memory filesystem
	Ram { usage: u32, units: Option<String> },
	/// `type="bind"`: directory bind mounted inside the guest
	Bind { dir: String },
	/// `type="volume"`: storage pool volume
	Volume { pool: String, volume: String },
}

impl FilesystemSource {
	/// Value of the `type` attribute of the parent `<filesystem>`
	pub fn kind(&self) -> &'static str {
		match self {
			FilesystemSource::Mount { .. } => "mount",
			FilesystemSource::Block { .. } => "block",
			FilesystemSource::File { .. } => "file",
			FilesystemSource::Template { .. } => "template",
			FilesystemSource::Ram { .. } => "ram",
			FilesystemSource::Bind { .. } => "bind",
			FilesystemSource::Volume { .. } => "volume",
		}
	}

	/// Source with empty fields for a filesystem type; `None` for unknown types.
	pub fn empty(kind: &str) -> Option<Self> {
		Some(match kind {
			"mount" => FilesystemSource::Mount { dir: String::new() },
			"block" => FilesystemSource::Block { dev: String::new() },
			"file" => FilesystemSource::File { file: String::new() },
			"template" => FilesystemSource::Template { name: String::new() },
			"ram" => FilesystemSource::Ram { usage: 0, units: None },
			"bind" => FilesystemSource::Bind { dir: String::new() },
			"volume" => FilesystemSource::Volume {
				pool: String::new(),
				volume: String::new(),
			},
			_ => return None,
		})
	}

	fn parse_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		for (key, value) in attributes.iter() {
			match (&mut *self, key) {
				(FilesystemSource::Mount { dir }, "dir") | (FilesystemSource::Bind { dir }, "dir") => {
					*dir = value.to_owned()
				},
				(FilesystemSource::Block { dev }, "dev") => *dev = value.to_owned(),
				(FilesystemSource::File { file }, "file") => *file = value.to_owned(),
				(FilesystemSource::Template { name }, "name") => *name = value.to_owned(),
				(FilesystemSource::Ram { usage, .. }, "usage") => *usage = parse_uint(key, value.trim(), Radix::Decimal)?,
				(FilesystemSource::Ram { units, .. }, "units") => *units = Some(value.to_owned()),
				(FilesystemSource::Volume { pool, .. }, "pool") => *pool = value.to_owned(),
				(FilesystemSource::Volume { volume, .. }, "volume") => *volume = value.to_owned(),
				_ => (),
			}
		}
		Ok(())
	}
}

impl FixedElement for FilesystemSource {
	const TAG: &'static str = "source";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		match self {
			FilesystemSource::Mount { dir } | FilesystemSource::Bind { dir } => {
				serializer.serialize_attribute("dir", Cow::Borrowed(dir))
			},
			FilesystemSource::Block { dev } => serializer.serialize_attribute("dev", Cow::Borrowed(dev)),
			FilesystemSource::File { file } => serializer.serialize_attribute("file", Cow::Borrowed(file)),
			FilesystemSource::Template { name } => serializer.serialize_attribute("name", Cow::Borrowed(name)),
			FilesystemSource::Ram { usage, units } => {
				serializer.serialize_attribute("usage", Cow::Owned(usage.to_string()))?;
				if let Some(units) = units {
					serializer.serialize_attribute("units", Cow::Borrowed(units))?;
				}
				Ok(())
			},
			FilesystemSource::Volume { pool, volume } => {
				serializer.serialize_attribute("pool", Cow::Borrowed(pool))?;
				serializer.serialize_attribute("volume", Cow::Borrowed(volume))
			},
		}
	}
}

// attributes of `<source>`, interpreted once the filesystem type is known
#[derive(Default)]
struct SourceAttributesState {
	attributes: Attributes,
}

impl FixedElementState for SourceAttributesState {
	type Output = Attributes;

	const TAG: &'static str = "source";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		self.attributes = attributes.clone();
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, _tag: &str, parser: P) -> Result<()> {
		parser.skip_element()
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(self.attributes)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "driver")]
pub struct FilesystemDriver {
	#[xml_data(attr = "type", default)]
	pub kind: String,
	#[xml_data(attr)]
	pub format: Option<String>,
	#[xml_data(attr)]
	pub name: Option<String>,
	#[xml_data(attr = "wrpolicy")]
	pub wr_policy: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "target")]
pub struct FilesystemTarget {
	#[xml_data(attr, default)]
	pub dir: String,
}

macro_rules! space_limit {
	($($(#[$meta:meta])* $name:ident => $tag:tt,)*) => {$(
		$(#[$meta])*
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

space_limit! {
	/// `<space_hard_limit unit="...">`
	SpaceHardLimit => "space_hard_limit",
	/// `<space_soft_limit unit="...">`
	SpaceSoftLimit => "space_soft_limit",
}

/// `<filesystem>` device
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filesystem {
	pub access_mode: Option<String>,
	pub driver: Option<FilesystemDriver>,
	/// Also decides the `type` attribute; without source no `type` is written.
	pub source: Option<FilesystemSource>,
	pub target: Option<FilesystemTarget>,
	pub read_only: Option<ReadOnly>,
	pub space_hard_limit: Option<SpaceHardLimit>,
	pub space_soft_limit: Option<SpaceSoftLimit>,
	pub address: Option<Address>,
}

#[doc(hidden)]
#[derive(Default)]
pub struct FilesystemState {
	kind: String,
	access_mode: Option<String>,
	driver: InnerDefaultParseState<Option<FilesystemDriver>>,
	source: Option<FilesystemSource>,
	target: InnerDefaultParseState<Option<FilesystemTarget>>,
	read_only: InnerDefaultParseState<Option<ReadOnly>>,
	space_hard_limit: InnerDefaultParseState<Option<SpaceHardLimit>>,
	space_soft_limit: InnerDefaultParseState<Option<SpaceSoftLimit>>,
	address: InnerDefaultParseState<Option<Address>>,
}

impl FixedElementState for FilesystemState {
	type Output = Filesystem;

	const TAG: &'static str = "filesystem";

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		self.kind = attributes.get("type").unwrap_or("mount").to_owned();
		self.source = FilesystemSource::empty(&self.kind);
		if self.source.is_none() {
			tracing::debug!(kind = %self.kind, "filesystem type without known source");
		}
		self.access_mode = attributes.get("accessmode").map(str::to_owned);
		Ok(())
	}

	fn parse_element_inner_text(&mut self, _text: Cow<'_, str>) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		if tag == "source" {
			let attributes = parser.parse_element::<SourceAttributesState>(tag)?;
			return match &mut self.source {
				Some(source) => source.parse_attributes(&attributes),
				None => Err(errors::unsupported_variant("type", &self.kind)),
			};
		}
		let parser = try_inner!(self.driver, tag, parser);
		let parser = try_inner!(self.target, tag, parser);
		let parser = try_inner!(self.read_only, tag, parser);
		let parser = try_inner!(self.space_hard_limit, tag, parser);
		let parser = try_inner!(self.space_soft_limit, tag, parser);
		let parser = try_inner!(self.address, tag, parser);
		parser.skip_element()
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(Filesystem {
			access_mode: self.access_mode,
			driver: self.driver.parse_inner_finish()?,
			source: self.source,
			target: self.target.parse_inner_finish()?,
			read_only: self.read_only.parse_inner_finish()?,
			space_hard_limit: self.space_hard_limit.parse_inner_finish()?,
			space_soft_limit: self.space_soft_limit.parse_inner_finish()?,
			address: self.address.parse_inner_finish()?,
		})
	}
}

impl parser::Element for Filesystem {
	type ParseState = FilesystemState;
}

impl FixedElement for Filesystem {
	const TAG: &'static str = "filesystem";

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		if let Some(source) = &self.source {
			serializer.serialize_attribute("type", Cow::Borrowed(source.kind()))?;
		}
		if let Some(access_mode) = &self.access_mode {
			serializer.serialize_attribute("accessmode", Cow::Borrowed(access_mode))?;
		}
		Ok(())
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		self.driver.serialize_elements(serializer)?;
		self.source.serialize_elements(serializer)?;
		self.target.serialize_elements(serializer)?;
		self.read_only.serialize_elements(serializer)?;
		self.space_hard_limit.serialize_elements(serializer)?;
		self.space_soft_limit.serialize_elements(serializer)?;
		self.address.serialize_elements(serializer)
	}
}
