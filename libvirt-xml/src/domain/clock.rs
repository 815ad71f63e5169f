//! Guest time keeping (`<clock>`) and power management (`<pm>`)

use crate::Element;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "catchup")]
pub struct TimerCatchUp {
	#[xml_data(attr)]
	pub threshold: Option<u32>,
	#[xml_data(attr)]
	pub slew: Option<u32>,
	#[xml_data(attr)]
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "timer")]
pub struct Timer {
	#[xml_data(attr, default)]
	pub name: String,
	#[xml_data(attr)]
	pub track: Option<String>,
	#[xml_data(attr = "tickpolicy")]
	pub tick_policy: Option<String>,
	#[xml_data(attr)]
	pub frequency: Option<u32>,
	#[xml_data(attr)]
	pub mode: Option<String>,
	#[xml_data(attr)]
	pub present: Option<String>,
	pub catch_up: Option<TimerCatchUp>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "clock")]
pub struct Clock {
	#[xml_data(attr)]
	pub offset: Option<String>,
	#[xml_data(attr)]
	pub basis: Option<String>,
	#[xml_data(attr)]
	pub adjustment: Option<i32>,
	#[xml_data(attr = "timezone")]
	pub time_zone: Option<String>,
	pub timers: Vec<Timer>,
}

macro_rules! pm_policies {
	($($name:ident => $tag:tt,)*) => {$(
		#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			#[xml_data(attr, default)]
			pub enabled: String,
		}
	)*};
}

pm_policies! {
	SuspendToMem => "suspend-to-mem",
	SuspendToDisk => "suspend-to-disk",
}

/// Guest initiated suspend support
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "pm")]
pub struct Pm {
	pub suspend_to_mem: Option<SuspendToMem>,
	pub suspend_to_disk: Option<SuspendToDisk>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn clock() {
		let xml = [
			r#"<clock offset="variable" basis="utc" adjustment="-3600">"#,
			r#"  <timer name="rtc" track="guest" tickpolicy="catchup">"#,
			r#"    <catchup threshold="123" slew="120" limit="10000"></catchup>"#,
			r#"  </timer>"#,
			r#"  <timer name="tsc" frequency="3504000000" mode="native"></timer>"#,
			r#"  <timer name="hpet" present="no"></timer>"#,
			r#"</clock>"#,
		]
		.join("\n");
		let clock = Clock::from_xml(&xml).unwrap();
		assert_eq!(clock.adjustment, Some(-3600));
		assert_eq!(clock.timers[1].frequency, Some(3_504_000_000));
		assert_eq!(clock.to_xml().unwrap(), xml);
	}

	#[test]
	fn pm() {
		let pm = Pm::from_xml(r#"<pm><suspend-to-disk enabled="no"/></pm>"#).unwrap();
		assert_eq!(pm.suspend_to_mem, None);
		assert_eq!(
			pm.to_xml().unwrap(),
			"<pm>\n  <suspend-to-disk enabled=\"no\"></suspend-to-disk>\n</pm>",
		);
	}
}
