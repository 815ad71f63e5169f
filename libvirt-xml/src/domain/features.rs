//! Hypervisor features (`<features>`)

use crate::Element;

macro_rules! feature_flags {
	($($name:ident => $tag:tt,)*) => {$(
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name;
	)*};
}

macro_rules! feature_states {
	($($name:ident => $tag:tt,)*) => {$(
		/// Feature toggled through `state="on|off"`
		#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			#[xml_data(attr)]
			pub state: Option<String>,
		}
	)*};
}

feature_flags! {
	FeaturePae => "pae",
	FeatureAcpi => "acpi",
	FeatureViridian => "viridian",
	FeaturePrivNet => "privnet",
}

feature_states! {
	FeatureHap => "hap",
	FeaturePvSpinlock => "pvspinlock",
	FeaturePmu => "pmu",
	FeatureVmPort => "vmport",
	FeatureSmm => "smm",
	HyperVRelaxed => "relaxed",
	HyperVVapic => "vapic",
	HyperVVpIndex => "vpindex",
	HyperVRuntime => "runtime",
	HyperVSynic => "synic",
	HyperVStimer => "stimer",
	HyperVReset => "reset",
	KvmHidden => "hidden",
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "apic")]
pub struct FeatureApic {
	#[xml_data(attr)]
	pub eoi: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "gic")]
pub struct FeatureGic {
	#[xml_data(attr)]
	pub version: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "ioapic")]
pub struct FeatureIoApic {
	#[xml_data(attr)]
	pub driver: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hpt")]
pub struct FeatureHpt {
	#[xml_data(attr)]
	pub resizing: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "spinlocks")]
pub struct HyperVSpinlocks {
	#[xml_data(attr)]
	pub state: Option<String>,
	#[xml_data(attr)]
	pub retries: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "vendor_id")]
pub struct HyperVVendorId {
	#[xml_data(attr)]
	pub state: Option<String>,
	#[xml_data(attr)]
	pub value: Option<String>,
}

/// Hyper-V enlightenments
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "hyperv")]
pub struct FeatureHyperV {
	pub relaxed: Option<HyperVRelaxed>,
	pub vapic: Option<HyperVVapic>,
	pub spinlocks: Option<HyperVSpinlocks>,
	pub vp_index: Option<HyperVVpIndex>,
	pub runtime: Option<HyperVRuntime>,
	pub synic: Option<HyperVSynic>,
	pub stimer: Option<HyperVStimer>,
	pub reset: Option<HyperVReset>,
	pub vendor_id: Option<HyperVVendorId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "kvm")]
pub struct FeatureKvm {
	pub hidden: Option<KvmHidden>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "features")]
pub struct FeatureList {
	pub pae: Option<FeaturePae>,
	pub acpi: Option<FeatureAcpi>,
	pub apic: Option<FeatureApic>,
	pub hap: Option<FeatureHap>,
	pub viridian: Option<FeatureViridian>,
	pub priv_net: Option<FeaturePrivNet>,
	pub hyperv: Option<FeatureHyperV>,
	pub kvm: Option<FeatureKvm>,
	pub pv_spinlock: Option<FeaturePvSpinlock>,
	pub pmu: Option<FeaturePmu>,
	pub vm_port: Option<FeatureVmPort>,
	pub gic: Option<FeatureGic>,
	pub smm: Option<FeatureSmm>,
	pub io_apic: Option<FeatureIoApic>,
	pub hpt: Option<FeatureHpt>,
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Document;

	#[test]
	fn features() {
		let features = FeatureList::from_xml(
			r#"<features>
				<kvm><hidden state="on"/></kvm>
				<acpi/>
				<pae/>
				<hyperv>
					<vendor_id state="on" value="1234567890ab"/>
					<spinlocks state="on" retries="4096"/>
					<relaxed state="on"/>
				</hyperv>
				<apic eoi="on"/>
				<vmport state="off"/>
			</features>"#,
		)
		.unwrap();
		assert!(features.pae.is_some());
		assert_eq!(features.hyperv.as_ref().and_then(|h| h.spinlocks.as_ref()).and_then(|s| s.retries), Some(4096));
		let xml = [
			r#"<features>"#,
			r#"  <pae></pae>"#,
			r#"  <acpi></acpi>"#,
			r#"  <apic eoi="on"></apic>"#,
			r#"  <hyperv>"#,
			r#"    <relaxed state="on"></relaxed>"#,
			r#"    <spinlocks state="on" retries="4096"></spinlocks>"#,
			r#"    <vendor_id state="on" value="1234567890ab"></vendor_id>"#,
			r#"  </hyperv>"#,
			r#"  <kvm>"#,
			r#"    <hidden state="on"></hidden>"#,
			r#"  </kvm>"#,
			r#"  <vmport state="off"></vmport>"#,
			r#"</features>"#,
		]
		.join("\n");
		assert_eq!(features.to_xml().unwrap(), xml);
	}
}
