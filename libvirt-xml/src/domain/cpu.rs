//! Virtual CPUs: counts, model, topology, NUMA layout and tuning

use crate::Element;

/// `<vcpu>`: number of virtual CPUs
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "vcpu")]
pub struct Vcpu {
	#[xml_data(attr)]
	pub placement: Option<String>,
	#[xml_data(attr = "cpuset")]
	pub cpu_set: Option<String>,
	#[xml_data(attr)]
	pub current: Option<String>,
	#[xml_data(text)]
	pub value: i32,
}

/// State of a single vcpu inside `<vcpus>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "vcpu")]
pub struct VcpusVcpu {
	#[xml_data(attr)]
	pub id: Option<u32>,
	#[xml_data(attr)]
	pub enabled: Option<String>,
	#[xml_data(attr)]
	pub hotpluggable: Option<String>,
	#[xml_data(attr)]
	pub order: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "vcpus")]
pub struct Vcpus {
	pub vcpus: Vec<VcpusVcpu>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "model")]
pub struct CpuModel {
	#[xml_data(attr)]
	pub fallback: Option<String>,
	#[xml_data(attr)]
	pub vendor_id: Option<String>,
	#[xml_data(text)]
	pub value: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "topology")]
pub struct CpuTopology {
	#[xml_data(attr)]
	pub sockets: Option<i32>,
	#[xml_data(attr)]
	pub cores: Option<i32>,
	#[xml_data(attr)]
	pub threads: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "feature")]
pub struct CpuFeature {
	#[xml_data(attr)]
	pub policy: Option<String>,
	#[xml_data(attr)]
	pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "cache")]
pub struct CpuCache {
	#[xml_data(attr)]
	pub level: Option<u32>,
	#[xml_data(attr, default)]
	pub mode: String,
}

/// Guest NUMA node
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "cell")]
pub struct NumaCell {
	#[xml_data(attr)]
	pub id: Option<u32>,
	#[xml_data(attr, default)]
	pub cpus: String,
	#[xml_data(attr, default)]
	pub memory: String,
	#[xml_data(attr)]
	pub unit: Option<String>,
	#[xml_data(attr = "memAccess")]
	pub mem_access: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "numa")]
pub struct Numa {
	pub cells: Vec<NumaCell>,
}

/// `<cpu>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "cpu")]
pub struct Cpu {
	#[xml_data(attr = "match")]
	pub matching: Option<String>,
	#[xml_data(attr)]
	pub mode: Option<String>,
	#[xml_data(attr)]
	pub check: Option<String>,
	pub model: Option<CpuModel>,
	#[xml_data(child)]
	pub vendor: Option<String>,
	pub topology: Option<CpuTopology>,
	pub cache: Option<CpuCache>,
	pub features: Vec<CpuFeature>,
	pub numa: Option<Numa>,
}

macro_rules! cpu_tune_values {
	($($name:ident($ty:ty) => $tag:tt,)*) => {$(
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
		#[xml_data(tag = $tag)]
		pub struct $name {
			#[xml_data(text)]
			pub value: $ty,
		}
	)*};
}

cpu_tune_values! {
	CpuTuneShares(u32) => "shares",
	CpuTunePeriod(u64) => "period",
	CpuTuneQuota(i64) => "quota",
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "cputune")]
pub struct CpuTune {
	pub shares: Option<CpuTuneShares>,
	pub period: Option<CpuTunePeriod>,
	pub quota: Option<CpuTuneQuota>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "memory")]
pub struct NumaTuneMemory {
	#[xml_data(attr)]
	pub mode: Option<String>,
	#[xml_data(attr)]
	pub nodeset: Option<String>,
	#[xml_data(attr)]
	pub placement: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "memnode")]
pub struct NumaTuneMemNode {
	#[xml_data(attr = "cellid", default)]
	pub cell_id: u32,
	#[xml_data(attr, default)]
	pub mode: String,
	#[xml_data(attr, default)]
	pub nodeset: String,
}

/// Host NUMA policy for guest memory
#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "numatune")]
pub struct NumaTune {
	pub memory: Option<NumaTuneMemory>,
	pub mem_nodes: Vec<NumaTuneMemNode>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "iothread")]
pub struct IoThread {
	#[xml_data(attr, default)]
	pub id: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Element)]
#[xml_data(tag = "iothreadids")]
pub struct IoThreadIds {
	pub iothreads: Vec<IoThread>,
}
