use serde::{Deserialize, Serialize};

use super::json;

/// The catalog entity.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Laptop {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub brand: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub cpu: Option<Cpu>,
    #[prost(message, optional, tag = "5")]
    pub ram: Option<Memory>,
    #[prost(message, repeated, tag = "6")]
    pub gpus: Vec<Gpu>,
    #[prost(message, repeated, tag = "7")]
    pub storages: Vec<Storage>,
    #[prost(message, optional, tag = "8")]
    pub screen: Option<Screen>,
    #[prost(message, optional, tag = "9")]
    pub keyboard: Option<Keyboard>,
    #[prost(double, tag = "10")]
    pub weight_kg: f64,
    #[prost(double, tag = "11")]
    pub price_usd: f64,
    #[prost(uint32, tag = "12")]
    pub release_year: u32,
    #[prost(message, optional, tag = "13")]
    #[serde(with = "json::timestamp")]
    pub updated_at: Option<prost_types::Timestamp>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpu {
    #[prost(string, tag = "1")]
    pub brand: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(uint32, tag = "3")]
    pub number_cores: u32,
    #[prost(uint32, tag = "4")]
    pub number_threads: u32,
    #[prost(double, tag = "5")]
    pub min_ghz: f64,
    #[prost(double, tag = "6")]
    pub max_ghz: f64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Gpu {
    #[prost(string, tag = "1")]
    pub brand: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub min_ghz: f64,
    #[prost(double, tag = "4")]
    pub max_ghz: f64,
    #[prost(message, optional, tag = "5")]
    pub memory: Option<Memory>,
}

/// A quantity of memory: `value` expressed in `unit`.
#[derive(Clone, PartialEq, Eq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Memory {
    #[prost(uint64, tag = "1")]
    pub value: u64,
    #[prost(enumeration = "memory::Unit", tag = "2")]
    #[serde(with = "json::memory_unit")]
    pub unit: i32,
}

pub mod memory {
    use serde::{Deserialize, Serialize};

    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        prost::Enumeration,
        Serialize,
        Deserialize,
    )]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    #[repr(i32)]
    pub enum Unit {
        Unknown = 0,
        Bit = 1,
        Byte = 2,
        Kilobyte = 3,
        Megabyte = 4,
        Gigabyte = 5,
        Terabyte = 6,
    }

    impl Unit {
        /// log2 of the number of bits in one unit (binary prefixes).
        pub(crate) fn bit_shift(self) -> Option<u32> {
            match self {
                Unit::Unknown => None,
                Unit::Bit => Some(0),
                Unit::Byte => Some(3),
                Unit::Kilobyte => Some(13),
                Unit::Megabyte => Some(23),
                Unit::Gigabyte => Some(33),
                Unit::Terabyte => Some(43),
            }
        }
    }
}

impl Memory {
    pub fn new(value: u64, unit: memory::Unit) -> Self {
        Self {
            value,
            unit: unit as i32,
        }
    }

    /// Normalize to bits so memories in different units compare.
    ///
    /// An unknown unit counts as zero bits. Values too large for `u64`
    /// saturate.
    pub fn to_bits(&self) -> u64 {
        match self.unit().bit_shift() {
            Some(shift) => self.value.saturating_mul(1u64 << shift),
            None => 0,
        }
    }
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    #[prost(enumeration = "storage::Driver", tag = "1")]
    #[serde(with = "json::storage_driver")]
    pub driver: i32,
    #[prost(message, optional, tag = "2")]
    pub memory: Option<Memory>,
}

pub mod storage {
    use serde::{Deserialize, Serialize};

    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        prost::Enumeration,
        Serialize,
        Deserialize,
    )]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    #[repr(i32)]
    pub enum Driver {
        Unknown = 0,
        Hdd = 1,
        Ssd = 2,
    }
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Screen {
    #[prost(float, tag = "1")]
    pub size_inch: f32,
    #[prost(message, optional, tag = "2")]
    pub resolution: Option<screen::Resolution>,
    #[prost(enumeration = "screen::Panel", tag = "3")]
    #[serde(with = "json::screen_panel")]
    pub panel: i32,
    #[prost(bool, tag = "4")]
    pub multitouch: bool,
}

pub mod screen {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, prost::Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Resolution {
        #[prost(uint32, tag = "1")]
        pub width: u32,
        #[prost(uint32, tag = "2")]
        pub height: u32,
    }

    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        prost::Enumeration,
        Serialize,
        Deserialize,
    )]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    #[repr(i32)]
    pub enum Panel {
        Unknown = 0,
        Ips = 1,
        Oled = 2,
    }
}

#[derive(Clone, PartialEq, Eq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyboard {
    #[prost(enumeration = "keyboard::Layout", tag = "1")]
    #[serde(with = "json::keyboard_layout")]
    pub layout: i32,
    #[prost(bool, tag = "2")]
    pub backlit: bool,
}

pub mod keyboard {
    use serde::{Deserialize, Serialize};

    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        prost::Enumeration,
        Serialize,
        Deserialize,
    )]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    #[repr(i32)]
    pub enum Layout {
        Unknown = 0,
        Qwerty = 1,
        Qwertz = 2,
        Azerty = 3,
    }
}

impl Laptop {
    /// CPU core count, zero when no CPU is described.
    pub fn cpu_cores(&self) -> u32 {
        self.cpu.as_ref().map(|cpu| cpu.number_cores).unwrap_or(0)
    }

    /// Minimum CPU clock in GHz, zero when no CPU is described.
    pub fn cpu_min_ghz(&self) -> f64 {
        self.cpu.as_ref().map(|cpu| cpu.min_ghz).unwrap_or(0.0)
    }

    /// RAM in bits, zero when no RAM is described.
    pub fn ram_bits(&self) -> u64 {
        self.ram.as_ref().map(Memory::to_bits).unwrap_or(0)
    }
}
