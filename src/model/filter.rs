use serde::{Deserialize, Serialize};

use super::{Laptop, Memory};

/// Search bounds. A laptop matches when it satisfies every bound.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    #[prost(double, tag = "1")]
    pub max_price_usd: f64,
    #[prost(uint32, tag = "2")]
    pub min_cpu_cores: u32,
    #[prost(double, tag = "3")]
    pub min_cpu_ghz: f64,
    #[prost(message, optional, tag = "4")]
    pub min_ram: Option<Memory>,
}

impl Filter {
    pub fn matches(&self, laptop: &Laptop) -> bool {
        if laptop.price_usd > self.max_price_usd {
            return false;
        }
        if laptop.cpu_cores() < self.min_cpu_cores {
            return false;
        }
        if laptop.cpu_min_ghz() < self.min_cpu_ghz {
            return false;
        }
        let min_ram = self.min_ram.as_ref().map(Memory::to_bits).unwrap_or(0);
        laptop.ram_bits() >= min_ram
    }
}
