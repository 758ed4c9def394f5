//! Random laptops for demos and tests.

use std::time::SystemTime;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::model::{
    keyboard, memory, screen, storage, Cpu, Gpu, Keyboard, Laptop, Memory, Screen, Storage,
};

pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator. Laptop ids are still random UUIDs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new_keyboard(&mut self) -> Keyboard {
        let layout = *[
            keyboard::Layout::Qwerty,
            keyboard::Layout::Qwertz,
            keyboard::Layout::Azerty,
        ]
        .choose(&mut self.rng)
        .unwrap_or(&keyboard::Layout::Qwerty);

        Keyboard {
            layout: layout as i32,
            backlit: self.rng.gen_bool(0.5),
        }
    }

    pub fn new_cpu(&mut self) -> Cpu {
        let brand = self.pick(&["Intel", "AMD"]);
        let name = if brand == "Intel" {
            self.pick(&[
                "Xeon E-2286M",
                "Core i9-9980HK",
                "Core i7-9750H",
                "Core i5-9400F",
                "Core i3-1005G1",
            ])
        } else {
            self.pick(&["Ryzen 7 PRO 2700U", "Ryzen 5 PRO 3500U", "Ryzen 3 PRO 3200GE"])
        };

        let number_cores = self.rng.gen_range(2..=8);
        let number_threads = self.rng.gen_range(number_cores..=12);
        let min_ghz = self.rng.gen_range(2.0..3.5);
        let max_ghz = self.rng.gen_range(min_ghz..5.0);

        Cpu {
            brand: brand.to_string(),
            name: name.to_string(),
            number_cores,
            number_threads,
            min_ghz,
            max_ghz,
        }
    }

    pub fn new_gpu(&mut self) -> Gpu {
        let brand = self.pick(&["NVIDIA", "AMD"]);
        let name = if brand == "NVIDIA" {
            self.pick(&["RTX 4090", "RTX 4070TI", "RTX 3080TI", "RTX 3080"])
        } else {
            self.pick(&["Radeon RX 7900", "Radeon RX 7700", "Radeon RX 6700", "Radeon RX 6600"])
        };

        let min_ghz = self.rng.gen_range(1.0..2.0);
        let max_ghz = self.rng.gen_range(min_ghz..3.0);

        Gpu {
            brand: brand.to_string(),
            name: name.to_string(),
            min_ghz,
            max_ghz,
            memory: Some(Memory::new(self.rng.gen_range(2..=6), memory::Unit::Gigabyte)),
        }
    }

    pub fn new_ram(&mut self) -> Memory {
        Memory::new(self.rng.gen_range(4..=64), memory::Unit::Gigabyte)
    }

    pub fn new_ssd(&mut self) -> Storage {
        Storage {
            driver: storage::Driver::Ssd as i32,
            memory: Some(Memory::new(self.rng.gen_range(128..=1024), memory::Unit::Gigabyte)),
        }
    }

    pub fn new_hdd(&mut self) -> Storage {
        Storage {
            driver: storage::Driver::Hdd as i32,
            memory: Some(Memory::new(self.rng.gen_range(1..=6), memory::Unit::Terabyte)),
        }
    }

    pub fn new_screen(&mut self) -> Screen {
        let height = self.rng.gen_range(1080..=4320);
        let panel = if self.rng.gen_bool(0.5) {
            screen::Panel::Ips
        } else {
            screen::Panel::Oled
        };

        Screen {
            size_inch: self.rng.gen_range(13.0..17.0),
            resolution: Some(screen::Resolution {
                width: height * 16 / 9,
                height,
            }),
            panel: panel as i32,
            multitouch: self.rng.gen_bool(0.5),
        }
    }

    pub fn new_laptop(&mut self) -> Laptop {
        let brand = self.pick(&["Apple", "Dell", "HP"]);
        let name = match brand {
            "Apple" => self.pick(&["Macbook Air", "Macbook Pro"]),
            "Dell" => self.pick(&["XPS 14", "XPS 15"]),
            _ => self.pick(&["Omen 1", "Omen 2"]),
        };

        Laptop {
            id: Uuid::new_v4().to_string(),
            brand: brand.to_string(),
            name: name.to_string(),
            cpu: Some(self.new_cpu()),
            ram: Some(self.new_ram()),
            gpus: vec![self.new_gpu()],
            storages: vec![self.new_ssd(), self.new_hdd()],
            screen: Some(self.new_screen()),
            keyboard: Some(self.new_keyboard()),
            weight_kg: self.rng.gen_range(1.0..3.0),
            price_usd: self.rng.gen_range(1500.0..2000.0),
            release_year: self.rng.gen_range(2023..=2024),
            updated_at: Some(prost_types::Timestamp::from(SystemTime::now())),
        }
    }

    /// A whole score from 1 to 10.
    pub fn new_laptop_score(&mut self) -> f64 {
        self.rng.gen_range(1..=10) as f64
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }
}
