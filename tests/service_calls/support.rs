//! Shared fixtures for the service tests.

use std::sync::Arc;

use pcbook::model::{memory, Cpu, Memory};
use pcbook::rpc::CreateLaptopRequest;
use pcbook::sample::Generator;
use pcbook::{
    InMemoryImageStore, InMemoryLaptopStore, InMemoryRatingStore, Laptop, LaptopService,
    NotCancelled,
};
use tokio::sync::mpsc;

pub type Service = LaptopService<InMemoryLaptopStore, InMemoryImageStore, InMemoryRatingStore>;

pub fn service() -> Service {
    service_with_store(InMemoryLaptopStore::new())
}

pub fn service_with_store(store: InMemoryLaptopStore) -> Service {
    LaptopService::new(
        Arc::new(store),
        Arc::new(InMemoryImageStore::new()),
        Arc::new(InMemoryRatingStore::new()),
    )
}

pub fn random_laptop() -> Laptop {
    Generator::new().new_laptop()
}

/// A laptop with exact specs, for filter tests.
pub fn laptop(price: f64, cores: u32, ghz: f64, ram_gb: u64) -> Laptop {
    Laptop {
        cpu: Some(Cpu {
            number_cores: cores,
            min_ghz: ghz,
            ..Default::default()
        }),
        ram: Some(Memory::new(ram_gb, memory::Unit::Gigabyte)),
        price_usd: price,
        ..random_laptop()
    }
}

/// Create `laptop` through the service and return its id.
pub fn create(service: &Service, laptop: Laptop) -> String {
    service
        .create_laptop(
            CreateLaptopRequest {
                laptop: Some(laptop),
            },
            &NotCancelled,
        )
        .unwrap()
        .id
}

/// Drain a streaming call's outbound channel.
pub async fn drain<T>(mut rx: mpsc::Receiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Some(item) = rx.recv().await {
        items.push(item);
    }
    items
}
