use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pcbook::model::{memory, Filter, Memory};
use pcbook::rpc::SearchLaptopRequest;
use pcbook::{Cancellation, Deadline, InMemoryLaptopStore, NotCancelled};

use crate::support::{create, drain, laptop, service, service_with_store};

fn filter() -> Filter {
    Filter {
        max_price_usd: 3000.0,
        min_cpu_cores: 4,
        min_cpu_ghz: 2.5,
        min_ram: Some(Memory::new(8, memory::Unit::Gigabyte)),
    }
}

fn request() -> SearchLaptopRequest {
    SearchLaptopRequest {
        filter: Some(filter()),
    }
}

#[tokio::test]
async fn search_streams_matches() {
    let service = service();
    let expected = [
        create(&service, laptop(2500.0, 4, 2.5, 8)),
        create(&service, laptop(2000.0, 8, 3.0, 16)),
    ];
    create(&service, laptop(3500.0, 8, 3.0, 16));
    create(&service, laptop(2000.0, 2, 3.0, 16));
    create(&service, laptop(2000.0, 8, 2.0, 16));
    create(&service, laptop(2000.0, 8, 3.0, 4));

    let results = drain(service.search_laptop(request(), NotCancelled)).await;

    let mut ids: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().laptop.unwrap().id)
        .collect();
    ids.sort();
    let mut expected = expected.to_vec();
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn search_compares_ram_across_units() {
    let service = service();
    let id = create(&service, laptop(1000.0, 4, 3.0, 1));

    let mut by_megabytes = filter();
    by_megabytes.min_ram = Some(Memory::new(1024, memory::Unit::Megabyte));
    let found = drain(service.search_laptop(
        SearchLaptopRequest {
            filter: Some(by_megabytes),
        },
        NotCancelled,
    ))
    .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].as_ref().unwrap().laptop.as_ref().unwrap().id, id);

    let mut two_gigabytes = filter();
    two_gigabytes.min_ram = Some(Memory::new(2, memory::Unit::Gigabyte));
    let found = drain(service.search_laptop(
        SearchLaptopRequest {
            filter: Some(two_gigabytes),
        },
        NotCancelled,
    ))
    .await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn search_on_empty_store() {
    let service = service();
    assert!(drain(service.search_laptop(request(), NotCancelled))
        .await
        .is_empty());
}

#[tokio::test]
async fn search_already_cancelled_yields_nothing() {
    let service = service();
    for _ in 0..5 {
        create(&service, laptop(2000.0, 8, 3.0, 16));
    }

    let flagged = drain(service.search_laptop(request(), Arc::new(AtomicBool::new(true)))).await;
    assert!(flagged.is_empty());

    let expired = Deadline::at(std::time::Instant::now());
    assert!(drain(service.search_laptop(request(), expired)).await.is_empty());
}

#[tokio::test]
async fn search_stops_mid_scan_when_cancelled() {
    let service =
        service_with_store(InMemoryLaptopStore::new().with_scan_delay(Duration::from_millis(20)));
    for _ in 0..10 {
        create(&service, laptop(2000.0, 8, 3.0, 16));
    }

    let cancelled = Arc::new(AtomicBool::new(false));
    let mut rx = service.search_laptop(request(), Arc::clone(&cancelled));

    let mut received = 0;
    while received < 2 {
        rx.recv().await.unwrap().unwrap();
        received += 1;
    }
    cancelled.store(true, Ordering::SeqCst);

    while let Some(item) = rx.recv().await {
        assert!(item.is_ok());
        received += 1;
    }
    assert!(received < 10, "received {received} of 10");
}

#[tokio::test]
async fn search_stops_at_deadline() {
    let service =
        service_with_store(InMemoryLaptopStore::new().with_scan_delay(Duration::from_millis(30)));
    for _ in 0..10 {
        create(&service, laptop(2000.0, 8, 3.0, 16));
    }

    let results = drain(service.search_laptop(request(), Deadline::after(Duration::from_millis(100)))).await;

    assert!(results.iter().all(Result::is_ok));
    assert!(results.len() < 10);
}

/// Never fires on its own; counts how often the scan asks.
struct CountingPolls(Arc<AtomicUsize>);

impl Cancellation for CountingPolls {
    fn is_cancelled(&self) -> bool {
        self.0.fetch_add(1, Ordering::SeqCst);
        false
    }
}

#[tokio::test]
async fn search_stops_when_receiver_dropped() {
    let service =
        service_with_store(InMemoryLaptopStore::new().with_scan_delay(Duration::from_millis(20)));
    for _ in 0..50 {
        create(&service, laptop(2000.0, 8, 3.0, 16));
    }

    let polls = Arc::new(AtomicUsize::new(0));
    let mut rx = service.search_laptop(request(), CountingPolls(Arc::clone(&polls)));
    rx.recv().await.unwrap().unwrap();
    drop(rx);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let settled = polls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(polls.load(Ordering::SeqCst), settled);
    assert!(settled < 50, "scan polled {settled} of 50 candidates");
}
