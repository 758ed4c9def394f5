use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pcbook::model::{memory, Filter, Laptop, Memory};
use pcbook::rpc::{
    CreateLaptopRequest, RateLaptopRequest, SearchLaptopRequest, UploadImageRequest,
};
use pcbook::{Cancellation, InMemoryLaptopStore, LaptopStore, SearchResults, StoreError};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tonic::Code;

use crate::support::{create, random_laptop, service, service_with_store, start_server};

#[tokio::test]
async fn create_assigns_and_keeps_ids() {
    let service = service();
    let mut client = start_server(service.clone()).await;

    let mut laptop = random_laptop();
    laptop.id = String::new();
    let generated = create(&mut client, laptop).await;
    assert!(uuid::Uuid::parse_str(&generated).is_ok());

    let given = random_laptop();
    let kept = create(&mut client, given.clone()).await;
    assert_eq!(kept, given.id);

    assert_eq!(service.laptop_store().len().unwrap(), 2);
}

#[tokio::test]
async fn create_errors_map_to_status_codes() {
    let mut client = start_server(service()).await;

    let mut invalid = random_laptop();
    invalid.id = "not-a-uuid".into();
    let status = client
        .create_laptop(CreateLaptopRequest {
            laptop: Some(invalid),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let laptop = random_laptop();
    create(&mut client, laptop.clone()).await;
    let status = client
        .create_laptop(CreateLaptopRequest {
            laptop: Some(laptop),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::AlreadyExists);
}

#[tokio::test]
async fn search_streams_matches() {
    let mut client = start_server(service()).await;

    let mut ids = Vec::new();
    for price in [1000.0, 1500.0, 4000.0] {
        let mut laptop = random_laptop();
        laptop.price_usd = price;
        ids.push(create(&mut client, laptop).await);
    }

    let mut stream = client
        .search_laptop(SearchLaptopRequest {
            filter: Some(Filter {
                max_price_usd: 2000.0,
                min_cpu_cores: 0,
                min_cpu_ghz: 0.0,
                min_ram: Some(Memory::new(0, memory::Unit::Byte)),
            }),
        })
        .await
        .unwrap()
        .into_inner();

    let mut found = Vec::new();
    while let Some(response) = stream.next().await {
        found.push(response.unwrap().laptop.unwrap().id);
    }
    found.sort();
    let mut expected = ids[..2].to_vec();
    expected.sort();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn upload_image_over_the_wire() {
    let service = service();
    let mut client = start_server(service.clone()).await;
    let laptop_id = create(&mut client, random_laptop()).await;

    let mut messages = vec![UploadImageRequest::info(laptop_id.clone(), ".jpg")];
    messages.extend((0..4).map(|i| UploadImageRequest::chunk(vec![i as u8; 1024])));

    let response = client
        .upload_image(tokio_stream::iter(messages))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.size, 4096);
    let stored = service.image_store().get(&response.id).unwrap().unwrap();
    assert_eq!(stored.laptop_id, laptop_id);
}

#[tokio::test]
async fn upload_for_unknown_laptop_is_not_found() {
    let mut client = start_server(service()).await;

    let messages = vec![
        UploadImageRequest::info("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11", ".jpg"),
        UploadImageRequest::chunk(vec![0u8; 64]),
    ];
    let status = client
        .upload_image(tokio_stream::iter(messages))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn rate_laptop_bidirectional() {
    let mut client = start_server(service()).await;
    let id = create(&mut client, random_laptop()).await;

    let (tx, rx) = mpsc::channel(4);
    let mut responses = client
        .rate_laptop(ReceiverStream::new(rx))
        .await
        .unwrap()
        .into_inner();

    let mut averages = Vec::new();
    for score in [8.0, 7.5, 10.0] {
        tx.send(RateLaptopRequest {
            laptop_id: id.clone(),
            score,
        })
        .await
        .unwrap();
        let response = tokio::time::timeout(Duration::from_secs(5), responses.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(response.laptop_id, id);
        averages.push((response.rated_count, response.average_score));
    }
    assert_eq!(averages, [(1, 8.0), (2, 7.75), (3, 8.5)]);

    drop(tx);
    assert!(responses.next().await.is_none());
}

#[tokio::test]
async fn rate_unknown_laptop_ends_with_not_found() {
    let mut client = start_server(service()).await;
    let id = create(&mut client, random_laptop()).await;

    let requests = vec![
        RateLaptopRequest {
            laptop_id: id,
            score: 5.0,
        },
        RateLaptopRequest {
            laptop_id: "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11".into(),
            score: 5.0,
        },
    ];
    let mut responses = client
        .rate_laptop(tokio_stream::iter(requests))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(responses.next().await.unwrap().unwrap().rated_count, 1);
    let status = responses.next().await.unwrap().unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

/// Delegates to an in-memory store and counts the laptops searches pull.
struct CountingStore {
    inner: InMemoryLaptopStore,
    pulled: Arc<AtomicUsize>,
}

impl LaptopStore for CountingStore {
    fn save(&self, laptop: &Laptop) -> Result<(), StoreError> {
        self.inner.save(laptop)
    }

    fn find(&self, id: &str) -> Result<Option<Laptop>, StoreError> {
        self.inner.find(id)
    }

    fn search<'a>(
        &'a self,
        filter: &Filter,
        cancellation: &'a dyn Cancellation,
    ) -> Result<SearchResults<'a>, StoreError> {
        let pulled = Arc::clone(&self.pulled);
        let results = self.inner.search(filter, cancellation)?;
        Ok(Box::new(results.inspect(move |_| {
            pulled.fetch_add(1, Ordering::SeqCst);
        })))
    }
}

#[tokio::test]
async fn search_stops_when_client_goes_away() {
    let pulled = Arc::new(AtomicUsize::new(0));
    let service = service_with_store(CountingStore {
        inner: InMemoryLaptopStore::new().with_scan_delay(Duration::from_millis(20)),
        pulled: Arc::clone(&pulled),
    });
    let mut client = start_server(service).await;
    for _ in 0..50 {
        create(&mut client, random_laptop()).await;
    }

    let mut stream = client
        .search_laptop(SearchLaptopRequest {
            filter: Some(Filter {
                max_price_usd: 10_000.0,
                ..Default::default()
            }),
        })
        .await
        .unwrap()
        .into_inner();
    stream.next().await.unwrap().unwrap();
    drop(stream);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let settled = pulled.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(pulled.load(Ordering::SeqCst), settled);
    assert!(settled < 50, "scan pulled {settled} of 50 laptops");
}
