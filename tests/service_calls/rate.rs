use std::time::Duration;

use pcbook::rpc::RateLaptopRequest;
use pcbook::ServiceError;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Status;

use crate::support::{create, drain, random_laptop, service};

fn rating(laptop_id: &str, score: f64) -> Result<RateLaptopRequest, Status> {
    Ok(RateLaptopRequest {
        laptop_id: laptop_id.to_string(),
        score,
    })
}

#[tokio::test]
async fn rate_accumulates_in_order() {
    let service = service();
    let id = create(&service, random_laptop());

    let inbound = tokio_stream::iter(vec![rating(&id, 8.0), rating(&id, 7.5), rating(&id, 10.0)]);
    let responses: Vec<_> = drain(service.rate_laptop(inbound))
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    let counts: Vec<u32> = responses.iter().map(|r| r.rated_count).collect();
    let averages: Vec<f64> = responses.iter().map(|r| r.average_score).collect();
    assert_eq!(counts, [1, 2, 3]);
    assert_eq!(averages, [8.0, 7.75, 8.5]);
    assert!(responses.iter().all(|r| r.laptop_id == id));
}

#[tokio::test]
async fn rate_tracks_laptops_separately() {
    let service = service();
    let first = create(&service, random_laptop());
    let second = create(&service, random_laptop());

    let inbound = tokio_stream::iter(vec![
        rating(&first, 4.0),
        rating(&second, 9.0),
        rating(&first, 6.0),
    ]);
    let responses = drain(service.rate_laptop(inbound)).await;

    let last = responses.last().unwrap().as_ref().unwrap();
    assert_eq!(last.laptop_id, first);
    assert_eq!(last.rated_count, 2);
    assert_eq!(last.average_score, 5.0);

    let second_rating = service.rating_store().get(&second).unwrap().unwrap();
    assert_eq!(second_rating.count, 1);
}

#[tokio::test]
async fn rate_unknown_laptop_ends_call() {
    let service = service();
    let id = create(&service, random_laptop());

    let inbound = tokio_stream::iter(vec![
        rating(&id, 8.0),
        rating("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11", 5.0),
        rating(&id, 9.0),
    ]);
    let responses = drain(service.rate_laptop(inbound)).await;

    assert_eq!(responses.len(), 2);
    assert!(responses[0].is_ok());
    assert!(matches!(responses[1], Err(ServiceError::NotFound(_))));
    assert_eq!(service.rating_store().get(&id).unwrap().unwrap().count, 1);
}

#[tokio::test]
async fn rate_responds_while_inbound_is_open() {
    let service = service();
    let id = create(&service, random_laptop());

    let (tx, inbound) = mpsc::channel(4);
    let mut responses = service.rate_laptop(ReceiverStream::new(inbound));

    tx.send(rating(&id, 6.0)).await.unwrap();
    let first = tokio::time::timeout(Duration::from_secs(5), responses.recv())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(first.rated_count, 1);

    tx.send(rating(&id, 8.0)).await.unwrap();
    let second = responses.recv().await.unwrap().unwrap();
    assert_eq!(second.rated_count, 2);
    assert_eq!(second.average_score, 7.0);

    drop(tx);
    assert!(responses.recv().await.is_none());
}

#[tokio::test]
async fn rate_inbound_error_ends_quietly() {
    let service = service();
    let id = create(&service, random_laptop());

    let inbound = tokio_stream::iter(vec![
        rating(&id, 3.0),
        Err(Status::unavailable("connection reset")),
        rating(&id, 5.0),
    ]);
    let responses = drain(service.rate_laptop(inbound)).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(service.rating_store().get(&id).unwrap().unwrap().count, 1);
}
