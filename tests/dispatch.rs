//! Registry trigger and dispatcher behavior against live local receivers.

mod common;

use axum::http::StatusCode;
use common::Receiver;
use fswatch_hooks::delivery::DeliveryOutcome;
use fswatch_hooks::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_trigger_posts_notification() {
    let mut receiver = Receiver::start(StatusCode::OK).await;
    let registry = CallbackRegistry::new("");
    registry.set("/foo", receiver.url("hook")).await;

    let notification = Notification::new("/foo", ChangeKind::Create);
    registry.trigger("/foo", &notification).await.unwrap();

    let received = receiver.next().await.expect("no delivery");
    assert_eq!(received.content_type.as_deref(), Some("application/json"));

    let decoded: Notification = serde_json::from_slice(&received.body).unwrap();
    assert_eq!(decoded.path(), "/foo");
    assert_eq!(decoded.kind(), ChangeKind::Create);
}

#[tokio::test]
async fn test_each_subscriber_gets_identical_body() {
    let mut receiver = Receiver::start(StatusCode::OK).await;
    let registry = CallbackRegistry::new("/srv/watch");
    for hook in ["a", "b", "c"] {
        registry.set("/data", receiver.url(hook)).await;
    }

    let notification = Notification::new("/data", ChangeKind::Modify);
    let dispatch = registry.trigger("/data", &notification).await.unwrap();
    assert_eq!(dispatch.recipients(), 3);

    let reports = dispatch.join().await;
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.is_success()));

    let expected = notification.to_json().unwrap();
    for _ in 0..3 {
        let received = receiver.next().await.expect("missing delivery");
        assert_eq!(received.body.as_ref(), expected.as_slice());
    }
    assert!(receiver.nothing_within(Duration::from_millis(100)).await);
}

#[tokio::test]
async fn test_two_subscribers_receive_modify() {
    let mut first = Receiver::start(StatusCode::OK).await;
    let mut second = Receiver::start(StatusCode::OK).await;

    let registry = Arc::new(CallbackRegistry::new("/srv/watch"));
    registry.set("/data", first.url("hook")).await;
    registry.set("/data", second.url("hook")).await;

    let dispatcher = NotificationDispatcher::new(Arc::clone(&registry));
    dispatcher
        .dispatch(&Notification::new("/data", ChangeKind::Modify))
        .await
        .unwrap();

    for receiver in [&mut first, &mut second] {
        let received = receiver.next().await.expect("missing delivery");
        assert_eq!(
            received.body.as_ref(),
            br#"{"Path":"/data","Event":"Modify"}"#
        );
    }
}

#[tokio::test]
async fn test_failed_subscriber_does_not_affect_others() {
    let mut healthy = Receiver::start(StatusCode::OK).await;
    let mut failing = Receiver::start(StatusCode::INTERNAL_SERVER_ERROR).await;

    let client = WebhookClient::builder()
        .with_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let registry = CallbackRegistry::with_client("/srv/watch", client);
    registry.set("x", "http://127.0.0.1:1/unreachable").await;
    registry.set("x", failing.url("hook")).await;
    registry.set("x", healthy.url("hook")).await;

    let dispatch = registry
        .trigger("x", &Notification::new("x", ChangeKind::Delete))
        .await
        .unwrap();
    let reports = dispatch.join().await;

    assert!(matches!(reports[0].outcome(), DeliveryOutcome::Failed(_)));
    assert!(matches!(
        reports[1].outcome(),
        DeliveryOutcome::Delivered { status: 500, .. }
    ));
    assert!(reports[2].is_success());

    assert!(failing.next().await.is_some());
    assert!(healthy.next().await.is_some());
}

#[tokio::test]
async fn test_trigger_returns_before_slow_subscriber_answers() {
    // Never accepted, so the request hangs until the client times out
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/hook", listener.local_addr().unwrap());

    let client = WebhookClient::builder()
        .with_timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let registry = CallbackRegistry::with_client("/srv/watch", client);
    registry.set("slow", url).await;

    let started = tokio::time::Instant::now();
    let dispatch = registry
        .trigger("slow", &Notification::new("slow", ChangeKind::Modify))
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(250));

    let reports = dispatch.join().await;
    assert!(matches!(reports[0].outcome(), DeliveryOutcome::Failed(_)));
    drop(listener);
}

#[tokio::test]
async fn test_trigger_with_no_subscribers_sends_nothing() {
    let mut receiver = Receiver::start(StatusCode::OK).await;
    let registry = CallbackRegistry::new("/srv/watch");
    registry.set("other", receiver.url("hook")).await;

    let dispatch = registry
        .trigger("bar.txt", &Notification::new("bar.txt", ChangeKind::Create))
        .await
        .unwrap();

    assert_eq!(dispatch.recipients(), 0);
    assert!(receiver.nothing_within(Duration::from_millis(100)).await);
}
