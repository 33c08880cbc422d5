use peerlink_core::SignalKind;
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{LOCAL_ID, TEST_ROOM, connect_mocked, connect_mocked_with, test_config};

#[tokio::test(start_paused = true)]
async fn test_one_ping_per_interval() {
    init_tracing();

    let mut mocked = connect_mocked(false).await.expect("Failed to connect");

    tokio::time::sleep(Duration::from_secs(95)).await;
    mocked.session.settled_state().await;

    let pings = mocked.remote.drain_signals();
    assert_eq!(pings.len(), 3, "Expected pings at 30s, 60s and 90s");
    for ping in &pings {
        assert_eq!(ping.kind, SignalKind::Ping);
        assert_eq!(ping.sender, LOCAL_ID);
        assert_eq!(ping.room_id, TEST_ROOM);
        assert!(!ping.has_payload());
    }
}

#[tokio::test(start_paused = true)]
async fn test_no_ping_after_close() {
    init_tracing();

    let mut mocked = connect_mocked(true).await.expect("Failed to connect");

    tokio::time::sleep(Duration::from_secs(31)).await;
    mocked.session.close_signal_server().await;
    let before_close = mocked.remote.drain_signals();
    assert_eq!(before_close.len(), 1);

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert!(mocked.remote.drain_signals().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_custom_interval() {
    init_tracing();

    let (config, ready_rx) = test_config(false);
    let config = config.with_keep_alive_interval(Duration::from_secs(5));
    let mut mocked = connect_mocked_with(config, ready_rx)
        .await
        .expect("Failed to connect");

    tokio::time::sleep(Duration::from_secs(12)).await;
    mocked.session.settled_state().await;

    assert_eq!(mocked.remote.drain_signals().len(), 2);
}
