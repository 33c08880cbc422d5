use peerlink_core::{MediaConstraints, SdpType, SessionDescription, SignalKind};
use peerlink_peer::SessionState;

use crate::integration::init_tracing;
use crate::utils::{
    EngineCall, LOCAL_ID, MOCK_OFFER_SDP, REMOTE_ID, TEST_ROOM, connect_mocked, remote_answer,
};

#[tokio::test]
async fn test_call_sends_offer() {
    init_tracing();

    let mut mocked = connect_mocked(true).await.expect("Failed to connect");

    mocked.session.call().await.expect("call() failed");
    assert_eq!(mocked.session.state(), SessionState::Negotiating);

    let offer = mocked.remote.next_signal().await.expect("No OFFER sent");
    assert_eq!(offer.kind, SignalKind::Offer);
    assert_eq!(offer.sender, LOCAL_ID);
    assert_eq!(offer.recipient, REMOTE_ID);
    assert_eq!(offer.room_id, TEST_ROOM);

    let description =
        SessionDescription::from_payload(&offer.payload).expect("OFFER without a description");
    assert_eq!(description.sdp_type, SdpType::Offer);
    assert_eq!(description.sdp, MOCK_OFFER_SDP);

    assert_eq!(
        mocked.engine.state().calls().await,
        vec![
            EngineCall::CreateOffer(MediaConstraints::default()),
            EngineCall::SetLocal(SessionDescription::offer(MOCK_OFFER_SDP)),
        ]
    );
}

#[tokio::test]
async fn test_answer_is_applied() {
    init_tracing();

    let mut mocked = connect_mocked(true).await.expect("Failed to connect");
    mocked.session.call().await.expect("call() failed");
    let _offer = mocked.remote.next_signal().await.expect("No OFFER sent");

    mocked
        .remote
        .deliver(&remote_answer("v=0 answer"))
        .expect("Failed to deliver ANSWER");

    assert_eq!(
        mocked.session.settled_state().await,
        SessionState::Negotiating
    );
    let calls = mocked.engine.state().calls().await;
    assert_eq!(
        calls.last(),
        Some(&EngineCall::SetRemote(SessionDescription::answer("v=0 answer")))
    );

    // The caller never answers an answer
    assert!(mocked.remote.drain_signals().is_empty());
}
