use peerlink_core::{IceCandidate, SessionDescription, SignalKind};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{
    EngineCall, MOCK_ANSWER_SDP, connect_mocked, remote_candidate, remote_message, remote_offer,
};

fn candidate(n: u16) -> IceCandidate {
    IceCandidate {
        sdp_mid: Some("0".to_string()),
        sdp_m_line_index: Some(0),
        ..IceCandidate::new(format!("candidate:{n} 1 udp 2130706431 10.0.0.{n} 5000 typ host"))
    }
}

#[tokio::test]
async fn test_early_candidates_are_queued_and_drained_in_order() {
    init_tracing();

    let mut mocked = connect_mocked(false).await.expect("Failed to connect");

    for n in 1..=3 {
        mocked
            .remote
            .deliver(&remote_candidate(&candidate(n)))
            .expect("Failed to deliver ICE");
    }
    mocked.session.settled_state().await;
    assert!(
        mocked.engine.state().calls().await.is_empty(),
        "Candidates reached the engine before a remote description"
    );

    mocked
        .remote
        .deliver(&remote_offer("v=0 queued"))
        .expect("Failed to deliver OFFER");
    let _answer = mocked.remote.next_signal().await.expect("No ANSWER sent");

    assert_eq!(
        mocked.engine.state().calls().await,
        vec![
            EngineCall::SetRemote(SessionDescription::offer("v=0 queued")),
            EngineCall::AddCandidate(candidate(1)),
            EngineCall::AddCandidate(candidate(2)),
            EngineCall::AddCandidate(candidate(3)),
            EngineCall::CreateAnswer,
            EngineCall::SetLocal(SessionDescription::answer(MOCK_ANSWER_SDP)),
        ]
    );
}

#[tokio::test]
async fn test_late_candidates_go_straight_to_engine() {
    init_tracing();

    let mut mocked = connect_mocked(false).await.expect("Failed to connect");
    mocked
        .remote
        .deliver(&remote_offer("v=0"))
        .expect("Failed to deliver OFFER");
    let _answer = mocked.remote.next_signal().await.expect("No ANSWER sent");

    // Alternate `sdp` key for the candidate string
    let ice = remote_message(
        SignalKind::Ice,
        json!({ "sdp": "candidate:9 1 udp 1 10.0.0.9 9 typ host", "sdpMid": "0" }),
    );
    mocked.remote.deliver(&ice).expect("Failed to deliver ICE");
    mocked.session.settled_state().await;

    let calls = mocked.engine.state().calls().await;
    let expected = IceCandidate {
        sdp_mid: Some("0".to_string()),
        ..IceCandidate::new("candidate:9 1 udp 1 10.0.0.9 9 typ host")
    };
    assert_eq!(calls.last(), Some(&EngineCall::AddCandidate(expected)));
}
