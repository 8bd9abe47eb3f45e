//! End-to-end covert channel tests against the mock node.

use repstash_core::encode_address;
use repstash_rpc::{read_payloads, ChannelError, CovertChannel, RpcError};
use repstash_testkit::MockNode;

const SEED: [u8; 32] = [0x5e; 32];

#[tokio::test]
async fn write_then_read_roundtrip() {
    let node = MockNode::new(1_000_000);
    let channel = CovertChannel::new(node.clone(), &SEED).unwrap();

    let payload = b"the representative field is a fine place for a secret";
    let hashes = channel.write(payload).await.unwrap();

    // 20 marker bytes + payload, padded: one block per 32-byte chunk.
    assert_eq!(hashes.len(), (20 + payload.len() + 31) / 32);
    assert_eq!(node.accepted(), hashes.len());

    let recovered = read_payloads(&node, channel.account()).await.unwrap();
    assert_eq!(recovered, vec![payload.to_vec()]);
}

#[tokio::test]
async fn write_twice_reads_two_payloads() {
    let node = MockNode::new(42);
    let channel = CovertChannel::new(node.clone(), &SEED).unwrap();

    channel.write(b"first message").await.unwrap();
    channel.write(b"second message").await.unwrap();

    let recovered = read_payloads(&node, channel.account()).await.unwrap();
    assert_eq!(
        recovered,
        vec![b"first message".to_vec(), b"second message".to_vec()]
    );
}

#[tokio::test]
async fn empty_payload_roundtrips() {
    let node = MockNode::new(1);
    let channel = CovertChannel::new(node.clone(), &SEED).unwrap();

    channel.write(b"").await.unwrap();
    let recovered = read_payloads(&node, channel.account()).await.unwrap();
    assert_eq!(recovered, vec![Vec::<u8>::new()]);
}

#[tokio::test]
async fn foreign_history_entries_are_skipped() {
    let node = MockNode::new(7);
    let channel = CovertChannel::new(node.clone(), &SEED).unwrap();

    // A representative set by some unrelated wallet before our data, and
    // a garbage entry that does not even decode.
    node.push_history(encode_address(&[0xab; 32]));
    node.push_history("not_an_address");

    channel.write(b"payload").await.unwrap();

    let recovered = read_payloads(&node, channel.account()).await.unwrap();
    assert_eq!(recovered, vec![b"payload".to_vec()]);
}

#[tokio::test]
async fn write_aborts_on_first_rejection() {
    let node = MockNode::new(9);
    let channel = CovertChannel::new(node.clone(), &SEED).unwrap();

    node.fail_at(2);

    // Long enough to need more than two chunks.
    let err = channel.write(&[0x77; 100]).await.unwrap_err();
    match err {
        ChannelError::Rpc(RpcError::Node(message)) => {
            assert_eq!(message, "insufficient work")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The first two blocks landed and stay on the ledger.
    assert_eq!(node.accepted(), 2);
}

#[tokio::test]
async fn account_matches_seed_derivation() {
    let node = MockNode::new(1);
    let channel = CovertChannel::new(node, &SEED).unwrap();

    let keypair = repstash_core::Keypair::from_seed(&SEED).unwrap();
    assert_eq!(
        channel.account(),
        encode_address(keypair.public_key().as_bytes())
    );
}
