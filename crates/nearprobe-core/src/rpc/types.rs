//! Response schema of the `block` RPC method.
//!
//! Field names mirror the node's JSON exactly. Fields the node omits or sends
//! as `null` decode to their default value and unknown fields are ignored,
//! but a field carrying the wrong JSON type fails decoding. Big numbers
//! (balances, supply, gas price) stay as the decimal strings the node sends.

use serde::{Deserialize, Deserializer, Serialize};

/// A `null` field decodes like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ==============================================================================
// Block
// ==============================================================================

/// Result of the `block` method: producer, header and chunk headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockResult {
    /// Account id of the block producer.
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub header: BlockHeader,
    /// One entry per shard, in shard order.
    #[serde(deserialize_with = "null_as_default")]
    pub chunks: Vec<ChunkHeader>,
}

impl BlockResult {
    /// Static tag used in log events and decode errors.
    pub const TYPE_TAG: &'static str = "BlockResult";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockHeader {
    #[serde(deserialize_with = "null_as_default")]
    pub height: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub epoch_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub next_epoch_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_state_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chunk_receipts_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chunk_headers_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chunk_tx_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub outcome_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chunks_included: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub challenges_root: String,
    /// Nanoseconds since the Unix epoch. `timestamp_nanosec` carries the same
    /// instant as a string for consumers without 64-bit integers.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp_nanosec: String,
    #[serde(deserialize_with = "null_as_default")]
    pub random_value: String,
    /// Kept as raw JSON: the proposal layout is versioned by the node.
    #[serde(deserialize_with = "null_as_default")]
    pub validator_proposals: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub chunk_mask: Vec<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rent_paid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub validator_reward: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_supply: String,
    #[serde(deserialize_with = "null_as_default")]
    pub challenges_result: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub last_final_block: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_ds_final_block: String,
    #[serde(deserialize_with = "null_as_default")]
    pub next_bp_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub block_merkle_root: String,
    /// `None` where the corresponding block producer did not approve.
    #[serde(deserialize_with = "null_as_default")]
    pub approvals: Vec<Option<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latest_protocol_version: u32,
}

// ==============================================================================
// Chunk
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkHeader {
    #[serde(deserialize_with = "null_as_default")]
    pub chunk_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_block_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub outcome_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_state_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub encoded_merkle_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub encoded_length: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub height_created: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub height_included: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub shard_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_used: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub rent_paid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub validator_reward: String,
    #[serde(deserialize_with = "null_as_default")]
    pub balance_burnt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub outgoing_receipts_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub validator_proposals: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/block_123456.json");

    fn fixture_block() -> BlockResult {
        serde_json::from_str(FIXTURE).expect("fixture block must decode")
    }

    #[test]
    fn decodes_header_fields() {
        let block = fixture_block();
        assert_eq!(block.author, "node1.poolv1.near");
        assert_eq!(block.header.height, 123_456);
        assert_eq!(block.header.chunks_included, 1);
        assert_eq!(block.header.timestamp, 1_595_370_903_490_150_000);
        assert_eq!(block.header.timestamp_nanosec, "1595370903490150912");
        assert_eq!(block.header.chunk_mask, vec![true, false]);
        assert_eq!(
            block.header.total_supply,
            "1019638129521453802563281219834620"
        );
        assert_eq!(block.header.latest_protocol_version, 29);
        assert_eq!(block.header.approvals.len(), 2);
        assert!(block.header.approvals[0].is_some());
        assert!(block.header.approvals[1].is_none());
    }

    #[test]
    fn keeps_validator_proposals_opaque() {
        let block = fixture_block();
        assert_eq!(block.header.validator_proposals.len(), 1);
        assert_eq!(
            block.header.validator_proposals[0]["account_id"],
            "node2.poolv1.near"
        );
        assert!(block.header.challenges_result.is_empty());
    }

    #[test]
    fn decodes_chunks_in_order() {
        let block = fixture_block();
        assert_eq!(block.chunks.len(), 2);
        assert_eq!(block.chunks[0].shard_id, 0);
        assert_eq!(block.chunks[0].gas_used, 424_555_062_500);
        assert_eq!(block.chunks[0].gas_limit, 1_000_000_000_000_000);
        assert_eq!(block.chunks[0].balance_burnt, "42455506250000000000");
        assert_eq!(block.chunks[1].shard_id, 1);
        assert_eq!(block.chunks[1].height_included, 123_454);
    }

    #[test]
    fn reencoding_preserves_every_field() {
        let original: serde_json::Value =
            serde_json::from_str(FIXTURE).expect("fixture must be JSON");
        let reencoded = serde_json::to_value(fixture_block()).expect("block must encode");
        assert_eq!(reencoded, original);
    }

    #[test]
    fn missing_fields_default_and_unknown_fields_are_ignored() {
        let block: BlockResult = serde_json::from_value(serde_json::json!({
            "author": "a.near",
            "header": { "height": 7, "block_body_hash": "ignored" }
        }))
        .expect("partial block must decode");
        assert_eq!(block.header.height, 7);
        assert!(block.header.hash.is_empty());
        assert!(block.chunks.is_empty());
    }

    #[test]
    fn null_fields_decode_to_defaults() {
        let block: BlockResult = serde_json::from_value(serde_json::json!({
            "author": null,
            "header": {
                "height": 9,
                "hash": null,
                "timestamp": null,
                "validator_proposals": null,
                "challenges_result": null,
                "approvals": [null, "ed25519:sig"]
            },
            "chunks": [{ "shard_id": null, "validator_proposals": null }]
        }))
        .expect("null fields must decode");
        assert!(block.author.is_empty());
        assert_eq!(block.header.height, 9);
        assert!(block.header.hash.is_empty());
        assert_eq!(block.header.timestamp, 0);
        assert!(block.header.validator_proposals.is_empty());
        assert!(block.header.challenges_result.is_empty());
        assert_eq!(
            block.header.approvals,
            vec![None, Some("ed25519:sig".to_owned())]
        );
        assert_eq!(block.chunks[0].shard_id, 0);
        assert!(block.chunks[0].validator_proposals.is_empty());

        let block: BlockResult =
            serde_json::from_value(serde_json::json!({ "header": null, "chunks": null }))
                .expect("null header and chunks must decode");
        assert_eq!(block, BlockResult::default());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let err = serde_json::from_value::<BlockResult>(serde_json::json!({
            "header": { "height": "not-a-number" }
        }))
        .expect_err("string height must fail");
        assert!(err.to_string().contains("invalid type"));
    }
}
