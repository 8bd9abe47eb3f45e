//! Covert-channel orchestration: payload in, representative history out.
//!
//! Writing walks the framed chunks in order and publishes one
//! representative-change block per chunk. Each block's `previous` is the
//! frontier left by the one before it, so the walk is inherently
//! sequential and aborts on the first failure; blocks already accepted
//! stay on the ledger.
//!
//! Reading needs no key material, only the target account's history.

use tracing::{debug, info, warn};

use crate::error::ChannelError;
use crate::types::{NodeClient, StateBlock};
use repstash_core::{
    build_frames, change_block_hash, decode_address, encode_address, extract_payloads, Balance,
    BlockHash, Chunk, Keypair, PublicKey,
};

/// A writable covert channel bound to one ledger account.
pub struct CovertChannel<C> {
    client: C,
    keypair: Keypair,
    account: String,
}

impl<C: NodeClient> CovertChannel<C> {
    /// Bind a channel to the account derived from `seed`.
    pub fn new(client: C, seed: &[u8]) -> Result<Self, ChannelError> {
        let keypair = Keypair::from_seed(seed)?;
        let account = encode_address(keypair.public_key().as_bytes());
        Ok(Self {
            client,
            keypair,
            account,
        })
    }

    /// The channel's account address.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Write a payload into the account's representative history.
    ///
    /// Returns the hashes of the accepted blocks, in publication order.
    /// On failure the error carries the first problem hit; chunks before
    /// it are already on the ledger and will surface on the next read.
    pub async fn write(&self, payload: &[u8]) -> Result<Vec<BlockHash>, ChannelError> {
        let chunks = build_frames(payload);
        info!(
            account = %self.account,
            chunks = chunks.len(),
            bytes = payload.len(),
            "writing payload"
        );

        let mut hashes = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let representative = PublicKey::from_bytes(*chunk.as_bytes());
            hashes.push(self.publish_representative(&representative).await?);
        }
        Ok(hashes)
    }

    /// Publish one representative-change block carrying `representative`.
    async fn publish_representative(
        &self,
        representative: &PublicKey,
    ) -> Result<BlockHash, ChannelError> {
        let info = self.client.account_info(&self.account).await?;
        let previous = BlockHash::from_hex(&info.frontier)
            .map_err(|_| ChannelError::MalformedFrontier(info.frontier.clone()))?;
        let balance: Balance = info.balance.parse()?;

        let work = self.client.work_generate(&previous).await?;

        let hash = change_block_hash(
            &self.keypair.public_key(),
            &previous,
            representative,
            balance,
        );
        let signature = self.keypair.sign(hash.as_bytes());

        let block = StateBlock {
            block_type: "state".to_string(),
            account: self.account.clone(),
            previous: previous.to_hex(),
            representative: encode_address(representative.as_bytes()),
            balance: balance.to_string(),
            link: BlockHash::ZERO.to_hex(),
            signature: signature.to_hex(),
            work,
        };

        let accepted = self.client.process_change(&block).await?;
        debug!(block = %accepted, "block accepted");
        Ok(accepted)
    }
}

/// Read every payload embedded in an account's representative history.
///
/// A representative address that fails to decode is skipped with a
/// warning rather than aborting the scan; one foreign block in the
/// history must not lose the rest of the data.
pub async fn read_payloads<C: NodeClient>(
    client: &C,
    account: &str,
) -> Result<Vec<Vec<u8>>, ChannelError> {
    let representatives = client.representative_history(account).await?;
    debug!(
        account = %account,
        entries = representatives.len(),
        "scanning representative history"
    );

    let mut chunks = Vec::with_capacity(representatives.len());
    for representative in &representatives {
        match decode_address(representative) {
            Ok(key) => chunks.push(Chunk::from_bytes(key)),
            Err(err) => {
                warn!(address = %representative, %err, "skipping undecodable representative");
            }
        }
    }

    Ok(extract_payloads(&chunks).collect())
}
