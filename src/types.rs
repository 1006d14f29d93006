//! State channel types and their canonical encode/decode entry points.
//!
//! Every type here is a plain serde record. [`Canonical`] gives each of them
//! `encode`/`decode` functions that go through the BCS codec and enforce full
//! consumption of the input.

use crate::{
    config::Config,
    error::{Error, Result},
    from_bytes_with_config, to_bytes_with_config,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};
use std::any::type_name;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Uniquely identifies a channel.
///
/// Can be calculated with [Params::channel_id].
pub type ChannelId = Vec<u8>;
/// Uniquely identifies a participant's funds in a channel.
///
/// Can be calculated with [calc_funding_id].
pub type FundingId = Vec<u8>;
/// Random value that is used to make the [Params] of a channel unique.
pub type Nonce = Vec<u8>;
/// Duration in seconds.
pub type Seconds = u64;
/// State version counter.
pub type Version = u64;

/// Canonical encoding of a type.
///
/// `decode` fails with [`Error::NullInput`] on an empty buffer and with
/// [`Error::TrailingBytes`] when the value does not span the whole buffer.
pub trait Canonical: Serialize + DeserializeOwned {
    fn encode(&self) -> Result<Vec<u8>> {
        self.encode_with_config(&Config::default())
    }

    fn encode_with_config(&self, config: &Config) -> Result<Vec<u8>> {
        let bytes = to_bytes_with_config(self, config)?;
        trace!(ty = type_name::<Self>(), len = bytes.len(), "encoded");
        Ok(bytes)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with_config(bytes, &Config::default())
    }

    fn decode_with_config(bytes: &[u8], config: &Config) -> Result<Self> {
        match from_bytes_with_config::<Self>(bytes, config) {
            Ok(value) => {
                trace!(ty = type_name::<Self>(), len = bytes.len(), "decoded");
                Ok(value)
            }
            Err(err) => {
                debug!(ty = type_name::<Self>(), len = bytes.len(), %err, "rejected encoding");
                Err(err)
            }
        }
    }
}

/// On-chain account address.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub String);

impl From<&str> for Addr {
    fn from(s: &str) -> Self {
        Addr(s.to_string())
    }
}

/// Off-chain identity of a participant.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffIdentity(#[serde(with = "serde_bytes")] pub Vec<u8>);

/// Amount held per asset denomination.
///
/// Encoded as a map from denomination to a little-endian `u128`, so entries
/// always appear in denomination byte order on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedBalance(pub BTreeMap<String, u128>);

impl EncodedBalance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a balance from `(denom, amount)` pairs, summing repeated denominations.
    pub fn from_coins<I, S>(coins: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u128)>,
        S: Into<String>,
    {
        let mut balance = Self::new();
        for (denom, amount) in coins {
            balance.deposit(denom, amount)?;
        }
        Ok(balance)
    }

    /// Sets the amount of `denom`, returning the previous amount.
    pub fn insert(&mut self, denom: impl Into<String>, amount: u128) -> Option<u128> {
        self.0.insert(denom.into(), amount)
    }

    /// Adds `amount` to `denom`.
    pub fn deposit(&mut self, denom: impl Into<String>, amount: u128) -> Result<()> {
        let entry = self.0.entry(denom.into()).or_default();
        *entry = entry.checked_add(amount).ok_or(Error::IntegerOverflow)?;
        Ok(())
    }

    pub fn get(&self, denom: &str) -> u128 {
        self.0.get(denom).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u128)> {
        self.0.iter().map(|(denom, amount)| (denom.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Models `self >= other`.
    ///
    /// This is a partial order: there are balances where neither side is
    /// greater or equal to the other.
    pub fn greater_or_equal(&self, other: &EncodedBalance) -> bool {
        other.iter().all(|(denom, amount)| self.get(denom) >= amount)
    }
}

impl From<BTreeMap<String, u128>> for EncodedBalance {
    fn from(map: BTreeMap<String, u128>) -> Self {
        EncodedBalance(map)
    }
}

/// Fixed parameters of a channel.
///
/// Defines the [ChannelId] of a channel via [Params::channel_id].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    /// Makes these params unique. Should be picked randomly.
    #[serde(with = "serde_bytes")]
    pub nonce: Nonce,

    /// Off-chain identities of the participants.
    pub participants: Vec<OffIdentity>,

    /// How long a dispute is held open.
    pub dispute_duration: Seconds,
}

impl Params {
    /// SHA-256 of the canonical encoding of these params.
    pub fn channel_id(&self) -> Result<ChannelId> {
        Ok(Sha256::digest(self.encode()?).to_vec())
    }
}

/// Off-chain state of a channel.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
    /// Id of the channel this state belongs to.
    ///
    /// Locks the [Params] in place, so signing a state also signs the
    /// parameters of its channel.
    #[serde(with = "serde_bytes")]
    pub channel_id: ChannelId,

    /// Higher versions override disputes with lower versions.
    pub version: Version,

    /// Balance of each participant, in [Params::participants] order.
    pub balances: Vec<EncodedBalance>,

    /// Whether this is the last state of the channel.
    pub finalized: bool,
}

/// An on-chain dispute of a channel.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Dispute {
    pub state: State,
    /// Timeout of the dispute in seconds since the epoch.
    pub timeout: Seconds,
    pub concluded: bool,
}

/// Withdrawal authorization for on-chain funds.
///
/// Signed by an off-chain participant to move its funds to an on-chain
/// account. The signature is not part of the struct.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Withdrawal {
    /// Channel to withdraw from.
    #[serde(with = "serde_bytes")]
    pub channel_id: ChannelId,

    /// Off-chain participant to debit.
    pub part: OffIdentity,

    /// On-chain account to credit.
    pub receiver: Addr,
}

impl Withdrawal {
    pub fn funding_id(&self) -> Result<FundingId> {
        calc_funding_id(&self.channel_id, &self.part)
    }
}

/// Pairs a channel with a participant to derive a [FundingId].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Funding {
    #[serde(with = "serde_bytes")]
    pub channel: ChannelId,
    pub part: OffIdentity,
}

impl Funding {
    /// SHA-256 of the canonical encoding of this funding.
    pub fn funding_id(&self) -> Result<FundingId> {
        Ok(Sha256::digest(self.encode()?).to_vec())
    }
}

/// Calculates the funding id of `part` in `channel`.
pub fn calc_funding_id(channel: &ChannelId, part: &OffIdentity) -> Result<FundingId> {
    Funding {
        channel: channel.clone(),
        part: part.clone(),
    }
    .funding_id()
}

impl Canonical for Addr {}
impl Canonical for OffIdentity {}
impl Canonical for EncodedBalance {}
impl Canonical for Params {}
impl Canonical for State {}
impl Canonical for Dispute {}
impl Canonical for Withdrawal {}
impl Canonical for Funding {}
