// Copyright 2026 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

// Round-trip and vector tests for the state channel types.

mod common;

use channel_bcs::types::*;
use channel_bcs::{Canonical, Config, Error, Result, serialized_size};
use common::*;
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;

#[test]
fn test_state_round_trip() {
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..99 {
        let (_, state) = random_state(&mut rng);

        let encoded = state.encode().unwrap();
        let decoded = State::decode(&encoded).unwrap();

        assert_eq!(state, decoded);
        assert_eq!(decoded.encode().unwrap(), encoded);
        assert_eq!(serialized_size(&state).unwrap(), encoded.len());
    }
}

#[test]
fn test_params_round_trip() {
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..99 {
        let (params, _) = random_state(&mut rng);

        let encoded = params.encode().unwrap();
        let decoded = Params::decode(&encoded).unwrap();

        assert_eq!(params, decoded);
        assert_eq!(decoded.channel_id().unwrap(), params.channel_id().unwrap());
    }
}

#[test]
fn test_withdrawal_round_trip() {
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..99 {
        let withdrawal = random_withdrawal(&mut rng);

        let encoded = withdrawal.encode().unwrap();
        let decoded = Withdrawal::decode(&encoded).unwrap();

        assert_eq!(withdrawal, decoded);
        assert_eq!(decoded.funding_id().unwrap(), withdrawal.funding_id().unwrap());
    }
}

#[test]
fn test_dispute_round_trip() {
    let mut rng = StdRng::seed_from_u64(99);
    let (_, state) = random_state(&mut rng);
    let dispute = Dispute {
        state,
        timeout: 1_700_000_000,
        concluded: false,
    };

    let encoded = dispute.encode().unwrap();
    // A dispute is its state followed by the timeout and the flag.
    let state_len = dispute.state.encode().unwrap().len();
    assert_eq!(encoded.len(), state_len + 8 + 1);
    assert_eq!(Dispute::decode(&encoded).unwrap(), dispute);
}

#[test]
fn test_truncated_state_never_decodes() {
    let mut rng = StdRng::seed_from_u64(7);
    let (_, state) = random_state(&mut rng);
    let encoded = state.encode().unwrap();

    for len in 1..encoded.len() {
        assert!(
            State::decode(&encoded[..len]).is_err(),
            "prefix of length {} decoded",
            len
        );
    }
}

#[test]
fn test_funding_matches_withdrawal_prefix() {
    // Funding and Withdrawal share their leading fields, so the funding
    // encoding is a prefix of the withdrawal encoding.
    let withdrawal = Withdrawal {
        channel_id: vec![0x10, 0x20, 0x30],
        part: OffIdentity(vec![0x01]),
        receiver: Addr::from("addr1"),
    };
    let funding = Funding {
        channel: withdrawal.channel_id.clone(),
        part: withdrawal.part.clone(),
    };
    let w = withdrawal.encode().unwrap();
    let f = funding.encode().unwrap();
    assert!(w.starts_with(&f));
    assert!(matches!(
        Funding::decode(&w),
        Err(Error::TrailingBytes(6))
    ));
}

#[test]
fn test_depth_config_applies_to_domain_types() {
    // State -> Vec<EncodedBalance> -> EncodedBalance -> map is four levels.
    let state = State {
        channel_id: vec![1],
        version: 1,
        balances: vec![EncodedBalance::from_coins([("a", 1u128)]).unwrap()],
        finalized: false,
    };
    let shallow = Config::new().with_max_container_depth(3);
    assert!(matches!(
        state.encode_with_config(&shallow),
        Err(Error::MaxContainerDepthExceeded(3))
    ));

    let encoded = state.encode().unwrap();
    assert!(matches!(
        State::decode_with_config(&encoded, &shallow),
        Err(Error::MaxContainerDepthExceeded(3))
    ));

    let exact = Config::new().with_max_container_depth(4);
    assert_eq!(State::decode_with_config(&encoded, &exact).unwrap(), state);
}

#[derive(Deserialize)]
struct Vector {
    name: String,
    kind: String,
    bytes: Vec<u8>,
    #[serde(default)]
    error: Option<String>,
}

fn reencode<T: Canonical>(bytes: &[u8]) -> Result<Vec<u8>> {
    T::decode(bytes)?.encode()
}

fn reencode_kind(kind: &str, bytes: &[u8]) -> Result<Vec<u8>> {
    match kind {
        "addr" => reencode::<Addr>(bytes),
        "off_identity" => reencode::<OffIdentity>(bytes),
        "balance" => reencode::<EncodedBalance>(bytes),
        "params" => reencode::<Params>(bytes),
        "state" => reencode::<State>(bytes),
        "withdrawal" => reencode::<Withdrawal>(bytes),
        "funding" => reencode::<Funding>(bytes),
        other => panic!("unknown vector kind {}", other),
    }
}

#[test]
fn test_vectors() {
    let vectors: Vec<Vector> =
        serde_json::from_str(include_str!("data/vectors.json")).expect("parse vectors");
    assert!(!vectors.is_empty());

    for vector in vectors {
        let result = reencode_kind(&vector.kind, &vector.bytes);
        match (&vector.error, result) {
            (None, Ok(bytes)) => assert_eq!(bytes, vector.bytes, "{}", vector.name),
            (None, Err(err)) => panic!("{}: unexpected error {:?}", vector.name, err),
            (Some(expected), Ok(_)) => panic!("{}: expected {}", vector.name, expected),
            (Some(expected), Err(err)) => assert!(
                format!("{:?}", err).starts_with(expected.as_str()),
                "{}: expected {}, got {:?}",
                vector.name,
                expected,
                err
            ),
        }
    }
}

#[test]
fn test_withdrawal_vector_fields() {
    let bytes = [2, 1, 2, 1, 170, 5, 97, 100, 100, 114, 49];
    let withdrawal = Withdrawal::decode(&bytes).unwrap();
    assert_eq!(withdrawal.channel_id, vec![0x01, 0x02]);
    assert_eq!(withdrawal.part, OffIdentity(vec![0xAA]));
    assert_eq!(withdrawal.receiver, Addr::from("addr1"));
}
