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

//! Random channel values for round-trip tests.

#![allow(dead_code)]

use channel_bcs::types::*;
use rand::{Rng, RngCore};

pub const NONCE_LEN: usize = 32;

pub fn random_state<R: Rng>(rng: &mut R) -> (Params, State) {
    let num_parts: usize = rng.gen_range(1..10);
    let params = random_params(rng, num_parts);

    let state = State {
        channel_id: params.channel_id().unwrap(),
        version: rng.next_u32().into(),
        balances: (0..num_parts).map(|_| random_balance(rng)).collect(),
        finalized: rng.gen_bool(0.5),
    };
    (params, state)
}

pub fn random_params<R: Rng>(rng: &mut R, num_parts: usize) -> Params {
    Params {
        nonce: random_bytes(rng, NONCE_LEN),
        participants: (0..num_parts).map(|_| random_part(rng)).collect(),
        dispute_duration: rng.gen_range(1..600),
    }
}

/// A compressed secp256k1-sized public key.
pub fn random_part<R: Rng>(rng: &mut R) -> OffIdentity {
    OffIdentity(random_bytes(rng, 33))
}

pub fn random_balance<R: Rng>(rng: &mut R) -> EncodedBalance {
    let num_coins = rng.gen_range(0..9);
    EncodedBalance::from_coins(
        (0..num_coins).map(|i| (format!("asset-#{}", i), u128::from(rng.next_u64()))),
    )
    .unwrap()
}

pub fn random_withdrawal<R: Rng>(rng: &mut R) -> Withdrawal {
    let num_parts: usize = rng.gen_range(1..10);
    Withdrawal {
        channel_id: random_params(rng, num_parts).channel_id().unwrap(),
        part: random_part(rng),
        receiver: Addr(format!("cosmos1{:016x}", rng.next_u64())),
    }
}

pub fn random_bytes<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}
