#![no_std]

use price_feed_interface::RoundData;
use soroban_sdk::{contract, contractimpl, contracttype, Env, String};

pub const VERSION: u32 = 4;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Decimals,    // -> u32
    LatestRound, // -> RoundData
}

/// Settable aggregator for local networks and tests.
#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn __constructor(env: Env, decimals: u32, initial_answer: i128) {
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        Self::publish_round(&env, 0, initial_answer);
    }

    /// Publish a new answer as the next round
    pub fn update_answer(env: Env, answer: i128) {
        let round_id = Self::latest_round_data(env.clone()).round_id + 1;
        Self::publish_round(&env, round_id, answer);
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .unwrap_or_default()
    }

    pub fn latest_round_data(env: Env) -> RoundData {
        env.storage()
            .instance()
            .get(&DataKey::LatestRound)
            .unwrap_or(RoundData {
                round_id: 0,
                answer: 0,
                started_at: 0,
                updated_at: 0,
                answered_in_round: 0,
            })
    }

    pub fn version(_env: Env) -> u32 {
        VERSION
    }

    pub fn description(env: Env) -> String {
        String::from_str(&env, "v0.8/tests/MockV3Aggregator")
    }

    fn publish_round(env: &Env, round_id: u64, answer: i128) {
        let now = env.ledger().timestamp();
        let round = RoundData {
            round_id,
            answer,
            started_at: now,
            updated_at: now,
            answered_in_round: round_id,
        };
        env.storage().instance().set(&DataKey::LatestRound, &round);
    }
}
