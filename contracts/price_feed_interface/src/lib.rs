#![no_std]

use soroban_sdk::{contractclient, contracttype, Env, String};

/// A single answer published by an aggregator round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    /// Quoted price, scaled by `10^decimals()`
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// Read-only surface of an external price aggregator.
///
/// Any contract exporting these functions can back a funding ledger.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    /// Number of decimals the `answer` of every round is expressed in.
    fn decimals(env: Env) -> u32;

    /// The most recently published round.
    fn latest_round_data(env: Env) -> RoundData;

    fn version(env: Env) -> u32;

    fn description(env: Env) -> String;
}
