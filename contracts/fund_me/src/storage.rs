use crate::errors::FundMeError;
use soroban_sdk::{contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,                 // -> Address
    PriceFeed,             // -> Address
    Token,                 // -> Address
    MinimumUsd,            // -> i128
    Funders,               // -> Vec<Address>
    AmountFunded(Address), // funder -> i128
}

fn instance_address(env: &Env, key: &DataKey) -> Result<Address, FundMeError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(FundMeError::NotInitialized)
}

pub fn owner(env: &Env) -> Result<Address, FundMeError> {
    instance_address(env, &DataKey::Owner)
}

pub fn price_feed(env: &Env) -> Result<Address, FundMeError> {
    instance_address(env, &DataKey::PriceFeed)
}

pub fn token(env: &Env) -> Result<Address, FundMeError> {
    instance_address(env, &DataKey::Token)
}

pub fn minimum_usd(env: &Env) -> Result<i128, FundMeError> {
    env.storage()
        .instance()
        .get(&DataKey::MinimumUsd)
        .ok_or(FundMeError::NotInitialized)
}

/// Contributor sequence, one entry per successful `fund`.
/// Unbounded between withdrawals: a long enough sequence outgrows the
/// ledger entry size limit and `fund` starts failing.
pub fn funders(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Funders)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_funders(env: &Env, funders: &Vec<Address>) {
    env.storage().persistent().set(&DataKey::Funders, funders);
}

pub fn clear_funders(env: &Env) {
    env.storage().persistent().remove(&DataKey::Funders);
}

pub fn amount_funded(env: &Env, funder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::AmountFunded(funder.clone()))
        .unwrap_or(0)
}

pub fn set_amount_funded(env: &Env, funder: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::AmountFunded(funder.clone()), &amount);
}

/// Removing the entry resets the funder; reads fall back to zero
pub fn reset_amount_funded(env: &Env, funder: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::AmountFunded(funder.clone()));
}
