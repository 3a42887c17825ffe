#![no_std]

mod errors;
mod events;
mod price_converter;
mod storage;
mod token;

pub use errors::FundMeError;
pub use price_converter::PRECISION_DECIMALS;

use events::{FundedEvent, WithdrawnEvent};
use soroban_sdk::{contract, contractimpl, Address, Env};
use storage::DataKey;

/// 50 USD with [`PRECISION_DECIMALS`] decimals
pub const DEFAULT_MINIMUM_USD: i128 = 50 * 10i128.pow(PRECISION_DECIMALS);

/// How a withdrawal walks the contributor sequence while resetting it.
#[derive(Clone, Copy)]
enum FunderScan {
    /// Re-read the sequence from storage on every step
    Repeated,
    /// Read the sequence once into a local copy
    Cached,
}

#[contract]
pub struct FundMeContract;

#[contractimpl]
impl FundMeContract {
    /// Fix the owner, price feed, custody token and minimum contribution
    pub fn __constructor(
        env: Env,
        owner: Address,
        price_feed: Address,
        token: Address,
        minimum_usd: i128,
    ) {
        let instance = env.storage().instance();
        instance.set(&DataKey::Owner, &owner);
        instance.set(&DataKey::PriceFeed, &price_feed);
        instance.set(&DataKey::Token, &token);
        instance.set(&DataKey::MinimumUsd, &minimum_usd);
    }

    /// Contribute `amount` of the custody token
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), FundMeError> {
        // Require funder authorization
        funder.require_auth();

        // Enforce the minimum before any value moves
        let usd_value = Self::usd_value(&env, amount)?;
        if amount <= 0 || usd_value < storage::minimum_usd(&env)? {
            return Err(FundMeError::InsufficientContribution);
        }

        // Transfer tokens from funder to contract
        let token = storage::token(&env)?;
        let contract_address = env.current_contract_address();
        token::transfer(&env, &token, &funder, &contract_address, &amount);

        // Record the contribution
        let funded = storage::amount_funded(&env, &funder)
            .checked_add(amount)
            .ok_or(FundMeError::ArithmeticOverflow)?;
        storage::set_amount_funded(&env, &funder, funded);

        let mut funders = storage::funders(&env);
        funders.push_back(funder.clone());
        storage::set_funders(&env, &funders);

        FundedEvent {
            funder,
            amount,
            usd_value,
        }
        .publish(&env);

        Ok(())
    }

    /// Sweep the whole balance to the owner and reset every contributor (owner only)
    pub fn withdraw(env: Env, caller: Address) -> Result<(), FundMeError> {
        Self::sweep(&env, &caller, FunderScan::Repeated)
    }

    /// Same outcome as [`Self::withdraw`], reading the contributor sequence once
    pub fn cheaper_withdraw(env: Env, caller: Address) -> Result<(), FundMeError> {
        Self::sweep(&env, &caller, FunderScan::Cached)
    }

    /// Get owner address
    pub fn get_owner(env: Env) -> Result<Address, FundMeError> {
        storage::owner(&env)
    }

    /// Get price feed address
    pub fn get_price_feed(env: Env) -> Result<Address, FundMeError> {
        storage::price_feed(&env)
    }

    /// Get custody token address
    pub fn get_token(env: Env) -> Result<Address, FundMeError> {
        storage::token(&env)
    }

    pub fn get_minimum_usd(env: Env) -> Result<i128, FundMeError> {
        storage::minimum_usd(&env)
    }

    /// Get the funder recorded at `index` of the contributor sequence
    pub fn get_funder(env: Env, index: u32) -> Result<Address, FundMeError> {
        storage::funders(&env)
            .get(index)
            .ok_or(FundMeError::IndexOutOfRange)
    }

    pub fn get_funder_count(env: Env) -> u32 {
        storage::funders(&env).len()
    }

    /// Cumulative amount funded since the last withdrawal, zero if never seen
    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        storage::amount_funded(&env, &funder)
    }

    /// Get the custody balance held by the contract
    pub fn get_balance(env: Env) -> Result<i128, FundMeError> {
        let token = storage::token(&env)?;
        Ok(token::balance(&env, &token, &env.current_contract_address()))
    }

    /// Get the price feed's version
    pub fn get_version(env: Env) -> Result<u32, FundMeError> {
        let price_feed = storage::price_feed(&env)?;
        Ok(price_feed_interface::PriceFeedClient::new(&env, &price_feed).version())
    }

    /// USD value of `amount` at the current feed price
    pub fn get_usd_value(env: Env, amount: i128) -> Result<i128, FundMeError> {
        Self::usd_value(&env, amount)
    }
}

impl FundMeContract {
    fn usd_value(env: &Env, amount: i128) -> Result<i128, FundMeError> {
        let price_feed = storage::price_feed(env)?;
        let token = storage::token(env)?;
        price_converter::get_conversion_rate(
            env,
            &price_feed,
            amount,
            token::decimals(env, &token),
        )
    }

    /// Owner-gated sweep shared by both withdrawal entry points.
    ///
    /// All bookkeeping is reset before the outbound transfer. A failed
    /// transfer returns an error, which reverts the reset.
    fn sweep(env: &Env, caller: &Address, scan: FunderScan) -> Result<(), FundMeError> {
        let owner = storage::owner(env)?;
        if *caller != owner {
            return Err(FundMeError::NotOwner);
        }

        // Require owner authorization
        caller.require_auth();

        let funder_count = Self::reset_funders(env, scan);

        let token = storage::token(env)?;
        let contract_address = env.current_contract_address();
        let amount = token::balance(env, &token, &contract_address);
        if amount > 0 && !token::try_transfer(env, &token, &contract_address, &owner, &amount) {
            return Err(FundMeError::TransferFailed);
        }

        WithdrawnEvent {
            owner,
            amount,
            funder_count,
        }
        .publish(env);

        Ok(())
    }

    /// Zero every recorded contributor and empty the sequence.
    /// Returns the number of sequence entries visited.
    fn reset_funders(env: &Env, scan: FunderScan) -> u32 {
        let visited = match scan {
            FunderScan::Repeated => {
                let mut index = 0;
                while index < storage::funders(env).len() {
                    if let Some(funder) = storage::funders(env).get(index) {
                        storage::reset_amount_funded(env, &funder);
                    }
                    index += 1;
                }
                index
            }
            FunderScan::Cached => {
                let funders = storage::funders(env);
                for funder in funders.iter() {
                    storage::reset_amount_funded(env, &funder);
                }
                funders.len()
            }
        };
        storage::clear_funders(env);
        visited
    }
}
