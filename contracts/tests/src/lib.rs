#![cfg(test)]
extern crate std;

use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env, Vec,
};

use fund_me::{FundMeContract, FundMeContractClient as FundMeClient, FundMeError, DEFAULT_MINIMUM_USD};
use mock_price_feed::{MockPriceFeed, MockPriceFeedClient as FeedClient};
use price_feed_interface::PriceFeedClient;

const FEED_DECIMALS: u32 = 8;
const INITIAL_ANSWER: i128 = 2_000_00000000;
const SEND_VALUE: i128 = 10_000_000;

struct Deployment<'a> {
    env: Env,
    owner: Address,
    fund_me: FundMeClient<'a>,
    token: TokenClient<'a>,
    token_admin: StellarAssetClient<'a>,
    feed: FeedClient<'a>,
}

fn deploy<'a>() -> Deployment<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let owner = Address::generate(&env);

    let asset = env.register_stellar_asset_contract_v2(admin);
    let token = TokenClient::new(&env, &asset.address());
    let token_admin = StellarAssetClient::new(&env, &asset.address());

    let feed_id = env.register(MockPriceFeed, (FEED_DECIMALS, INITIAL_ANSWER));
    let feed = FeedClient::new(&env, &feed_id);

    let fund_me_id = env.register(
        FundMeContract,
        (owner.clone(), feed_id, asset.address(), DEFAULT_MINIMUM_USD),
    );
    let fund_me = FundMeClient::new(&env, &fund_me_id);

    token_admin.mint(&owner, &(10 * SEND_VALUE));

    Deployment {
        env,
        owner,
        fund_me,
        token,
        token_admin,
        feed,
    }
}

fn generate_funders(d: &Deployment, count: u32) -> Vec<Address> {
    let mut funders = Vec::new(&d.env);
    for _ in 0..count {
        let funder = Address::generate(&d.env);
        d.token_admin.mint(&funder, &(10 * SEND_VALUE));
        funders.push_back(funder);
    }
    funders
}

#[test]
fn test_price_feed_is_wired_to_mock() {
    let d = deploy();

    assert_eq!(d.fund_me.get_price_feed(), d.feed.address);

    // The ledger only relies on the generic feed interface
    let feed = PriceFeedClient::new(&d.env, &d.fund_me.get_price_feed());
    assert_eq!(feed.decimals(), FEED_DECIMALS);
    assert_eq!(feed.latest_round_data().answer, INITIAL_ANSWER);
}

fn withdraw_from_single_funder(cheaper: bool) {
    let d = deploy();
    d.fund_me.fund(&d.owner, &SEND_VALUE);

    let starting_fund_me_balance = d.fund_me.get_balance();
    let starting_owner_balance = d.token.balance(&d.owner);

    if cheaper {
        d.fund_me.cheaper_withdraw(&d.owner);
    } else {
        d.fund_me.withdraw(&d.owner);
    }

    assert_eq!(d.fund_me.get_balance(), 0);
    assert_eq!(
        d.token.balance(&d.owner),
        starting_owner_balance + starting_fund_me_balance
    );
}

fn withdraw_from_multiple_funders(cheaper: bool) {
    let d = deploy();

    // Owner contributes too
    d.fund_me.fund(&d.owner, &SEND_VALUE);

    let funders = generate_funders(&d, 5);
    for funder in funders.iter() {
        d.fund_me.fund(&funder, &SEND_VALUE);
    }

    let starting_fund_me_balance = d.fund_me.get_balance();
    let starting_owner_balance = d.token.balance(&d.owner);
    assert_eq!(starting_fund_me_balance, 6 * SEND_VALUE);

    if cheaper {
        d.fund_me.cheaper_withdraw(&d.owner);
    } else {
        d.fund_me.withdraw(&d.owner);
    }

    assert_eq!(
        d.token.balance(&d.owner),
        starting_owner_balance + starting_fund_me_balance
    );

    // Funders are reset properly
    let result = d.fund_me.try_get_funder(&0);
    assert_eq!(result, Err(Ok(FundMeError::IndexOutOfRange)));

    for funder in funders.iter() {
        assert_eq!(d.fund_me.get_address_to_amount_funded(&funder), 0);
    }
    assert_eq!(d.fund_me.get_address_to_amount_funded(&d.owner), 0);
}

#[test]
fn test_withdraw_single_funder() {
    withdraw_from_single_funder(false);
}

#[test]
fn test_cheaper_withdraw_single_funder() {
    withdraw_from_single_funder(true);
}

#[test]
fn test_withdraw_multiple_funders() {
    withdraw_from_multiple_funders(false);
}

#[test]
fn test_cheaper_withdraw_multiple_funders() {
    withdraw_from_multiple_funders(true);
}

#[test]
fn test_only_owner_can_withdraw() {
    let d = deploy();
    d.fund_me.fund(&d.owner, &SEND_VALUE);

    let funders = generate_funders(&d, 1);
    let attacker = funders.get(0).unwrap();

    let result = d.fund_me.try_withdraw(&attacker);
    assert_eq!(result, Err(Ok(FundMeError::NotOwner)));

    let result = d.fund_me.try_cheaper_withdraw(&attacker);
    assert_eq!(result, Err(Ok(FundMeError::NotOwner)));

    assert_eq!(d.fund_me.get_balance(), SEND_VALUE);
    assert_eq!(d.fund_me.get_funder(&0), d.owner);
}

#[test]
fn test_fund_me_protocol_e2e() {
    let d = deploy();
    let funders = generate_funders(&d, 3);

    // Round one
    for funder in funders.iter() {
        d.fund_me.fund(&funder, &SEND_VALUE);
    }
    d.fund_me.withdraw(&d.owner);

    // The feed moves; the same contribution is now worth less than the minimum
    d.feed.update_answer(&10_00000000);
    let funder = funders.get(0).unwrap();
    let result = d.fund_me.try_fund(&funder, &SEND_VALUE);
    assert_eq!(result, Err(Ok(FundMeError::InsufficientContribution)));

    // Round two at the new price
    d.fund_me.fund(&funder, &(5 * SEND_VALUE));
    assert_eq!(d.fund_me.get_funder_count(), 1);

    let owner_before = d.token.balance(&d.owner);
    d.fund_me.cheaper_withdraw(&d.owner);
    assert_eq!(d.token.balance(&d.owner), owner_before + 5 * SEND_VALUE);
    assert_eq!(d.token.balance(&funder), 10 * SEND_VALUE - 6 * SEND_VALUE);

    std::println!("fund_me e2e passed");
}
