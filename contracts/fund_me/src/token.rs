use soroban_sdk::{token::TokenClient, Address, Env};

pub fn transfer(env: &Env, token: &Address, from: &Address, to: &Address, amount: &i128) {
    TokenClient::new(env, token).transfer(from, to, amount);
}

/// Like [`transfer`], but reports a failing token call instead of trapping.
pub fn try_transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: &i128,
) -> bool {
    matches!(
        TokenClient::new(env, token).try_transfer(from, to, amount),
        Ok(Ok(()))
    )
}

pub fn balance(env: &Env, token: &Address, id: &Address) -> i128 {
    TokenClient::new(env, token).balance(id)
}

pub fn decimals(env: &Env, token: &Address) -> u32 {
    TokenClient::new(env, token).decimals()
}
