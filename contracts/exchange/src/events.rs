use soroban_sdk::{symbol_short, Address, Env};

use crate::reserves::Asset;

pub struct ExchangeEvents;

impl ExchangeEvents {
    pub fn initialized(env: &Env, native_token: &Address, token: &Address) {
        env.events()
            .publish((symbol_short!("init"),), (native_token.clone(), token.clone()));
    }

    /// Topics: `("add_liq", provider)`
    /// Data:   `(native_amount, token_amount, shares_minted)`
    pub fn add_liquidity(
        env: &Env,
        provider: &Address,
        native_amount: i128,
        token_amount: i128,
        shares_minted: i128,
    ) {
        env.events().publish(
            (symbol_short!("add_liq"), provider),
            (native_amount, token_amount, shares_minted),
        );
    }

    /// Topics: `("rem_liq", provider)`
    /// Data:   `(shares_burned, native_returned, token_returned)`
    pub fn remove_liquidity(
        env: &Env,
        provider: &Address,
        shares_burned: i128,
        native_returned: i128,
        token_returned: i128,
    ) {
        env.events().publish(
            (symbol_short!("rem_liq"), provider),
            (shares_burned, native_returned, token_returned),
        );
    }

    /// Topics: `("swap", trader)`
    /// Data:   `(input_asset, amount_in, amount_out)`
    pub fn swap(env: &Env, trader: &Address, input: Asset, amount_in: i128, amount_out: i128) {
        env.events()
            .publish((symbol_short!("swap"), trader), (input, amount_in, amount_out));
    }
}
