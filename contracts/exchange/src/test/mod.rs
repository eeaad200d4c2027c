#![cfg(test)]

// ---------------------------------------------------------------------------
// Exchange test suite
//
// 1. math          — pricing and ratio primitives (no contract needed)
// 2. share_ledger  — pool-share bookkeeping under a stub contract
// 3. engine        — engine against an in-memory asset ledger
// 4. reentrancy / events
// 5. below         — the deployed contract against two Stellar Asset Contracts
// ---------------------------------------------------------------------------


use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};

use crate::{errors::ExchangeError, Exchange, ExchangeClient};

const ONE: i128 = 1_000_000_000_000_000_000; // 1e18

struct Setup {
    env: Env,
    exchange: ExchangeClient<'static>,
    native: TokenClient<'static>,
    token: TokenClient<'static>,
    owner: Address,
    other: Address,
}

fn create_asset(env: &Env, admin: &Address) -> Address {
    env.register_stellar_asset_contract_v2(admin.clone()).address()
}

fn deploy() -> (Env, ExchangeClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let native_id = create_asset(&env, &admin);
    let token_id = create_asset(&env, &admin);

    let exchange_id = env.register_contract(None, Exchange);
    let exchange = ExchangeClient::new(&env, &exchange_id);
    (env, exchange, native_id, token_id)
}

/// Deployed and initialized pool; `owner` holds 100 token and 1000 native,
/// `other` holds the same.
fn setup() -> Setup {
    let (env, exchange, native_id, token_id) = deploy();
    exchange.initialize(
        &native_id,
        &token_id,
        &String::from_str(&env, "CryptoDev LP Token"),
        &String::from_str(&env, "CDLP"),
    );

    let owner = Address::generate(&env);
    let other = Address::generate(&env);
    for holder in [&owner, &other] {
        StellarAssetClient::new(&env, &native_id).mint(holder, &(1_000 * ONE));
        StellarAssetClient::new(&env, &token_id).mint(holder, &(100 * ONE));
    }

    let native = TokenClient::new(&env, &native_id);
    let token = TokenClient::new(&env, &token_id);
    Setup {
        env,
        exchange,
        native,
        token,
        owner,
        other,
    }
}

// ---------------------------------------------------------------------------
// initialize / metadata
// ---------------------------------------------------------------------------

#[test]
fn initialize_records_share_metadata() {
    let s = setup();
    assert_eq!(s.exchange.decimals(), 7);
    assert_eq!(s.exchange.symbol(), String::from_str(&s.env, "CDLP"));
    assert_eq!(s.exchange.name(), String::from_str(&s.env, "CryptoDev LP Token"));
    assert_eq!(s.exchange.total_supply(), 0);
    assert_eq!(s.exchange.get_reserves(), (0, 0));
}

#[test]
fn initialize_twice_fails() {
    let s = setup();
    let result = s.exchange.try_initialize(
        &s.native.address,
        &s.token.address,
        &String::from_str(&s.env, "x"),
        &String::from_str(&s.env, "x"),
    );
    assert_eq!(result, Err(Ok(ExchangeError::AlreadyInitialized)));
}

#[test]
fn operations_before_initialize_fail() {
    let (env, exchange, _, _) = deploy();
    let user = Address::generate(&env);

    assert_eq!(
        exchange.try_add_liquidity(&user, &10, &10),
        Err(Ok(ExchangeError::NotInitialized))
    );
    assert_eq!(exchange.try_get_reserves(), Err(Ok(ExchangeError::NotInitialized)));
    // Pure pricing needs no pool.
    assert_eq!(exchange.get_amount_of_tokens(&ONE, &(100 * ONE), &(100 * ONE)), 980_295_078_720_665_412);
}

// ---------------------------------------------------------------------------
// add_liquidity
// ---------------------------------------------------------------------------

#[test]
fn initial_liquidity_mints_native_amount() {
    let s = setup();
    let minted = s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));

    assert_eq!(minted, 10 * ONE);
    assert_eq!(s.exchange.balance(&s.owner), 10 * ONE);
    assert_eq!(s.exchange.total_supply(), 10 * ONE);
    assert_eq!(s.exchange.get_reserves(), (10 * ONE, 10 * ONE));
    assert_eq!(s.exchange.get_reserve(), 10 * ONE);
}

#[test]
fn second_add_keeps_ratio() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));

    assert_eq!(s.exchange.balance(&s.owner), 20 * ONE);
}

#[test]
fn add_cannot_break_ratio() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));

    let result = s.exchange.try_add_liquidity(&s.owner, &(50 * ONE), &(10 * ONE));
    assert_eq!(result, Err(Ok(ExchangeError::InsufficientTokenAmount)));
    assert_eq!(s.exchange.total_supply(), 10 * ONE);
    assert_eq!(s.native.balance(&s.owner), 990 * ONE);
}

#[test]
fn quote_add_matches_required_amount() {
    let s = setup();
    assert_eq!(s.exchange.quote_add_liquidity(&(5 * ONE)), 0);

    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(40 * ONE));
    let required = s.exchange.quote_add_liquidity(&(5 * ONE));
    assert_eq!(required, 20 * ONE);

    assert_eq!(
        s.exchange.try_add_liquidity(&s.other, &(5 * ONE), &(required - 1)),
        Err(Ok(ExchangeError::InsufficientTokenAmount))
    );
    assert_eq!(s.exchange.add_liquidity(&s.other, &(5 * ONE), &required), 5 * ONE);
}

// ---------------------------------------------------------------------------
// remove_liquidity
// ---------------------------------------------------------------------------

#[test]
fn remove_returns_all_deposited_assets() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));

    let (native, token) = s.exchange.remove_liquidity(&s.owner, &(10 * ONE));

    assert_eq!((native, token), (10 * ONE, 10 * ONE));
    assert_eq!(s.exchange.total_supply(), 0);
    assert_eq!(s.token.balance(&s.owner), 100 * ONE);
    assert_eq!(s.native.balance(&s.owner), 1_000 * ONE);
}

#[test]
fn original_provider_exits_after_second_provider_joins() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));
    s.exchange.add_liquidity(&s.other, &(10 * ONE), &(10 * ONE));
    assert_eq!(s.exchange.total_supply(), 20 * ONE);

    let (native, token) = s.exchange.remove_liquidity(&s.owner, &(10 * ONE));

    assert_eq!(native, 10 * ONE);
    assert_eq!(token, 10 * ONE);
    assert_eq!(s.token.balance(&s.owner), 100 * ONE);
    assert_eq!(s.exchange.balance(&s.other), 10 * ONE);
    assert_eq!(s.exchange.get_reserves(), (10 * ONE, 10 * ONE));
}

#[test]
fn remove_errors() {
    let s = setup();
    assert_eq!(
        s.exchange.try_remove_liquidity(&s.owner, &ONE),
        Err(Ok(ExchangeError::EmptyPool))
    );

    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));
    assert_eq!(
        s.exchange.try_remove_liquidity(&s.owner, &0),
        Err(Ok(ExchangeError::InvalidAmount))
    );
    assert_eq!(
        s.exchange.try_remove_liquidity(&s.other, &ONE),
        Err(Ok(ExchangeError::InsufficientShares))
    );
}

#[test]
fn quote_remove_previews_redemption() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(30 * ONE));

    let preview = s.exchange.quote_remove_liquidity(&(5 * ONE));
    assert_eq!(preview, (5 * ONE, 15 * ONE));
    assert_eq!(s.exchange.remove_liquidity(&s.owner, &(5 * ONE)), preview);
}

#[test]
fn transferred_shares_are_redeemable_by_recipient() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));
    s.exchange.transfer(&s.owner, &s.other, &(4 * ONE));

    assert_eq!(s.exchange.balance(&s.owner), 6 * ONE);
    assert_eq!(s.exchange.balance(&s.other), 4 * ONE);
    assert_eq!(
        s.exchange.try_transfer(&s.other, &s.owner, &(5 * ONE)),
        Err(Ok(ExchangeError::InsufficientShares))
    );

    let (native, token) = s.exchange.remove_liquidity(&s.other, &(4 * ONE));
    assert_eq!((native, token), (4 * ONE, 4 * ONE));
    assert_eq!(s.token.balance(&s.other), 104 * ONE);
}

// ---------------------------------------------------------------------------
// swaps
// ---------------------------------------------------------------------------

#[test]
fn swap_native_for_token_pays_quote() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));

    let (native_reserve, token_reserve) = s.exchange.get_reserves();
    let quoted = s
        .exchange
        .get_amount_of_tokens(&(10 * ONE), &native_reserve, &token_reserve);
    let before = s.token.balance(&s.other);

    let out = s.exchange.swap_native_for_token(&s.other, &(10 * ONE), &quoted);

    assert_eq!(out, quoted);
    assert_eq!(s.token.balance(&s.other), before + quoted);
    assert_eq!(s.exchange.get_reserves(), (20 * ONE, 10 * ONE - quoted));
}

#[test]
fn swap_token_for_native_pays_quote() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));

    let (native_reserve, token_reserve) = s.exchange.get_reserves();
    let quoted = s.exchange.get_amount_of_tokens(&ONE, &token_reserve, &native_reserve);
    let before = s.native.balance(&s.other);

    let out = s.exchange.swap_token_for_native(&s.other, &ONE, &quoted);

    assert_eq!(out, quoted);
    assert_eq!(s.native.balance(&s.other), before + quoted);
    assert_eq!(s.token.balance(&s.other), 99 * ONE);
}

#[test]
fn swap_grows_reserve_product_and_keeps_supply() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));
    let (n0, t0) = s.exchange.get_reserves();

    s.exchange.swap_native_for_token(&s.other, &(3 * ONE), &1);
    s.exchange.swap_token_for_native(&s.other, &(2 * ONE), &1);
    let (n1, t1) = s.exchange.get_reserves();

    // Products of 1e19-scale reserves overflow i128; compare in the contract's widened math.
    let k0 = crate::math::product(&s.env, n0, t0);
    let k1 = crate::math::product(&s.env, n1, t1);
    assert!(k1 > k0);
    assert_eq!(s.exchange.total_supply(), 10 * ONE);
}

#[test]
fn slippage_guard_rolls_back_swap() {
    let s = setup();
    s.exchange.add_liquidity(&s.owner, &(10 * ONE), &(10 * ONE));

    let (native_reserve, token_reserve) = s.exchange.get_reserves();
    let quoted = s.exchange.get_amount_of_tokens(&ONE, &native_reserve, &token_reserve);

    let result = s.exchange.try_swap_native_for_token(&s.other, &ONE, &(quoted + 1));
    assert_eq!(result, Err(Ok(ExchangeError::InsufficientOutputAmount)));
    assert_eq!(s.native.balance(&s.other), 1_000 * ONE);
    assert_eq!(s.exchange.get_reserves(), (native_reserve, token_reserve));
}

#[test]
fn swap_on_empty_pool_fails() {
    let s = setup();
    assert_eq!(
        s.exchange.try_swap_token_for_native(&s.other, &ONE, &0),
        Err(Ok(ExchangeError::EmptyPool))
    );
    assert_eq!(
        s.exchange.try_get_amount_of_tokens(&ONE, &0, &(10 * ONE)),
        Err(Ok(ExchangeError::InvalidReserves))
    );
}
