#![no_std]

mod engine;
mod errors;
mod events;
mod math;
mod reentrancy;
mod reserves;
mod share_ledger;
mod storage;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; the exchange is no_std so we opt in explicitly.

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Env, String};

use engine::AmmEngine;
use errors::ExchangeError;
use events::ExchangeEvents;
use reserves::{Asset, TokenLedger};
use share_ledger::ShareLedger;
use storage::PoolConfig;

fn engine(env: &Env) -> Result<AmmEngine<'_, TokenLedger<'_>>, ExchangeError> {
    let config = storage::get_config(env).ok_or(ExchangeError::NotInitialized)?;
    Ok(AmmEngine::new(env, TokenLedger::new(env, config)))
}

fn require_initialized(env: &Env) -> Result<(), ExchangeError> {
    if storage::has_config(env) {
        Ok(())
    } else {
        Err(ExchangeError::NotInitialized)
    }
}

/// Single constant-product pool between the native asset and one token.
/// The contract is also the fungible token for its own pool shares.
#[contract]
pub struct Exchange;

#[contractimpl]
impl Exchange {
    /// Binds the pool to its two assets. Share decimals follow the native asset.
    pub fn initialize(
        env: Env,
        native_token: Address,
        token: Address,
        name: String,
        symbol: String,
    ) -> Result<(), ExchangeError> {
        if storage::has_config(&env) {
            return Err(ExchangeError::AlreadyInitialized);
        }

        let decimals = TokenClient::new(&env, &native_token).decimals();
        storage::set_config(
            &env,
            &PoolConfig {
                native_token: native_token.clone(),
                token: token.clone(),
            },
        );
        share_ledger::write_metadata(&env, decimals, name, symbol);
        storage::extend_instance_ttl(&env);

        ExchangeEvents::initialized(&env, &native_token, &token);
        Ok(())
    }

    pub fn add_liquidity(
        env: Env,
        provider: Address,
        native_amount: i128,
        token_amount: i128,
    ) -> Result<i128, ExchangeError> {
        provider.require_auth();
        let minted = engine(&env)?.add_liquidity(&provider, native_amount, token_amount)?;
        storage::extend_instance_ttl(&env);
        Ok(minted)
    }

    pub fn remove_liquidity(
        env: Env,
        provider: Address,
        shares: i128,
    ) -> Result<(i128, i128), ExchangeError> {
        provider.require_auth();
        let returned = engine(&env)?.remove_liquidity(&provider, shares)?;
        storage::extend_instance_ttl(&env);
        Ok(returned)
    }

    pub fn swap_native_for_token(
        env: Env,
        trader: Address,
        native_amount: i128,
        min_token_out: i128,
    ) -> Result<i128, ExchangeError> {
        trader.require_auth();
        let out = engine(&env)?.swap(&trader, Asset::Native, native_amount, min_token_out)?;
        storage::extend_instance_ttl(&env);
        Ok(out)
    }

    pub fn swap_token_for_native(
        env: Env,
        trader: Address,
        token_amount: i128,
        min_native_out: i128,
    ) -> Result<i128, ExchangeError> {
        trader.require_auth();
        let out = engine(&env)?.swap(&trader, Asset::Token, token_amount, min_native_out)?;
        storage::extend_instance_ttl(&env);
        Ok(out)
    }

    /// Pure pricing primitive; usable before `initialize`.
    pub fn get_amount_of_tokens(
        env: Env,
        input_amount: i128,
        input_reserve: i128,
        output_reserve: i128,
    ) -> Result<i128, ExchangeError> {
        math::get_amount_of_tokens(&env, input_amount, input_reserve, output_reserve)
    }

    pub fn quote_add_liquidity(env: Env, native_amount: i128) -> Result<i128, ExchangeError> {
        engine(&env)?.quote_add_liquidity(native_amount)
    }

    pub fn quote_remove_liquidity(env: Env, shares: i128) -> Result<(i128, i128), ExchangeError> {
        engine(&env)?.quote_remove_liquidity(shares)
    }

    /// `(native, token)` currently held by the pool.
    pub fn get_reserves(env: Env) -> Result<(i128, i128), ExchangeError> {
        let reserves = engine(&env)?.reserves();
        Ok((reserves.native, reserves.token))
    }

    pub fn get_reserve(env: Env) -> Result<i128, ExchangeError> {
        Ok(engine(&env)?.reserves().token)
    }

    // --- pool share token ---

    pub fn balance(env: Env, id: Address) -> i128 {
        ShareLedger::new(&env).balance_of(&id)
    }

    pub fn total_supply(env: Env) -> i128 {
        ShareLedger::new(&env).total_supply()
    }

    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ExchangeError> {
        from.require_auth();
        require_initialized(&env)?;
        ShareLedger::new(&env).transfer(&from, &to, amount)
    }

    pub fn decimals(env: Env) -> Result<u32, ExchangeError> {
        require_initialized(&env)?;
        Ok(share_ledger::read_metadata(&env).decimal)
    }

    pub fn name(env: Env) -> Result<String, ExchangeError> {
        require_initialized(&env)?;
        Ok(share_ledger::read_metadata(&env).name)
    }

    pub fn symbol(env: Env) -> Result<String, ExchangeError> {
        require_initialized(&env)?;
        Ok(share_ledger::read_metadata(&env).symbol)
    }
}
