//! Constant-product pool engine.
//!
//! Every operation follows the same shape: validate, snapshot reserves once,
//! compute with floor division, then mutate shares and move assets. No state
//! is written before the last check that can fail on caller input.

use soroban_sdk::{log, Address, Env};

use crate::{
    errors::ExchangeError,
    events::ExchangeEvents,
    math,
    reentrancy,
    reserves::{Asset, AssetLedger, ReserveAccessor, ReserveSnapshot},
    share_ledger::ShareLedger,
};

pub struct AmmEngine<'a, L: AssetLedger> {
    env: &'a Env,
    ledger: L,
    shares: ShareLedger<'a>,
}

impl<'a, L: AssetLedger> AmmEngine<'a, L> {
    pub fn new(env: &'a Env, ledger: L) -> Self {
        Self {
            env,
            ledger,
            shares: ShareLedger::new(env),
        }
    }

    pub fn reserves(&self) -> ReserveSnapshot {
        self.ledger.snapshot()
    }

    /// Token amount a proportional add of `native_amount` must bring.
    /// Zero on an empty pool, where the first provider sets the ratio.
    pub fn quote_add_liquidity(&self, native_amount: i128) -> Result<i128, ExchangeError> {
        if native_amount < 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        if self.shares.total_supply() == 0 {
            return Ok(0);
        }
        let reserves = self.ledger.snapshot();
        math::required_token_amount(self.env, native_amount, reserves.native, reserves.token)
    }

    /// Deposits `native_amount` plus the ratio-required token amount and
    /// mints shares to `provider`.
    ///
    /// `token_amount` is an upper bound: on a funded pool exactly the
    /// required amount is pulled and any excess stays with the provider.
    pub fn add_liquidity(
        &self,
        provider: &Address,
        native_amount: i128,
        token_amount: i128,
    ) -> Result<i128, ExchangeError> {
        reentrancy::guarded(self.env, || {
            if native_amount <= 0 || token_amount < 0 {
                return Err(ExchangeError::InvalidAmount);
            }

            let before = self.ledger.snapshot();
            let supply = self.shares.total_supply();

            let (minted, token_pulled) = if supply == 0 {
                if token_amount == 0 {
                    return Err(ExchangeError::InvalidAmount);
                }
                // Shares are denominated in the native unit.
                (native_amount, token_amount)
            } else {
                let required = math::required_token_amount(
                    self.env,
                    native_amount,
                    before.native,
                    before.token,
                )?;
                if token_amount < required {
                    return Err(ExchangeError::InsufficientTokenAmount);
                }
                let minted = math::shares_for_deposit(self.env, native_amount, supply, before.native)?;
                if minted <= 0 {
                    return Err(ExchangeError::InvalidAmount);
                }
                (minted, required)
            };

            self.pull_deposit(provider, &before, native_amount, token_pulled)?;
            self.shares.mint(provider, minted)?;

            log!(self.env, "add_liquidity", native_amount, token_pulled, minted);
            ExchangeEvents::add_liquidity(self.env, provider, native_amount, token_pulled, minted);
            Ok(minted)
        })
    }

    /// Floor pro-rata claim of `shares` on both reserves.
    pub fn quote_remove_liquidity(&self, shares: i128) -> Result<(i128, i128), ExchangeError> {
        if shares <= 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let supply = self.shares.total_supply();
        if supply == 0 {
            return Err(ExchangeError::EmptyPool);
        }
        let reserves = self.ledger.snapshot();
        let native = math::pro_rata(self.env, reserves.native, shares, supply)?;
        let token = math::pro_rata(self.env, reserves.token, shares, supply)?;
        Ok((native, token))
    }

    /// Burns `shares` from `provider` and pays out the pro-rata reserves.
    /// The burn precedes both payouts.
    pub fn remove_liquidity(
        &self,
        provider: &Address,
        shares: i128,
    ) -> Result<(i128, i128), ExchangeError> {
        reentrancy::guarded(self.env, || {
            let (native, token) = self.quote_remove_liquidity(shares)?;
            if self.shares.balance_of(provider) < shares {
                return Err(ExchangeError::InsufficientShares);
            }

            self.shares.burn(provider, shares)?;
            if native > 0 {
                self.ledger.credit(Asset::Native, provider, native);
            }
            if token > 0 {
                self.ledger.credit(Asset::Token, provider, token);
            }

            log!(self.env, "remove_liquidity", shares, native, token);
            ExchangeEvents::remove_liquidity(self.env, provider, shares, native, token);
            Ok((native, token))
        })
    }

    /// Sells `amount_in` of `input` for the other asset. Fails with
    /// `InsufficientOutputAmount` when the output is zero or below `min_out`.
    ///
    /// A zero quote is rejected even with `min_out == 0`: taking input for no
    /// output is never a valid trade.
    pub fn swap(
        &self,
        trader: &Address,
        input: Asset,
        amount_in: i128,
        min_out: i128,
    ) -> Result<i128, ExchangeError> {
        reentrancy::guarded(self.env, || {
            if amount_in <= 0 {
                return Err(ExchangeError::InvalidAmount);
            }
            if self.shares.total_supply() == 0 {
                return Err(ExchangeError::EmptyPool);
            }

            let output = input.other();
            // Priced before the input is pulled so it is not counted twice.
            let before = self.ledger.snapshot();
            let amount_out = math::get_amount_of_tokens(
                self.env,
                amount_in,
                before.of(input),
                before.of(output),
            )?;
            if amount_out == 0 || amount_out < min_out {
                return Err(ExchangeError::InsufficientOutputAmount);
            }

            self.ledger.debit(input, trader, amount_in);
            self.ledger.credit(output, trader, amount_out);

            let after = self.ledger.snapshot();
            if math::product(self.env, after.native, after.token)
                < math::product(self.env, before.native, before.token)
            {
                return Err(ExchangeError::InvalidK);
            }

            log!(self.env, "swap", amount_in, amount_out);
            ExchangeEvents::swap(self.env, trader, input, amount_in, amount_out);
            Ok(amount_out)
        })
    }

    /// Pulls the deposit and checks custody grew by at least the pulled amounts.
    fn pull_deposit(
        &self,
        provider: &Address,
        before: &ReserveSnapshot,
        native_amount: i128,
        token_amount: i128,
    ) -> Result<(), ExchangeError> {
        let expected_native = before
            .native
            .checked_add(native_amount)
            .ok_or(ExchangeError::Overflow)?;
        let expected_token = before
            .token
            .checked_add(token_amount)
            .ok_or(ExchangeError::Overflow)?;

        self.ledger.debit(Asset::Native, provider, native_amount);
        if token_amount > 0 {
            self.ledger.debit(Asset::Token, provider, token_amount);
        }

        let after = self.ledger.snapshot();
        if after.native < expected_native || after.token < expected_token {
            return Err(ExchangeError::DepositNotReceived);
        }
        Ok(())
    }
}
