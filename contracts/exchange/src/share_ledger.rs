//! Pool-share bookkeeping. Supply always equals the sum of holder balances;
//! nothing here touches reserves.

use soroban_sdk::{Address, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};

use crate::{errors::ExchangeError, storage};

pub struct ShareLedger<'a> {
    env: &'a Env,
}

impl<'a> ShareLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn total_supply(&self) -> i128 {
        storage::get_total_shares(self.env)
    }

    pub fn balance_of(&self, holder: &Address) -> i128 {
        storage::get_shares(self.env, holder)
    }

    pub fn mint(&self, holder: &Address, amount: i128) -> Result<(), ExchangeError> {
        if amount <= 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let balance = self
            .balance_of(holder)
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)?;
        let supply = self
            .total_supply()
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)?;

        storage::set_shares(self.env, holder, balance);
        storage::set_total_shares(self.env, supply);

        TokenUtils::new(self.env)
            .events()
            .mint(self.env.current_contract_address(), holder.clone(), amount);
        Ok(())
    }

    pub fn burn(&self, holder: &Address, amount: i128) -> Result<(), ExchangeError> {
        if amount <= 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let balance = self.balance_of(holder);
        if balance < amount {
            return Err(ExchangeError::InsufficientShares);
        }

        storage::set_shares(self.env, holder, balance - amount);
        storage::set_total_shares(self.env, self.total_supply() - amount);

        TokenUtils::new(self.env).events().burn(holder.clone(), amount);
        Ok(())
    }

    /// Moves shares between holders; supply is untouched.
    pub fn transfer(&self, from: &Address, to: &Address, amount: i128) -> Result<(), ExchangeError> {
        if amount < 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(ExchangeError::InsufficientShares);
        }

        if from != to {
            let to_balance = self
                .balance_of(to)
                .checked_add(amount)
                .ok_or(ExchangeError::Overflow)?;
            storage::set_shares(self.env, from, from_balance - amount);
            storage::set_shares(self.env, to, to_balance);
        }

        TokenUtils::new(self.env)
            .events()
            .transfer(from.clone(), to.clone(), amount);
        Ok(())
    }
}

pub fn write_metadata(env: &Env, decimals: u32, name: String, symbol: String) {
    TokenUtils::new(env).metadata().set_metadata(&TokenMetadata {
        decimal: decimals,
        name,
        symbol,
    });
}

pub fn read_metadata(env: &Env) -> TokenMetadata {
    TokenUtils::new(env).metadata().get_metadata()
}
