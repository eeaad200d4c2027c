use soroban_sdk::{contracttype, token::TokenClient, Address, Env};

use crate::storage::PoolConfig;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Asset {
    Native,
    Token,
}

impl Asset {
    pub fn other(self) -> Asset {
        match self {
            Asset::Native => Asset::Token,
            Asset::Token => Asset::Native,
        }
    }
}

/// Custody of the two pooled assets. The engine never holds balances itself;
/// it pulls and pays through this interface.
pub trait AssetLedger {
    /// Address that custodies the pool's reserves.
    fn custodian(&self) -> Address;
    fn balance_of(&self, asset: Asset, holder: &Address) -> i128;
    /// Pulls `amount` of `asset` from `from` into custody.
    fn debit(&self, asset: Asset, from: &Address, amount: i128);
    /// Pays `amount` of `asset` out of custody to `to`.
    fn credit(&self, asset: Asset, to: &Address, amount: i128);
}

/// Live view of what the pool holds. Never cached across calls.
pub trait ReserveAccessor {
    fn reserve_of(&self, asset: Asset) -> i128;

    /// Reads both reserves once; an operation prices against this snapshot only.
    fn snapshot(&self) -> ReserveSnapshot {
        ReserveSnapshot {
            native: self.reserve_of(Asset::Native),
            token: self.reserve_of(Asset::Token),
        }
    }
}

impl<L: AssetLedger> ReserveAccessor for L {
    fn reserve_of(&self, asset: Asset) -> i128 {
        self.balance_of(asset, &self.custodian())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReserveSnapshot {
    pub native: i128,
    pub token: i128,
}

impl ReserveSnapshot {
    pub fn of(&self, asset: Asset) -> i128 {
        match asset {
            Asset::Native => self.native,
            Asset::Token => self.token,
        }
    }
}

/// `AssetLedger` backed by the two configured token contracts, with the
/// running contract as custodian.
pub struct TokenLedger<'a> {
    env: &'a Env,
    config: PoolConfig,
}

impl<'a> TokenLedger<'a> {
    pub fn new(env: &'a Env, config: PoolConfig) -> Self {
        Self { env, config }
    }

    fn client(&self, asset: Asset) -> TokenClient<'a> {
        let address = match asset {
            Asset::Native => &self.config.native_token,
            Asset::Token => &self.config.token,
        };
        TokenClient::new(self.env, address)
    }
}

impl AssetLedger for TokenLedger<'_> {
    fn custodian(&self) -> Address {
        self.env.current_contract_address()
    }

    fn balance_of(&self, asset: Asset, holder: &Address) -> i128 {
        self.client(asset).balance(holder)
    }

    fn debit(&self, asset: Asset, from: &Address, amount: i128) {
        self.client(asset).transfer(from, &self.custodian(), &amount);
    }

    fn credit(&self, asset: Asset, to: &Address, amount: i128) {
        self.client(asset).transfer(&self.custodian(), to, &amount);
    }
}
