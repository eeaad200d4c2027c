use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ExchangeError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    /// Zero or negative amount where a positive one is required.
    InvalidAmount = 102,
    /// Proportional add supplied less token than the reserve ratio requires.
    InsufficientTokenAmount = 103,
    InsufficientShares = 104,
    EmptyPool = 105,
    /// Pricing requested against a zero or negative reserve.
    InvalidReserves = 106,
    /// Slippage guard tripped.
    InsufficientOutputAmount = 107,
    InvalidK = 108,
    DepositNotReceived = 109,
    Locked = 110,
    Overflow = 111,
}
