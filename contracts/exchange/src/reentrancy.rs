use soroban_sdk::Env;

use crate::{
    errors::ExchangeError,
    storage::{get_reentrancy_guard, set_reentrancy_guard, ReentrancyGuard},
};

/// Acquires the pool lock. Fails with `Locked` if already held.
///
/// A failed host invocation rolls back all state, which clears the lock on
/// every error path of a contract call.
pub fn acquire(env: &Env) -> Result<(), ExchangeError> {
    let guard = get_reentrancy_guard(env);
    if guard.locked {
        return Err(ExchangeError::Locked);
    }
    set_reentrancy_guard(env, &ReentrancyGuard { locked: true });
    Ok(())
}

pub fn release(env: &Env) {
    set_reentrancy_guard(env, &ReentrancyGuard { locked: false });
}

/// Runs `op` while holding the lock and releases it on both outcomes, so
/// callers outside a host invocation see the lock cleared after an error too.
pub fn guarded<T>(
    env: &Env,
    op: impl FnOnce() -> Result<T, ExchangeError>,
) -> Result<T, ExchangeError> {
    acquire(env)?;
    let result = op();
    release(env);
    result
}
