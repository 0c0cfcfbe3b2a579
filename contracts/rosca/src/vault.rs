use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;
use crate::types::Cycle;

/// Escrow `amount` of the cycle's token from `from` into the vault and
/// credit the cycle's balance. The balance is checked first so callers get
/// a typed error instead of a token-contract trap.
pub fn deposit(
    env: &Env,
    cycle: &mut Cycle,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }
    let token_client = token::Client::new(env, &cycle.config.token);
    if token_client.balance(from) < amount {
        return Err(ContractError::InsufficientFunds);
    }
    token_client.transfer(from, &env.current_contract_address(), &amount);
    cycle.vault_balance += amount;
    Ok(())
}

/// Release `amount` from the vault to `to`, debiting the cycle's balance.
/// A withdrawal can never exceed what this cycle has escrowed, regardless
/// of what other cycles hold at the contract address.
pub fn withdraw(
    env: &Env,
    cycle: &mut Cycle,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }
    if cycle.vault_balance < amount {
        return Err(ContractError::InsufficientFunds);
    }
    let token_client = token::Client::new(env, &cycle.config.token);
    token_client.transfer(&env.current_contract_address(), to, &amount);
    cycle.vault_balance -= amount;
    Ok(())
}
