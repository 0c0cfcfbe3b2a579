use soroban_sdk::{symbol_short, Address, BytesN, Env};

use crate::errors::ContractError;
use crate::types::{CycleStatus, MemberStatus, Round};
use crate::{storage, vault};

pub fn contribute(env: &Env, member: Address, cycle_id: BytesN<32>) -> Result<(), ContractError> {
    member.require_auth();

    let mut cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;

    if cycle.status != CycleStatus::Active {
        return Err(ContractError::CycleInactive);
    }

    let mut record =
        storage::get_member(env, &cycle_id, &member).ok_or(ContractError::NotAMember)?;

    if record.status == MemberStatus::Defaulted {
        return Err(ContractError::MemberDefaulted);
    }

    let mut round = storage::get_round(env, &cycle_id, cycle.current_round)
        .ok_or(ContractError::RoundNotFound)?;

    if round.contributed.contains_key(member.clone()) {
        return Err(ContractError::AlreadyContributed);
    }

    let amount = cycle.config.amount_per_member;
    vault::deposit(env, &mut cycle, &member, amount)?;

    round.contributed.set(member.clone(), true);
    round.total += amount;
    record.contributions_made += 1;

    storage::set_round(env, &cycle_id, &round);
    storage::set_member(env, &record);
    storage::set_cycle(env, &cycle);

    env.events().publish(
        (symbol_short!("contrib"),),
        (cycle_id, member, round.round_number),
    );

    Ok(())
}

pub fn get_round(env: &Env, cycle_id: BytesN<32>, round: u32) -> Result<Round, ContractError> {
    storage::get_round(env, &cycle_id, round).ok_or(ContractError::RoundNotFound)
}

pub fn has_contributed(
    env: &Env,
    member: Address,
    cycle_id: BytesN<32>,
    round: u32,
) -> Result<bool, ContractError> {
    let round = storage::get_round(env, &cycle_id, round).ok_or(ContractError::RoundNotFound)?;
    Ok(round.contributed.contains_key(member))
}
