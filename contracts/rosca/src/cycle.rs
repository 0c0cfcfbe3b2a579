use soroban_sdk::{symbol_short, Address, BytesN, Env, Map, Vec};

use crate::errors::ContractError;
use crate::types::{
    Cycle, CycleConfig, CycleStatus, Member, MemberStatus, Round, MAX_ACTIVE_CYCLES,
};
use crate::{ids, storage, vault};

pub fn create_cycle(
    env: &Env,
    organizer: Address,
    config: CycleConfig,
    nonce: u32,
) -> Result<BytesN<32>, ContractError> {
    organizer.require_auth();

    config.validate()?;

    let id = ids::cycle_id(env, &organizer, nonce);
    if storage::has_cycle(env, &id) {
        return Err(ContractError::DuplicateCycle);
    }

    let mut organizer_info = storage::get_organizer(env, &organizer);
    if organizer_info.active_cycles >= MAX_ACTIVE_CYCLES {
        return Err(ContractError::TooManyCycles);
    }

    let stake = config.organizer_stake();

    let mut cycle = Cycle {
        id: id.clone(),
        organizer: organizer.clone(),
        nonce,
        config,
        members: Vec::new(env),
        status: CycleStatus::Forming,
        current_round: 0,
        payouts_made: 0,
        created_at: env.ledger().timestamp(),
        activated_at: 0,
        pending_pool: 0,
        vault_balance: 0,
        organizer_stake: stake,
    };

    vault::deposit(env, &mut cycle, &organizer, stake)?;

    organizer_info.active_cycles += 1;
    organizer_info.locked_stake += stake;

    storage::set_cycle(env, &cycle);
    storage::set_organizer(env, &organizer, &organizer_info);

    env.events()
        .publish((symbol_short!("cyc_new"),), (id.clone(), organizer));

    Ok(id)
}

pub fn join_cycle(env: &Env, member: Address, cycle_id: BytesN<32>) -> Result<(), ContractError> {
    member.require_auth();

    let mut cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;

    // An active cycle is by definition full, so the fuller answer wins for
    // the (max + 1)-th caller.
    if cycle.is_full() {
        return Err(ContractError::CycleFull);
    }
    if cycle.status != CycleStatus::Forming {
        return Err(ContractError::AlreadyActive);
    }
    if storage::has_member(env, &cycle_id, &member) {
        return Err(ContractError::AlreadyJoined);
    }

    let collateral = cycle.config.amount_per_member;
    vault::deposit(env, &mut cycle, &member, collateral)?;

    let record = Member {
        cycle: cycle_id.clone(),
        member: member.clone(),
        join_index: cycle.members.len(),
        collateral,
        contributions_made: 0,
        status: MemberStatus::Enrolled,
    };
    storage::set_member(env, &record);
    cycle.members.push_back(member.clone());

    env.events()
        .publish((symbol_short!("cyc_join"),), (cycle_id.clone(), member));

    if cycle.is_full() {
        activate(env, &mut cycle);
    }

    storage::set_cycle(env, &cycle);

    Ok(())
}

/// The last join fills the cycle: lock the rotation and open round 1.
fn activate(env: &Env, cycle: &mut Cycle) {
    cycle.status = CycleStatus::Active;
    cycle.current_round = 1;
    cycle.activated_at = env.ledger().timestamp();

    let first_round = Round {
        round_number: 1,
        contributed: Map::new(env),
        total: 0,
        deadline: cycle.round_deadline(1),
        closed: false,
    };
    storage::set_round(env, &cycle.id, &first_round);

    env.events()
        .publish((symbol_short!("cyc_strt"),), cycle.id.clone());
}

pub fn exit_cycle(env: &Env, member: Address, cycle_id: BytesN<32>) -> Result<(), ContractError> {
    member.require_auth();

    let mut cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;

    if cycle.status != CycleStatus::Forming {
        return Err(ContractError::AlreadyActive);
    }

    let record =
        storage::get_member(env, &cycle_id, &member).ok_or(ContractError::NotAMember)?;

    vault::withdraw(env, &mut cycle, &member, record.collateral)?;
    storage::remove_member(env, &cycle_id, &member);

    let idx = record.join_index;
    let _ = cycle.members.remove(idx);

    // Later joiners slide down one slot; their stored indices follow.
    for i in idx..cycle.members.len() {
        if let Some(addr) = cycle.members.get(i) {
            if let Some(mut later) = storage::get_member(env, &cycle_id, &addr) {
                later.join_index = i;
                storage::set_member(env, &later);
            }
        }
    }

    storage::set_cycle(env, &cycle);

    env.events()
        .publish((symbol_short!("cyc_exit"),), (cycle_id, member));

    Ok(())
}

pub fn close_cycle(
    env: &Env,
    organizer: Address,
    cycle_id: BytesN<32>,
) -> Result<(), ContractError> {
    organizer.require_auth();

    let mut cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;

    if organizer != cycle.organizer {
        return Err(ContractError::NotOrganizer);
    }

    match cycle.status {
        CycleStatus::Forming => {
            // Cancelling before the fill: every enrolled member gets their
            // collateral back before the residual is swept.
            let members = cycle.members.clone();
            for member in members.iter() {
                if let Some(record) = storage::get_member(env, &cycle_id, &member) {
                    vault::withdraw(env, &mut cycle, &member, record.collateral)?;
                    storage::remove_member(env, &cycle_id, &member);
                }
            }
            cycle.members = Vec::new(env);
        }
        CycleStatus::Completed => {}
        CycleStatus::Active => return Err(ContractError::AlreadyActive),
        CycleStatus::Closed => return Err(ContractError::CycleInactive),
    }

    // Stake plus anything unclaimed goes back to the organizer.
    let residual = cycle.vault_balance;
    vault::withdraw(env, &mut cycle, &organizer, residual)?;

    let mut organizer_info = storage::get_organizer(env, &organizer);
    organizer_info.active_cycles = organizer_info.active_cycles.saturating_sub(1);
    organizer_info.locked_stake -= cycle.organizer_stake;
    storage::set_organizer(env, &organizer, &organizer_info);

    cycle.status = CycleStatus::Closed;
    cycle.pending_pool = 0;
    storage::set_cycle(env, &cycle);

    env.events()
        .publish((symbol_short!("cyc_clse"),), (cycle_id, residual));

    Ok(())
}

pub fn get_cycle(env: &Env, cycle_id: BytesN<32>) -> Result<Cycle, ContractError> {
    storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)
}

pub fn get_member(
    env: &Env,
    cycle_id: BytesN<32>,
    member: Address,
) -> Result<Member, ContractError> {
    storage::get_member(env, &cycle_id, &member).ok_or(ContractError::NotAMember)
}
