use soroban_sdk::{symbol_short, Address, BytesN, Env, Map, Vec};

use crate::errors::ContractError;
use crate::types::{
    Cycle, CycleStatus, MemberStatus, PayoutAccess, Round, BPS_DENOMINATOR,
};
use crate::{storage, vault};

pub fn trigger_payout(
    env: &Env,
    caller: Address,
    cycle_id: BytesN<32>,
) -> Result<(), ContractError> {
    caller.require_auth();

    let mut cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;

    if cycle.status != CycleStatus::Active {
        return Err(ContractError::CycleInactive);
    }
    if cycle.config.payout_access == PayoutAccess::OrganizerOnly && caller != cycle.organizer {
        return Err(ContractError::NotOrganizer);
    }

    let mut round = storage::get_round(env, &cycle_id, cycle.current_round)
        .ok_or(ContractError::RoundNotFound)?;

    if !round_ready(env, &cycle, &round) {
        return Err(ContractError::RoundNotReady);
    }

    close_round(env, &mut cycle, &mut round);

    // A payout fires every contributions_per_payout closed rounds.
    let payout_due = cycle.current_round % cycle.config.contributions_per_payout == 0;
    if payout_due {
        match next_recipient(env, &cycle) {
            Some(recipient) => pay_recipient(env, &mut cycle, &recipient)?,
            // Nobody left to pay; the residual waits for close.
            None => {
                complete(env, &mut cycle)?;
                storage::set_cycle(env, &cycle);
                return Ok(());
            }
        }
    }

    if cycle.payouts_made >= cycle.config.round_count || eligible_count(env, &cycle) == 0 {
        complete(env, &mut cycle)?;
    } else {
        open_next_round(env, &mut cycle);
    }

    storage::set_cycle(env, &cycle);

    Ok(())
}

/// A round is ready once every eligible member has contributed, or once its
/// deadline has elapsed so a stalled round cannot block the cycle forever.
fn round_ready(env: &Env, cycle: &Cycle, round: &Round) -> bool {
    if env.ledger().timestamp() >= round.deadline {
        return true;
    }
    round.contributed.len() >= eligible_count(env, cycle)
}

/// Members still obligated to contribute: enrolled or already paid out,
/// but not defaulted.
fn eligible_count(env: &Env, cycle: &Cycle) -> u32 {
    let mut count = 0;
    for member in cycle.members.iter() {
        if let Some(record) = storage::get_member(env, &cycle.id, &member) {
            if record.status != MemberStatus::Defaulted {
                count += 1;
            }
        }
    }
    count
}

/// Close the collection round: every eligible member who missed it is
/// marked defaulted and drops out of the rotation; the pool folds into the
/// pending pot.
fn close_round(env: &Env, cycle: &mut Cycle, round: &mut Round) {
    for member in cycle.members.iter() {
        if let Some(mut record) = storage::get_member(env, &cycle.id, &member) {
            if record.status != MemberStatus::Defaulted
                && !round.contributed.contains_key(member.clone())
            {
                record.status = MemberStatus::Defaulted;
                storage::set_member(env, &record);
                env.events().publish(
                    (symbol_short!("default"),),
                    (cycle.id.clone(), member, round.round_number),
                );
            }
        }
    }

    cycle.pending_pool += round.total;
    round.closed = true;
    storage::set_round(env, &cycle.id, round);

    env.events()
        .publish((symbol_short!("rnd_clse"),), (cycle.id.clone(), round.round_number));
}

/// Lowest join index still enrolled: never paid, never defaulted.
fn next_recipient(env: &Env, cycle: &Cycle) -> Option<Address> {
    for member in cycle.members.iter() {
        if let Some(record) = storage::get_member(env, &cycle.id, &member) {
            if record.status == MemberStatus::Enrolled {
                return Some(member);
            }
        }
    }
    None
}

fn pay_recipient(
    env: &Env,
    cycle: &mut Cycle,
    recipient: &Address,
) -> Result<(), ContractError> {
    let pot = cycle.pending_pool;
    let fee = pot * cycle.config.organizer_fee_bps as i128 / BPS_DENOMINATOR;
    let payout = pot - fee;

    vault::withdraw(env, cycle, recipient, payout)?;
    if fee > 0 {
        let organizer = cycle.organizer.clone();
        vault::withdraw(env, cycle, &organizer, fee)?;
    }
    cycle.pending_pool = 0;
    cycle.payouts_made += 1;

    if let Some(mut record) = storage::get_member(env, &cycle.id, recipient) {
        record.status = MemberStatus::PaidOut;
        storage::set_member(env, &record);
    }

    env.events().publish(
        (symbol_short!("payout"),),
        (cycle.id.clone(), recipient.clone(), payout),
    );

    Ok(())
}

fn open_next_round(env: &Env, cycle: &mut Cycle) {
    cycle.current_round += 1;
    let next = Round {
        round_number: cycle.current_round,
        contributed: Map::new(env),
        total: 0,
        deadline: cycle.round_deadline(cycle.current_round),
        closed: false,
    };
    storage::set_round(env, &cycle.id, &next);
}

/// All payouts made (or nobody left to pay): members who never defaulted
/// get their remaining collateral back and the cycle ends.
fn complete(env: &Env, cycle: &mut Cycle) -> Result<(), ContractError> {
    cycle.status = CycleStatus::Completed;

    let members = cycle.members.clone();
    for member in members.iter() {
        if let Some(mut record) = storage::get_member(env, &cycle.id, &member) {
            if record.status != MemberStatus::Defaulted && record.collateral > 0 {
                vault::withdraw(env, cycle, &member, record.collateral)?;
                record.collateral = 0;
                storage::set_member(env, &record);
            }
        }
    }

    env.events()
        .publish((symbol_short!("cyc_comp"),), cycle.id.clone());

    Ok(())
}

pub fn get_payout_order(env: &Env, cycle_id: BytesN<32>) -> Result<Vec<Address>, ContractError> {
    let cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;
    Ok(cycle.members)
}

pub fn get_next_recipient(
    env: &Env,
    cycle_id: BytesN<32>,
) -> Result<Option<Address>, ContractError> {
    let cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;
    if cycle.status != CycleStatus::Active {
        return Err(ContractError::CycleInactive);
    }
    Ok(next_recipient(env, &cycle))
}
