use soroban_sdk::{symbol_short, Address, BytesN, Env};

use crate::errors::ContractError;
use crate::types::{CollateralPolicy, CycleStatus, MemberStatus};
use crate::{storage, vault};

/// Recover a defaulted member's forfeited collateral. Destination follows
/// the cycle's configured policy: credited to the pending pool, or
/// withdrawn to the claimant (organizer only).
pub fn claim_collateral(
    env: &Env,
    claimant: Address,
    cycle_id: BytesN<32>,
    member: Address,
) -> Result<(), ContractError> {
    claimant.require_auth();

    let mut cycle = storage::get_cycle(env, &cycle_id).ok_or(ContractError::CycleNotFound)?;

    if cycle.status == CycleStatus::Closed {
        return Err(ContractError::CycleInactive);
    }

    let mut record =
        storage::get_member(env, &cycle_id, &member).ok_or(ContractError::NotAMember)?;

    if record.status != MemberStatus::Defaulted {
        return Err(ContractError::MemberNotDefaulted);
    }
    if record.collateral == 0 {
        return Err(ContractError::NothingToClaim);
    }

    let amount = record.collateral;
    match cycle.config.collateral_policy {
        CollateralPolicy::Pool => {
            // Already escrowed in the vault; only the bookkeeping moves.
            cycle.pending_pool += amount;
        }
        CollateralPolicy::Claimant => {
            if claimant != cycle.organizer {
                return Err(ContractError::NotOrganizer);
            }
            vault::withdraw(env, &mut cycle, &claimant, amount)?;
        }
    }

    record.collateral = 0;
    storage::set_member(env, &record);
    storage::set_cycle(env, &cycle);

    env.events()
        .publish((symbol_short!("claim"),), (cycle_id, member, amount));

    Ok(())
}
