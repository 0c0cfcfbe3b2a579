#![no_std]

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

mod collateral;
mod contribution;
mod cycle;
mod errors;
mod ids;
mod payout;
mod storage;
mod types;
mod vault;

pub use errors::ContractError;
pub use types::*;

#[contract]
pub struct RoscaContract;

#[contractimpl]
impl RoscaContract {
    // ─── Cycle Lifecycle ────────────────────────────────────────────

    /// Create a new contribution cycle. The identifier is derived from
    /// (organizer, nonce); the organizer stake is escrowed up front.
    pub fn create_cycle(
        env: Env,
        organizer: Address,
        config: CycleConfig,
        nonce: u32,
    ) -> Result<BytesN<32>, ContractError> {
        cycle::create_cycle(&env, organizer, config, nonce)
    }

    /// Join a forming cycle, escrowing one contribution as collateral.
    /// The join that fills the cycle activates it and opens round 1.
    pub fn join_cycle(env: Env, member: Address, cycle_id: BytesN<32>) -> Result<(), ContractError> {
        cycle::join_cycle(&env, member, cycle_id)
    }

    /// Leave a cycle that has not yet started; collateral is refunded in
    /// full.
    pub fn exit_cycle(env: Env, member: Address, cycle_id: BytesN<32>) -> Result<(), ContractError> {
        cycle::exit_cycle(&env, member, cycle_id)
    }

    /// Close a forming or completed cycle. Only the organizer can call
    /// this; the residual vault balance is swept back to them.
    pub fn close_cycle(
        env: Env,
        organizer: Address,
        cycle_id: BytesN<32>,
    ) -> Result<(), ContractError> {
        cycle::close_cycle(&env, organizer, cycle_id)
    }

    // ─── Contributions ──────────────────────────────────────────────

    /// Deposit this round's contribution into the vault.
    pub fn contribute(env: Env, member: Address, cycle_id: BytesN<32>) -> Result<(), ContractError> {
        contribution::contribute(&env, member, cycle_id)
    }

    // ─── Payouts ────────────────────────────────────────────────────

    /// Close the current round and release the pot to the next recipient
    /// in rotation. Callable once every eligible member has contributed,
    /// or once the round deadline has passed.
    pub fn trigger_payout(
        env: Env,
        caller: Address,
        cycle_id: BytesN<32>,
    ) -> Result<(), ContractError> {
        payout::trigger_payout(&env, caller, cycle_id)
    }

    /// Recover a defaulted member's forfeited collateral, per the cycle's
    /// collateral policy.
    pub fn claim_collateral(
        env: Env,
        claimant: Address,
        cycle_id: BytesN<32>,
        member: Address,
    ) -> Result<(), ContractError> {
        collateral::claim_collateral(&env, claimant, cycle_id, member)
    }

    // ─── Read-only ──────────────────────────────────────────────────

    /// Deterministic cycle identifier for (organizer, nonce).
    pub fn derive_cycle_id(env: Env, organizer: Address, nonce: u32) -> BytesN<32> {
        ids::cycle_id(&env, &organizer, nonce)
    }

    /// Get cycle details.
    pub fn get_cycle(env: Env, cycle_id: BytesN<32>) -> Result<Cycle, ContractError> {
        cycle::get_cycle(&env, cycle_id)
    }

    /// Get a member's enrollment record.
    pub fn get_member(
        env: Env,
        cycle_id: BytesN<32>,
        member: Address,
    ) -> Result<Member, ContractError> {
        cycle::get_member(&env, cycle_id, member)
    }

    /// Get the contribution ledger for a round.
    pub fn get_round(env: Env, cycle_id: BytesN<32>, round: u32) -> Result<Round, ContractError> {
        contribution::get_round(&env, cycle_id, round)
    }

    /// Check whether a member contributed in a given round.
    pub fn has_contributed(
        env: Env,
        member: Address,
        cycle_id: BytesN<32>,
        round: u32,
    ) -> Result<bool, ContractError> {
        contribution::has_contributed(&env, member, cycle_id, round)
    }

    /// Rotation order (members by join index).
    pub fn get_payout_order(
        env: Env,
        cycle_id: BytesN<32>,
    ) -> Result<Vec<Address>, ContractError> {
        payout::get_payout_order(&env, cycle_id)
    }

    /// Next member in line for a payout, if any remain.
    pub fn get_next_recipient(
        env: Env,
        cycle_id: BytesN<32>,
    ) -> Result<Option<Address>, ContractError> {
        payout::get_next_recipient(&env, cycle_id)
    }

    /// Per-organizer bookkeeping: active cycles and locked stake.
    pub fn get_organizer(env: Env, organizer: Address) -> OrganizerInfo {
        storage::get_organizer(&env, &organizer)
    }
}
