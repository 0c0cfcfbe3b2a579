use soroban_sdk::{contracttype, Address, BytesN, Map, Vec};

use crate::errors::ContractError;

/// Basis points of the full pot the organizer escrows at creation.
pub const ORGANIZER_STAKE_BPS: i128 = 2_000;

/// How many cycles an organizer may run at the same time.
pub const MAX_ACTIVE_CYCLES: u32 = 5;

pub const BPS_DENOMINATOR: i128 = 10_000;

/// Status of a cycle throughout its lifecycle.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum CycleStatus {
    Forming,   // Accepting members, not yet started
    Active,    // Rounds in progress
    Completed, // All payouts distributed
    Closed,    // Terminal; residual swept, no further operations
}

/// Status of an enrolled member. Members who exit while the cycle is
/// forming have their record removed instead of carrying a status.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum MemberStatus {
    Enrolled,  // In the rotation, still owed a payout
    PaidOut,   // Received their payout; keeps contributing
    Defaulted, // Missed a round; out of the rotation, collateral forfeited
}

/// Who may invoke trigger_payout once a round is ready.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum PayoutAccess {
    OrganizerOnly,
    Open,
}

/// Where a defaulted member's forfeited collateral goes when claimed.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum CollateralPolicy {
    Pool,     // Credited to the pending pool for future payouts
    Claimant, // Withdrawn to the claimant (organizer-gated)
}

/// Immutable cycle parameters, fixed at creation.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CycleConfig {
    pub token: Address,
    pub amount_per_member: i128,
    pub max_participants: u32,
    pub contribution_interval: u64,
    pub contributions_per_payout: u32,
    pub round_count: u32,
    pub organizer_fee_bps: u32,
    pub payout_access: PayoutAccess,
    pub collateral_policy: CollateralPolicy,
}

impl CycleConfig {
    /// Reject degenerate parameters before any state is persisted.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.amount_per_member <= 0 {
            return Err(ContractError::InvalidConfig);
        }
        if self.max_participants < 2 {
            return Err(ContractError::InvalidConfig);
        }
        if self.contribution_interval == 0 {
            return Err(ContractError::InvalidConfig);
        }
        if self.contributions_per_payout < 1 {
            return Err(ContractError::InvalidConfig);
        }
        if self.round_count < 1 {
            return Err(ContractError::InvalidConfig);
        }
        // Each member is paid at most once, so payouts are bounded by the
        // membership.
        if self.round_count > self.max_participants {
            return Err(ContractError::InvalidConfig);
        }
        if self.organizer_fee_bps > BPS_DENOMINATOR as u32 {
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }

    /// Full pot collected over one rotation, the base for the organizer
    /// stake.
    pub fn pot_amount(&self) -> i128 {
        self.amount_per_member
            * self.max_participants as i128
            * self.contributions_per_payout as i128
    }

    pub fn organizer_stake(&self) -> i128 {
        self.pot_amount() * ORGANIZER_STAKE_BPS / BPS_DENOMINATOR
    }
}

/// Core cycle record.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle {
    pub id: BytesN<32>,
    pub organizer: Address,
    pub nonce: u32,
    pub config: CycleConfig,
    pub members: Vec<Address>,
    pub status: CycleStatus,
    pub current_round: u32,
    pub payouts_made: u32,
    pub created_at: u64,
    pub activated_at: u64,
    pub pending_pool: i128,
    pub vault_balance: i128,
    pub organizer_stake: i128,
}

impl Cycle {
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.config.max_participants
    }

    /// Deadline for a collection round, measured from activation.
    pub fn round_deadline(&self, round: u32) -> u64 {
        self.activated_at + round as u64 * self.config.contribution_interval
    }
}

/// Per-member enrollment record.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub cycle: BytesN<32>,
    pub member: Address,
    pub join_index: u32,
    pub collateral: i128,
    pub contributions_made: u32,
    pub status: MemberStatus,
}

/// Contribution ledger for a single collection round. Kept after closing
/// for audit.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Round {
    pub round_number: u32,
    pub contributed: Map<Address, bool>,
    pub total: i128,
    pub deadline: u64,
    pub closed: bool,
}

/// Per-organizer bookkeeping across cycles.
#[contracttype]
#[derive(Clone, Debug)]
pub struct OrganizerInfo {
    pub active_cycles: u32,
    pub locked_stake: i128,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Cycle(BytesN<32>),
    Member(BytesN<32>, Address),
    Round(BytesN<32>, u32),
    Organizer(Address),
}
