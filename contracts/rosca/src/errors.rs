use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidConfig = 1,
    DuplicateCycle = 2,
    CycleNotFound = 3,
    CycleFull = 4,
    AlreadyJoined = 5,
    AlreadyActive = 6,
    CycleInactive = 7,
    NotAMember = 8,
    AlreadyContributed = 9,
    MemberDefaulted = 10,
    RoundNotReady = 11,
    RoundNotFound = 12,
    MemberNotDefaulted = 13,
    NothingToClaim = 14,
    NotOrganizer = 15,
    InsufficientFunds = 16,
    TooManyCycles = 17,
}
