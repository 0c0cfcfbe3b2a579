use soroban_sdk::{Address, BytesN, Env};

use crate::types::{Cycle, DataKey, Member, OrganizerInfo, Round};

const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Cycle ---

pub fn has_cycle(env: &Env, id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&DataKey::Cycle(id.clone()))
}

pub fn get_cycle(env: &Env, id: &BytesN<32>) -> Option<Cycle> {
    let key = DataKey::Cycle(id.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_cycle(env: &Env, cycle: &Cycle) {
    let key = DataKey::Cycle(cycle.id.clone());
    env.storage().persistent().set(&key, cycle);
    extend_persistent_ttl(env, &key);
}

// --- Member ---

pub fn has_member(env: &Env, cycle_id: &BytesN<32>, member: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Member(cycle_id.clone(), member.clone()))
}

pub fn get_member(env: &Env, cycle_id: &BytesN<32>, member: &Address) -> Option<Member> {
    let key = DataKey::Member(cycle_id.clone(), member.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_member(env: &Env, record: &Member) {
    let key = DataKey::Member(record.cycle.clone(), record.member.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent_ttl(env, &key);
}

pub fn remove_member(env: &Env, cycle_id: &BytesN<32>, member: &Address) {
    let key = DataKey::Member(cycle_id.clone(), member.clone());
    env.storage().persistent().remove(&key);
}

// --- Round ---

pub fn get_round(env: &Env, cycle_id: &BytesN<32>, round: u32) -> Option<Round> {
    let key = DataKey::Round(cycle_id.clone(), round);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_round(env: &Env, cycle_id: &BytesN<32>, round: &Round) {
    let key = DataKey::Round(cycle_id.clone(), round.round_number);
    env.storage().persistent().set(&key, round);
    extend_persistent_ttl(env, &key);
}

// --- Organizer ---

pub fn get_organizer(env: &Env, organizer: &Address) -> OrganizerInfo {
    let key = DataKey::Organizer(organizer.clone());
    env.storage().persistent().get(&key).unwrap_or(OrganizerInfo {
        active_cycles: 0,
        locked_stake: 0,
    })
}

pub fn set_organizer(env: &Env, organizer: &Address, info: &OrganizerInfo) {
    let key = DataKey::Organizer(organizer.clone());
    env.storage().persistent().set(&key, info);
    extend_persistent_ttl(env, &key);
}

// --- TTL Management ---

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
