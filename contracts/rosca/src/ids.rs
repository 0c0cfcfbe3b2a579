use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

/// Namespace tag for cycle identifiers.
const CYCLE_NS: &[u8] = b"cycle";

/// Deterministic cycle identifier from (organizer, nonce). Distinct seed
/// sequences hash to distinct identifiers, so an organizer runs several
/// concurrent cycles by varying the nonce.
pub fn cycle_id(env: &Env, organizer: &Address, nonce: u32) -> BytesN<32> {
    let mut seeds = Bytes::from_slice(env, CYCLE_NS);
    seeds.append(&organizer.clone().to_xdr(env));
    seeds.extend_from_array(&nonce.to_be_bytes());
    env.crypto().sha256(&seeds).to_bytes()
}
