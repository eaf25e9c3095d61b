use anchor_lang::prelude::*;

/// Outbound half of the two-phase randomness protocol.
///
/// A request returns immediately with an id; the random words arrive later in
/// a separate, oracle-signed `fulfill_randomness` call carrying that id.
pub trait RandomnessOracle {
    fn request_randomness(&mut self) -> Result<u64>;
}
