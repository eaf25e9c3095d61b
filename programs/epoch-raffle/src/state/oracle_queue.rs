use anchor_lang::prelude::*;

use crate::{error::RaffleError, oracle::RandomnessOracle};

// 8 discriminator + 32 oracle + 8 last_request_id + 1 bump
pub const ORACLE_QUEUE_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 1;

/// On-chain side of the randomness request port.
///
/// Hands out request ids starting at 1. The off-chain oracle picks requests up
/// from the `RandomnessRequested` event and answers through
/// `fulfill_randomness`.
#[account]
pub struct OracleQueue {
    pub oracle: Pubkey,
    pub last_request_id: u64,
    pub bump: u8,
}

impl RandomnessOracle for OracleQueue {
    fn request_randomness(&mut self) -> Result<u64> {
        self.last_request_id = self
            .last_request_id
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        Ok(self.last_request_id)
    }
}
