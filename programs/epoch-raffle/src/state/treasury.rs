use anchor_lang::prelude::*;

// 8 discriminator, 32 pubkey, 1 bump
pub const TREASURY_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Program-owned vault holding the current epoch's entrance fees.
#[account]
pub struct Treasury {
    pub raffle: Pubkey,
    pub bump: u8,
}

impl Treasury {
    /// Lamports available for payout, excluding the rent-exempt reserve.
    pub fn available_balance(info: &AccountInfo, rent: &Rent) -> u64 {
        info.lamports()
            .saturating_sub(rent.minimum_balance(TREASURY_ACCOUNT_SIZE))
    }
}
