use anchor_lang::prelude::*;

/// Move lamports out of a program-owned PDA. Zero amounts are a no-op.
pub fn transfer_from_vault<'info>(
    vault: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    vault.sub_lamports(amount)?;
    to.add_lamports(amount)?;
    Ok(())
}

/// Reduce a 32-byte big-endian unsigned integer modulo `modulus`.
///
/// Folds one byte at a time so the result is exact for the full 256-bit value.
pub fn reduce_word(word: &[u8; 32], modulus: u64) -> Option<u64> {
    if modulus == 0 {
        return None;
    }
    let modulus = u128::from(modulus);
    let rem = word
        .iter()
        .fold(0u128, |acc, byte| ((acc << 8) | u128::from(*byte)) % modulus);
    u64::try_from(rem).ok()
}

/// Owned backing storage for `AccountInfo`s built in unit tests.
#[cfg(test)]
pub(crate) struct TestAccount {
    pub key: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub owner: Pubkey,
}

#[cfg(test)]
impl TestAccount {
    pub fn new(lamports: u64, space: usize, owner: Pubkey) -> Self {
        Self {
            key: Pubkey::new_unique(),
            lamports,
            data: vec![0; space],
            owner,
        }
    }

    /// A system-owned wallet with no data.
    pub fn wallet(lamports: u64) -> Self {
        Self::new(lamports, 0, anchor_lang::system_program::ID)
    }

    pub fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            false,
            true,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            false,
            0,
        )
    }
}
