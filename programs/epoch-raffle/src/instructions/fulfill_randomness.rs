use anchor_lang::prelude::*;

use crate::{
    constants::{RAFFLE_SEED, TREASURY_SEED},
    error::RaffleError,
    events::WinnerSelected,
    state::{Raffle, Treasury},
    utils::{reduce_word, transfer_from_vault},
};

impl Raffle {
    /// Consume the oracle's answer for the pending request, pick the winning
    /// ticket and open the next epoch.
    ///
    /// `payout` is the treasury balance the winner receives. The returned
    /// event names the winner the caller must pay.
    ///
    /// # Errors
    /// - `UnauthorizedCaller` if `caller` is not the configured oracle
    /// - `UnknownRequest` if `request_id` is not the outstanding request for
    ///   the current epoch
    /// - `MissingRandomWords` if no random word was delivered
    pub fn resolve_winner(
        &mut self,
        caller: Pubkey,
        request_id: u64,
        random_words: &[[u8; 32]],
        payout: u64,
        now: i64,
    ) -> Result<WinnerSelected> {
        require_keys_eq!(caller, self.oracle, RaffleError::UnauthorizedCaller);

        let epoch = self.epoch;
        let pending = self
            .pending_request
            .filter(|pending| pending.request_id == request_id && pending.epoch == epoch)
            .ok_or(RaffleError::UnknownRequest)?;

        let word = random_words
            .first()
            .ok_or(RaffleError::MissingRandomWords)?;
        let winning_ticket = reduce_word(word, u64::from(self.ticket_count()))
            .and_then(|index| u32::try_from(index).ok())
            .ok_or(RaffleError::Overflow)?;
        let winner = self.ticket_owner(epoch, winning_ticket)?;

        self.advance_epoch(now)?;

        Ok(WinnerSelected {
            epoch,
            winner,
            winning_ticket,
            request_id: pending.request_id,
            amount: payout,
        })
    }
}

/// Pay the selected amount to `winner`, which must be the selected owner.
pub(crate) fn pay_winner<'info>(
    treasury: &AccountInfo<'info>,
    winner: &AccountInfo<'info>,
    selected: &WinnerSelected,
) -> Result<()> {
    require_keys_eq!(
        winner.key(),
        selected.winner,
        RaffleError::WinnerAccountMismatch
    );

    transfer_from_vault(treasury, winner, selected.amount)
}

/// Callback through which the oracle delivers randomness
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `request_id` - Id handed out when the epoch was closed
/// * `random_words` - 32-byte big-endian random values; only the first is used
///
/// # Security Considerations
/// 1. The signer must be the oracle stored in the raffle account
/// 2. The request id must match the single outstanding request, so stale or
///    replayed deliveries are rejected
/// 3. The winner account must be the owner of the selected ticket
///
/// # Implementation Notes
/// - The winner receives the whole treasury balance above its rent reserve
pub fn fulfill_randomness(
    ctx: Context<FulfillRandomness>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let treasury_info = ctx.accounts.treasury.to_account_info();
    let payout = Treasury::available_balance(&treasury_info, &Rent::get()?);

    let selected = ctx.accounts.raffle.resolve_winner(
        ctx.accounts.oracle.key(),
        request_id,
        &random_words,
        payout,
        now,
    )?;

    pay_winner(
        &treasury_info,
        &ctx.accounts.winner.to_account_info(),
        &selected,
    )?;

    msg!(
        "Epoch {} won by {} with ticket {}, paid {} lamports",
        selected.epoch,
        selected.winner,
        selected.winning_ticket,
        selected.amount
    );
    emit!(selected);

    Ok(())
}

#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    /// Checked against the raffle's oracle inside the handler
    pub oracle: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    /// CHECK: Receives the payout; must match the selected ticket owner,
    /// verified in the handler.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}
