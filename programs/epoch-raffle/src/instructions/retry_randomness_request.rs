use anchor_lang::prelude::*;

use crate::{
    constants::{ORACLE_QUEUE_SEED, RAFFLE_SEED, RANDOMNESS_RETRY_GRACE_SECONDS},
    error::RaffleError,
    events::RandomnessRerequested,
    oracle::RandomnessOracle,
    state::{OracleQueue, PendingRequest, Raffle},
};

impl Raffle {
    /// Replace a request the oracle has not answered within the grace period.
    ///
    /// Tickets are kept and the epoch stays suspended. The stale id can no
    /// longer be fulfilled.
    pub fn retry_randomness_request(
        &mut self,
        now: i64,
        oracle: &mut impl RandomnessOracle,
    ) -> Result<RandomnessRerequested> {
        let stale = self.pending_request.ok_or(RaffleError::NoPendingRequest)?;

        let retry_at = stale
            .requested_at
            .checked_add(RANDOMNESS_RETRY_GRACE_SECONDS)
            .ok_or(RaffleError::Overflow)?;
        require!(now >= retry_at, RaffleError::RetryTooEarly);

        let request_id = oracle.request_randomness()?;
        self.pending_request = Some(PendingRequest {
            request_id,
            epoch: self.epoch,
            requested_at: now,
        });

        Ok(RandomnessRerequested {
            epoch: self.epoch,
            stale_request_id: stale.request_id,
            request_id,
        })
    }
}

/// Instruction to recover an epoch stuck waiting on the oracle
///
/// Anyone may call it once `RANDOMNESS_RETRY_GRACE_SECONDS` have passed since
/// the pending request was issued.
pub fn retry_randomness_request(ctx: Context<RetryRandomnessRequest>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let rerequested = ctx
        .accounts
        .raffle
        .retry_randomness_request(now, &mut *ctx.accounts.oracle_queue)?;

    msg!(
        "Request {} expired, epoch {} now waiting on request {}",
        rerequested.stale_request_id,
        rerequested.epoch,
        rerequested.request_id
    );
    emit!(rerequested);

    Ok(())
}

#[derive(Accounts)]
pub struct RetryRandomnessRequest<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [ORACLE_QUEUE_SEED],
        bump = oracle_queue.bump,
    )]
    pub oracle_queue: Account<'info, OracleQueue>,

    pub caller: Signer<'info>,
}
