use anchor_lang::prelude::*;

use crate::{
    constants::{ORACLE_QUEUE_SEED, PERFORM_DATA_MARKER, RAFFLE_SEED},
    error::RaffleError,
    events::{EpochSkipped, RandomnessRequested},
    oracle::RandomnessOracle,
    state::{OracleQueue, PendingRequest, Raffle},
};

/// Answer to `check_upkeep`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,
    /// Reserved, always `PERFORM_DATA_MARKER`
    pub perform_data: Vec<u8>,
}

/// What closing an epoch did
#[derive(Debug, Clone, PartialEq)]
pub enum UpkeepOutcome {
    /// No tickets were sold; the next epoch is already open
    Skipped(EpochSkipped),
    /// The epoch is suspended until the oracle answers
    RandomnessRequested(RandomnessRequested),
}

impl Raffle {
    /// Upkeep is needed once the sale window has elapsed and no randomness
    /// request is outstanding.
    pub fn check_upkeep(&self, now: i64) -> UpkeepStatus {
        UpkeepStatus {
            upkeep_needed: self.interval_elapsed(now) && !self.is_picking_winner(),
            perform_data: PERFORM_DATA_MARKER.to_vec(),
        }
    }

    /// Close the current epoch.
    ///
    /// An empty epoch is skipped without touching the oracle. Otherwise a
    /// randomness request is issued and the epoch stays suspended, with its
    /// number and start time unchanged, until the request is fulfilled.
    pub fn perform_upkeep(
        &mut self,
        now: i64,
        oracle: &mut impl RandomnessOracle,
    ) -> Result<UpkeepOutcome> {
        require!(
            self.check_upkeep(now).upkeep_needed,
            RaffleError::UpkeepNotNeeded
        );

        let epoch = self.epoch;

        if self.ticket_owners.is_empty() {
            self.advance_epoch(now)?;
            return Ok(UpkeepOutcome::Skipped(EpochSkipped { epoch }));
        }

        let request_id = oracle.request_randomness()?;
        self.pending_request = Some(PendingRequest {
            request_id,
            epoch,
            requested_at: now,
        });

        Ok(UpkeepOutcome::RandomnessRequested(RandomnessRequested {
            epoch,
            request_id,
        }))
    }
}

/// Instruction run by automation once `check_upkeep` reports work to do
///
/// Anyone may call it; the closing condition is re-derived from the raffle
/// account and the `perform_data` argument is ignored.
///
/// # Errors
/// - `UpkeepNotNeeded` if the interval has not elapsed or a request is pending
pub fn perform_upkeep(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let outcome = ctx
        .accounts
        .raffle
        .perform_upkeep(now, &mut *ctx.accounts.oracle_queue)?;

    match outcome {
        UpkeepOutcome::Skipped(skipped) => {
            msg!("Epoch {} closed without tickets", skipped.epoch);
            emit!(skipped);
        }
        UpkeepOutcome::RandomnessRequested(requested) => {
            msg!(
                "Epoch {} waiting on randomness request {}",
                requested.epoch,
                requested.request_id
            );
            emit!(requested);
        }
    }

    Ok(())
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EPOCH_INTERVAL_SECONDS;
    use crate::oracle::fake::FakeOracle;
    use anchor_lang::error::Error;

    const FEE: u64 = 10;
    const START: i64 = 1_000;
    const CLOSE: i64 = START + EPOCH_INTERVAL_SECONDS;

    fn raffle() -> Raffle {
        Raffle::new(Pubkey::new_unique(), FEE, EPOCH_INTERVAL_SECONDS, START, 255).unwrap()
    }

    #[test]
    fn test_check_upkeep_waits_for_interval() {
        let raffle = raffle();

        let before = raffle.check_upkeep(START);
        assert!(!before.upkeep_needed);
        assert_eq!(before.perform_data, vec![0]);

        assert!(!raffle.check_upkeep(CLOSE - 1).upkeep_needed);

        let after = raffle.check_upkeep(CLOSE + 1);
        assert!(after.upkeep_needed);
        assert_eq!(after.perform_data, vec![0]);
    }

    #[test]
    fn test_perform_upkeep_not_needed() {
        let mut raffle = raffle();
        let mut oracle = FakeOracle::default();

        let err = raffle.perform_upkeep(START, &mut oracle).unwrap_err();
        assert_eq!(err, Error::from(RaffleError::UpkeepNotNeeded));
        assert_eq!(raffle.epoch, 0);
        assert!(oracle.requests.is_empty());
    }

    #[test]
    fn test_empty_epoch_is_skipped() {
        let mut raffle = raffle();
        let mut oracle = FakeOracle::default();

        let outcome = raffle.perform_upkeep(CLOSE + 1, &mut oracle).unwrap();

        assert_eq!(outcome, UpkeepOutcome::Skipped(EpochSkipped { epoch: 0 }));
        assert_eq!(raffle.epoch, 1);
        assert_eq!(raffle.start_time, CLOSE + 1);
        assert!(!raffle.is_picking_winner());
        assert!(oracle.requests.is_empty());
        assert!(!raffle.check_upkeep(CLOSE + 1).upkeep_needed);
    }

    #[test]
    fn test_skips_repeat_for_consecutive_empty_epochs() {
        let mut raffle = raffle();
        let mut oracle = FakeOracle::default();

        let mut now = START;
        for expected_epoch in 0..3 {
            now += EPOCH_INTERVAL_SECONDS;
            let outcome = raffle.perform_upkeep(now, &mut oracle).unwrap();
            assert_eq!(
                outcome,
                UpkeepOutcome::Skipped(EpochSkipped {
                    epoch: expected_epoch
                })
            );
        }
        assert_eq!(raffle.epoch, 3);
    }

    #[test]
    fn test_epoch_with_tickets_requests_randomness() {
        let mut raffle = raffle();
        let mut oracle = FakeOracle::default();
        raffle.sell_tickets(Pubkey::new_unique(), FEE, START).unwrap();

        let outcome = raffle.perform_upkeep(CLOSE, &mut oracle).unwrap();

        assert_eq!(
            outcome,
            UpkeepOutcome::RandomnessRequested(RandomnessRequested {
                epoch: 0,
                request_id: 1,
            })
        );
        assert_eq!(oracle.requests, vec![1]);
        assert!(raffle.is_picking_winner());
        assert_eq!(raffle.epoch, 0);
        assert_eq!(raffle.start_time, START);
        assert_eq!(raffle.ticket_count(), 1);
        assert_eq!(
            raffle.pending_request,
            Some(PendingRequest {
                request_id: 1,
                epoch: 0,
                requested_at: CLOSE,
            })
        );
    }

    #[test]
    fn test_suspended_epoch_needs_no_upkeep() {
        let mut raffle = raffle();
        let mut oracle = FakeOracle::default();
        raffle.sell_tickets(Pubkey::new_unique(), FEE, START).unwrap();
        raffle.perform_upkeep(CLOSE, &mut oracle).unwrap();

        assert!(!raffle.check_upkeep(CLOSE + 10_000).upkeep_needed);
        let err = raffle.perform_upkeep(CLOSE + 10_000, &mut oracle).unwrap_err();
        assert_eq!(err, Error::from(RaffleError::UpkeepNotNeeded));
        assert_eq!(oracle.requests.len(), 1);
    }
}
