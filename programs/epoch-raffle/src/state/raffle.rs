use anchor_lang::prelude::*;

use crate::{constants::MAX_TICKETS_PER_EPOCH, error::RaffleError};

// Space calculation:
// 8 (discriminator) +
// 32 (oracle) +
// 8 (entrance_fee) +
// 8 (interval) +
// 8 (epoch) +
// 8 (start_time) +
// 25 (pending_request: Option<PendingRequest>) +
// 4 + 32 * MAX_TICKETS_PER_EPOCH (ticket_owners) +
// 1 (bump)
pub const RAFFLE_ACCOUNT_SIZE: usize = 8
    + 32
    + 8
    + 8
    + 8
    + 8
    + (1 + PendingRequest::SIZE)
    + (4 + 32 * MAX_TICKETS_PER_EPOCH as usize)
    + 1;

/// The single outstanding randomness request, if any.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: u64,
    /// Epoch the request was issued for
    pub epoch: u64,
    /// Timestamp the request was issued at
    pub requested_at: i64,
}

impl PendingRequest {
    pub const SIZE: usize = 8 + 8 + 8;
}

/// Raffle singleton. Holds the immutable configuration and the current
/// epoch's record.
///
/// The epoch is suspended (picking a winner) exactly while
/// `pending_request` is set.
#[account]
#[derive(Debug)]
pub struct Raffle {
    /// Only key allowed to fulfill randomness
    pub oracle: Pubkey,
    /// Price of one ticket in lamports
    pub entrance_fee: u64,
    /// Length of the sale window in seconds
    pub interval: i64,
    /// Current epoch number, starts at 0 and only increases
    pub epoch: u64,
    pub start_time: i64,
    pub pending_request: Option<PendingRequest>,
    /// Ticket index -> owner, append-only within an epoch
    pub ticket_owners: Vec<Pubkey>,
    pub bump: u8,
}

impl Raffle {
    /// Start epoch 0 at `now`.
    pub fn new(
        oracle: Pubkey,
        entrance_fee: u64,
        interval: i64,
        now: i64,
        bump: u8,
    ) -> Result<Self> {
        require!(entrance_fee > 0, RaffleError::InvalidEntranceFee);

        Ok(Self {
            oracle,
            entrance_fee,
            interval,
            epoch: 0,
            start_time: now,
            pending_request: None,
            ticket_owners: Vec::with_capacity(MAX_TICKETS_PER_EPOCH as usize),
            bump,
        })
    }

    pub fn is_picking_winner(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn ticket_count(&self) -> u32 {
        // bounded by MAX_TICKETS_PER_EPOCH
        self.ticket_owners.len() as u32
    }

    pub fn remaining_capacity(&self) -> u32 {
        MAX_TICKETS_PER_EPOCH.saturating_sub(self.ticket_count())
    }

    /// Whether the sale window of the current epoch has elapsed at `now`.
    pub fn interval_elapsed(&self, now: i64) -> bool {
        now.saturating_sub(self.start_time) >= self.interval
    }

    /// Owner of ticket `index` in `epoch`. Only the current epoch's tickets
    /// are retained.
    pub fn ticket_owner(&self, epoch: u64, index: u32) -> Result<Pubkey> {
        require!(epoch == self.epoch, RaffleError::IndexOutOfRange);
        self.ticket_owners
            .get(index as usize)
            .copied()
            .ok_or_else(|| RaffleError::IndexOutOfRange.into())
    }

    /// Append `count` tickets owned by `owner`, returning the new ticket count.
    pub(crate) fn record_tickets(&mut self, owner: Pubkey, count: u32) -> Result<u32> {
        let total = self
            .ticket_count()
            .checked_add(count)
            .ok_or(RaffleError::Overflow)?;
        require!(total <= MAX_TICKETS_PER_EPOCH, RaffleError::Overflow);

        self.ticket_owners
            .extend(std::iter::repeat(owner).take(count as usize));
        Ok(total)
    }

    /// Close the current epoch and open the next one at `now`.
    pub(crate) fn advance_epoch(&mut self, now: i64) -> Result<()> {
        self.epoch = self.epoch.checked_add(1).ok_or(RaffleError::Overflow)?;
        self.start_time = now;
        self.pending_request = None;
        self.ticket_owners.clear();
        Ok(())
    }
}
