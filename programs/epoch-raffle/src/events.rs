use anchor_lang::prelude::*;

/// Emitted once when the raffle accounts are created
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct RaffleInitialized {
    pub raffle: Pubkey,
    pub oracle: Pubkey,
    pub entrance_fee: u64,
    pub interval: i64,
    pub start_time: i64,
}

/// Emitted when tickets are purchased
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct TicketsPurchased {
    pub epoch: u64,
    pub buyer: Pubkey,
    /// Tickets granted by this purchase
    pub tickets: u32,
    /// Epoch ticket count after the purchase
    pub total_tickets: u32,
    /// Lamports kept for the granted tickets
    pub cost: u64,
    /// Lamports returned to the buyer
    pub refund: u64,
}

/// Emitted when an epoch closes without any tickets sold
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EpochSkipped {
    pub epoch: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct RandomnessRequested {
    pub epoch: u64,
    pub request_id: u64,
}

/// Emitted when an unanswered request is replaced after the grace period
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct RandomnessRerequested {
    pub epoch: u64,
    pub stale_request_id: u64,
    pub request_id: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerSelected {
    pub epoch: u64,
    pub winner: Pubkey,
    pub winning_ticket: u32,
    pub request_id: u64,
    /// Lamports paid out to the winner
    pub amount: u64,
}
