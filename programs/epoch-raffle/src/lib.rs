//! Recurring raffle on Solana.
//!
//! Tickets sell at a fixed entrance fee during a timed epoch. Once the epoch's
//! interval has elapsed, anyone may run upkeep: an empty epoch is skipped,
//! otherwise randomness is requested from an oracle and the epoch is suspended
//! until the oracle's signed callback picks a winner, pays out the treasury
//! and opens the next epoch.

use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod state;
pub mod utils;


declare_id!("G45Ge26UJqfcpMXu4e5LanWzEQhcMEgagh61Ep4dSBWZ");

#[program]
pub mod epoch_raffle {
    use super::*;

    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        entrance_fee: u64,
        oracle: Pubkey,
    ) -> Result<()> {
        instructions::initialize_raffle::initialize_raffle(ctx, entrance_fee, oracle)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, payment: u64) -> Result<u32> {
        instructions::enter_raffle::enter_raffle(ctx, payment)
    }

    pub fn check_upkeep(ctx: Context<ReadRaffle>, check_data: Vec<u8>) -> Result<UpkeepStatus> {
        instructions::views::check_upkeep(ctx, check_data)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        instructions::perform_upkeep::perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::fulfill_randomness::fulfill_randomness(ctx, request_id, random_words)
    }

    pub fn retry_randomness_request(ctx: Context<RetryRandomnessRequest>) -> Result<()> {
        instructions::retry_randomness_request::retry_randomness_request(ctx)
    }

    pub fn get_ticket_owner(ctx: Context<ReadRaffle>, epoch: u64, index: u32) -> Result<Pubkey> {
        instructions::views::get_ticket_owner(ctx, epoch, index)
    }

    pub fn total_tickets_in_current_epoch(ctx: Context<ReadRaffle>) -> Result<u32> {
        instructions::views::total_tickets_in_current_epoch(ctx)
    }

    pub fn current_epoch(ctx: Context<ReadRaffle>) -> Result<u64> {
        instructions::views::current_epoch(ctx)
    }

    pub fn is_picking_winner(ctx: Context<ReadRaffle>) -> Result<bool> {
        instructions::views::is_picking_winner(ctx)
    }

    pub fn get_max_tickets(ctx: Context<ReadRaffle>) -> Result<u32> {
        instructions::views::get_max_tickets(ctx)
    }

    pub fn get_entrance_fee(ctx: Context<ReadRaffle>) -> Result<u64> {
        instructions::views::get_entrance_fee(ctx)
    }
}
