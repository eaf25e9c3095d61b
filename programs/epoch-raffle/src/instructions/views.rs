use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_TICKETS_PER_EPOCH, RAFFLE_SEED},
    instructions::perform_upkeep::UpkeepStatus,
    state::Raffle,
};

// Read-only instructions. Values are returned through transaction return data
// and are normally fetched by simulation.

pub fn check_upkeep(ctx: Context<ReadRaffle>, _check_data: Vec<u8>) -> Result<UpkeepStatus> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.raffle.check_upkeep(now))
}

pub fn get_ticket_owner(ctx: Context<ReadRaffle>, epoch: u64, index: u32) -> Result<Pubkey> {
    ctx.accounts.raffle.ticket_owner(epoch, index)
}

pub fn total_tickets_in_current_epoch(ctx: Context<ReadRaffle>) -> Result<u32> {
    Ok(ctx.accounts.raffle.ticket_count())
}

pub fn current_epoch(ctx: Context<ReadRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle.epoch)
}

pub fn is_picking_winner(ctx: Context<ReadRaffle>) -> Result<bool> {
    Ok(ctx.accounts.raffle.is_picking_winner())
}

pub fn get_max_tickets(_ctx: Context<ReadRaffle>) -> Result<u32> {
    Ok(MAX_TICKETS_PER_EPOCH)
}

pub fn get_entrance_fee(ctx: Context<ReadRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle.entrance_fee)
}

#[derive(Accounts)]
pub struct ReadRaffle<'info> {
    #[account(
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,
}
