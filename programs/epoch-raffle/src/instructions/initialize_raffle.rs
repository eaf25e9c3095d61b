use anchor_lang::prelude::*;

use crate::{
    constants::{EPOCH_INTERVAL_SECONDS, ORACLE_QUEUE_SEED, RAFFLE_SEED, TREASURY_SEED},
    error::RaffleError,
    events::RaffleInitialized,
    state::{
        OracleQueue, Raffle, Treasury, ORACLE_QUEUE_ACCOUNT_SIZE, RAFFLE_ACCOUNT_SIZE,
        TREASURY_ACCOUNT_SIZE,
    },
};

/// The entrance fee must cover the rent-exempt minimum of an empty system
/// account, so a payout of a single ticket can always be credited to a winner
/// whose wallet has since been emptied.
pub fn check_entrance_fee(entrance_fee: u64, rent: &Rent) -> Result<()> {
    require!(
        entrance_fee >= rent.minimum_balance(0),
        RaffleError::InvalidEntranceFee
    );
    Ok(())
}

/// Instruction to create the raffle singleton, its treasury and its oracle queue
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `entrance_fee` - Price of one ticket in lamports (at least the rent-exempt
///   minimum of an empty account)
/// * `oracle` - The only key allowed to fulfill randomness requests
///
/// # Implementation Notes
/// - Epoch 0 opens at the current timestamp
/// - The sale interval is fixed at `EPOCH_INTERVAL_SECONDS`
/// - Request ids handed out by the oracle queue start at 1
///
/// # Security Considerations
/// - The first caller creates the singleton and fixes the oracle key; deploy
///   and initialize in the same step so nobody else can pick the oracle
pub fn initialize_raffle(
    ctx: Context<InitializeRaffle>,
    entrance_fee: u64,
    oracle: Pubkey,
) -> Result<()> {
    check_entrance_fee(entrance_fee, &Rent::get()?)?;
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.raffle.set_inner(Raffle::new(
        oracle,
        entrance_fee,
        EPOCH_INTERVAL_SECONDS,
        now,
        ctx.bumps.raffle,
    )?);

    ctx.accounts.treasury.raffle = ctx.accounts.raffle.key();
    ctx.accounts.treasury.bump = ctx.bumps.treasury;

    ctx.accounts.oracle_queue.oracle = oracle;
    ctx.accounts.oracle_queue.last_request_id = 0;
    ctx.accounts.oracle_queue.bump = ctx.bumps.oracle_queue;

    emit!(RaffleInitialized {
        raffle: ctx.accounts.raffle.key(),
        oracle,
        entrance_fee,
        interval: EPOCH_INTERVAL_SECONDS,
        start_time: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(
        init,
        payer = payer,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// Holds entrance fees until they are paid out
    #[account(
        init,
        payer = payer,
        space = TREASURY_ACCOUNT_SIZE,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        init,
        payer = payer,
        space = ORACLE_QUEUE_ACCOUNT_SIZE,
        seeds = [ORACLE_QUEUE_SEED],
        bump
    )]
    pub oracle_queue: Account<'info, OracleQueue>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
