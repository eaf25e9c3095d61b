use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{
    constants::{RAFFLE_SEED, TREASURY_SEED},
    error::RaffleError,
    events::TicketsPurchased,
    state::{Raffle, Treasury},
    utils::transfer_from_vault,
};

/// Result of a successful ticket sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketPurchase {
    /// Tickets granted to the buyer
    pub tickets: u32,
    /// Ticket count of the epoch after this sale
    pub total_tickets: u32,
    /// Lamports kept by the treasury
    pub cost: u64,
    /// Lamports owed back to the buyer
    pub refund: u64,
}

impl Raffle {
    /// Sell as many tickets as `payment` covers, capped at the epoch's remaining
    /// capacity, and record them for `buyer`.
    ///
    /// Sales are closed once the interval has elapsed, while a winner is being
    /// picked, and when the epoch is already full.
    pub fn sell_tickets(&mut self, buyer: Pubkey, payment: u64, now: i64) -> Result<TicketPurchase> {
        require!(
            !self.interval_elapsed(now) && !self.is_picking_winner(),
            RaffleError::RaffleClosed
        );
        require!(
            payment >= self.entrance_fee,
            RaffleError::InsufficientPayment
        );

        let requested = payment
            .checked_div(self.entrance_fee)
            .ok_or(RaffleError::Overflow)?;
        let granted = requested.min(u64::from(self.remaining_capacity()));
        require!(granted > 0, RaffleError::RaffleClosed);

        let tickets = u32::try_from(granted).map_err(|_| RaffleError::Overflow)?;
        let cost = granted
            .checked_mul(self.entrance_fee)
            .ok_or(RaffleError::Overflow)?;
        let refund = payment.checked_sub(cost).ok_or(RaffleError::Overflow)?;

        let total_tickets = self.record_tickets(buyer, tickets)?;

        Ok(TicketPurchase {
            tickets,
            total_tickets,
            cost,
            refund,
        })
    }
}

/// Verify the full payment reached the treasury, then send back the part not
/// spent on tickets.
pub(crate) fn settle_payment<'info>(
    treasury: &AccountInfo<'info>,
    buyer: &AccountInfo<'info>,
    pre_transfer_balance: u64,
    payment: u64,
    refund: u64,
) -> Result<()> {
    require!(
        treasury.lamports()
            == pre_transfer_balance
                .checked_add(payment)
                .ok_or(RaffleError::Overflow)?,
        RaffleError::TransferFailed
    );

    transfer_from_vault(treasury, buyer, refund)
}

/// Instruction to buy tickets in the current epoch
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `payment` - Lamports sent by the buyer; every whole `entrance_fee` buys a ticket
///
/// # Implementation Notes
/// - The full payment moves into the treasury, then anything not spent on
///   tickets is refunded from the treasury in the same instruction
/// - Tickets are recorded before any lamports move; a failed transfer reverts
///   the whole instruction
/// - Returns the epoch's ticket count after the purchase
pub fn enter_raffle(ctx: Context<EnterRaffle>, payment: u64) -> Result<u32> {
    let now = Clock::get()?.unix_timestamp;
    let buyer = ctx.accounts.buyer.key();
    let epoch = ctx.accounts.raffle.epoch;

    let purchase = ctx.accounts.raffle.sell_tickets(buyer, payment, now)?;

    let treasury_info = ctx.accounts.treasury.to_account_info();
    let buyer_info = ctx.accounts.buyer.to_account_info();

    // Store pre-transfer balance for verification
    let pre_transfer_balance = treasury_info.lamports();

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: buyer_info.clone(),
                to: treasury_info.clone(),
            },
        ),
        payment,
    )?;

    settle_payment(
        &treasury_info,
        &buyer_info,
        pre_transfer_balance,
        payment,
        purchase.refund,
    )?;

    emit!(TicketsPurchased {
        epoch,
        buyer,
        tickets: purchase.tickets,
        total_tickets: purchase.total_tickets,
        cost: purchase.cost,
        refund: purchase.refund,
    });

    Ok(purchase.total_tickets)
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
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

    #[account(mut)]
    pub buyer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EPOCH_INTERVAL_SECONDS, MAX_TICKETS_PER_EPOCH};
    use crate::state::PendingRequest;
    use crate::utils::TestAccount;
    use anchor_lang::error::Error;

    const FEE: u64 = 10_000_000;
    const START: i64 = 1_700_000_000;

    fn raffle() -> Raffle {
        Raffle::new(Pubkey::new_unique(), FEE, EPOCH_INTERVAL_SECONDS, START, 255).unwrap()
    }

    #[test]
    fn test_single_ticket() {
        let mut raffle = raffle();
        let buyer = Pubkey::new_unique();

        let purchase = raffle.sell_tickets(buyer, FEE, START).unwrap();

        assert_eq!(
            purchase,
            TicketPurchase {
                tickets: 1,
                total_tickets: 1,
                cost: FEE,
                refund: 0,
            }
        );
        assert_eq!(raffle.ticket_owner(0, 0).unwrap(), buyer);
    }

    #[test]
    fn test_excess_is_refunded() {
        let mut raffle = raffle();
        let buyer = Pubkey::new_unique();

        for excess in [1, FEE / 2, FEE - 1] {
            let before = raffle.ticket_count();
            let purchase = raffle.sell_tickets(buyer, FEE + excess, START).unwrap();
            assert_eq!(purchase.tickets, 1);
            assert_eq!(purchase.cost, FEE);
            assert_eq!(purchase.refund, excess);
            assert_eq!(raffle.ticket_count(), before + 1);
        }
    }

    #[test]
    fn test_floor_division_of_payment() {
        let mut raffle = raffle();
        let buyer = Pubkey::new_unique();

        let purchase = raffle.sell_tickets(buyer, 7 * FEE + 3, START + 10).unwrap();

        assert_eq!(purchase.tickets, 7);
        assert_eq!(purchase.cost, 7 * FEE);
        assert_eq!(purchase.refund, 3);
        for index in 0..7 {
            assert_eq!(raffle.ticket_owner(0, index).unwrap(), buyer);
        }
    }

    #[test]
    fn test_insufficient_payment() {
        let mut raffle = raffle();

        for payment in [0, 1, FEE - 1] {
            let err = raffle
                .sell_tickets(Pubkey::new_unique(), payment, START)
                .unwrap_err();
            assert_eq!(err, Error::from(RaffleError::InsufficientPayment));
        }
        assert_eq!(raffle.ticket_count(), 0);
    }

    #[test]
    fn test_closed_after_interval() {
        let mut raffle = raffle();

        let err = raffle
            .sell_tickets(Pubkey::new_unique(), FEE, START + EPOCH_INTERVAL_SECONDS)
            .unwrap_err();
        assert_eq!(err, Error::from(RaffleError::RaffleClosed));

        // the last second of the window is still open
        raffle
            .sell_tickets(Pubkey::new_unique(), FEE, START + EPOCH_INTERVAL_SECONDS - 1)
            .unwrap();
    }

    #[test]
    fn test_closed_takes_precedence_over_payment_check() {
        let mut raffle = raffle();

        let err = raffle
            .sell_tickets(Pubkey::new_unique(), 1, START + EPOCH_INTERVAL_SECONDS + 1)
            .unwrap_err();
        assert_eq!(err, Error::from(RaffleError::RaffleClosed));
    }

    #[test]
    fn test_closed_while_picking_winner() {
        let mut raffle = raffle();
        raffle.sell_tickets(Pubkey::new_unique(), FEE, START).unwrap();
        raffle.pending_request = Some(PendingRequest {
            request_id: 1,
            epoch: 0,
            requested_at: START,
        });

        let err = raffle
            .sell_tickets(Pubkey::new_unique(), FEE, START + 1)
            .unwrap_err();
        assert_eq!(err, Error::from(RaffleError::RaffleClosed));
        assert_eq!(raffle.ticket_count(), 1);
    }

    #[test]
    fn test_purchase_capped_at_capacity() {
        let mut raffle = raffle();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        raffle
            .sell_tickets(first, u64::from(MAX_TICKETS_PER_EPOCH - 2) * FEE, START)
            .unwrap();

        let purchase = raffle.sell_tickets(second, 5 * FEE + 1, START).unwrap();
        assert_eq!(purchase.tickets, 2);
        assert_eq!(purchase.total_tickets, MAX_TICKETS_PER_EPOCH);
        assert_eq!(purchase.cost, 2 * FEE);
        assert_eq!(purchase.refund, 3 * FEE + 1);

        // a full epoch is closed for sale
        let err = raffle.sell_tickets(second, FEE, START).unwrap_err();
        assert_eq!(err, Error::from(RaffleError::RaffleClosed));
    }

    /// Runs a sale and the lamport moves `enter_raffle` makes, with the
    /// system transfer applied directly to the accounts.
    fn buy_with_lamports(
        raffle: &mut Raffle,
        buyer: &mut TestAccount,
        treasury: &mut TestAccount,
        payment: u64,
    ) -> Result<TicketPurchase> {
        let purchase = raffle.sell_tickets(buyer.key, payment, START)?;
        let buyer_info = buyer.info();
        let treasury_info = treasury.info();

        let pre_transfer_balance = treasury_info.lamports();
        buyer_info.sub_lamports(payment)?;
        treasury_info.add_lamports(payment)?;

        settle_payment(
            &treasury_info,
            &buyer_info,
            pre_transfer_balance,
            payment,
            purchase.refund,
        )?;
        Ok(purchase)
    }

    #[test]
    fn test_buyer_pays_exactly_ticket_cost() {
        let mut raffle =
            Raffle::new(Pubkey::new_unique(), 10, EPOCH_INTERVAL_SECONDS, START, 255).unwrap();
        let mut buyer = TestAccount::wallet(1_000);
        let mut treasury = TestAccount::new(500, 41, crate::ID);

        let purchase = buy_with_lamports(&mut raffle, &mut buyer, &mut treasury, 30).unwrap();
        assert_eq!(purchase.total_tickets, 3);
        assert_eq!(buyer.lamports, 970);
        assert_eq!(treasury.lamports, 530);

        let purchase = buy_with_lamports(&mut raffle, &mut buyer, &mut treasury, 15).unwrap();
        assert_eq!(purchase.tickets, 1);
        assert_eq!(purchase.refund, 5);
        assert_eq!(buyer.lamports, 960);
        assert_eq!(treasury.lamports, 540);
    }

    #[test]
    fn test_missing_deposit_is_rejected() {
        let mut buyer = TestAccount::wallet(1_000);
        let mut treasury = TestAccount::new(500, 41, crate::ID);

        // nothing arrived in the treasury
        let err = settle_payment(&treasury.info(), &buyer.info(), 500, FEE, 0).unwrap_err();

        assert_eq!(err, Error::from(RaffleError::TransferFailed));
        assert_eq!(buyer.lamports, 1_000);
        assert_eq!(treasury.lamports, 500);
    }

    #[test]
    fn test_huge_payment_does_not_overflow() {
        let mut raffle = raffle();

        let purchase = raffle
            .sell_tickets(Pubkey::new_unique(), u64::MAX, START)
            .unwrap();

        assert_eq!(purchase.tickets, MAX_TICKETS_PER_EPOCH);
        assert_eq!(purchase.cost + purchase.refund, u64::MAX);
    }
}
