use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{
    constants::{RAFFLE_SEED, TICKET_SEED},
    state::{Raffle, Ticket},
};

/// Event emitted when a ticket is purchased
#[event]
pub struct TicketPurchased {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The buyer's address
    pub buyer: Pubkey,
    /// Index of the newly minted ticket
    pub ticket_index: u64,
    /// Amount paid in lamports
    pub amount: u64,
}

/// Accounts required to buy a ticket.
///
/// The ticket account is derived from the current ticket counter, so
/// indices are dense and each index can only ever be minted once.
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// The account paying for the ticket.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Raffle state account; receives the payment on top of its rent.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// The ticket minted by this purchase.
    #[account(
        init,
        payer = buyer,
        space = 8 + Ticket::INIT_SPACE,
        seeds = [TICKET_SEED, raffle.total_tickets.to_le_bytes().as_ref()],
        bump
    )]
    pub ticket: Account<'info, Ticket>,

    /// System program for the payment transfer and ticket creation.
    pub system_program: Program<'info, System>,
}

/// Buys one ticket for the caller.
///
/// The declared payment must equal the ticket price exactly. The price
/// splits into the prize and fee pools before the lamports move, and the
/// ticket records the buyer as its owner at the next dense index.
pub fn process_buy_ticket(ctx: Context<BuyTicket>, amount: u64) -> Result<()> {
    let raffle = &mut ctx.accounts.raffle;
    let index = raffle.register_purchase(amount)?;

    let ticket = &mut ctx.accounts.ticket;
    ticket.bump = ctx.bumps.ticket;
    ticket.owner = ctx.accounts.buyer.key();
    ticket.index = index;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.buyer.to_account_info(),
                to: raffle.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(TicketPurchased {
        raffle: raffle.key(),
        buyer: ticket.owner,
        ticket_index: index,
        amount,
    });

    Ok(())
}
