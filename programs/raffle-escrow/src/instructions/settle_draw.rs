use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::{
    constants::{RAFFLE_SEED, TICKET_SEED},
    error::RaffleError,
    state::{Raffle, Ticket},
};

/// Event emitted when the draw settles. Emitted before the prize moves,
/// inside the same transaction.
#[event]
pub struct WinnerDrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winner's address
    pub winner: Pubkey,
    /// The winning ticket index
    pub winning_index: u64,
    /// Prize paid out in lamports
    pub prize_amount: u64,
    /// Tickets that were eligible for the draw
    pub total_tickets: u64,
}

/// Accounts required to settle a committed draw.
///
/// Any caller may crank this once the oracle has revealed: authenticity
/// comes from the randomness account matching the stored handle, not
/// from the signer. The caller supplies the ticket at the winning index
/// and the wallet recorded on it; both are verified in the handler.
#[derive(Accounts)]
pub struct SettleDraw<'info> {
    /// The account paying transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account holding the escrowed prize.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// Randomness account the draw was committed to.
    /// CHECK: Must match the handle stored on the raffle; validated in
    /// the handler before the revealed value is consumed.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// The ticket claimed to hold the winning index.
    #[account(
        seeds = [TICKET_SEED, winning_ticket.index.to_le_bytes().as_ref()],
        bump = winning_ticket.bump
    )]
    pub winning_ticket: Account<'info, Ticket>,

    /// The wallet receiving the prize.
    /// CHECK: Compared against the owner recorded on the winning ticket.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    /// System program for account operations.
    pub system_program: Program<'info, System>,
}

/// Settles the draw with the revealed random value.
///
/// The winning index is taken modulo the tickets sold at settle time, so
/// purchases made while the request was outstanding still count. Closing
/// the raffle and paying the prize happen in one transaction; any failure
/// reverts both.
pub fn process_settle_draw(ctx: Context<SettleDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;

    raffle.ensure_open()?;
    raffle.ensure_randomness_account(ctx.accounts.randomness_account_data.key())?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| RaffleError::IncorrectRandomnessAccount)?;
    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| RaffleError::RandomnessNotResolved)?;

    let winning_index = raffle.winner_index(&revealed_random_value);
    msg!(
        "Winning index {} out of {} tickets",
        winning_index,
        raffle.total_tickets
    );

    let winning_ticket = &ctx.accounts.winning_ticket;
    require!(
        winning_ticket.index == winning_index,
        RaffleError::WrongTicket
    );
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winning_ticket.owner,
        RaffleError::WrongWinner
    );

    let prize_amount = raffle.close_draw()?;

    emit!(WinnerDrawn {
        raffle: raffle.key(),
        winner: winning_ticket.owner,
        winning_index,
        prize_amount,
        total_tickets: raffle.total_tickets,
    });

    raffle
        .to_account_info()
        .sub_lamports(prize_amount)
        .map_err(|_| RaffleError::TransferFailed)?;
    ctx.accounts
        .winner
        .to_account_info()
        .add_lamports(prize_amount)
        .map_err(|_| RaffleError::TransferFailed)?;

    Ok(())
}
