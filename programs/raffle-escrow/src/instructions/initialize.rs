use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_FEE_PERCENT, RAFFLE_SEED},
    error::RaffleError,
    state::Raffle,
};

/// Event emitted when the raffle is created
#[event]
pub struct RaffleInitialized {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The operator fixed for the lifetime of the raffle
    pub operator: Pubkey,
    /// Price of a single ticket in lamports
    pub ticket_price: u64,
    /// Fee share of the ticket price in whole percent
    pub fee_percent: u8,
}

/// Accounts required to initialize the raffle.
/// The `init` constraint makes a second initialization fail.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account paying for the raffle account; becomes the operator.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account holding pools, counters and the draw flag.
    #[account(
        init,
        payer = payer,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// System program to create the raffle account.
    pub system_program: Program<'info, System>,
}

/// Creates the raffle with its immutable parameters. The payer becomes
/// the operator; pools and counters start at zero.
pub fn process_initialize(
    ctx: Context<Initialize>,
    ticket_price: u64,
    fee_percent: u8,
) -> Result<()> {
    require!(ticket_price > 0, RaffleError::InvalidTicketPrice);
    require!(fee_percent <= MAX_FEE_PERCENT, RaffleError::InvalidFeePercent);

    let raffle = &mut ctx.accounts.raffle;
    raffle.bump = ctx.bumps.raffle;
    raffle.operator = ctx.accounts.payer.key();
    raffle.ticket_price = ticket_price;
    raffle.fee_percent = fee_percent;
    raffle.prize_pool = 0;
    raffle.fee_pool = 0;
    raffle.total_tickets = 0;
    raffle.is_closed = false;
    raffle.randomness_account = Pubkey::default();

    emit!(RaffleInitialized {
        raffle: raffle.key(),
        operator: raffle.operator,
        ticket_price,
        fee_percent,
    });

    Ok(())
}
