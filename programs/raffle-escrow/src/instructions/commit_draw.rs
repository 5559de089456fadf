use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::{constants::RAFFLE_SEED, error::RaffleError, state::Raffle};

/// Event emitted when a draw is committed to a randomness account
#[event]
pub struct DrawCommitted {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The randomness account the draw is committed to
    pub randomness_account: Pubkey,
    /// Tickets sold at commitment time
    pub total_tickets: u64,
}

/// Accounts required to commit the draw.
///
/// Ensures:
/// 1. Only the operator can trigger a draw.
/// 2. The randomness account has not been revealed yet, so the committed
///    value cannot be known in advance.
#[derive(Accounts)]
pub struct CommitDraw<'info> {
    /// The raffle operator.
    #[account(mut)]
    pub operator: Signer<'info>,

    /// The raffle state account.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// System program for account operations.
    pub system_program: Program<'info, System>,
}

/// Commits the draw to a fresh randomness account and stores its address
/// as the outstanding request handle. Pools and the ticket counter are
/// left untouched; purchases remain open until the draw settles.
pub fn process_commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;

    raffle.ensure_operator(ctx.accounts.operator.key())?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| RaffleError::IncorrectRandomnessAccount)?;
    if randomness_data.seed_slot != clock.slot - 1 {
        return Err(RaffleError::RandomnessAlreadyRevealed.into());
    }

    raffle.begin_draw(ctx.accounts.randomness_account_data.key())?;

    msg!(
        "Draw committed to randomness account {}",
        raffle.randomness_account
    );

    emit!(DrawCommitted {
        raffle: raffle.key(),
        randomness_account: raffle.randomness_account,
        total_tickets: raffle.total_tickets,
    });

    Ok(())
}
