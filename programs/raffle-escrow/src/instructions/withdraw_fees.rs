use anchor_lang::prelude::*;

use crate::{constants::RAFFLE_SEED, error::RaffleError, state::Raffle};

/// Event emitted when accrued fees are withdrawn
#[event]
pub struct FeesWithdrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The operator receiving the fees
    pub operator: Pubkey,
    /// Amount withdrawn in lamports
    pub amount: u64,
}

/// Accounts required to withdraw accrued fees.
#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    /// The raffle operator; authorizes the withdrawal and receives it.
    #[account(mut)]
    pub operator: Signer<'info>,

    /// The raffle state account holding the escrowed fees.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// System program for account operations.
    pub system_program: Program<'info, System>,
}

/// Sweeps the fee pool to the operator. Works in every lifecycle state,
/// including after the draw has settled; withdrawing an empty pool moves
/// nothing and succeeds.
pub fn process_withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
    let raffle = &mut ctx.accounts.raffle;

    raffle.ensure_operator(ctx.accounts.operator.key())?;

    let amount = raffle.take_fee_pool();

    raffle
        .to_account_info()
        .sub_lamports(amount)
        .map_err(|_| RaffleError::TransferFailed)?;
    ctx.accounts
        .operator
        .to_account_info()
        .add_lamports(amount)
        .map_err(|_| RaffleError::TransferFailed)?;

    msg!("Withdrew {} lamports in accrued fees", amount);

    emit!(FeesWithdrawn {
        raffle: raffle.key(),
        operator: ctx.accounts.operator.key(),
        amount,
    });

    Ok(())
}
