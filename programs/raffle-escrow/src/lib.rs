#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

declare_id!("9o7q9RQ5dsp2LDnBTBePWVtWzBZddLR6qCYwHX1MeZf4");

#[program]
pub mod raffle_escrow {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        ticket_price: u64,
        fee_percent: u8,
    ) -> Result<()> {
        process_initialize(ctx, ticket_price, fee_percent)
    }

    pub fn buy_ticket(ctx: Context<BuyTicket>, amount: u64) -> Result<()> {
        process_buy_ticket(ctx, amount)
    }

    pub fn commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
        process_commit_draw(ctx)
    }

    pub fn settle_draw(ctx: Context<SettleDraw>) -> Result<()> {
        process_settle_draw(ctx)
    }

    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        process_withdraw_fees(ctx)
    }
}
