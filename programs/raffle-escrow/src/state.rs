use anchor_lang::prelude::*;

use crate::constants::MIN_TICKETS_TO_DRAW;
use crate::error::RaffleError;

#[account]
#[derive(InitSpace)]
pub struct Raffle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The identity allowed to trigger the draw and withdraw fees.
    /// Fixed at initialization.
    pub operator: Pubkey,

    /// The price (in lamports) required to purchase a single ticket.
    pub ticket_price: u64,

    /// Share of every ticket price diverted to the fee pool, in whole
    /// percent. The remainder accrues to the prize pool.
    pub fee_percent: u8,

    /// Lamports accumulated for the eventual winner.
    pub prize_pool: u64,

    /// Lamports accumulated for the operator.
    pub fee_pool: u64,

    /// The total number of tickets issued. Ticket indices are dense,
    /// starting at zero.
    pub total_tickets: u64,

    /// Set once a draw has settled. A closed raffle only accepts fee
    /// withdrawals.
    pub is_closed: bool,

    /// The randomness account the current draw is committed to.
    /// `Pubkey::default()` while no draw has ever been committed.
    pub randomness_account: Pubkey,
}

#[account]
#[derive(InitSpace)]
pub struct Ticket {
    pub bump: u8,

    /// The purchaser, and recipient of the prize should this ticket win.
    pub owner: Pubkey,

    /// Position in the mint order, starting at zero.
    pub index: u64,
}

impl Raffle {
    /// Fails once the raffle has been closed by a settled draw.
    pub fn ensure_open(&self) -> Result<()> {
        if self.is_closed {
            return err!(RaffleError::DrawClosed);
        }
        Ok(())
    }

    pub fn ensure_operator(&self, signer: Pubkey) -> Result<()> {
        require_keys_eq!(signer, self.operator, RaffleError::Unauthorized);
        Ok(())
    }

    pub fn ensure_randomness_account(&self, account: Pubkey) -> Result<()> {
        require_keys_eq!(
            account,
            self.randomness_account,
            RaffleError::IncorrectRandomnessAccount
        );
        Ok(())
    }

    /// Accounts for a paid purchase and returns the index the new ticket
    /// must be minted at. The payment must match the ticket price exactly.
    pub fn register_purchase(&mut self, amount: u64) -> Result<u64> {
        self.ensure_open()?;
        if amount != self.ticket_price {
            return err!(RaffleError::WrongAmount);
        }

        let fee = self
            .ticket_price
            .checked_mul(self.fee_percent as u64)
            .ok_or(RaffleError::Overflow)?
            / 100;
        let prize_share = self
            .ticket_price
            .checked_sub(fee)
            .ok_or(RaffleError::Overflow)?;

        self.prize_pool = self
            .prize_pool
            .checked_add(prize_share)
            .ok_or(RaffleError::Overflow)?;
        self.fee_pool = self
            .fee_pool
            .checked_add(fee)
            .ok_or(RaffleError::Overflow)?;

        let index = self.total_tickets;
        self.total_tickets = index.checked_add(1).ok_or(RaffleError::Overflow)?;
        Ok(index)
    }

    /// Records the randomness account the draw is committed to. A repeat
    /// commitment replaces the outstanding handle, so at most one request
    /// can ever settle.
    pub fn begin_draw(&mut self, randomness_account: Pubkey) -> Result<()> {
        self.ensure_open()?;
        if self.total_tickets <= MIN_TICKETS_TO_DRAW {
            return err!(RaffleError::InsufficientParticipation);
        }
        self.randomness_account = randomness_account;
        Ok(())
    }

    /// Maps a revealed random value onto the tickets sold so far.
    pub fn winner_index(&self, revealed: &[u8; 32]) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&revealed[..8]);
        u64::from_le_bytes(raw) % self.total_tickets
    }

    /// One-way transition into the closed state. Empties the prize pool
    /// and returns the amount owed to the winner.
    pub fn close_draw(&mut self) -> Result<u64> {
        self.ensure_open()?;
        let amount = self.prize_pool;
        self.prize_pool = 0;
        self.is_closed = true;
        Ok(amount)
    }

    /// Empties the fee pool. Withdrawing when nothing has accrued moves
    /// nothing and is not an error.
    pub fn take_fee_pool(&mut self) -> u64 {
        let amount = self.fee_pool;
        self.fee_pool = 0;
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_raffle(ticket_price: u64, fee_percent: u8) -> Raffle {
        Raffle {
            bump: 255,
            operator: Pubkey::new_unique(),
            ticket_price,
            fee_percent,
            prize_pool: 0,
            fee_pool: 0,
            total_tickets: 0,
            is_closed: false,
            randomness_account: Pubkey::default(),
        }
    }

    fn revealed(value: u64) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        bytes
    }

    #[test]
    fn test_purchase_splits_price_between_pools() {
        let mut raffle = open_raffle(100, 10);

        assert_eq!(raffle.register_purchase(100).unwrap(), 0);
        assert_eq!(raffle.prize_pool, 90);
        assert_eq!(raffle.fee_pool, 10);
        assert_eq!(raffle.total_tickets, 1);

        assert_eq!(raffle.register_purchase(100).unwrap(), 1);
        assert_eq!(raffle.prize_pool, 180);
        assert_eq!(raffle.fee_pool, 20);
        assert_eq!(raffle.total_tickets, 2);
    }

    #[test]
    fn test_fee_share_rounds_down() {
        let mut raffle = open_raffle(99, 10);
        raffle.register_purchase(99).unwrap();
        assert_eq!(raffle.fee_pool, 9);
        assert_eq!(raffle.prize_pool, 90);

        let mut raffle = open_raffle(1, 50);
        raffle.register_purchase(1).unwrap();
        assert_eq!(raffle.fee_pool, 0);
        assert_eq!(raffle.prize_pool, 1);
    }

    #[test]
    fn test_fee_bounds_keep_every_lamport_accounted() {
        let mut raffle = open_raffle(100, 0);
        raffle.register_purchase(100).unwrap();
        assert_eq!((raffle.prize_pool, raffle.fee_pool), (100, 0));

        let mut raffle = open_raffle(100, 100);
        raffle.register_purchase(100).unwrap();
        assert_eq!((raffle.prize_pool, raffle.fee_pool), (0, 100));
    }

    #[test]
    fn test_purchase_requires_exact_payment() {
        let mut raffle = open_raffle(100, 10);
        for amount in [0, 99, 101] {
            let res = raffle.register_purchase(amount);
            assert_eq!(res.unwrap_err(), RaffleError::WrongAmount.into());
        }
        assert_eq!(raffle.prize_pool, 0);
        assert_eq!(raffle.fee_pool, 0);
        assert_eq!(raffle.total_tickets, 0);
    }

    #[test]
    fn test_purchase_rejected_once_closed() {
        let mut raffle = open_raffle(100, 10);
        raffle.is_closed = true;
        let res = raffle.register_purchase(100);
        assert_eq!(res.unwrap_err(), RaffleError::DrawClosed.into());
        assert_eq!(raffle.total_tickets, 0);
    }

    #[test]
    fn test_fee_math_overflow_is_reported() {
        let mut raffle = open_raffle(u64::MAX, 2);
        let res = raffle.register_purchase(u64::MAX);
        assert_eq!(res.unwrap_err(), RaffleError::Overflow.into());
    }

    #[test]
    fn test_draw_needs_more_than_two_tickets() {
        let mut raffle = open_raffle(100, 10);
        let handle = Pubkey::new_unique();

        for total in [0, 1, 2] {
            raffle.total_tickets = total;
            let res = raffle.begin_draw(handle);
            assert_eq!(
                res.unwrap_err(),
                RaffleError::InsufficientParticipation.into()
            );
            assert_eq!(raffle.randomness_account, Pubkey::default());
        }

        raffle.total_tickets = 3;
        raffle.begin_draw(handle).unwrap();
        assert_eq!(raffle.randomness_account, handle);
    }

    #[test]
    fn test_draw_rejected_once_closed() {
        let mut raffle = open_raffle(100, 10);
        raffle.total_tickets = 5;
        raffle.is_closed = true;
        let res = raffle.begin_draw(Pubkey::new_unique());
        assert_eq!(res.unwrap_err(), RaffleError::DrawClosed.into());
    }

    #[test]
    fn test_recommit_replaces_outstanding_handle() {
        let mut raffle = open_raffle(100, 10);
        raffle.total_tickets = 3;
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        raffle.begin_draw(first).unwrap();
        raffle.begin_draw(second).unwrap();
        assert_eq!(raffle.randomness_account, second);

        let res = raffle.ensure_randomness_account(first);
        assert_eq!(
            res.unwrap_err(),
            RaffleError::IncorrectRandomnessAccount.into()
        );
        raffle.ensure_randomness_account(second).unwrap();
    }

    #[test]
    fn test_only_operator_passes_the_gate() {
        let raffle = open_raffle(100, 10);
        raffle.ensure_operator(raffle.operator).unwrap();
        let res = raffle.ensure_operator(Pubkey::new_unique());
        assert_eq!(res.unwrap_err(), RaffleError::Unauthorized.into());
    }

    #[test]
    fn test_winner_index_reads_first_eight_bytes_little_endian() {
        let mut raffle = open_raffle(100, 10);
        raffle.total_tickets = 5;

        assert_eq!(raffle.winner_index(&revealed(7)), 2);
        assert_eq!(raffle.winner_index(&revealed(256)), 1);

        // Bytes past the eighth never influence the result.
        let mut bytes = revealed(7);
        bytes[8] = 0xff;
        bytes[31] = 0xff;
        assert_eq!(raffle.winner_index(&bytes), 2);
    }

    #[test]
    fn test_close_is_one_way_and_empties_the_prize_pool() {
        let mut raffle = open_raffle(100, 10);
        raffle.prize_pool = 270;
        raffle.total_tickets = 3;

        assert_eq!(raffle.close_draw().unwrap(), 270);
        assert_eq!(raffle.prize_pool, 0);
        assert!(raffle.is_closed);

        let res = raffle.close_draw();
        assert_eq!(res.unwrap_err(), RaffleError::DrawClosed.into());
    }

    #[test]
    fn test_fee_withdrawal_is_idempotent_and_survives_close() {
        let mut raffle = open_raffle(100, 10);
        raffle.fee_pool = 30;
        raffle.is_closed = true;

        assert_eq!(raffle.take_fee_pool(), 30);
        assert_eq!(raffle.fee_pool, 0);
        assert_eq!(raffle.take_fee_pool(), 0);
    }

    #[test]
    fn test_three_buyer_draw_lifecycle() {
        let mut raffle = open_raffle(100, 10);
        for expected_index in 0..3 {
            assert_eq!(raffle.register_purchase(100).unwrap(), expected_index);
        }
        assert_eq!(raffle.prize_pool, 270);
        assert_eq!(raffle.fee_pool, 30);
        assert_eq!(raffle.total_tickets, 3);

        let handle = Pubkey::new_unique();
        raffle.begin_draw(handle).unwrap();
        raffle.ensure_randomness_account(handle).unwrap();

        // A delivered value of 7 lands on the second ticket: 7 % 3 == 1.
        assert_eq!(raffle.winner_index(&revealed(7)), 1);

        assert_eq!(raffle.close_draw().unwrap(), 270);
        assert_eq!(raffle.prize_pool, 0);
        assert!(raffle.is_closed);

        // Fees stay claimable after the draw has settled.
        assert_eq!(raffle.take_fee_pool(), 30);
    }

    #[test]
    fn test_account_sizes_match_field_layout() {
        assert_eq!(
            8 + Raffle::INIT_SPACE,
            8 + 1 + 32 + 8 + 1 + 8 + 8 + 8 + 1 + 32
        );
        assert_eq!(8 + Ticket::INIT_SPACE, 8 + 1 + 32 + 8);
    }
}
