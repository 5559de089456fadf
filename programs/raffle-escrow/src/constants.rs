/// Seed prefix for the singleton raffle PDA.
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Seed prefix for ticket PDAs; the full seed appends the ticket index.
pub const TICKET_SEED: &[u8] = b"ticket";

/// A draw needs strictly more tickets than this to be triggered.
pub const MIN_TICKETS_TO_DRAW: u64 = 2;

/// Upper bound for the fee share of the ticket price, in whole percent.
pub const MAX_FEE_PERCENT: u8 = 100;
