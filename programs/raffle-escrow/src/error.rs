use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    #[msg("Ticket price must be greater than zero")]
    InvalidTicketPrice,
    #[msg("Fee percent cannot exceed 100")]
    InvalidFeePercent,
    #[msg("The raffle has already been drawn and closed")]
    DrawClosed,
    #[msg("Payment must equal the ticket price exactly")]
    WrongAmount,
    #[msg("A draw needs more than two tickets sold")]
    InsufficientParticipation,
    #[msg("Only the raffle operator may perform this action")]
    Unauthorized,
    #[msg("Randomness account does not match the committed draw")]
    IncorrectRandomnessAccount,
    #[msg("Randomness account has already been revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness has not been resolved yet")]
    RandomnessNotResolved,
    #[msg("Ticket is not the winning ticket")]
    WrongTicket,
    #[msg("Account is not the owner of the winning ticket")]
    WrongWinner,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Lamport transfer failed")]
    TransferFailed,
}
