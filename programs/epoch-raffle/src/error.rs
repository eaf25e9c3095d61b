use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Raffle is not open for ticket sales")]
    RaffleClosed,
    #[msg("Payment does not cover a single ticket")]
    InsufficientPayment,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Only the oracle authority can fulfill randomness")]
    UnauthorizedCaller,
    #[msg("No pending randomness request matches this id")]
    UnknownRequest,
    #[msg("Ticket index is out of range for the requested epoch")]
    IndexOutOfRange,
    #[msg("Entrance fee must be greater than zero")]
    InvalidEntranceFee,
    #[msg("Fulfillment carried no random words")]
    MissingRandomWords,
    #[msg("Winner account does not match the selected ticket owner")]
    WinnerAccountMismatch,
    #[msg("No randomness request is pending")]
    NoPendingRequest,
    #[msg("Randomness request is still within its grace period")]
    RetryTooEarly,
    #[msg("Treasury transfer failed")]
    TransferFailed,
}
