use thiserror::Error;

/// Why an intent was rejected. Rejections never mutate game state, so a
/// caller can always retry with a corrected intent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntentError {
    #[error("sender is not the active player")]
    OutOfTurn,
    #[error("card is not held or the play violates the follow-suit rule")]
    IllegalMove,
    #[error("bid is negative or is the forbidden value for the last bidder")]
    InvalidBid,
    #[error("intent is not accepted in the current phase")]
    WrongPhase,
}
