use thiserror::Error;

/// Why the engine rejected an action. Rejections never mutate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("selected cards do not form a recognized pattern")]
    InvalidPattern,
    #[error("pattern does not beat the table")]
    IllegalMove,
    #[error("not your turn")]
    NotYourTurn,
    #[error("bid is not accepted now")]
    StaleBid,
    #[error("selected cards are not in hand")]
    CardsNotOwned,
    #[error("cards can only be played or passed during play")]
    NotPlaying,
    #[error("game is over")]
    GameOver,
    #[error("game already started")]
    AlreadyStarted,
    #[error("deck is not a full 54-card pack")]
    InvalidDeck,
    #[error("rules name a seat outside the table")]
    InvalidRules,
}
