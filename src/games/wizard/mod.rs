pub mod cards;
pub mod changes;
pub mod config;
pub mod errors;
pub mod game;

// Re-export the main types
pub use cards::{deck, Card, Color, DECK_SIZE, JESTER, WIZARD};
pub use changes::{Change, ChangeType, Location};
pub use config::WizardConfig;
pub use errors::IntentError;
pub use game::{Phase, PlayedCard, Player, PlayerResult, WizardGame, MIN_PLAYERS};
