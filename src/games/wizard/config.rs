use serde::{Deserialize, Serialize};

/// Session settings supplied by whoever hosts the table. Seat order is the
/// order of `player_names`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    pub player_names: Vec<String>,
    /// Rounds to play before the podium. Defaults to dealing out the whole
    /// deck in the final round (60 / player count).
    pub max_rounds: Option<i32>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        WizardConfig {
            player_names: vec![
                "Player 1".to_string(),
                "Player 2".to_string(),
                "Player 3".to_string(),
            ],
            max_rounds: None,
        }
    }
}
