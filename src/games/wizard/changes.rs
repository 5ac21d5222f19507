use serde::{Deserialize, Serialize};

/// One state-change notification for observers. The game accumulates these in
/// `changes` (one inner vec per animation step) after every accepted intent;
/// renderers replay them, headless consumers ignore them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    #[default]
    Shuffle,
    Deal,
    Trump,
    Play,
    TricksToWinner,
    ClearTrick,
    Score,
    Podium,
    GameOver,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    #[default]
    Deck,
    Hand,
    Play,
    Trump,
    Score,
    Podium,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename(serialize = "type", deserialize = "type"))]
    pub change_type: ChangeType,
    pub object_id: i32,
    pub dest: Location,
    pub player: usize,
    pub offset: usize,
    pub length: usize,
    pub start_score: i32,
    pub end_score: i32,
    pub trick_count: i32,
    pub message: Option<String>,
}
