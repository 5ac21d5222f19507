use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};

/// Jester never wins a trick and never establishes a lead color.
pub const JESTER: i32 = 0;
/// Wizard always wins the trick for whoever played it first.
pub const WIZARD: i32 = 14;

pub const DECK_SIZE: usize = 60;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Sequence,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    #[default]
    Red = 0,
    Blue = 1,
    Green = 2,
    Yellow = 3,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i32,
    pub color: Color,
    pub value: i32,
}

impl Card {
    pub fn is_special(&self) -> bool {
        self.value == JESTER || self.value == WIZARD
    }

    /// Specials never count as holding their printed color for follow-suit
    /// purposes.
    pub fn counts_for_color(&self, color: Color) -> bool {
        self.color == color && !self.is_special()
    }
}

/// Every color carries values 1-13 plus one Jester and one Wizard, 60 cards
/// total.
pub fn deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    let mut id = 0;

    for color in all::<Color>() {
        for value in JESTER..=WIZARD {
            cards.push(Card { id, color, value });
            id += 1;
        }
    }

    cards
}
