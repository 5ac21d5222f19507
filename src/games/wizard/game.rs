/*
Game: Wizard
Designer: Ken Fisher
BoardGameGeek: https://boardgamegeek.com/boardgame/1465/wizard
*/

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cards::{deck, Card, Color, DECK_SIZE, JESTER, WIZARD};
use super::changes::{Change, ChangeType, Location};
use super::config::WizardConfig;
use super::errors::IntentError;

pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Setup,
    Bidding,
    Playing,
    Scoring,
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub score: i32,
    /// `None` until this player has bid in the current round.
    pub bid: Option<i32>,
    pub tricks_taken: i32,
    pub hand: Vec<Card>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    pub seat: usize,
    pub card: Card,
}

/// One podium row. `standings` holds these sorted by score, ties keeping
/// seat order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub seat: usize,
    pub name: String,
    pub score: i32,
}

/// Authoritative table state. Exactly one process owns a `WizardGame`;
/// remote participants send intents (`submit_bid`, `play_card`, ...) and
/// receive the accumulated `changes` after each accepted intent. A rejected
/// intent returns an `IntentError` and leaves every field untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WizardGame {
    pub players: Vec<Player>,
    pub phase: Phase,
    /// 1-indexed; also the hand size and the trick count for the round.
    pub round: i32,
    pub max_rounds: i32,
    pub dealer: usize,
    pub current_player: usize,
    pub trump_color: Option<Color>,
    /// False when the revealed trump card is a Jester or the deck was
    /// exhausted by the deal.
    pub trump_active: bool,
    pub current_trick: Vec<PlayedCard>,
    pub tricks_played_in_round: i32,
    /// Filled once the game is over.
    pub standings: Vec<PlayerResult>,
    pub changes: Vec<Vec<Change>>,
    pub no_changes: bool,
}

impl WizardGame {
    pub fn new(player_names: Vec<String>) -> Self {
        Self::with_config(WizardConfig {
            player_names,
            max_rounds: None,
        })
    }

    pub fn with_config(config: WizardConfig) -> Self {
        let player_count = config.player_names.len();
        assert!(
            player_count >= MIN_PLAYERS,
            "a Wizard table needs at least two players"
        );
        let max_rounds = config
            .max_rounds
            .unwrap_or((DECK_SIZE / player_count) as i32);
        WizardGame {
            players: config
                .player_names
                .into_iter()
                .map(|name| Player {
                    name,
                    ..Default::default()
                })
                .collect(),
            max_rounds,
            changes: vec![vec![]],
            ..Default::default()
        }
    }

    /// Skip change tracking entirely (headless simulation).
    pub fn with_no_changes(&mut self) {
        self.no_changes = true;
        self.changes = vec![];
    }

    pub fn is_player_turn(&self, seat: usize) -> bool {
        matches!(self.phase, Phase::Bidding | Phase::Playing) && seat == self.current_player
    }

    // --- Intents ---

    pub fn start_game(&mut self) -> Result<(), IntentError> {
        if self.phase != Phase::Setup {
            return Err(IntentError::WrongPhase);
        }
        self.clear_changes();
        self.round = 1;
        self.start_round();
        Ok(())
    }

    pub fn start_next_round(&mut self) -> Result<(), IntentError> {
        if self.phase != Phase::Scoring {
            return Err(IntentError::WrongPhase);
        }
        self.clear_changes();
        let index = self.new_change();
        self.add_change(
            index,
            Change {
                change_type: ChangeType::ClearTrick,
                dest: Location::Play,
                ..Default::default()
            },
        );
        self.round += 1;
        self.start_round();
        Ok(())
    }

    pub fn submit_bid(&mut self, seat: usize, bid: i32) -> Result<(), IntentError> {
        if self.phase != Phase::Bidding {
            return Err(IntentError::WrongPhase);
        }
        if seat != self.current_player {
            warn!(seat, active = self.current_player, "bid rejected: not this player's turn");
            return Err(IntentError::OutOfTurn);
        }
        if bid < 0 {
            warn!(seat, bid, "bid rejected: negative");
            return Err(IntentError::InvalidBid);
        }
        if self.forbidden_bid() == Some(bid) {
            warn!(seat, bid, "bid rejected: total bids would equal the trick count");
            return Err(IntentError::InvalidBid);
        }

        self.clear_changes();
        self.players[seat].bid = Some(bid);
        info!(seat, bid, "bid accepted");
        self.current_player = (self.current_player + 1) % self.players.len();

        if self.all_bids_in() {
            self.phase = Phase::Playing;
            self.current_player = self.round_starter();
            info!(round = self.round, starter = self.current_player, "all bids in");
        }
        Ok(())
    }

    pub fn play_card(&mut self, seat: usize, color: Color, value: i32) -> Result<(), IntentError> {
        if self.phase != Phase::Playing {
            return Err(IntentError::WrongPhase);
        }
        if seat != self.current_player {
            warn!(seat, active = self.current_player, "play rejected: not this player's turn");
            return Err(IntentError::OutOfTurn);
        }
        let card = match self.find_in_hand(seat, color, value) {
            Some(card) => card,
            None => {
                warn!(seat, ?color, value, "play rejected: card not in hand");
                return Err(IntentError::IllegalMove);
            }
        };
        if !self.is_valid_move(seat, card) {
            warn!(seat, ?card, "play rejected: must follow suit");
            return Err(IntentError::IllegalMove);
        }

        self.clear_changes();
        self.remove_card(seat, card);
        debug!(seat, ?card, "card played");
        self.add_change(
            0,
            Change {
                change_type: ChangeType::Play,
                object_id: card.id,
                dest: Location::Play,
                player: seat,
                ..Default::default()
            },
        );
        self.current_trick.push(PlayedCard { seat, card });

        if self.current_trick.len() == self.players.len() {
            self.resolve_trick();
        } else {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
        Ok(())
    }

    // --- Bidding helpers ---

    pub fn all_bids_in(&self) -> bool {
        self.players.iter().all(|p| p.bid.is_some())
    }

    /// The one value the last bidder may not pick: whatever would make the
    /// bids sum to the round's trick count. `None` while earlier players are
    /// still bidding.
    pub fn forbidden_bid(&self) -> Option<i32> {
        if self.phase != Phase::Bidding {
            return None;
        }
        let outstanding = self.players.iter().filter(|p| p.bid.is_none()).count();
        if outstanding != 1 {
            return None;
        }
        let sum: i32 = self.players.iter().filter_map(|p| p.bid).sum();
        let forbidden = self.round - sum;
        (forbidden >= 0).then_some(forbidden)
    }

    // --- Hand helpers ---

    pub fn find_in_hand(&self, seat: usize, color: Color, value: i32) -> Option<Card> {
        self.players[seat]
            .hand
            .iter()
            .find(|c| c.color == color && c.value == value)
            .copied()
    }

    pub fn has_color(&self, seat: usize, color: Color) -> bool {
        self.players[seat]
            .hand
            .iter()
            .any(|c| c.counts_for_color(color))
    }

    fn remove_card(&mut self, seat: usize, card: Card) {
        let pos = self.players[seat].hand.iter().position(|c| c.id == card.id);
        debug_assert!(pos.is_some(), "card was validated against the hand before removal");
        if let Some(pos) = pos {
            self.players[seat].hand.remove(pos);
        }
    }

    // --- Play legality ---

    pub fn is_valid_move(&self, seat: usize, card: Card) -> bool {
        if self.find_in_hand(seat, card.color, card.value).is_none() {
            return false;
        }
        if card.is_special() {
            return true;
        }
        if self.current_trick.is_empty() {
            return true;
        }
        match self.lead_color() {
            // A leading Wizard (or nothing but Jesters so far) leaves the
            // lead color open, so anything goes.
            None => true,
            Some(lead) => !self.has_color(seat, lead) || card.color == lead,
        }
    }

    pub fn playable_cards(&self, seat: usize) -> Vec<Card> {
        self.players[seat]
            .hand
            .iter()
            .copied()
            .filter(|card| self.is_valid_move(seat, *card))
            .collect()
    }

    /// Color set by the first non-Jester card of the trick. A Wizard played
    /// before any colored card means there is no lead color this trick.
    pub fn lead_color(&self) -> Option<Color> {
        for played in &self.current_trick {
            if played.card.value == WIZARD {
                return None;
            }
            if played.card.value != JESTER {
                return Some(played.card.color);
            }
        }
        None
    }

    // --- Trick resolution ---

    /// Pure evaluation of a completed trick. Precedence: the first Wizard
    /// played wins outright; otherwise the highest trump (when trump is
    /// active); otherwise the highest card of the lead color; a trick of
    /// nothing but Jesters goes to whoever led it.
    pub fn trick_winner(
        trick: &[PlayedCard],
        trump_color: Option<Color>,
        trump_active: bool,
    ) -> usize {
        if let Some(played) = trick.iter().find(|p| p.card.value == WIZARD) {
            return played.seat;
        }

        if trump_active {
            if let Some(seat) = trump_color.and_then(|trump| Self::highest_of_color(trick, trump)) {
                return seat;
            }
        }

        let lead = trick
            .iter()
            .find(|p| p.card.value != JESTER)
            .map(|p| p.card.color);
        if let Some(seat) = lead.and_then(|lead| Self::highest_of_color(trick, lead)) {
            return seat;
        }

        // Only Jesters were played
        trick[0].seat
    }

    /// Highest non-special card of `color`; the earlier play wins on equal
    /// values (only reachable with multi-deck house rules).
    fn highest_of_color(trick: &[PlayedCard], color: Color) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for played in trick {
            if played.card.counts_for_color(color)
                && best.map_or(true, |(_, value)| played.card.value > value)
            {
                best = Some((played.seat, played.card.value));
            }
        }
        best.map(|(seat, _)| seat)
    }

    fn resolve_trick(&mut self) {
        let winner = Self::trick_winner(&self.current_trick, self.trump_color, self.trump_active);
        self.players[winner].tricks_taken += 1;
        self.tricks_played_in_round += 1;
        info!(winner, tricks = self.players[winner].tricks_taken, "trick resolved");

        let index = self.new_change();
        let trick_count = self.players[winner].tricks_taken;
        let taken: Vec<i32> = self.current_trick.iter().map(|p| p.card.id).collect();
        for card_id in taken {
            self.add_change(
                index,
                Change {
                    change_type: ChangeType::TricksToWinner,
                    object_id: card_id,
                    dest: Location::Score,
                    player: winner,
                    trick_count,
                    ..Default::default()
                },
            );
        }

        if self.tricks_played_in_round == self.round {
            self.score_round();
        } else {
            let index = self.new_change();
            self.add_change(
                index,
                Change {
                    change_type: ChangeType::ClearTrick,
                    dest: Location::Play,
                    ..Default::default()
                },
            );
            self.current_trick.clear();
            self.current_player = winner;
        }
    }

    // --- Scoring ---

    pub fn round_score(bid: i32, tricks_taken: i32) -> i32 {
        let diff = (bid - tricks_taken).abs();
        if diff == 0 {
            20 + 10 * tricks_taken
        } else {
            -10 * diff
        }
    }

    fn score_round(&mut self) {
        let deltas: Vec<i32> = self
            .players
            .iter()
            .map(|p| {
                let bid = p.bid.expect("every player bid before play began");
                Self::round_score(bid, p.tricks_taken)
            })
            .collect();

        let index = self.new_change();
        for (seat, delta) in deltas.into_iter().enumerate() {
            let start = self.players[seat].score;
            self.add_change(
                index,
                Change {
                    change_type: ChangeType::Score,
                    dest: Location::Score,
                    player: seat,
                    start_score: start,
                    end_score: start + delta,
                    ..Default::default()
                },
            );
            self.players[seat].score += delta;
        }
        self.current_trick.clear();

        if self.round >= self.max_rounds {
            self.end_game();
        } else {
            self.phase = Phase::Scoring;
            info!(round = self.round, "round scored, awaiting next-round trigger");
        }
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        let mut results: Vec<PlayerResult> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerResult {
                seat,
                name: p.name.clone(),
                score: p.score,
            })
            .collect();
        // Stable sort keeps seat order between tied scores
        results.sort_by(|a, b| b.score.cmp(&a.score));
        info!(?results, "game over");

        let index = self.new_change();
        for (offset, result) in results.iter().enumerate() {
            self.add_change(
                index,
                Change {
                    change_type: ChangeType::Podium,
                    dest: Location::Podium,
                    player: result.seat,
                    offset,
                    start_score: result.score,
                    end_score: result.score,
                    ..Default::default()
                },
            );
        }
        self.add_change(
            index,
            Change {
                change_type: ChangeType::GameOver,
                ..Default::default()
            },
        );
        self.standings = results;
    }

    // --- Round setup ---

    fn round_starter(&self) -> usize {
        (self.dealer + 1) % self.players.len()
    }

    fn start_round(&mut self) {
        let player_count = self.players.len();
        self.tricks_played_in_round = 0;
        self.current_trick.clear();
        for player in &mut self.players {
            player.bid = None;
            player.tricks_taken = 0;
            player.hand.clear();
        }
        self.dealer = (self.round as usize - 1) % player_count;
        self.current_player = self.round_starter();
        self.phase = Phase::Bidding;
        info!(round = self.round, dealer = self.dealer, "starting round");

        let mut cards = deck();
        cards.shuffle(&mut thread_rng());

        let shuffle_index = self.new_change();
        self.add_change(
            shuffle_index,
            Change {
                change_type: ChangeType::Shuffle,
                dest: Location::Deck,
                ..Default::default()
            },
        );

        let deal_index = self.new_change();
        for seat in 0..player_count {
            // Late rounds with many players can run the deck dry; short
            // hands are dealt silently.
            let count = (self.round as usize).min(cards.len());
            let hand: Vec<Card> = cards.drain(..count).collect();
            for (offset, card) in hand.iter().enumerate() {
                // Deal changes are private to `player`; the transport layer
                // must not forward them to other seats.
                self.add_change(
                    deal_index,
                    Change {
                        change_type: ChangeType::Deal,
                        object_id: card.id,
                        dest: Location::Hand,
                        player: seat,
                        offset,
                        length: hand.len(),
                        ..Default::default()
                    },
                );
            }
            self.players[seat].hand = hand;
        }

        self.apply_trump_reveal(cards.first().copied());
    }

    fn apply_trump_reveal(&mut self, revealed: Option<Card>) {
        let index = self.new_change();
        match revealed {
            Some(card) => {
                self.trump_color = Some(card.color);
                // A revealed Jester cancels trump for the round; a revealed
                // Wizard counts as a plain trump card of its color.
                self.trump_active = card.value != JESTER;
                info!(?card, active = self.trump_active, "trump revealed");
                self.add_change(
                    index,
                    Change {
                        change_type: ChangeType::Trump,
                        object_id: card.id,
                        dest: Location::Trump,
                        ..Default::default()
                    },
                );
            }
            None => {
                self.trump_color = None;
                self.trump_active = false;
                info!("deck exhausted, no trump this round");
                self.add_change(
                    index,
                    Change {
                        change_type: ChangeType::Trump,
                        object_id: -1,
                        dest: Location::Trump,
                        ..Default::default()
                    },
                );
            }
        }
    }

    // --- Change plumbing ---

    fn clear_changes(&mut self) {
        if self.no_changes {
            return;
        }
        self.changes = vec![vec![]];
    }

    fn new_change(&mut self) -> usize {
        if self.no_changes {
            return 0;
        }
        self.changes.push(vec![]);
        self.changes.len() - 1
    }

    fn add_change(&mut self, index: usize, change: Change) {
        if self.no_changes {
            return;
        }
        self.changes[index].push(change);
    }
}
