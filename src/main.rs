use colored::Colorize;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use tracing_subscriber::EnvFilter;

pub mod games;

use games::wizard::{Phase, WizardGame};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dump_json = std::env::args().any(|arg| arg == "--json");
    let game = random_play();
    if dump_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&game).expect("game state serializes")
        );
    }
}

/// Play one full game with random legal bids and plays, printing a summary
/// after every round.
fn random_play() -> WizardGame {
    let mut rng = thread_rng();
    let mut game = WizardGame::new(vec![
        "North".to_string(),
        "East".to_string(),
        "South".to_string(),
    ]);
    game.with_no_changes();
    game.start_game().expect("a fresh table accepts start_game");

    loop {
        match game.phase {
            Phase::Bidding => {
                let seat = game.current_player;
                let mut bid = rng.gen_range(0..=game.round);
                if game.forbidden_bid() == Some(bid) {
                    bid = if bid == 0 { 1 } else { bid - 1 };
                }
                game.submit_bid(seat, bid).expect("generated bid is legal");
            }
            Phase::Playing => {
                let seat = game.current_player;
                let card = *game
                    .playable_cards(seat)
                    .choose(&mut rng)
                    .expect("the active player always holds a playable card");
                game.play_card(seat, card.color, card.value)
                    .expect("chosen card is legal");
            }
            Phase::Scoring => {
                print_round_summary(&game);
                game.start_next_round()
                    .expect("scoring accepts the next-round trigger");
            }
            Phase::GameOver => break,
            Phase::Setup => unreachable!("start_game already ran"),
        }
    }

    print_round_summary(&game);
    print_podium(&game);
    game
}

fn print_round_summary(game: &WizardGame) {
    println!("{}", format!("Round {}", game.round).bold());
    for player in &game.players {
        let bid = player.bid.map_or("-".to_string(), |b| b.to_string());
        let line = format!(
            "  {:<8} bid {} took {} score {}",
            player.name, bid, player.tricks_taken, player.score
        );
        if player.bid == Some(player.tricks_taken) {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}

fn print_podium(game: &WizardGame) {
    println!("{}", "Podium".bold());
    for (place, result) in game.standings.iter().enumerate() {
        println!("  {}. {} ({})", place + 1, result.name, result.score);
    }
}
