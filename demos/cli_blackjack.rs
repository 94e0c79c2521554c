//! CLI blackjack table.
//!
//! Renders every table update and forwards keyboard commands as intents.
//! Bankroll and stats are saved to `bjtable-save.json` (or the path in
//! `BJTABLE_SAVE`) after each round. Set `BJTABLE_DEBUG` to trace the engine
//! on stderr. Built with the `remote` feature and `BJTABLE_REMOTE` set, cards
//! are drawn from deckofcardsapi.com instead of a local shoe.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::{
    Action, Card, CardSource, Game, GameOptions, Intent, JsonFileStore, LocalShoe, MessageKind,
    RoundState, Suit, TableView,
};

fn main() {
    let level = if std::env::var_os("BJTABLE_DEBUG").is_some() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    println!("Blackjack table (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = GameOptions::default();
    let source: Box<dyn CardSource + Send> = match remote_source(options.decks) {
        Some(remote) => remote,
        None => Box::new(LocalShoe::from_options(&options, seed)),
    };
    let game = Game::new(options, source).with_observer(print_view);

    let path = std::env::var("BJTABLE_SAVE").unwrap_or_else(|_| "bjtable-save.json".to_string());
    let store = JsonFileStore::new(path);
    match game.load_from(&store) {
        Ok(true) => println!("Welcome back. Chips: {}", game.bankroll()),
        Ok(false) => {}
        Err(err) => println!("Could not load save: {err}"),
    }

    loop {
        let view = game.view();
        println!("{}", format_actions(&view.allowed()));

        let Some(intent) = read_intent(&view) else {
            break;
        };
        if let Err(err) = game.apply(intent) {
            println!("{}", colorize(&err.to_string(), "33"));
        }

        if game.state() == RoundState::Settled {
            if let Err(err) = game.save_to(&store) {
                println!("Could not save: {err}");
            }
        }
    }

    println!("Goodbye.");
}

#[cfg(feature = "remote")]
fn remote_source(decks: u8) -> Option<Box<dyn CardSource + Send>> {
    use bjtable::{HttpTransport, RemoteSource};

    std::env::var_os("BJTABLE_REMOTE")?;
    match HttpTransport::new(std::time::Duration::from_secs(10)) {
        Ok(transport) => Some(Box::new(RemoteSource::new(transport, decks))),
        Err(err) => {
            println!("Remote deck unavailable ({err}), using a local shoe.");
            None
        }
    }
}

#[cfg(not(feature = "remote"))]
fn remote_source(_decks: u8) -> Option<Box<dyn CardSource + Send>> {
    None
}

fn read_intent(view: &TableView) -> Option<Intent> {
    loop {
        let input = prompt_line("> ");
        let mut words = input.split_whitespace();
        let intent = match words.next()? {
            "q" | "quit" => return None,
            "b" | "bet" => match words.next().map(str::parse::<usize>) {
                Some(Ok(amount)) => Intent::PlaceBet(amount),
                _ => {
                    println!("Usage: bet <amount> (chips: {})", view.bankroll);
                    continue;
                }
            },
            "c" | "clear" => Intent::ClearBet,
            "d" | "deal" => Intent::Deal,
            "h" | "hit" => Intent::Hit,
            "s" | "stand" => Intent::Stand,
            "n" | "new" => Intent::NewRound,
            "r" | "reset" => Intent::ResetStats,
            _ => {
                println!("Unknown command.");
                continue;
            }
        };
        return Some(intent);
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return "q".to_string();
    }
    if input.is_empty() {
        return "q".to_string();
    }
    input.trim().to_lowercase()
}

fn print_view(view: &TableView) {
    println!();
    if view.state != RoundState::NotStarted && view.state != RoundState::AwaitingBet {
        println!(
            "Dealer: {} (value {})",
            format_dealer(&view.dealer_cards),
            view.dealer_score
        );
        println!(
            "Player: {} (value {})",
            format_hand(&view.player_cards),
            view.player_score
        );
    }

    let stats = view.stats;
    println!(
        "Chips: {} | Bet: {}{} | W {} L {} P {} BJ {}",
        view.bankroll,
        view.bet,
        if view.bet_locked { " (locked)" } else { "" },
        stats.wins,
        stats.losses,
        stats.pushes,
        stats.blackjacks
    );

    if let Some(message) = &view.message {
        let code = match message.kind {
            MessageKind::Win | MessageKind::BlackjackWin => "32",
            MessageKind::Lose => "31",
            MessageKind::Push => "33",
            MessageKind::Info => "0",
        };
        println!("{}", colorize(&message.text, code));
    }
}

fn format_actions(allowed: &[Action]) -> String {
    let all = [
        (Action::PlaceBet, "[b]et <n>"),
        (Action::ClearBet, "[c]lear"),
        (Action::Deal, "[d]eal"),
        (Action::Hit, "[h]it"),
        (Action::Stand, "[s]tand"),
        (Action::NewRound, "[n]ew round"),
        (Action::ResetStats, "[r]eset stats"),
    ];
    let parts: Vec<String> = all
        .iter()
        .map(|(action, label)| {
            let code = if allowed.contains(action) { "32" } else { "90" };
            colorize(label, code)
        })
        .collect();
    format!("Actions: {}", parts.join(" "))
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(cards: &[Option<Card>]) -> String {
    if cards.is_empty() {
        return "(no cards)".to_string();
    }
    cards
        .iter()
        .map(|card| card.as_ref().map_or_else(|| "??".to_string(), format_card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_hand(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
