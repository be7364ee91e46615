//! Headless autoplay for the match engine.
//!
//! Plays many seeded sessions in parallel with a simulated player that
//! sometimes misclicks and takes time to think, verifies the session
//! bookkeeping after every event and prints a JSON report.

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use wordmatch_core::rng::{GameRng, XorShiftRng};
use wordmatch_core::vocabulary::{all_set_ids, get_all_word_sets};
use wordmatch_core::{CardId, GameConfig, GamePhase, MatchEngine, Outcome, Session, Side};

#[derive(Parser, Debug)]
#[command(name = "wordmatch-sim", about = "Simulate word-match sessions")]
struct Args {
    /// Number of sessions to play
    #[arg(long, default_value_t = 1000)]
    games: u64,

    /// Cards per session
    #[arg(long, default_value_t = 60)]
    card_count: u32,

    /// Rows per column
    #[arg(long, default_value_t = 5)]
    window: u32,

    /// Countdown in seconds; 0 disables the timer
    #[arg(long, default_value_t = 120)]
    time_limit: u32,

    /// First seed; game `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Chance (percent) that the player clicks a wrong pair
    #[arg(long, default_value_t = 10)]
    mistake_rate: u32,

    /// Milliseconds the player spends on each pair
    #[arg(long, default_value_t = 1200)]
    think_ms: u64,

    /// Comma separated vocabulary sets; all sets when omitted
    #[arg(long, value_delimiter = ',')]
    sets: Vec<String>,

    /// Print every game, not just the totals
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameReport {
    seed: u64,
    outcome: Option<Outcome>,
    elapsed_seconds: u32,
    completed: u32,
    max_combo: u32,
    mistakes: u32,
    /// First bookkeeping failure, if any
    violation: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Totals {
    games: u64,
    victories: u64,
    defeats: u64,
    unfinished: u64,
    violations: u64,
    avg_elapsed_seconds: f64,
    avg_max_combo: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    totals: Totals,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    games: Vec<GameReport>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let vocabulary = get_all_word_sets();
    let sets = if args.sets.is_empty() {
        all_set_ids(&vocabulary)
    } else {
        args.sets.clone()
    };
    let config = GameConfig {
        card_count: args.card_count,
        timer_enabled: args.time_limit > 0,
        time_limit_seconds: args.time_limit,
        window_size: args.window,
    };
    if let Err(e) = config.validate() {
        eprintln!("invalid configuration: {e}");
        std::process::exit(2);
    }
    log::info!("simulating {} games with {:?} over {:?}", args.games, config, sets);

    let games: Vec<GameReport> = (0..args.games)
        .into_par_iter()
        .map(|i| play_game(args.seed + i, config, &sets, &args))
        .collect();

    let totals = summarize(&games);
    let report = Report {
        totals,
        games: if args.verbose { games } else { Vec::new() },
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to encode report: {e}");
            std::process::exit(1);
        }
    }
    if report.totals.violations > 0 {
        std::process::exit(1);
    }
}

fn play_game(seed: u64, config: GameConfig, sets: &[String], args: &Args) -> GameReport {
    let mut report = GameReport {
        seed,
        outcome: None,
        elapsed_seconds: 0,
        completed: 0,
        max_combo: 0,
        mistakes: 0,
        violation: None,
    };

    let mut engine = MatchEngine::new(seed);
    if let Err(e) = engine.start(config, sets) {
        report.violation = Some(format!("start failed: {e}"));
        return report;
    }
    let mut player = XorShiftRng::seed_from_u64(seed.rotate_left(17) ^ 0x9e37_79b9);

    // Every event either matches a card or moves the clock, so this bound
    // only trips on a stuck board.
    let max_events = u64::from(config.card_count) * 64 + 10_000;
    for _ in 0..max_events {
        if engine.phase().is_terminal() {
            break;
        }
        engine.advance(args.think_ms);
        if engine.phase().is_terminal() {
            break;
        }

        let session = engine.session();
        let pick = if player.chance(args.mistake_rate) {
            wrong_pair(session).map(|pair| (pair, true))
        } else {
            None
        };
        let pick = pick.or_else(|| right_pair(session).map(|pair| (pair, false)));

        if let Some(((left, right), mistake)) = pick {
            if mistake {
                report.mistakes += 1;
            }
            for (card, side) in [(left, Side::Left), (right, Side::Right)] {
                if let Err(e) = engine.select(card, side) {
                    report.violation = Some(format!("select failed: {e}"));
                    return report;
                }
            }
        }

        if let Err(e) = engine.session().verify_invariants() {
            log::error!("seed {seed}: {e}");
            report.violation = Some(e.to_string());
            return report;
        }
    }

    let session = engine.session();
    report.outcome = engine.summary().map(|s| s.outcome);
    report.elapsed_seconds = session.elapsed_seconds;
    report.completed = session.completed;
    report.max_combo = session.max_combo;
    if session.phase == GamePhase::Playing {
        log::warn!("seed {seed}: session did not finish");
        report.violation = Some(format!(
            "session still playing after {max_events} events ({} of {} cards matched)",
            session.completed, config.card_count
        ));
    }
    report
}

/// A shown pair the engine will accept
fn right_pair(session: &Session) -> Option<(CardId, CardId)> {
    find_pair(session, true)
}

/// A shown pair the engine will reject
fn wrong_pair(session: &Session) -> Option<(CardId, CardId)> {
    find_pair(session, false)
}

fn find_pair(session: &Session, matching: bool) -> Option<(CardId, CardId)> {
    let rights: Vec<CardId> = session.window.live_cards(Side::Right).collect();
    for left in session.window.live_cards(Side::Left) {
        let l = session.card(left)?;
        for &right in &rights {
            let r = session.card(right)?;
            if l.same_words(r) == matching {
                return Some((left, right));
            }
        }
    }
    None
}

fn summarize(games: &[GameReport]) -> Totals {
    let mut totals = Totals {
        games: games.len() as u64,
        ..Totals::default()
    };
    let mut elapsed = 0u64;
    let mut combo = 0u64;
    for game in games {
        match game.outcome {
            Some(Outcome::Victory) => totals.victories += 1,
            Some(Outcome::Defeat) => totals.defeats += 1,
            None => totals.unfinished += 1,
        }
        if game.violation.is_some() {
            totals.violations += 1;
        }
        elapsed += u64::from(game.elapsed_seconds);
        combo += u64::from(game.max_combo);
    }
    if totals.games > 0 {
        totals.avg_elapsed_seconds = elapsed as f64 / totals.games as f64;
        totals.avg_max_combo = combo as f64 / totals.games as f64;
    }
    totals
}
