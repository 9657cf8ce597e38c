#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a NIRD Crash level in the terminal.
//!
//! Stdin lines become gesture inputs; the gesture system turns them into
//! commit commands, the session applies them, and the resulting events are
//! rendered as toast-style lines. On completion the summary is folded into
//! the persistent player profile.

mod messages;

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;

use nird_crash_core::{
    Cell, Command, CompletionSummary, Event, LevelConfig, LevelId, Phase, RejectReason,
};
use nird_crash_profile::{BadgeId, BadgeRequirement, BadgeSpec, Profile};
use nird_crash_session::{apply, query, Session};
use nird_crash_system_gesture::{Gesture, GestureInput};

use messages::MessageDeck;

/// Number of levels in the standard campaign; completion unlocks up to here.
const CAMPAIGN_LEVEL_COUNT: u32 = 12;

#[derive(Debug, Parser)]
#[command(name = "nird-crash", about = "Terminal adapter for the NIRD Crash word-search game")]
struct Args {
    /// Path to the level configuration JSON file.
    #[arg(long)]
    level: PathBuf,

    /// Path to the player profile JSON file, updated on completion.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Seed for the success-message deck, for reproducible transcripts.
    #[arg(long)]
    seed: Option<u64>,
}

/// One parsed line of player input.
enum Request {
    Gesture(GestureInput),
    Answer(String),
    ShowBoard,
    ShowWords,
    ShowScore,
    Help,
    Quit,
    Empty,
    Unknown,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.level)
        .with_context(|| format!("reading level file {}", args.level.display()))?;
    let config: LevelConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing level file {}", args.level.display()))?;
    let level_id = config.id();

    let mut session = Session::new();
    let mut events = Vec::new();
    apply(&mut session, Command::LoadLevel { config }, &mut events);
    if let Some(Event::LevelRejected { reason, .. }) = events.first() {
        bail!("level {} rejected: {reason:?}", level_id.get());
    }

    println!("NIRD Crash — niveau {}", level_id.get());
    print_board(&session);
    print_words(&session);
    print_help();

    let mut gesture = Gesture::new();
    let mut deck = MessageDeck::new(args.seed);
    let mut last_tick = Instant::now();
    let mut commands: Vec<Command> = Vec::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;

        // Real elapsed time drives the combo window between inputs.
        let dt = last_tick.elapsed();
        last_tick = Instant::now();
        let mut events = Vec::new();
        apply(&mut session, Command::Tick { dt }, &mut events);
        let _ = render_events(&events, &mut deck);

        match parse_request(&line) {
            Request::Gesture(input) => {
                let Some(grid) = query::grid(&session) else {
                    continue;
                };
                gesture.handle(&[input], grid, &mut commands);
                if !gesture.path().is_empty() {
                    println!(
                        "  sélection : {} ({})",
                        gesture.current_word(),
                        gesture.path().len()
                    );
                }
            }
            Request::Answer(answer) => commands.push(Command::AnswerRiddle { answer }),
            Request::ShowBoard => print_board(&session),
            Request::ShowWords => print_words(&session),
            Request::ShowScore => println!(
                "Score : {} — combo x{}",
                query::score(&session),
                query::combo_multiplier(&session)
            ),
            Request::Help => print_help(),
            Request::Quit => break,
            Request::Empty => {}
            Request::Unknown => eprintln!("Commande inconnue — tapez `help`."),
        }

        let mut events = Vec::new();
        for command in commands.drain(..) {
            apply(&mut session, command, &mut events);
        }
        let completed = render_events(&events, &mut deck);

        if let Some(summary) = completed {
            record_completion(args.profile.as_deref(), level_id, &summary)?;
            return Ok(());
        }
    }

    if query::phase(&session) == Phase::Playing {
        println!(
            "Partie interrompue — score : {}, mots trouvés : {}",
            query::score(&session),
            query::found_words(&session).len()
        );
    }
    Ok(())
}

fn parse_request(line: &str) -> Request {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Request::Empty;
    };

    match keyword {
        "press" | "drag" | "tap" => {
            let Some(cell) = parse_cell(tokens.next(), tokens.next()) else {
                return Request::Unknown;
            };
            Request::Gesture(match keyword {
                "press" => GestureInput::Press { cell },
                "drag" => GestureInput::Enter { cell },
                _ => GestureInput::Tap { cell },
            })
        }
        "release" => Request::Gesture(GestureInput::Release),
        "leave" => Request::Gesture(GestureInput::Leave),
        "submit" => Request::Gesture(GestureInput::Submit),
        "clear" => Request::Gesture(GestureInput::Clear),
        "answer" => {
            let rest: Vec<&str> = tokens.collect();
            if rest.is_empty() {
                Request::Unknown
            } else {
                Request::Answer(rest.join(" "))
            }
        }
        "board" => Request::ShowBoard,
        "words" => Request::ShowWords,
        "score" => Request::ShowScore,
        "help" => Request::Help,
        "quit" | "exit" => Request::Quit,
        _ => Request::Unknown,
    }
}

fn parse_cell(row: Option<&str>, col: Option<&str>) -> Option<Cell> {
    let row: u32 = row?.parse().ok()?;
    let col: u32 = col?.parse().ok()?;
    Some(Cell::new(row, col))
}

/// Renders session events as toast-style lines; returns the completion
/// summary when the level finished.
fn render_events(events: &[Event], deck: &mut MessageDeck) -> Option<CompletionSummary> {
    let mut completed = None;
    for event in events {
        match event {
            Event::WordAccepted {
                word,
                multiplier,
                awarded_points,
                ..
            } => {
                let combo = if *multiplier > 1 {
                    format!(" 🔥 COMBO x{multiplier} !")
                } else {
                    String::new()
                };
                println!("✅ {} « {word} » +{awarded_points} points{combo}", deck.pick());
            }
            Event::WordRejected { word, reason } => match reason {
                RejectReason::AlreadyFound => {
                    println!("⚠️  Vous avez déjà trouvé « {word} » !");
                }
                RejectReason::NotInLevel => {
                    println!("❌ « {word} » n'est pas dans la liste !");
                }
            },
            Event::ComboExpired => println!("… le combo est retombé."),
            Event::RiddleSolved { bonus_points } => {
                println!("🎯 Énigme résolue ! +{bonus_points} points bonus !");
            }
            Event::RiddleRejected => println!("🤔 Pas tout à fait… réessayez !"),
            Event::LevelCompleted { summary } => {
                println!(
                    "🎉 Niveau complété avec {} étoile(s) ! Score final : {} ({} mots)",
                    summary.stars,
                    summary.score,
                    summary.words_found.len()
                );
                completed = Some(summary.clone());
            }
            Event::LevelLoaded { .. }
            | Event::LevelRejected { .. }
            | Event::LevelUnloaded
            | Event::TimeAdvanced { .. } => {}
        }
    }
    completed
}

fn print_board(session: &Session) {
    let Some(grid) = query::grid(session) else {
        return;
    };
    println!("    {}", (0..grid.cols()).fold(String::new(), |mut acc, col| {
        acc.push_str(&format!("{col} "));
        acc
    }));
    for (row_index, row) in grid.iter_rows().enumerate() {
        let letters: Vec<String> = row.iter().map(|letter| letter.to_string()).collect();
        println!("  {row_index} {}", letters.join(" "));
    }
}

fn print_words(session: &Session) {
    println!("Mots à trouver :");
    for entry in query::word_view(session).iter() {
        let mark = if entry.found { "✓" } else { " " };
        println!("  [{mark}] {} ({} pts)", entry.word, entry.points);
    }
    if query::riddle(session).is_some() {
        let status = if query::riddle_solved(session) {
            "résolue"
        } else {
            "à résoudre (answer …)"
        };
        if let Some(riddle) = query::riddle(session) {
            println!("  🧩 Énigme {status} : {}", riddle.prompt());
        }
    }
}

fn print_help() {
    println!("Commandes : press R C | drag R C | release | leave | tap R C | submit | clear");
    println!("            answer TEXTE | board | words | score | help | quit");
}

/// Folds a completion summary into the on-disk profile and reports any
/// newly unlocked badges.
fn record_completion(
    profile_path: Option<&Path>,
    level_id: LevelId,
    summary: &CompletionSummary,
) -> anyhow::Result<()> {
    let Some(path) = profile_path else {
        return Ok(());
    };

    let mut profile = if path.exists() {
        Profile::load(path).with_context(|| format!("loading profile {}", path.display()))?
    } else {
        Profile::new(CAMPAIGN_LEVEL_COUNT)
    };

    profile.complete_level(level_id, summary);
    for badge in profile.check_badges(&campaign_badges()) {
        println!("🏅 Badge débloqué : {}", badge.get());
    }
    profile
        .save(path)
        .with_context(|| format!("saving profile {}", path.display()))?;
    println!(
        "Profil mis à jour — score total : {}, niveaux débloqués : {}",
        profile.total_score(),
        profile.unlocked_levels().len()
    );
    Ok(())
}

/// Badge set for the standard campaign.
fn campaign_badges() -> Vec<BadgeSpec> {
    vec![
        BadgeSpec {
            id: BadgeId::new("premiers-mots"),
            requirement: BadgeRequirement::TotalWordsFound(10),
        },
        BadgeSpec {
            id: BadgeId::new("collectionneur"),
            requirement: BadgeRequirement::TotalWordsFound(50),
        },
        BadgeSpec {
            id: BadgeId::new("explorateur"),
            requirement: BadgeRequirement::LevelsCompleted(3),
        },
        BadgeSpec {
            id: BadgeId::new("conquerant"),
            requirement: BadgeRequirement::LevelsCompleted(CAMPAIGN_LEVEL_COUNT),
        },
        BadgeSpec {
            id: BadgeId::new("sphinx"),
            requirement: BadgeRequirement::RiddlesSolved(5),
        },
        BadgeSpec {
            id: BadgeId::new("perfectionniste"),
            requirement: BadgeRequirement::PerfectLevels(3),
        },
    ]
}
