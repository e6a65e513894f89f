//! Interactive event loop.
//!
//! A stdin reader thread and an optional one-second clock thread feed a
//! single channel. The main thread owns the navigator and applies events in
//! arrival order, so every mutation happens on one thread.

use std::io::{self, BufRead};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

use fitness_core::{Error, Navigator, Result, RoutineKind, Screen, ToggleOutcome};

use crate::display;

#[derive(Debug)]
enum AppEvent {
    Line(String),
    Tick,
    Eof,
}

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Select(RoutineKind),
    /// 1-based exercise and set numbers, as typed
    Toggle { exercise: usize, set: usize },
    Rest,
    Dismiss,
    Wait(u32),
    Reset,
    Status,
    Json,
    Warmup,
    Tutorial,
    Back,
    Help,
    Quit,
    Empty,
}

fn parse_number(word: &str, what: &str) -> std::result::Result<usize, String> {
    word.parse::<usize>()
        .map_err(|_| format!("Expected a {} number, got '{}'", what, word))
}

/// Parse a line; selection-screen numbers pick routines, workout-screen
/// number pairs toggle sets.
pub fn parse_input(line: &str, on_selection: bool) -> std::result::Result<Input, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = words.first() else {
        return Ok(Input::Empty);
    };
    let command = first.to_lowercase();

    match (command.as_str(), &words[1..]) {
        ("q" | "quit" | "exit", []) => Ok(Input::Quit),
        ("h" | "help" | "?", []) => Ok(Input::Help),
        ("1", []) if on_selection => Ok(Input::Select(RoutineKind::Upper)),
        ("2", []) if on_selection => Ok(Input::Select(RoutineKind::Lower)),
        ("rest", []) => Ok(Input::Rest),
        ("d" | "dismiss", []) => Ok(Input::Dismiss),
        ("reset", []) => Ok(Input::Reset),
        ("s" | "status", []) => Ok(Input::Status),
        ("json", []) => Ok(Input::Json),
        ("warmup", []) => Ok(Input::Warmup),
        ("tutorial", []) => Ok(Input::Tutorial),
        ("b" | "back", []) => Ok(Input::Back),
        (name, []) if on_selection => name
            .parse::<RoutineKind>()
            .map(Input::Select)
            .map_err(|e| e.to_string()),
        ("wait", [secs]) => secs
            .parse::<u32>()
            .map(Input::Wait)
            .map_err(|_| format!("Expected seconds, got '{}'", secs)),
        ("t" | "toggle", [exercise, set]) => Ok(Input::Toggle {
            exercise: parse_number(exercise, "exercise")?,
            set: parse_number(set, "set")?,
        }),
        (exercise, [set]) => Ok(Input::Toggle {
            exercise: parse_number(exercise, "exercise")?,
            set: parse_number(set, "set")?,
        }),
        _ => Err(format!("Unknown command '{}' (type 'help')", line.trim())),
    }
}

enum Flow {
    Continue,
    Quit,
}

fn spawn_stdin_reader(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(AppEvent::Eof);
    });
}

fn spawn_clock(tx: Sender<AppEvent>) {
    thread::spawn(move || loop {
        thread::sleep(Duration::from_secs(1));
        if tx.send(AppEvent::Tick).is_err() {
            return;
        }
    });
}

/// Run the interactive loop until `quit` or end of input
pub fn run(mut nav: Navigator<'_>, clock: bool) -> Result<()> {
    let (tx, rx): (Sender<AppEvent>, Receiver<AppEvent>) = channel();
    spawn_stdin_reader(tx.clone());
    if clock {
        spawn_clock(tx);
    } else {
        drop(tx);
    }

    redraw(&mut nav);

    for event in rx {
        match event {
            AppEvent::Line(line) => match handle_line(&mut nav, &line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    tracing::warn!("Rejected input '{}': {}", line.trim(), e);
                    println!("! {}", e);
                }
            },
            AppEvent::Tick => on_tick(&mut nav, true),
            AppEvent::Eof => break,
        }
    }

    if let Some(summary) = nav.back() {
        display::print_summary(&summary);
    }
    Ok(())
}

fn redraw(nav: &mut Navigator<'_>) {
    let catalog = nav.catalog();
    match nav.session_mut() {
        Ok(session) => display::print_workout(session),
        Err(_) => display::print_selection(catalog),
    }
}

/// Deliver one second to the active session's rest timer
fn on_tick(nav: &mut Navigator<'_>, show_countdown: bool) {
    let Ok(session) = nav.session_mut() else {
        return;
    };
    match session.tick() {
        Some(event) => display::print_timer_event(event, session),
        None if show_countdown => display::print_countdown(session),
        None => {}
    }
}

fn handle_line(nav: &mut Navigator<'_>, line: &str) -> Result<Flow> {
    let on_selection = matches!(nav.screen(), Screen::Selection);
    let input = parse_input(line, on_selection).map_err(Error::Other)?;

    match input {
        Input::Empty => {}
        Input::Quit => return Ok(Flow::Quit),
        Input::Help => display::print_help(on_selection),
        Input::Select(kind) => {
            nav.select(kind)?;
            redraw(nav);
        }
        Input::Back => {
            if let Some(summary) = nav.back() {
                display::print_summary(&summary);
            }
            redraw(nav);
        }
        Input::Toggle { exercise, set } => {
            let session = nav.session_mut()?;
            let count = session.routine().exercises.len();
            let name = exercise
                .checked_sub(1)
                .and_then(|idx| session.routine().exercises.get(idx))
                .map(|ex| ex.name.clone())
                .ok_or_else(|| Error::Other(format!("No exercise #{} (1-{})", exercise, count)))?;
            let set_index = set
                .checked_sub(1)
                .ok_or_else(|| Error::Other("Sets are numbered from 1".into()))?;

            match session.toggle_set(&name, set_index)? {
                ToggleOutcome::Completed(event) => {
                    println!("✓ {} set {} done", name, set);
                    display::print_timer_event(event, session);
                }
                ToggleOutcome::Uncompleted => println!("✗ {} set {} unchecked", name, set),
                ToggleOutcome::Locked => {
                    let banner = session
                        .abs_rule()
                        .map(|rule| rule.describe())
                        .unwrap_or_default();
                    println!("{} is locked: {} - limit reached", name, banner);
                }
            }
            display::print_progress(session);
        }
        Input::Rest => {
            let session = nav.session_mut()?;
            let event = session.start_rest();
            display::print_timer_event(event, session);
        }
        Input::Dismiss => {
            let session = nav.session_mut()?;
            match session.dismiss_timer() {
                Some(event) => display::print_timer_event(event, session),
                None => println!("No rest timer running."),
            }
        }
        Input::Wait(secs) => {
            for _ in 0..secs {
                // Idle timers have nothing left to advance
                if !nav.session_mut()?.timer().is_active() {
                    break;
                }
                on_tick(nav, false);
            }
            display::print_timer(nav.session_mut()?);
        }
        Input::Reset => {
            let session = nav.session_mut()?;
            session.reset_all();
            display::print_workout(session);
        }
        Input::Status => {
            display::print_workout(nav.session_mut()?);
        }
        Input::Json => {
            let session = nav.session_mut()?;
            println!("{}", session.snapshot().to_json()?);
        }
        Input::Warmup => {
            display::print_warm_up(nav.session_mut()?.routine());
        }
        Input::Tutorial => {
            let session = nav.session_mut()?;
            match &session.routine().tutorial_url {
                Some(url) => println!("Tutorial: {}", url),
                None => println!("No tutorial for {}.", session.routine().title),
            }
        }
    }

    Ok(Flow::Continue)
}
