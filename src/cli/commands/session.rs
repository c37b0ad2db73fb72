//! `session`: the long-lived tally loop.
//!
//! One thread reads stdin, one ticker thread fires every `refresh_seconds`,
//! and both feed a channel drained by the thread that owns the
//! [`TallySession`]. The session itself is never shared.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::flush::FlushOutcome;
use crate::core::session::TallySession;
use crate::core::store::EventStore;
use crate::core::ticker::spawn_ticker;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::models::event_kind::EventKind;
use crate::ui::messages::{error, header, info, warning};
use crate::ui::render;
use crate::utils::date;
use chrono::NaiveDate;
use std::io::{self, BufRead};
use std::num::NonZeroU32;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Line(String),
    Tick,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Tap(EventKind),
    Undo,
    Sync,
    Day(String),
    Print,
    Help,
    Quit,
    Discard,
    Unknown(String),
}

impl SessionCommand {
    /// `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_lowercase().as_str() {
            "u" | "undo" => SessionCommand::Undo,
            "s" | "sync" => SessionCommand::Sync,
            "d" | "day" | "date" => SessionCommand::Day(rest.to_string()),
            "p" | "print" | "summary" => SessionCommand::Print,
            "h" | "?" | "help" => SessionCommand::Help,
            "q" | "quit" | "exit" => SessionCommand::Quit,
            "q!" | "quit!" => SessionCommand::Discard,
            other => match EventKind::from_input(other) {
                Some(kind) => SessionCommand::Tap(kind),
                None => SessionCommand::Unknown(line.to_string()),
            },
        };
        Some(cmd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

/// Applies session inputs to a [`TallySession`] and renders the feedback.
pub struct SessionDriver<S: EventStore> {
    session: TallySession<S>,
    day: NaiveDate,
}

impl<S: EventStore> SessionDriver<S> {
    pub fn new(session: TallySession<S>, day: NaiveDate) -> Self {
        Self { session, day }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn session(&self) -> &TallySession<S> {
        &self.session
    }

    /// Only end of input can fail: the final flush has nowhere left to retry.
    pub fn apply(&mut self, input: SessionInput, now: Instant) -> AppResult<Step> {
        match input {
            SessionInput::Line(line) => match SessionCommand::parse(&line) {
                Some(cmd) => Ok(self.command(cmd, now)),
                None => Ok(Step::Continue),
            },
            SessionInput::Tick => {
                let outcome = self.session.flush_if_needed(now);
                // An idle session ticks forever; only report real writes and failures.
                render::auto_sync_feedback(&outcome);
                if matches!(outcome, Ok(FlushOutcome::Flushed(_))) {
                    self.print_summary();
                }
                Ok(Step::Continue)
            }
            SessionInput::Eof => {
                let outcome = self.session.sync_at(true, now);
                render::final_sync_feedback(&outcome);
                outcome?;
                Ok(Step::Exit)
            }
        }
    }

    fn command(&mut self, cmd: SessionCommand, now: Instant) -> Step {
        match cmd {
            SessionCommand::Tap(kind) => {
                self.session.enqueue(kind, self.day, NonZeroU32::MIN);
                render::logged(kind, 1);
                // The size threshold may be reached right here.
                render::auto_sync_feedback(&self.session.flush_if_needed(now));
                self.print_summary();
            }
            SessionCommand::Undo => {
                match self.session.undo(self.day) {
                    Ok(result) => render::undo_feedback(result),
                    Err(e) => error(format!("Undo failed: {}", e)),
                }
                self.print_summary();
            }
            SessionCommand::Sync => {
                render::sync_feedback(&self.session.sync_at(true, now));
                self.print_summary();
            }
            SessionCommand::Day(raw) => {
                match date::resolve_day(Some(raw.as_str()), date::today()) {
                    Ok(day) => {
                        self.day = day;
                        info(format!("Selected {}", date::pretty(day)));
                    }
                    Err(e) => error(e),
                }
                self.print_summary();
            }
            SessionCommand::Print => self.print_summary(),
            SessionCommand::Help => print_help(),
            SessionCommand::Quit => {
                let outcome = self.session.sync_at(true, now);
                render::sync_feedback(&outcome);
                if outcome.is_ok() {
                    return Step::Exit;
                }
                warning("Not quitting while events are unsynced. Retry with `q`, or `q!` to discard them.");
            }
            SessionCommand::Discard => {
                let pending = self.session.pending();
                if pending > 0 {
                    warning(format!("Discarding {} unsynced event(s)", pending));
                }
                return Step::Exit;
            }
            SessionCommand::Unknown(raw) => warning(format!("Unknown command '{}' (h for help)", raw)),
        }
        Step::Continue
    }

    fn print_summary(&self) {
        match self.session.summary(self.day) {
            Ok(summary) => render::print_summary(self.day, &summary, self.session.pending()),
            Err(e) => error(format!("Summary unavailable: {}", e)),
        }
    }
}

fn print_help() {
    println!("  t / w        walk-in");
    println!("  o            operational visit (drop-off / pick-up / pop-in)");
    println!("  u            undo last click for the selected day");
    println!("  s            sync now");
    println!("  d YYYY-MM-DD select day");
    println!("  p            print summary");
    println!("  q            sync and quit    q!  quit without syncing");
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { date } = cmd {
        let day = date::resolve_day(date.as_deref(), date::today())?;

        let store = SqliteStore::open_ready(cfg.store_address()?)?;
        let session = TallySession::new(store, cfg.flush_settings());
        let mut driver = SessionDriver::new(session, day);

        header("rFootfall session");
        print_help();
        driver.print_summary();

        let (tx, rx) = mpsc::channel();

        let stdin_tx = tx.clone();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if stdin_tx.send(SessionInput::Line(line)).is_err() {
                    return;
                }
            }
            let _ = stdin_tx.send(SessionInput::Eof);
        });

        spawn_ticker(cfg.refresh_every(), tx, || SessionInput::Tick);

        for input in rx {
            if driver.apply(input, Instant::now())? == Step::Exit {
                break;
            }
        }
    }

    Ok(())
}
