use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sweeper_core::*;

use crate::command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    /// Board preset: beginner, intermediate or expert
    #[arg(short, long, default_value_t = Difficulty::Intermediate)]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the best times are kept
    #[arg(long, default_value = JsonFileStore::DEFAULT_PATH)]
    scores: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let store = JsonFileStore::new(&args.scores);
    log::info!("High scores kept in {}", store.path().display());
    let mut ledger = Ledger::load(store);
    let mut session = Session::new(args.difficulty, &mut rng, &mut ledger);

    let mut stdout = io::stdout().lock();
    show_board(&mut stdout, &session, true)?;
    writeln!(stdout, "Type h for help.")?;

    let mut lines = io::stdin().lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{:#}", err)?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        match command {
            Command::Reveal(pos) => {
                let turn = session.reveal(pos);
                match turn.result.outcome {
                    RevealOutcome::NoChange(reason) => {
                        writeln!(stdout, "{}", render::rejection(reason))?;
                        continue;
                    }
                    RevealOutcome::Revealed => show_board(&mut stdout, &session, false)?,
                    RevealOutcome::HitMine => {
                        show_board(&mut stdout, &session, false)?;
                        writeln!(stdout, "Boom! Game over, type n to play again.")?;
                    }
                    RevealOutcome::Won => {
                        show_board(&mut stdout, &session, false)?;
                        let seconds = session.board().elapsed_seconds(Utc::now());
                        writeln!(stdout, "You won in {}!", render::format_time(seconds))?;
                        if let Some(recorded) = turn.recorded {
                            report_record(&mut stdout, recorded)?;
                        }
                    }
                }
            }
            Command::Flag(pos) => match session.toggle_flag(pos) {
                MarkOutcome::NoChange(reason) => {
                    writeln!(stdout, "{}", render::rejection(reason))?;
                }
                MarkOutcome::Flagged | MarkOutcome::Unflagged => {
                    show_board(&mut stdout, &session, false)?;
                }
            },
            Command::New(difficulty) => {
                let difficulty = difficulty.unwrap_or(session.difficulty());
                session.restart(difficulty, &mut rng);
                show_board(&mut stdout, &session, true)?;
            }
            Command::Scores => write!(stdout, "{}", render::scores(session.ledger().scores()))?,
            Command::Help => writeln!(stdout, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    log::debug!("Bye");
    Ok(())
}

fn show_board<W: Write, S: ScoreStore>(out: &mut W, session: &Session<'_, S>, with_title: bool) -> io::Result<()> {
    if with_title {
        writeln!(out, "{}", render::title(session.difficulty()))?;
    }
    writeln!(out, "{}", render::status_line(session.board(), Utc::now()))?;
    write!(out, "{}", render::grid(session.board()))
}

fn report_record<W: Write>(out: &mut W, recorded: Recorded) -> io::Result<()> {
    match recorded.rank {
        Some(rank) => writeln!(out, "New high score, rank #{}!", rank)?,
        None => writeln!(out, "Not fast enough for the top {}.", MAX_ENTRIES)?,
    }
    if let Err(err) = recorded.saved {
        writeln!(out, "Could not save high scores: {}", err)?;
    }
    Ok(())
}
