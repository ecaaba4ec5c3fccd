mod cli;
mod command;
mod helper;

use cli::Parser;
use colored::Colorize;
use command::Command;
use command::Session;
use helper::ReplHelper;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rollq_lib::roll;
use rustyline::error::ReadlineError;
use rustyline::highlight::MatchingBracketHighlighter;
use rustyline::hint::HistoryHinter;
use rustyline::CompletionType;
use rustyline::Config;
use rustyline::EditMode;
use rustyline::Editor;
use rustyline::Result;
use std::sync::Arc;
use std::sync::Mutex;
use termimad::crossterm::style::Color;
use termimad::MadSkin;
use tracing::Level;

/// Route every draw through one seeded generator
fn install_seed(seed: u64) {
    let generator = Mutex::new(StdRng::seed_from_u64(seed));
    roll::set_roll_method(Some(Arc::new(move |sides: u64| {
        let mut generator = match generator.lock() {
            Ok(generator) => generator,
            Err(poisoned) => poisoned.into_inner(),
        };
        generator.gen_range(1..1 + sides)
    })));
}

fn main() -> Result<()> {
    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true)
        .with_max_level(if args.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    if let Some(seed) = args.seed {
        tracing::info!(seed, "using seeded dice");
        install_seed(seed);
    }

    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();
    let helper = ReplHelper {
        highlighter: MatchingBracketHighlighter::new(),
        hinter: HistoryHinter {},
        colored: "".to_owned(),
    };
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.inline_code.set_fg(Color::Magenta);
    let mut rline = Editor::with_config(config)?;
    rline.set_helper(Some(helper));
    if rline.load_history(&args.history).is_err() {
        eprintln!("{}", "repl: warn: no previous history".bold().yellow());
    }
    let mut session = Session::new(args.explode);
    let mut count = 1u64;
    loop {
        let prompt = format!("repl: {}> ", count);
        rline.helper_mut().expect("repl: panic: no helper").colored =
            prompt.bold().green().to_string();
        let readline = rline.readline(&prompt);
        match readline {
            Ok(line) => {
                rline.add_history_entry(line.as_str())?;
                if !line.trim().is_empty() {
                    match line
                        .parse::<Command>()
                        .and_then(|command| session.run(command))
                    {
                        Ok(output) => println!("{}", skin.text(&output, None)),
                        Err(error) => {
                            eprintln!("{}", skin.inline(&error).to_string().bold().red())
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("{}", "repl: signal: CTRL-C".bold().yellow());
                break;
            }
            Err(ReadlineError::Eof) => {
                eprintln!("{}", "repl: signal: CTRL-D".bold().yellow());
                break;
            }
            Err(error) => {
                tracing::error!(?error, "readline failed");
                break;
            }
        }
        count += 1;
    }
    rline.append_history(&args.history)
}
