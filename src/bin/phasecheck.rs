use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};

use phaseten::{Automaton, parse_sequence};

#[derive(Parser, Debug)]
#[command(
    name = "phasecheck",
    about = "Check whether a sequence of cards satisfies a phase.",
    after_help = "Phases must be in the format ([CSR]<n>+)*[CSR]<n>, or a bare S, C or R.\n\
                  The + is literal, not a repetition operator.\n\
                  Cards must be [RBGY]1 through [RBGY]12, W or S."
)]
struct Args {
    /// Phase descriptor, e.g. S3 or C3+R4
    #[arg(short = 'p', long = "phase")]
    phase: Option<String>,

    /// Cards to check, in order
    #[arg(short = 'd', long = "deck", num_args = 1..)]
    deck: Vec<String>,

    /// Search for any order-preserving subset of the cards instead of the full sequence
    #[arg(long = "subset", action = ArgAction::SetTrue)]
    subset: bool,

    /// Write the compiled automaton as a Graphviz file
    #[arg(long = "dot")]
    dot: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if env::args_os().len() <= 1 {
        let _ = Args::command().print_help();
        println!();
        return;
    }
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        // a flag given without its value counts as a missing phase or deck
        Err(err) => {
            let rendered = err.to_string();
            eprintln!("Error: {}", rendered.trim_start_matches("error: ").trim_end());
            process::exit(1);
        }
    };
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let Some(phase) = args.phase else {
        return Err("phase has not been set".into());
    };
    if args.deck.is_empty() {
        return Err("deck has not been provided".into());
    }

    let automaton = Automaton::new(&phase)?;
    let cards = parse_sequence(&args.deck.join(" "))?;

    if let Some(path) = &args.dot {
        fs::write(path, automaton.to_dot())?;
        log::info!("wrote automaton for {phase} to {}", path.display());
    }

    if args.subset {
        match automaton.accepting_subset(&cards) {
            Some(indices) => {
                let chosen = indices
                    .iter()
                    .map(|idx| cards[*idx].to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("true");
                println!("{chosen}");
            }
            None => println!("false"),
        }
    } else {
        println!("{}", automaton.accepts_fully(&cards));
    }
    Ok(())
}
