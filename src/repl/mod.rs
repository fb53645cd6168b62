//! REPL Module
//!
//! Line-oriented front end: tokenizes input, dispatches commands, and prints
//! their output.

mod commands;
mod session;

use std::collections::HashMap;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::error::{PokedexError, Result};

pub use commands::{command_table, execute, Command, CommandKind, Flow, COMMANDS};
pub use session::{catch_chance, roll_catch, CaughtPokemon, Session};

/// Prompt printed before every line of input.
pub const PROMPT: &str = "Pokedex > ";

/// Splits a line into lowercase words, collapsing any run of whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Tokenizes and runs a single line of input.
pub async fn process_input<W: Write>(
    table: &HashMap<&'static str, Command>,
    line: &str,
    session: &mut Session,
    out: &mut W,
) -> Result<Flow> {
    let words = clean_input(line);
    let Some((name, args)) = words.split_first() else {
        return Ok(Flow::Continue);
    };

    match table.get(name.as_str()) {
        Some(cmd) => execute(cmd.kind, args, session, out).await,
        None => {
            writeln!(out, "Unknown command")?;
            Ok(Flow::Continue)
        }
    }
}

/// Reads commands from `input` until `exit` or end of input.
///
/// Command failures are printed and the session continues; only failures to
/// read input or write output end the loop with an error.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let table = command_table();
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            writeln!(out, "Ciao")?;
            return Ok(());
        };

        match process_input(&table, &line, session, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(PokedexError::Io(err)) => return Err(PokedexError::Io(err)),
            Err(err) => {
                warn!("Command {:?} failed: {}", line.trim(), err);
                writeln!(out, "Error occurred: {}", err)?;
            }
        }
    }
}
