//! REPL Commands
//!
//! Static command table and the handler behind each entry.

use std::collections::HashMap;
use std::io::Write;

use crate::error::Result;
use crate::repl::Session;

/// Tag identifying which handler a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
    Cache,
}

/// A command as listed in `help`.
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    /// Argument placeholder shown after the name, if any
    pub args: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

/// What the REPL loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Every command, in the order `help` lists them.
pub const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        args: "",
        description: "Displays a help message",
        kind: CommandKind::Help,
    },
    Command {
        name: "map",
        args: "",
        description: "Displays the names of the next 20 location areas",
        kind: CommandKind::Map,
    },
    Command {
        name: "mapb",
        args: "",
        description: "Displays the previous 20 location areas",
        kind: CommandKind::MapBack,
    },
    Command {
        name: "explore",
        args: "<location-area-name>",
        description: "Displays the Pokémon in a location area",
        kind: CommandKind::Explore,
    },
    Command {
        name: "catch",
        args: "<pokemon-name>",
        description: "Throws a Pokeball at a Pokémon",
        kind: CommandKind::Catch,
    },
    Command {
        name: "inspect",
        args: "<pokemon-name>",
        description: "Shows details of a caught Pokémon",
        kind: CommandKind::Inspect,
    },
    Command {
        name: "pokedex",
        args: "",
        description: "Lists every caught Pokémon",
        kind: CommandKind::Pokedex,
    },
    Command {
        name: "cache",
        args: "",
        description: "Shows response cache statistics",
        kind: CommandKind::Cache,
    },
    Command {
        name: "exit",
        args: "",
        description: "Exit the Pokedex",
        kind: CommandKind::Exit,
    },
];

/// Builds the name-to-command lookup used by the dispatcher.
pub fn command_table() -> HashMap<&'static str, Command> {
    COMMANDS.iter().map(|cmd| (cmd.name, *cmd)).collect()
}

/// Runs the handler for `kind` with the words that followed the command name.
pub async fn execute<W: Write>(
    kind: CommandKind,
    args: &[String],
    session: &mut Session,
    out: &mut W,
) -> Result<Flow> {
    match kind {
        CommandKind::Help => help(out),
        CommandKind::Exit => {
            writeln!(out, "Closing the Pokedex... Goodbye!")?;
            return Ok(Flow::Exit);
        }
        CommandKind::Map => map(session, out).await,
        CommandKind::MapBack => map_back(session, out).await,
        CommandKind::Explore => explore(args, session, out).await,
        CommandKind::Catch => catch(args, session, out).await,
        CommandKind::Inspect => inspect(args, session, out),
        CommandKind::Pokedex => pokedex(session, out),
        CommandKind::Cache => cache(session, out).await,
    }?;

    Ok(Flow::Continue)
}

/// Returns the first argument, or prints a usage hint when there is none.
fn first_arg<'a, W: Write>(
    args: &'a [String],
    what: &str,
    out: &mut W,
) -> Result<Option<&'a str>> {
    match args.first() {
        Some(arg) => Ok(Some(arg.as_str())),
        None => {
            writeln!(out, "You must provide a {}", what)?;
            Ok(None)
        }
    }
}

fn help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for cmd in COMMANDS {
        if cmd.args.is_empty() {
            writeln!(out, "{}: {}", cmd.name, cmd.description)?;
        } else {
            writeln!(out, "{} {}: {}", cmd.name, cmd.args, cmd.description)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

async fn map<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    let page = session
        .client
        .location_areas(session.next_url.as_deref())
        .await?;

    session.next_url = page.next;
    session.previous_url = page.previous;

    writeln!(out)?;
    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    writeln!(out)?;
    Ok(())
}

async fn map_back<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    let Some(previous) = session.previous_url.clone() else {
        writeln!(out, "You're on the first page")?;
        return Ok(());
    };

    let page = session.client.location_areas(Some(&previous)).await?;

    session.next_url = page.next;
    session.previous_url = page.previous;

    writeln!(out)?;
    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    writeln!(out)?;
    Ok(())
}

async fn explore<W: Write>(args: &[String], session: &mut Session, out: &mut W) -> Result<()> {
    let Some(name) = first_arg(args, "location area name", out)? else {
        return Ok(());
    };
    let area = session.client.location_area(name).await?;

    writeln!(out)?;
    writeln!(out, "Exploring {}...", name)?;
    writeln!(out, "Found Pokémon:")?;
    if area.pokemon_encounters.is_empty() {
        writeln!(out, " - No Pokémon found in this area")?;
    } else {
        for pokemon in area.pokemon_names() {
            writeln!(out, " - {}", pokemon)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

async fn catch<W: Write>(args: &[String], session: &mut Session, out: &mut W) -> Result<()> {
    let Some(name) = first_arg(args, "pokemon name", out)? else {
        return Ok(());
    };
    let pokemon = session.client.pokemon(name).await?;

    writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;
    let display_name = pokemon.name.clone();
    if session.attempt_catch(pokemon) {
        writeln!(out, "{} was caught!", display_name)?;
        writeln!(out, "You may now inspect it with the inspect command.")?;
    } else {
        writeln!(out, "{} escaped!", display_name)?;
    }
    Ok(())
}

fn inspect<W: Write>(args: &[String], session: &Session, out: &mut W) -> Result<()> {
    let Some(name) = first_arg(args, "pokemon name", out)? else {
        return Ok(());
    };
    let Some(caught) = session.pokedex.get(name) else {
        writeln!(out, "you have not caught that pokemon")?;
        return Ok(());
    };

    let pokemon = &caught.pokemon;
    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Stats:")?;
    for stat in &pokemon.stats {
        writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for kind in &pokemon.types {
        writeln!(out, "  - {}", kind.kind.name)?;
    }
    writeln!(
        out,
        "Caught at: {}",
        caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    Ok(())
}

fn pokedex<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    if session.pokedex.is_empty() {
        writeln!(out, "Your Pokedex is empty")?;
        return Ok(());
    }

    writeln!(out, "Your Pokedex:")?;
    for name in session.pokedex.keys() {
        writeln!(out, " - {}", name)?;
    }
    Ok(())
}

async fn cache<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let cache = session.client.cache();
    let stats = cache.stats().await;

    writeln!(out, "Cache entries: {}", stats.total_entries)?;
    writeln!(out, "Interval: {:?}", cache.interval())?;
    writeln!(
        out,
        "Hits: {} Misses: {} (hit rate {:.0}%)",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    )?;
    writeln!(out, "Reaped: {}", stats.reaped)?;
    Ok(())
}
