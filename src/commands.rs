//! Subcommand implementations. Output goes to the writer handed in, so the
//! commands can be driven from tests.

use std::io;
use std::io::BufRead;
use std::io::Write;

use thiserror::Error;
use travel_planner::Error;
use travel_planner::RoadMap;
use travel_planner::TravelSession;
use travel_planner::travel::Step;

use crate::cli::Cli;
use crate::cli::Commands;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Planner(#[from] Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.map_config().map_err(Error::from)?;
    let map = RoadMap::load(&cli.file, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Vertices => vertices(&map, &mut out),
        Commands::Route { from, to, path } => route(&map, from, to, *path, &mut out),
        Commands::Distances { from } => distances(&map, from, &mut out),
        Commands::Walk { from, to } => {
            let stdin = io::stdin();
            walk(&map, from, to, &mut stdin.lock(), &mut out)
        }
        Commands::Graph => {
            write!(out, "{}", map.graph())?;
            Ok(())
        }
        #[cfg(feature = "stats")]
        Commands::Stats => {
            writeln!(out, "{}", map.index().debug_stats())?;
            write!(out, "{}", map.index().chain_histogram())?;
            Ok(())
        }
    }
}

fn vertices(map: &RoadMap, out: &mut impl Write) -> Result<()> {
    for vertex in map.graph().vertices() {
        writeln!(out, "{}", vertex.name())?;
    }
    Ok(())
}

fn route(map: &RoadMap, from: &str, to: &str, show_path: bool, out: &mut impl Write) -> Result<()> {
    let route = map.route(from, to)?;
    writeln!(out, "{:.2}", route.distance)?;
    if show_path {
        writeln!(out, "{}", route.names(map.graph()).join(" -> "))?;
    }
    Ok(())
}

fn distances(map: &RoadMap, from: &str, out: &mut impl Write) -> Result<()> {
    let paths = map.shortest_paths_from(from)?;
    for (vertex, distance) in map.graph().vertices().iter().zip(paths.distances()) {
        if distance.is_finite() {
            writeln!(out, "{}\t{:.2}", vertex.name(), distance)?;
        } else {
            writeln!(out, "{}\tinf", vertex.name())?;
        }
    }
    Ok(())
}

fn walk(
    map: &RoadMap,
    from: &str,
    to: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = TravelSession::start(map, from, to)?;
    writeln!(
        out,
        "You can reach your destination in {:.2} units.",
        session.optimal()
    )?;
    let shortest = map.route(from, to)?;
    writeln!(out, "SHORTEST PATH: {}", shortest.names(map.graph()).join(" -> "))?;
    writeln!(out, "\nTravel Time!\n")?;

    while !session.is_arrived() {
        let here = map.name(session.current()).unwrap_or_default();
        let there = map.name(session.destination()).unwrap_or_default();
        writeln!(out, "\tTOTAL DISTANCE TRAVELED:\t{:.2}", session.traveled())?;
        writeln!(out, "\tCURRENT LOCATION:\t\t{here}")?;
        writeln!(out, "\tDESTINATION LOCATION:\t\t{there}")?;
        writeln!(out, "\tMIN DISTANCE TO DESTINATION:\t{:.2}", session.remaining())?;

        writeln!(out, "\n\tPOSSIBLE MOVES:\n\t\t0. I give up!")?;
        for (idx, mv) in session.moves().iter().enumerate() {
            writeln!(out, "\t\t{}. {}\t({:.2})", idx + 1, mv.name, mv.weight)?;
        }
        if let Some(mv) = session.recommended() {
            writeln!(out, "\tRECOMMENDED MOVE: {}", mv.name)?;
        }

        let step = loop {
            write!(out, "\tSELECT A MOVE (ENTER A NUMBER): ")?;
            out.flush()?;

            // End of input counts as giving up.
            let Some(line) = read_line(input)? else {
                break Step::GaveUp;
            };
            let Ok(choice) = line.trim().parse::<usize>() else {
                writeln!(out, "Invalid move. Try again")?;
                continue;
            };
            match session.step(choice) {
                Ok(step) => break step,
                Err(Error::InvalidMove { .. }) => writeln!(out, "Invalid move. Try again")?,
                Err(err) => return Err(err.into()),
            }
        };

        match step {
            Step::GaveUp => {
                writeln!(out, "\nThank you for traveling!\nGoodbye!")?;
                return Ok(());
            }
            Step::Moved { .. } => writeln!(out, "==============================================\n")?,
            Step::Arrived { .. } => {}
        }
    }

    writeln!(out, "\nYOU MADE IT.")?;
    writeln!(out, "Total Distance: {:.2}", session.traveled())?;
    writeln!(out, "Optimal Distance: {:.2}\nGoodbye", session.optimal())?;
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
