//! Command line arguments for `travel`.

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use travel_planner::MapConfig;
use travel_planner::error::MapError;
use travel_planner::hash_fn::BuiltinHash;
use travel_planner::hash_map::DEFAULT_BUCKETS;
use travel_planner::hash_map::DEFAULT_LOAD_FACTOR;

/// Shortest routes over a road network read from an edge list
#[derive(Parser, Debug)]
#[command(name = "travel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Edge list: a vertex count, then one `<from> <to> <weight>` per line
    pub file: PathBuf,

    /// Hash function for the place-name index
    #[arg(long, global = true, value_enum, default_value_t = HashChoice::Weighted)]
    pub hash: HashChoice,

    /// Initial bucket count of the place-name index
    #[arg(long, global = true, default_value_t = DEFAULT_BUCKETS)]
    pub buckets: usize,

    /// Load factor at which the place-name index grows
    #[arg(long, global = true, default_value_t = DEFAULT_LOAD_FACTOR)]
    pub load_factor: f64,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive, e.g. `info` or `travel_planner=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Index configuration selected by the flags.
    pub fn map_config(&self) -> Result<MapConfig, MapError> {
        Ok(MapConfig {
            buckets: self.buckets,
            load_factor: self.load_factor,
            hash: self.hash.builtin()?,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every place in id order
    Vertices,

    /// Print the shortest distance between two places
    Route {
        /// Starting place
        from: String,

        /// Destination
        to: String,

        /// Also print the places along the route
        #[arg(long)]
        path: bool,
    },

    /// Print the shortest distance from one place to every other
    Distances {
        /// Starting place
        from: String,
    },

    /// Travel interactively, one road at a time
    Walk {
        /// Starting place
        from: String,

        /// Destination
        to: String,
    },

    /// Print the adjacency list of every place
    Graph,

    /// Print chain statistics of the place-name index
    #[cfg(feature = "stats")]
    Stats,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashChoice {
    /// Sum of the bytes
    Naive,
    /// Polynomial hash with base 27
    Weighted,
    /// foldhash with a fixed seed (needs the `foldhash` feature)
    Foldhash,
}

impl HashChoice {
    fn builtin(self) -> Result<BuiltinHash, MapError> {
        let id = match self {
            HashChoice::Naive => 0,
            HashChoice::Weighted => 1,
            HashChoice::Foldhash => 2,
        };
        BuiltinHash::from_id(id).ok_or(MapError::UnknownHashFunction(id))
    }
}
