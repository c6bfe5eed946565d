use std::path::PathBuf;

use awty_core::{SortKey, SortOrder};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "awty")]
#[command(about = "Are we there yet? Plan trips from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name (selects API URL and stored token)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and edit trips
    Trips {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Sign up, log in, or inspect the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// List your trips
    #[command(alias = "ls")]
    List {
        /// Sort field
        #[arg(long, value_enum, default_value_t = SortField::Created)]
        sort: SortField,
        /// Sort direction
        #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
        order: SortDirection,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one trip with its stops
    Show {
        /// Trip ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a trip starting at a coordinate
    #[command(alias = "new")]
    Create {
        /// Start location as "lat, lng"
        #[arg(long, value_name = "LAT, LNG", allow_hyphen_values = true)]
        at: String,
        /// Trip name
        #[arg(long)]
        name: String,
        /// Trip description
        #[arg(long)]
        description: String,
        /// Optional end location
        #[arg(long, value_name = "PLACE")]
        end: Option<String>,
    },
    /// Add a waypoint to a trip
    AddStop {
        /// Trip ID
        id: String,
        /// Waypoint location as "lat, lng"
        #[arg(long, value_name = "LAT, LNG", allow_hyphen_values = true)]
        at: String,
        /// Waypoint description
        #[arg(long, default_value = "")]
        description: String,
        /// Stop position (defaults to after the last stop)
        #[arg(long)]
        order: Option<u32>,
    },
    /// List a trip's stops
    Stops {
        /// Trip ID
        id: String,
    },
    /// Show a trip's calculated route
    Route {
        /// Trip ID
        id: String,
        /// Ask the server to calculate the route again
        #[arg(long)]
        recalculate: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a trip
    Delete {
        /// Trip ID
        id: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortField {
    Name,
    Created,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Name => Self::Name,
            SortField::Created => Self::CreatedAt,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for SortOrder {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Ascending,
            SortDirection::Desc => Self::Descending,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Trip API base URL (e.g. <http://127.0.0.1:8000>)
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile configuration
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and store its token in the keychain
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the token in the keychain
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Show whether the profile has a stored token
    Status,
    /// Clear the stored token
    Logout,
}
