use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(
    name = "prospector",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about = "Harvest business leads from the Places API and work them from a map dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file (defaults to ./prospector.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard and JSON API
    Serve(ServeArgs),
    /// Run one scan and store the results
    Scan(ScanArgs),
    /// List stored leads
    Leads(LeadsArgs),
    /// Move a lead to a new status
    Status(StatusArgs),
    /// Replace a lead's sales notes
    Note(NoteArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen address (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Search center latitude (defaults to dashboard.default_latitude)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Search center longitude (defaults to dashboard.default_longitude)
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Search radius in meters (defaults to dashboard.default_radius)
    #[arg(long)]
    pub radius: Option<u32>,

    /// Business category to search for, e.g. TAQUERIA
    #[arg(short, long)]
    pub keyword: String,
}

#[derive(Args, Clone)]
pub struct LeadsArgs {
    /// Only leads in this status (new, contacted, interested, closed, ignored, all)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Only leads discovered under this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct StatusArgs {
    /// Place ID of the lead
    pub place_id: String,

    /// New status
    pub status: String,

    /// Replace the lead's notes as well
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Args, Clone)]
pub struct NoteArgs {
    /// Place ID of the lead
    pub place_id: String,

    /// Note text
    pub text: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
