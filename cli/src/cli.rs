use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

/// Case map CLI: layered case points with GeoJSON/CSV/shapefile export and table sync
#[derive(Parser, Debug)]
#[command(name = "casemap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Session file holding the layers and cases between invocations
    #[arg(short, long, global = true, default_value = "casemap.session.json", value_hint = ValueHint::FilePath)]
    pub session: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new session with the default layers
    Init(InitArgs),

    /// Manage layers
    #[command(subcommand)]
    Layer(LayerCommand),

    /// Manage case points
    #[command(subcommand)]
    Point(PointCommand),

    /// Export all cases (visibility is ignored)
    Export(ExportArgs),

    /// Replace the session with the content of a GeoJSON or project file
    Import(ImportArgs),

    /// Synchronize with an external CSV table
    #[command(subcommand)]
    Sync(SyncCommand),

    /// Print case counts by layer, region, responsible party and month
    Dashboard,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// JSON config file (project name and default layers)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Project name (overrides the config)
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing session file
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum LayerCommand {
    /// Create an empty layer
    Add {
        name: String,
        /// Hex color, e.g. 17becf or #17becf
        #[arg(long, default_value = "#1f77b4")]
        color: String,
        /// Create the layer hidden
        #[arg(long)]
        hidden: bool,
    },
    /// Delete a layer and all of its cases
    Remove { name: String },
    /// Change a layer's color and/or visibility
    Style {
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        visible: Option<bool>,
    },
    /// Rename a layer (stored cases keep their old layer name)
    Rename { old: String, new: String },
    /// List layers
    List,
}

/// Case metadata flags shared by `point add` and `point edit`.
#[derive(Args, Debug, Default)]
pub struct PropertyArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    /// Responsible party label (e.g. "Municipalidad")
    #[arg(long)]
    pub responsible: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub subregion: Option<String>,
    #[arg(long)]
    pub impact: Option<String>,
    #[arg(long)]
    pub evidence_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PointCommand {
    /// Add a case to a layer
    Add {
        layer: String,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[command(flatten)]
        props: PropertyArgs,
        /// Also append the case to this CSV table
        #[arg(long, value_hint = ValueHint::FilePath)]
        sync: Option<PathBuf>,
    },
    /// Delete the case at INDEX of a layer
    Delete { layer: String, index: usize },
    /// Update some properties of the case at INDEX
    Edit {
        layer: String,
        index: usize,
        #[command(flatten)]
        props: PropertyArgs,
    },
    /// Move the case at INDEX to new coordinates
    Move {
        layer: String,
        index: usize,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },
    /// List cases, optionally of one layer
    List { layer: Option<String> },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum ExportFormat { Geojson, Csv, Shapefile, Project }

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum ImportFormat { Geojson, Project }

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[arg(value_enum)]
    pub format: ImportFormat,

    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum SyncCommand {
    /// Overwrite the table with the session (destructive, not a merge)
    Push {
        #[arg(value_hint = ValueHint::FilePath)]
        table: PathBuf,
    },
    /// Replace the session with the table content (an empty table changes nothing)
    Pull {
        #[arg(value_hint = ValueHint::FilePath)]
        table: PathBuf,
    },
}
