use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "buildlane")]
#[command(about = "Render a build timeline snapshot to SVG", long_about = None)]
pub struct Args {
    /// Timeline snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Write the SVG here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Renderer config overrides (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Font face table (JSON); the builtin sans face is used without one
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Label font size in px (default: 11)
    #[arg(long, value_name = "PX")]
    pub font_size: Option<f64>,

    /// Draw job shapes only
    #[arg(long)]
    pub compact: bool,

    /// Use the light palette
    #[arg(long)]
    pub light: bool,

    /// Also write the job bounds map (JSON)
    #[arg(long, value_name = "FILE")]
    pub bounds: Option<PathBuf>,
}
