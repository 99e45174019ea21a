use clap::Parser;
use ghissues::StartScreen;
use ghissues::core::config::{self, CliOverrides};
use ghissues::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "ghissues", about = "Browse GitHub repositories and issues")]
struct Args {
    /// List to open first
    #[arg(short, long, value_enum)]
    start: Option<StartScreen>,

    /// Browse this user's repositories instead of your own
    #[arg(short, long)]
    user: Option<String>,

    /// API root, for GitHub Enterprise
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ghissues.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("ghissues.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let cli = CliOverrides {
        start: args.start,
        user: args.user.as_deref(),
        base_url: args.base_url.as_deref(),
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("ghissues starting up: {:?}", resolved);

    tui::run(resolved)
}
