use clap::{Parser, Subcommand};
use std::io::Write;

use klaxon::CliContext;
use klaxon::commands;
use klaxon::readline;
use klaxon::{logging, status};

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let (ctx, status_rx) = CliContext::new();
    let printer = status::spawn_status_printer(status_rx);

    commands::show_catalog_warnings(&ctx);
    commands::list(&ctx);

    loop {
        let Some(line) = readline()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.finish().await;
    // Dropping the context closes the status channel so the printer can finish
    drop(ctx);
    status::drain_printer(printer).await;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Audition alert sound combinations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available clips per category
    List,
    /// Select a clip, or clear it if it is already selected
    Toggle {
        /// warning, message or reason
        category: String,
        /// Clip filename, name without extension, or number from `list`
        clip: String,
    },
    /// Show the current selection
    Selection,
    /// Play the selection in the background
    Play,
    /// Wait for the current sequence to finish
    Wait,
    /// Show whether a sequence is playing
    Status,
    /// Show recent event log entries
    Log {
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },
    Config,
    SetAudioDir {
        #[arg(short, long)]
        path: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "klaxon".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::List) => commands::list(ctx),
        Some(Commands::Toggle { category, clip }) => commands::toggle(ctx, category, clip)?,
        Some(Commands::Selection) => commands::show_selection(ctx),
        Some(Commands::Play) => commands::play(ctx).await?,
        Some(Commands::Wait) => {
            commands::wait(ctx).await?;
        }
        Some(Commands::Status) => commands::status(ctx).await,
        Some(Commands::Log { count }) => commands::show_log(ctx, *count),
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::SetAudioDir { path }) => commands::set_audio_dir(ctx, path).await?,
        Some(Commands::Exit) => {
            write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
            std::io::stdout().flush().map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
