use std::path::Path;

use klaxon_core::{AppConfig, AppConfigExt, Category, PlaybackTask, RunResult, RunState, ToggleOutcome};

use crate::CliContext;

/// Order categories are listed in. Playback order is fixed by the engine.
const DISPLAY_ORDER: [Category; 3] = [Category::Message, Category::Reason, Category::Warning];

pub fn show_catalog_warnings(ctx: &CliContext) {
    for warning in ctx.alerts.catalog_warnings() {
        println!("[warning] {}: {warning}", warning.category());
    }
    if ctx.alerts.catalog().is_empty() {
        println!(
            "[warning] no playable clips under {}",
            ctx.alerts.config().audio_directory
        );
    }
}

pub fn list(ctx: &CliContext) {
    let catalog = ctx.alerts.catalog();
    let selection = ctx.alerts.selection();

    for category in DISPLAY_ORDER {
        println!("{category}");
        let clips = catalog.clips(category);
        if clips.is_empty() {
            println!("    (no clips)");
            continue;
        }
        for (i, clip) in clips.iter().enumerate() {
            let marker = if selection.get(category) == Some(clip) { "x" } else { " " };
            let label = catalog.description(category, clip).unwrap_or("?");
            println!("  [{marker}] {:>2}. {label:<20} {clip}", i + 1);
        }
    }
}

pub fn toggle(ctx: &CliContext, category: &str, clip: &str) -> Result<(), String> {
    let category =
        Category::from_name(category).ok_or_else(|| format!("unknown category '{category}'"))?;
    let clip = ctx
        .alerts
        .catalog()
        .find(category, clip)
        .cloned()
        .ok_or_else(|| format!("no {category} clip matches '{clip}'"))?;

    let label = ctx
        .alerts
        .catalog()
        .description(category, &clip)
        .map_err(|e| e.to_string())?;
    match ctx.alerts.toggle(category, clip).map_err(|e| e.to_string())? {
        ToggleOutcome::Selected => println!("{category}: {label}"),
        ToggleOutcome::Deselected => println!("{category}: none"),
    }
    Ok(())
}

pub fn show_selection(ctx: &CliContext) {
    let catalog = ctx.alerts.catalog();
    let selection = ctx.alerts.selection();
    for category in Category::ALL {
        let label = selection
            .get(category)
            .map(|clip| catalog.description(category, clip).unwrap_or("?"))
            .unwrap_or("none");
        println!("{:<10} {label}", category.label());
    }
}

pub async fn play(ctx: &CliContext) -> Result<(), String> {
    let task = ctx.alerts.submit().map_err(|e| e.to_string())?;
    *ctx.task.lock().await = Some(task);
    Ok(())
}

/// Block until the last submitted run is over. The status printer reports
/// the summary, so nothing is printed here on success.
pub async fn wait(ctx: &CliContext) -> Result<Option<RunResult>, String> {
    let Some(task) = ctx.task.lock().await.take() else {
        println!("Nothing is playing");
        return Ok(None);
    };
    let result = task.wait().await.map_err(|e| e.to_string())?;
    Ok(Some(result))
}

pub async fn status(ctx: &CliContext) {
    match ctx.alerts.run_state() {
        RunState::Running => println!("playing"),
        RunState::Idle => {
            let uncollected = ctx
                .task
                .lock()
                .await
                .as_ref()
                .is_some_and(PlaybackTask::is_finished);
            if uncollected {
                println!("idle (last run finished, `wait` to collect it)");
            } else {
                println!("idle");
            }
        }
    }
}

pub fn show_log(ctx: &CliContext, count: usize) {
    let log = ctx.alerts.event_log();
    let entries = log.tail(count);
    if entries.is_empty() {
        println!("No events logged yet");
    }
    for entry in entries {
        println!("{}", entry.format());
    }
    if let Some(path) = log.path() {
        println!("(persisted to {})", path.display());
    }
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match AppConfig::config_path() {
        Ok(path) => println!("config file:      {}", path.display()),
        Err(e) => println!("config file:      unavailable ({e})"),
    }
    println!("audio directory:  {}", config.audio_directory);
    for category in Category::ALL {
        println!(
            "  {:<9} {}",
            category.label(),
            Path::new(&config.audio_directory)
                .join(config.category_dirs.get(category))
                .display()
        );
    }
    println!("clip extension:   .{}", config.clip_extension);
    println!("event log:        {}", config.event_log_path);
    println!("inter-clip delay: {} ms", config.playback.inter_clip_delay_ms);
}

pub async fn set_audio_dir(ctx: &CliContext, path: &str) -> Result<(), String> {
    let mut config = ctx.config.write().await;
    config.audio_directory = path.to_string();
    config.save().map_err(|e| e.to_string())?;
    println!("Audio directory set to {path}. Restart to reload the catalog.");
    Ok(())
}
