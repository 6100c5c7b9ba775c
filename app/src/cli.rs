use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use engine::theme::{ThemeController, ThemeName, label_for, theme_list};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;

#[derive(Debug, Parser)]
#[command(name = "daylight", version, about = "Select, persist and schedule the application theme")]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the theme preference and the applied theme
    Show,
    /// List selectable themes
    List,
    /// Choose a theme by identifier, or `auto`
    Set { name: String },
    /// Turn time-of-day auto mode on or off
    Auto {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Keep running and print every theme change as a JSON line
    Watch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Human-readable summary of the controller state
pub fn describe(controller: &ThemeController) -> String {
    let preference = controller.current_theme();
    let applied = controller
        .applied_theme()
        .map_or_else(|| "none".to_string(), |theme| theme.to_string());
    let window = controller.daylight_window();

    format!(
        "preference: {preference} ({})\napplied:    {applied}\nauto mode:  {} (day {:02}:00-{:02}:00)",
        label_for(preference),
        if controller.is_auto_enabled() { "on" } else { "off" },
        window.start_hour(),
        window.end_hour(),
    )
}

/// Catalog listing with the current preference marked
pub fn render_list(controller: &ThemeController) -> String {
    let preference = controller.current_theme();
    theme_list()
        .iter()
        .map(|entry| {
            let marker = if entry.name == preference { '*' } else { ' ' };
            format!("{marker} {:<14} {}", entry.name.id(), entry.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn run(command: Command, controller: &ThemeController) -> anyhow::Result<()> {
    match command {
        Command::Show => println!("{}", describe(controller)),
        Command::List => println!("{}", render_list(controller)),
        Command::Set { name } => {
            controller
                .set_theme_named(&name)
                .with_context(|| format!("Could not set theme '{name}'"))?;
            println!("{}", describe(controller));
        }
        Command::Auto { state } => {
            controller
                .set_auto_enabled(state == Toggle::On)
                .context("Could not change auto mode")?;
            println!("{}", describe(controller));
        }
        Command::Watch => watch(controller).await?,
    }
    Ok(())
}

async fn watch(controller: &ThemeController) -> anyhow::Result<()> {
    let mut events = controller
        .subscribe()
        .context("Theme controller has no event bus")?;

    if controller.current_theme() != ThemeName::Auto {
        log::info!("Auto mode is off, only explicit theme changes will be reported");
    }
    println!("{}", describe(controller));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("Stopping theme watch");
                break;
            }
            received = events.recv() => match received {
                Ok(change) => {
                    writeln!(stdout, "{}", serde_json::to_string(&change)?)?;
                    stdout.flush()?;
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Missed {skipped} theme change events");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    Ok(())
}
