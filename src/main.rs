mod agent;
mod boundary;
mod coordinator;
mod core;
mod grid;
mod report;
mod settings;
mod setup;

use crate::coordinator::Coordinator;
use crate::core::SetupError;
use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Симуляція черепах, що перетинають поле з пастками та сховищем.
#[derive(Debug, Parser)]
#[command(name = "turtles", version, about)]
struct Cli {
    /// Шлях до файлу сценарію.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Поведінка на межі поля: pass, stop або portal.
    #[arg(long = "out-of-bound-behavior")]
    out_of_bound_behavior: Option<String>,

    /// Надрукувати всі маршрути з журналами після звіту.
    #[arg(long)]
    print_commands_at_the_end: bool,

    /// Необов'язковий файл налаштувань.
    #[arg(long, default_value = "Settings.toml")]
    settings: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Логування в stderr, щоб не змішувати зі звітом
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Не вдалося встановити tracing subscriber");

    // 2. Налаштування та прапорці
    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("Пошкоджено файл налаштувань {}", cli.settings.display()))?;
    let policy = settings.boundary_policy(cli.out_of_bound_behavior.as_deref())?;

    // 3. Сценарій
    let path = cli.config.ok_or(SetupError::MissingConfig)?;
    let scenario = setup::load(&path)?;
    let mut runs = scenario.runs();
    info!(
        turtles = runs.len(),
        %policy,
        "Сценарій {} завантажено",
        path.display()
    );

    // 4. Паралельне виконання
    let coordinator =
        Coordinator::new(scenario.grid, policy).with_report_capacity(settings.report_capacity);
    coordinator.execute(&mut runs).await?;

    // 5. Звіт
    for run in &runs {
        println!("{}", report::render(run));
    }
    if cli.print_commands_at_the_end || settings.print_runs {
        println!("{}", report::dump(&runs).context("Не вдалося серіалізувати маршрути")?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoundaryPolicy, Outcome};

    const HEADER: &str = "5 5\n1,1 1,3 3,3\n2 4\n0 1 N\n";

    async fn simulate(commands: &[&str], policy: BoundaryPolicy) -> Vec<agent::Run> {
        let raw = format!("{HEADER}{}\n", commands.join("\n"));
        let scenario = setup::parse(&raw).unwrap();
        let mut runs = scenario.runs();
        Coordinator::new(scenario.grid, policy)
            .execute(&mut runs)
            .await
            .unwrap();
        runs
    }

    #[tokio::test]
    async fn test_caught_scenario() {
        let runs = simulate(&["R M L M M"], BoundaryPolicy::Pass).await;
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].outcome(), Outcome::Caught);
    }

    #[tokio::test]
    async fn test_in_area_scenario() {
        let runs = simulate(&["M R M M M"], BoundaryPolicy::Pass).await;
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].outcome(), Outcome::Unfinished);
        assert_eq!(
            report::render(&runs[0]),
            "Turtle 1 not finish travel and still in area"
        );
    }

    #[tokio::test]
    async fn test_saved_scenario() {
        let runs = simulate(&["M R M M M M R M M M M R M M M"], BoundaryPolicy::Pass).await;
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].outcome(), Outcome::Saved);
        assert_eq!(
            report::render(&runs[0]),
            "Turtle 1 finish travel and saved, commands left: 1"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_report_keeps_input_order() {
        let runs = simulate(
            &["M R M M M M R M M M M R M M M", "R M L M M", "M R M M M"],
            BoundaryPolicy::Pass,
        )
        .await;
        let lines: Vec<String> = runs.iter().map(report::render).collect();
        assert_eq!(
            lines,
            vec![
                "Turtle 1 finish travel and saved, commands left: 1",
                "Turtle 2 finish travel and caught, commands left: 3",
                "Turtle 3 not finish travel and still in area",
            ]
        );
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "turtles",
            "--config",
            "demos/scenario.txt",
            "--out-of-bound-behavior",
            "portal",
            "--print-commands-at-the-end",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("demos/scenario.txt")));
        assert_eq!(cli.out_of_bound_behavior.as_deref(), Some("portal"));
        assert!(cli.print_commands_at_the_end);
        assert_eq!(cli.settings, PathBuf::from("Settings.toml"));
    }
}
