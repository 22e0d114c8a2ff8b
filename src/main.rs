use std::{env, path::PathBuf, process};

use anyhow::{bail, Context};
use log::{error, info};
use machine_learning::arch::Sequential;
use rps_learn::{
    config::RunConfig,
    driver::{learn_and_save, load_and_test},
    report::ConsoleReporter,
};

const CONFIG_VAR: &str = "RPS_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Learn,
    Test,
    All,
}

fn parse_mode(arg: Option<&str>) -> anyhow::Result<Mode> {
    match arg {
        None | Some("all") => Ok(Mode::All),
        Some("learn") => Ok(Mode::Learn),
        Some("test") => Ok(Mode::Test),
        Some(other) => bail!("unknown mode: {other}. You must use 'learn', 'test' or 'all'."),
    }
}

fn load_config() -> anyhow::Result<RunConfig> {
    match env::var(CONFIG_VAR) {
        Ok(path) => {
            info!("reading config from {path}");
            RunConfig::from_json_file(&path).with_context(|| format!("loading config {path}"))
        }
        Err(_) => Ok(RunConfig::default()),
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let mode = parse_mode(args.get(1).map(String::as_str))?;
    let mut config = load_config()?;
    if let Some(path) = args.get(2) {
        config.model_path = PathBuf::from(path);
    }

    let mut reporter = ConsoleReporter::stdout();

    if matches!(mode, Mode::Learn | Mode::All) {
        learn_and_save::<Sequential, _>(&config, &mut reporter)
            .context("learning and saving the network")?;
    }

    if matches!(mode, Mode::Test | Mode::All) {
        load_and_test::<Sequential, _, _>(&config.model_path, &mut reporter)
            .context("loading and testing the network")?;
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if let Err(e) = run(&args) {
        error!("{e:#}");
        eprintln!(
            "Usage: {} [learn|test|all] [model path]\nError: {e:#}",
            args.first().map(String::as_str).unwrap_or("rps-learn")
        );
        process::exit(1);
    }
}
