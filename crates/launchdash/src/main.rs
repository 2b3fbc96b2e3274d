//! `launchdash` - CLI for the launch records dashboard
//!
//! This binary serves the interactive dashboard and prints its charts and
//! dataset summary on the terminal.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use launchdash::cli::{
    Cli, Command, ConfigCommand, OutputFormat, PieCommand, ScatterCommand, ServeCommand,
    SummaryCommand,
};
use launchdash::{init_logging, query, server, Chart, Config, Dataset};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(data) = cli.data.clone() {
        config.data.csv_path = Some(data);
    }

    match cli.command {
        Command::Serve(cmd) => handle_serve(config, &cmd),
        Command::Pie(cmd) => handle_pie(&config, &cmd),
        Command::Scatter(cmd) => handle_scatter(&config, &cmd),
        Command::Summary(cmd) => handle_summary(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn load_dataset(config: &Config) -> anyhow::Result<Dataset> {
    let path = config.csv_path();
    Dataset::from_csv_path(&path)
        .with_context(|| format!("could not load launch records from {}", path.display()))
}

fn handle_serve(mut config: Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    if cmd.open {
        config.server.open_browser = true;
    }
    config.validate()?;

    let dataset = Arc::new(load_dataset(&config)?);
    let dashboard = Arc::new(launchdash::Dashboard::new(dataset, &config));
    let addr = config.bind_addr();

    if config.server.open_browser {
        open_browser(&format!("http://{addr}"));
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server::serve(dashboard, addr))?;
    Ok(())
}

fn browser_command(url: &str) -> Option<std::process::Command> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/C", "start"]);
        cmd
    } else if cfg!(unix) {
        std::process::Command::new("xdg-open")
    } else {
        return None;
    };
    command.arg(url);
    Some(command)
}

fn open_browser(url: &str) {
    info!("Opening browser at {url}");
    match browser_command(url) {
        Some(mut command) => {
            if let Err(e) = command.spawn() {
                warn!(error = %e, "Failed to open browser at {url}");
            }
        }
        None => warn!("Don't know how to open a browser on this platform; visit {url}"),
    }
}

fn print_chart(chart: &Chart, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", chart.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(chart)?),
        OutputFormat::Figure => println!("{}", serde_json::to_string_pretty(&chart.to_figure())?),
    }
    Ok(())
}

fn handle_pie(config: &Config, cmd: &PieCommand) -> anyhow::Result<()> {
    let dataset = load_dataset(config)?;
    let chart = Chart::from(query::site_success(&dataset, &cmd.site));
    print_chart(&chart, cmd.format)
}

fn handle_scatter(config: &Config, cmd: &ScatterCommand) -> anyhow::Result<()> {
    let dataset = load_dataset(config)?;
    let defaults = launchdash::controls::PayloadSlider::new(&config.slider, &dataset).value;
    let range = cmd.payload_range(defaults);
    let chart = Chart::from(query::payload_outcome(&dataset, &cmd.site, range));
    print_chart(&chart, cmd.format)
}

fn handle_summary(config: &Config, cmd: &SummaryCommand) -> anyhow::Result<()> {
    let dataset = load_dataset(config)?;
    let summary = dataset.summary();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Launch Records");
    println!("--------------");
    println!("Source:        {}", config.csv_path().display());
    println!("Records:       {}", summary.records);
    println!("Successes:     {}", summary.successes);
    match summary.payload_bounds {
        Some(bounds) => println!("Payload (kg):  {} - {}", bounds.low, bounds.high),
        None => println!("Payload (kg):  n/a"),
    }
    println!();
    println!("{:<16} {:>8} {:>10}", "Site", "Launches", "Successes");
    for (site, counts) in &summary.sites {
        println!("{site:<16} {:>8} {:>10}", counts.launches, counts.successes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                println!("  CSV path:           {}", config.csv_path().display());
                println!();
                println!("[Server]");
                println!("  Address:            {}", config.bind_addr());
                println!("  Open browser:       {}", config.server.open_browser);
                println!();
                println!("[Slider]");
                println!(
                    "  Range (kg):         {} - {}",
                    config.slider.min, config.slider.max
                );
                println!("  Step (kg):          {}", config.slider.step);
                println!();
                println!("[Dashboard]");
                println!("  Title:              {}", config.dashboard.title);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
