//! seed-runner: headless driver for the randomizer engine.
//!
//! Usage:
//!   seed-runner --farm-name Maple --day 14 --data-dir ./data
//!   seed-runner --farm-name Maple --snapshot
//!   seed-runner --ipc-mode            (host events as JSON lines on stdin)

use anyhow::Result;
use randomizer_core::{
    catalog::Catalog,
    club_shop::CLUB_SHOP_ID,
    config::RandomizerConfig,
    event::{HostEvent, HostResponse},
    host::RecordingHost,
    saloon_shop::SALOON_SHOP_ID,
    session::{Randomizer, DEFAULT_LOCALE},
    sewer_shop::SEWER_SHOP_ID,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let day = parse_arg(&args, "--day", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let print_snapshot = args.iter().any(|a| a == "--snapshot");
    let farm_name = string_arg(&args, "--farm-name").unwrap_or("Maple");
    let locale = string_arg(&args, "--locale").unwrap_or(DEFAULT_LOCALE);
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");

    let (config, catalog) = load_data(data_dir)?;
    let mut randomizer = Randomizer::new(config, catalog, RecordingHost::default())?;

    if ipc_mode {
        return run_ipc_loop(&mut randomizer);
    }

    println!("Randomizer seed-runner");
    println!("  farm name: {farm_name}");
    println!("  day:       {day}");
    println!("  locale:    {locale}");
    println!("  data_dir:  {data_dir}");
    println!();

    randomizer.handle(HostEvent::GameLaunched { locale: locale.to_string() })?;
    randomizer.handle(HostEvent::SaveLoaded {
        farm_name: farm_name.to_string(),
        day_index: day,
    })?;

    print_summary(&mut randomizer)?;

    if print_snapshot {
        println!();
        println!("{}", randomizer.orchestrator.snapshot().to_json_pretty()?);
    }
    Ok(())
}

/// config.json and catalog.json from the data directory; built-in
/// defaults for whichever is missing.
fn load_data(data_dir: &str) -> Result<(RandomizerConfig, Catalog)> {
    let config = if Path::new(data_dir).join("config.json").exists() {
        RandomizerConfig::load(data_dir)?
    } else {
        log::warn!("No config.json in {data_dir}, using defaults");
        RandomizerConfig::default()
    };
    let catalog = if Path::new(data_dir).join("catalog.json").exists() {
        Catalog::load(data_dir)?
    } else {
        log::warn!("No catalog.json in {data_dir}, using the built-in test catalog");
        Catalog::default_test()
    };
    Ok((config, catalog))
}

fn run_ipc_loop(randomizer: &mut Randomizer<RecordingHost>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let event: HostEvent = match serde_json::from_str(&buffer) {
            Ok(e) => e,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match randomizer.handle(event) {
            Ok(response) => writeln!(stdout, "{}", serde_json::to_string(&response)?)?,
            Err(e) => {
                log::error!("Event failed: {e}");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(randomizer: &mut Randomizer<RecordingHost>) -> Result<()> {
    let Some(report) = randomizer.last_report() else {
        return Ok(());
    };

    println!("=== PASS SUMMARY ===");
    println!("  root seed:     {}", report.root_seed);
    println!("  modules run:   {}", report.modules_run.join(", "));
    println!("  assets:        {}", report.keys_invalidated.len());
    match &report.spoiler_path {
        Some(path) => println!("  spoiler log:   {}", path.display()),
        None => println!("  spoiler log:   (not written)"),
    }

    println!();
    println!("=== SHOP STOCK ===");
    for shop_id in [CLUB_SHOP_ID, SALOON_SHOP_ID, SEWER_SHOP_ID] {
        let response = randomizer.handle(HostEvent::MenuOpened {
            shop_id: shop_id.to_string(),
            stock:   Vec::new(),
        })?;
        randomizer.handle(HostEvent::MenuClosed { shop_id: shop_id.to_string() })?;

        if let HostResponse::Stock { entries, .. } = response {
            println!("  {shop_id}:");
            for entry in entries {
                let kind = if entry.is_recipe { " (recipe)" } else { "" };
                println!("    {:<24} {:>6}{kind}", entry.name, entry.price);
            }
        }
    }
    Ok(())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
