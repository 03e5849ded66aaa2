use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;

use shotchart_terminal::config::AppConfig;
use shotchart_terminal::export;
use shotchart_terminal::loader::{LoadOutcome, ShotLoader};
use shotchart_terminal::season::SeasonIndex;
use shotchart_terminal::summary::{self, PlayerReport};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cfg = AppConfig::from_env()?;
    let loader = ShotLoader::from_config(&cfg);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let players = if args.iter().any(|a| a == "--all") {
        loader.manifest().players()
    } else {
        args.iter()
            .take_while(|a| !a.starts_with("--"))
            .cloned()
            .collect::<Vec<_>>()
    };
    if players.is_empty() {
        return Err(anyhow!(
            "usage: shot_report <player_id>... | --all [--xlsx PATH] [--json PATH]"
        ));
    }

    let results: Vec<(String, Result<Option<PlayerReport>>)> = players
        .par_iter()
        .map(|player| (player.clone(), report_for(&loader, player)))
        .collect();

    let mut reports = Vec::new();
    for (player, result) in results {
        match result {
            Ok(Some(report)) => {
                println!(
                    "{}: {} shots, {} made, {} seasons (rim {} / mid {} / three {})",
                    report.name,
                    report.total_shots,
                    report.total_made,
                    report.seasons.len(),
                    report.career_zones.rim,
                    report.career_zones.mid,
                    report.career_zones.three
                );
                reports.push(report);
            }
            Ok(None) => println!("{player}: no data"),
            Err(err) => eprintln!("{player}: unable to load: {err:#}"),
        }
    }

    if let Some(path) = path_arg(&args, "--xlsx") {
        let written = export::write_workbook(&path, &reports)?;
        println!(
            "Workbook: {} ({} players, {} season rows, {} zone rows)",
            path.display(),
            written.players,
            written.season_rows,
            written.zone_rows
        );
    }
    if let Some(path) = path_arg(&args, "--json") {
        let json = serde_json::to_string_pretty(&reports).context("serialize reports")?;
        fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
        println!("JSON: {}", path.display());
    }

    Ok(())
}

fn report_for(loader: &ShotLoader, player: &str) -> Result<Option<PlayerReport>> {
    let load = loader.load_player(player)?;
    for warning in &load.warnings {
        eprintln!("{player}: {warning}");
    }
    let LoadOutcome::Shots(shots) = load.outcome else {
        return Ok(None);
    };
    let index = SeasonIndex::build(shots);
    Ok(Some(summary::build_report(player, &index)))
}

fn path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
