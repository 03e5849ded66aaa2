use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::summary::PlayerReport;

pub struct ExportReport {
    pub players: usize,
    pub season_rows: usize,
    pub zone_rows: usize,
}

pub fn write_workbook(path: &Path, reports: &[PlayerReport]) -> Result<ExportReport> {
    let mut season_rows = vec![vec![
        "Player".to_string(),
        "Season".to_string(),
        "Team".to_string(),
        "Makes".to_string(),
        "Misses".to_string(),
        "Shots".to_string(),
        "FG%".to_string(),
        "Playoff Shots".to_string(),
        "Highlights".to_string(),
        "MVP".to_string(),
        "Champion".to_string(),
    ]];
    let mut zone_rows = vec![vec![
        "Player".to_string(),
        "Season".to_string(),
        "Zone".to_string(),
        "Attempts".to_string(),
        "Share %".to_string(),
    ]];

    for report in reports {
        for s in &report.seasons {
            season_rows.push(vec![
                report.name.clone(),
                s.season.clone(),
                s.team.clone(),
                s.made.to_string(),
                s.missed.to_string(),
                s.total.to_string(),
                s.fg_pct.to_string(),
                s.playoff_shots.to_string(),
                s.highlights.to_string(),
                yes_no(s.mvp),
                yes_no(s.champion),
            ]);
            for share in s.zones.shares() {
                zone_rows.push(vec![
                    report.name.clone(),
                    s.season.clone(),
                    share.zone.label().to_string(),
                    share.count.to_string(),
                    format!("{:.1}", share.percent),
                ]);
            }
        }
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Seasons").context("name seasons sheet")?;
        write_rows(sheet, &season_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Zones").context("name zones sheet")?;
        write_rows(sheet, &zone_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        players: reports.len(),
        season_rows: season_rows.len() - 1,
        zone_rows: zone_rows.len() - 1,
    })
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "" };
    text.to_string()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
