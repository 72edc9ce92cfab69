//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::runner::RunStats;
use crate::story::AREAS;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_capped: u32,
    pub deaths: u32,

    // Aggregated stats
    pub avg_final_wave: f64,
    pub best_wave: u32,
    pub avg_rounds: f64,
    pub avg_kills: f64,
    pub avg_bosses_defeated: f64,
    pub avg_fragment_activations: f64,
    pub avg_fragments_corroded: f64,
    pub avg_items_bought: f64,

    // Rates, 0.0 to 1.0
    pub story_clear_rate: f64,
    pub endless_reach_rate: f64,

    // Distribution data
    pub deaths_per_area: BTreeMap<String, u32>,
    pub wave_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_capped = runs.iter().filter(|r| r.capped).count() as u32;

        let mut deaths_per_area: BTreeMap<String, u32> = BTreeMap::new();
        for run in &runs {
            if let Some(name) = &run.death_area {
                *deaths_per_area.entry(name.clone()).or_insert(0) += 1;
            }
        }
        let deaths = deaths_per_area.values().sum();

        let mut wave_distribution: BTreeMap<u32, u32> = BTreeMap::new();
        for run in &runs {
            *wave_distribution.entry(run.final_wave).or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_capped,
            deaths,
            avg_final_wave: average(&runs, |r| r.final_wave as f64),
            best_wave: runs.iter().map(|r| r.final_wave).max().unwrap_or(0),
            avg_rounds: average(&runs, |r| r.final_round as f64),
            avg_kills: average(&runs, |r| r.kills as f64),
            avg_bosses_defeated: average(&runs, |r| r.bosses_defeated as f64),
            avg_fragment_activations: average(&runs, |r| r.fragment_activations as f64),
            avg_fragments_corroded: average(&runs, |r| r.fragments_corroded as f64),
            avg_items_bought: average(&runs, |r| r.items_bought as f64),
            story_clear_rate: average(&runs, |r| if r.story_cleared { 1.0 } else { 0.0 }),
            endless_reach_rate: average(&runs, |r| if r.reached_endless { 1.0 } else { 0.0 }),
            deaths_per_area,
            wave_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 FARM DEFENSE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} died, {} stopped at cap\n\n",
            self.num_runs, self.deaths, self.runs_capped
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Wave:      {:.1}\n",
            self.avg_final_wave
        ));
        report.push_str(&format!("  Best Wave:           {}\n", self.best_wave));
        report.push_str(&format!("  Avg Rounds:          {:.0}\n", self.avg_rounds));
        report.push_str(&format!("  Avg Kills:           {:.1}\n", self.avg_kills));
        report.push_str(&format!(
            "  Avg Bosses Defeated: {:.1}\n",
            self.avg_bosses_defeated
        ));
        report.push_str(&format!(
            "  Story Cleared:       {:.1}%\n",
            self.story_clear_rate * 100.0
        ));
        report.push_str(&format!(
            "  Reached Endless:     {:.1}%\n\n",
            self.endless_reach_rate * 100.0
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Fragment Activations: {:.2}\n",
            self.avg_fragment_activations
        ));
        report.push_str(&format!(
            "  Avg Fragments Corroded:   {:.2}\n",
            self.avg_fragments_corroded
        ));
        report.push_str(&format!(
            "  Avg Items Bought:         {:.1}\n\n",
            self.avg_items_bought
        ));

        report.push_str("── DEATHS PER AREA ──────────────────────────────────────────────\n");
        for area in AREAS.iter() {
            let died = self.deaths_per_area.get(area.name).copied().unwrap_or(0);
            let pct = if self.num_runs > 0 {
                died as f64 / self.num_runs as f64 * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<14} {:>4} {:>5.1}% {}\n", area.name, died, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let death_rate = if self.num_runs > 0 {
            self.deaths as f64 / self.num_runs as f64
        } else {
            0.0
        };
        let rating = if death_rate < 0.2 {
            "TOO EASY - Most runs survive to the cap"
        } else if death_rate < 0.6 {
            "GOOD - Challenging but fair"
        } else if self.story_clear_rate > 0.1 {
            "HARD - Most runs fall, some clear the story"
        } else {
            "TOO HARD - The story is rarely cleared"
        };
        report.push_str(&format!("  Death Rate:  {:.1}%\n", death_rate * 100.0));
        report.push_str(&format!("  Rating:      {}\n", rating));

        if self.avg_final_wave < 5.0 {
            report.push_str("  ⚠️  Most runs die before the first boss - early waves too hard?\n");
        }
        if self.avg_fragments_corroded > self.avg_fragment_activations {
            report.push_str("  ⚠️  Fragments corrode more often than they are used - price too high?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
