//! Health Analytics CLI
//!
//! Command-line interface over exported health logs:
//! - Run a full analysis
//! - Print recommendations
//! - Generate a config file

use anyhow::Context;
use chrono::{Days, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use health_analytics::config::generate_default_config;
use health_analytics::logging::init_tracing;
use health_analytics::{AnalyticsReport, Config, HealthAnalytics, HealthData, TimeRange};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "health-analytics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Digestive health analytics over exported health logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze an exported JSON log
    Analyze {
        /// Path to the export
        file: PathBuf,
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Only the last N days (ignored when --from or --to is given)
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
        last: Option<i64>,
    },

    /// Print recommendations for an exported JSON log
    Recommend {
        /// Path to the export
        file: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Analyze {
            file,
            from,
            to,
            last,
        } => {
            let data = read_export(&file)?;
            let range = select_range(from, to, last)?;
            let analytics = HealthAnalytics::try_new(config.analysis)?;
            let report = analytics.analyze(&data, range);

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => print_report(&report),
            }
        }

        Commands::Recommend { file } => {
            let data = read_export(&file)?;
            let analytics = HealthAnalytics::try_new(config.analysis)?;
            let recommendations = analytics.insight_engine().generate_recommendations(
                &data.bowel_movements,
                &data.meals,
                &data.symptoms,
            );

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&recommendations)?),
                _ => {
                    for rec in &recommendations {
                        println!("[{:<6}] {}", rec.priority.to_string(), rec.title);
                        println!("         {}", rec.description);
                    }
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn read_export(path: &Path) -> anyhow::Result<HealthData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data = HealthData::from_json(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::info!(
        bowel = data.bowel_movements.len(),
        meals = data.meals.len(),
        symptoms = data.symptoms.len(),
        medications = data.medications.len(),
        "Loaded export from {:?}",
        path
    );
    Ok(data)
}

fn select_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    last: Option<i64>,
) -> anyhow::Result<TimeRange> {
    match (from, to, last) {
        (None, None, None) => Ok(TimeRange::unbounded()),
        (None, None, Some(days)) => TimeRange::last_days(days)
            .with_context(|| format!("--last {} is outside the supported range", days)),
        (from, to, _) => {
            let to = to.unwrap_or_else(|| Utc::now().date_naive());
            let from = match from {
                Some(from) => from,
                None => to
                    .checked_sub_days(Days::new(29))
                    .with_context(|| format!("no 30-day window ends on {}", to))?,
            };
            TimeRange::try_days_between(from, to)
                .with_context(|| format!("invalid date range {} to {}", from, to))
        }
    }
}

fn opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn print_report(report: &AnalyticsReport) {
    let score = &report.summary.health_score;
    println!("Health score: {:.1}", score.overall);
    println!(
        "  Bowel {:.1} | Symptoms {:.1} | Meals {:.1} | Medication {:.1}",
        score.bowel, score.symptom, score.meal, score.medication
    );
    println!(
        "Overall trend: {} (health direction: {})",
        report.trends.overall, report.trends.health_direction
    );
    for change in &report.trends.significant_changes {
        println!("  * {}", change);
    }
    let severity = &report.summary.symptom_severity;
    if severity.count > 0 {
        println!(
            "Symptom severity: mean {:.1}, median {:.1}, range {}-{}",
            severity.mean, severity.median, severity.min, severity.max
        );
    }
    let calories = &report.summary.meal_calories;
    if calories.count > 0 {
        println!(
            "Meal calories: mean {:.0}, median {:.0}, IQR {:.0}-{:.0}",
            calories.mean, calories.median, calories.percentile_25, calories.percentile_75
        );
    }
    if !report.summary.calorie_outliers.is_empty() {
        let outliers: Vec<String> = report
            .summary
            .calorie_outliers
            .iter()
            .map(|c| format!("{:.0}", c))
            .collect();
        println!("  Unusual meals (kcal): {}", outliers.join(", "));
    }

    println!();
    if report.daily.is_empty() {
        println!("No data for the selected time range");
    } else {
        println!(
            "{:<12} | {:<6} | {:<7} | {:<6} | {:<5} | {:<8} | {:<8}",
            "Date", "Bowel", "Bristol", "Pain", "Meals", "Calories", "Symptoms"
        );
        println!("{}", "-".repeat(72));
        for day in &report.daily {
            println!(
                "{:<12} | {:<6} | {:<7} | {:<6} | {:<5} | {:<8.0} | {:<8}",
                day.date.format("%Y-%m-%d").to_string(),
                day.bowel_count,
                opt(day.avg_bristol),
                opt(day.avg_pain),
                day.meal_count,
                day.total_calories,
                day.symptom_count,
            );
        }
    }

    if !report.correlations.is_empty() {
        println!();
        println!("Correlations:");
        for c in &report.correlations {
            println!("  {}", c.description);
        }
    }

    if !report.triggers.is_empty() {
        println!();
        println!("Triggers:");
        for t in &report.triggers {
            println!(
                "  {:<24} severity {:.2} ({} days)",
                t.trigger, t.severity, t.frequency
            );
        }
    }

    if !report.medication_effects.is_empty() {
        println!();
        println!("Medications:");
        for m in &report.medication_effects {
            println!(
                "  {:<24} effectiveness {:.1}",
                m.medication_name, m.effectiveness_score
            );
        }
    }

    if !report.insights.is_empty() || !report.recommendations.is_empty() {
        println!();
        println!("Insights:");
        for item in report.insights.iter().chain(&report.recommendations) {
            println!("  [{:<6}] {}", item.priority.to_string(), item.title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_must_be_positive() {
        for value in ["0", "-5"] {
            let parsed = Cli::try_parse_from(["health-analytics", "analyze", "log.json", "--last", value]);
            assert!(parsed.is_err(), "--last {} accepted", value);
        }
        assert!(Cli::try_parse_from(["health-analytics", "analyze", "log.json", "--last", "7"]).is_ok());
    }

    #[test]
    fn test_select_range_rejects_huge_last() {
        assert!(select_range(None, None, Some(1_000_000_000_000)).is_err());
        assert!(select_range(None, None, Some(30)).is_ok());
    }

    #[test]
    fn test_select_range_rejects_reversed_dates() {
        let err = select_range(Some(date(2024, 5, 10)), Some(date(2024, 5, 1)), None);
        assert!(err.is_err());

        let range = select_range(Some(date(2024, 5, 1)), Some(date(2024, 5, 10)), None).unwrap();
        assert_eq!(range.day_count(), 10);
    }

    #[test]
    fn test_select_range_defaults_to_thirty_days() {
        let range = select_range(None, Some(date(2024, 5, 30)), None).unwrap();
        assert_eq!(range.day_count(), 30);
        assert!(select_range(None, None, None).unwrap().is_unbounded());
    }
}
