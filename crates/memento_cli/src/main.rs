//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `memento_core` linkage.
//! - Print week metrics for an optional `YYYY-MM-DD [years]` argument pair.

use chrono::Utc;
use memento_core::config::{clamp_life_expectancy, LIFE_EXPECTANCY_DEFAULT};
use memento_core::{compute_derived_metrics, generate_reflection_insights, AppInputState};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("memento_core ping={}", memento_core::ping());
    println!("memento_core version={}", memento_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(birth_date) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let years = match args.next().map(|raw| raw.parse::<u32>()) {
        None => LIFE_EXPECTANCY_DEFAULT,
        Some(Ok(years)) => clamp_life_expectancy(years),
        Some(Err(err)) => {
            eprintln!("invalid life expectancy: {err}");
            return ExitCode::FAILURE;
        }
    };

    let metrics = match compute_derived_metrics(&birth_date, years, Utc::now()) {
        Ok(metrics) => metrics,
        Err(err) => {
            eprintln!("invalid birth date: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("total_weeks={}", metrics.total_weeks);
    println!("weeks_lived={}", metrics.weeks_lived);
    println!("weeks_remaining={}", metrics.weeks_remaining);
    println!("percent_lived={:.1}", metrics.percent_lived);

    let categories = AppInputState::default().categories;
    for line in generate_reflection_insights(&metrics, &categories) {
        println!("- {line}");
    }
    ExitCode::SUCCESS
}
