//! Headless campaign runner.
//!
//! Hires a roster, puts one staff member on every gate, opens all gates at a
//! fixed time and lets each event run to the final sweep.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stadium_security_core_rs::core::time::{format_hhmm, parse_hhmm};
use stadium_security_core_rs::staffing::RecordFeed;
use stadium_security_core_rs::{
    ApplicantSource, Campaign, EventOrchestrator, EventReport, FallbackApplicantSource,
    GameClock, GameConfig, GamePhase, LocalApplicantGenerator, LogSeverity, RngManager,
};

#[derive(Debug, Parser)]
#[command(name = "stadium-security", about = "Run stadium gate security events headlessly")]
struct Args {
    /// JSON game configuration (defaults for anything missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of consecutive events to play
    #[arg(long, default_value_t = 1)]
    events: u32,

    /// JSON array of applicant records; falls back to generated CVs
    #[arg(long)]
    applicants: Option<PathBuf>,

    /// Time (HH:MM) at which all gates are opened [default: security gates open]
    #[arg(long, value_parser = parse_time)]
    open_at: Option<u32>,

    /// Pace ticks in real time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

fn parse_time(text: &str) -> Result<u32, String> {
    parse_hhmm(text).ok_or_else(|| format!("expected HH:MM, got '{}'", text))
}

fn applicant_source(args: &Args, seed: u64) -> Result<Box<dyn ApplicantSource>> {
    let local = LocalApplicantGenerator::new(RngManager::new(seed));
    match &args.applicants {
        Some(path) => {
            let feed = RecordFeed::from_json_file(path, RngManager::new(seed.rotate_left(17)))
                .with_context(|| format!("loading applicants from {}", path.display()))?;
            Ok(Box::new(FallbackApplicantSource::new(feed, local)))
        }
        None => Ok(Box::new(local)),
    }
}

fn run_event(event: &mut EventOrchestrator, open_at: u32, realtime: bool) -> Result<EventReport> {
    let interval = if realtime {
        Some(GameClock::real_tick_interval(event.config().minutes_per_real_second))
    } else {
        None
    };
    let mut opened = false;

    loop {
        if !opened && event.clock().minute() >= open_at {
            event.set_all_gates(true)?;
            opened = true;
        }

        let outcome = event.tick()?;
        if let Some(summary) = &outcome.summary {
            let time = format_hhmm(outcome.game_time);
            for entry in &summary.log_entries {
                match entry.severity {
                    LogSeverity::Info => info!(target: "event", %time, "{}", entry.message),
                    LogSeverity::Warning | LogSeverity::Critical => {
                        warn!(target: "event", %time, "{}", entry.message)
                    }
                }
            }
        }
        if let Some(report) = outcome.report {
            return Ok(report);
        }
        if let Some(interval) = interval {
            std::thread::sleep(interval);
        }
    }
}

fn print_report(day: u32, report: &EventReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("=== Day {} ===", day);
    println!("Guests processed:    {}", report.guests_processed);
    println!("Incidents prevented: {}", report.incidents_prevented);
    println!("Incidents missed:    {}", report.incidents_missed);
    println!("Reputation change:   {:+.1}", report.reputation_change);
    println!("Final reputation:    {:.1}", report.final_reputation);
    if report.ended_early {
        println!("Event ended early: reputation exhausted");
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    config.validate().context("invalid configuration")?;

    let open_at = args
        .open_at
        .unwrap_or(config.engine.timeline.security_gates_open);
    let mut applicants = applicant_source(&args, config.rng_seed)?;
    let mut campaign = Campaign::new(config.clone())?;

    for played in 0..args.events {
        while campaign.roster().len() < config.num_gates {
            campaign.hire(applicants.next_applicant()?)?;
        }
        campaign.finish_hiring()?;
        campaign.auto_assign()?;
        campaign.finish_assignment()?;

        let mut event = campaign.start_event(config.rng_seed.wrapping_add(u64::from(played)))?;
        let report = run_event(&mut event, open_at, args.realtime)?;
        print_report(campaign.day(), &report, args.json)?;

        if campaign.complete_event(report)? == GamePhase::GameOver {
            warn!(target: "campaign", day = campaign.day(), "game over");
            break;
        }
        info!(
            target: "campaign",
            budget = campaign.budget(),
            payroll = campaign.roster().payroll(),
            "post event"
        );
        if played + 1 < args.events {
            campaign.next_event()?;
        }
    }

    Ok(())
}
