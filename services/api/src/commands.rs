use crate::infra::{InMemoryChurchStore, InMemoryRatingRepository};
use church_crm::config::AppConfig;
use church_crm::error::AppError;
use church_crm::visits::{
    ChurchId, ObservationImporter, ObservationRow, RatingDescriptions, RatingEngine,
    RatingResult, RatingSubmission, VisitId, VisitObservation, VisitRatingService,
};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Openness to mission work (1-5)
    #[arg(long)]
    pub(crate) mission_openness: i32,
    /// Hospitality shown during the visit (1-5)
    #[arg(long)]
    pub(crate) hospitality: i32,
    /// Offering collected during the visit, in currency units
    #[arg(long, default_value_t = 0.0)]
    pub(crate) offerings: f64,
    /// Church membership
    #[arg(long, default_value_t = 0)]
    pub(crate) members: i64,
    /// People present at the visit
    #[arg(long, default_value_t = 0)]
    pub(crate) attendees: i64,
    /// Missionaries the church supports (informational)
    #[arg(long, default_value_t = 0)]
    pub(crate) missionary_support: i64,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export of visit observations
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    visit_id: VisitId,
    #[serde(flatten)]
    result: RatingResult,
}

/// Scoring from the CLI honors the same threshold overrides as the service.
fn engine_from_env() -> Result<RatingEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(RatingEngine::new(config.rating))
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let engine = engine_from_env()?;
    let observation = VisitObservation {
        mission_openness_rating: args.mission_openness,
        hospitality_rating: args.hospitality,
        missionary_support_count: args.missionary_support,
        offerings_amount: args.offerings,
        church_members: args.members,
        attendees_count: args.attendees,
        visit_duration_minutes: None,
        notes: None,
    };

    let result = engine.calculate(&observation);

    if args.json {
        print_json(&result);
    } else {
        render_result(&result);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = engine_from_env()?;
    let rows = ObservationImporter::from_path(&args.csv)?;
    let entries = score_rows(&engine, rows);

    if args.json {
        print_json(&entries);
        return Ok(());
    }

    println!("Scored {} visit(s) from {}", entries.len(), args.csv.display());
    for entry in &entries {
        println!(
            "- {}: {} star(s) | financial {:.0} | {} weighting",
            entry.visit_id,
            entry.result.star_rating,
            entry.result.financial_score,
            entry.result.weighting.label()
        );
    }

    Ok(())
}

fn score_rows(engine: &RatingEngine, rows: Vec<ObservationRow>) -> Vec<BatchEntry> {
    rows.into_iter()
        .map(|row| BatchEntry {
            result: engine.calculate(&row.observation),
            visit_id: row.visit_id,
        })
        .collect()
}

pub(crate) fn run_describe() {
    let descriptions = RatingDescriptions::all();

    println!("Mission openness");
    for level in &descriptions.mission_openness {
        println!("  {} - {}", level.rating, level.description);
    }

    println!("\nHospitality");
    for level in &descriptions.hospitality {
        println!("  {} - {}", level.rating, level.description);
    }
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = Arc::new(InMemoryRatingRepository::default());
    let churches = Arc::new(InMemoryChurchStore::default());
    let service = VisitRatingService::new(repository, churches.clone(), config.rating);
    let church = ChurchId("demo-community-church".to_string());

    println!("Church visit rating demo ({})", church);

    let visits = [
        ("visit-001", demo_submission(&church, 4, 3, 500.0, 80)),
        ("visit-002", demo_submission(&church, 5, 4, 0.0, 65)),
        ("visit-003", demo_submission(&church, 2, 3, 60.0, 120)),
    ];

    for (visit_id, submission) in visits {
        match service.submit(VisitId(visit_id.to_string()), submission) {
            Ok(record) => {
                let view = record.view();
                println!(
                    "- {}: {} star(s) ({} weighting, financial {:.0})",
                    view.visit_id,
                    view.star_rating,
                    view.result.weighting.label(),
                    view.financial_score
                );
                println!("    mission openness: {}", view.mission_openness_description);
                println!("    hospitality: {}", view.hospitality_description);
            }
            Err(err) => println!("- {}: rejected ({})", visit_id, err),
        }
    }

    match service.submit(
        VisitId("visit-001".to_string()),
        demo_submission(&church, 1, 1, 0.0, 10),
    ) {
        Ok(_) => println!("\nDuplicate rating unexpectedly accepted"),
        Err(err) => println!("\nSecond rating for visit-001 refused: {}", err),
    }

    match churches.latest(&church) {
        Some(summary) => println!(
            "\nChurch rollup: {} rated visit(s), average {:.2} -> {} star(s)",
            summary.rated_visits,
            summary.average_star_rating.unwrap_or_default(),
            summary.star_rating.unwrap_or_default()
        ),
        None => println!("\nChurch rollup: no rated visits"),
    }

    Ok(())
}

fn demo_submission(
    church: &ChurchId,
    mission_openness: i32,
    hospitality: i32,
    offerings: f64,
    attendees: i64,
) -> RatingSubmission {
    RatingSubmission {
        church_id: church.clone(),
        mission_openness_rating: Some(mission_openness),
        hospitality_rating: Some(hospitality),
        missionary_support_count: Some(3),
        offerings_amount: Some(offerings),
        church_members: Some(attendees + 25),
        attendees_count: Some(attendees),
        visit_duration_minutes: Some(75),
        notes: None,
    }
}

fn render_result(result: &RatingResult) {
    println!("Star rating: {}", result.star_rating);
    println!("Weighting: {}", result.weighting.label());
    println!("Breakdown");
    println!("- mission openness: {}", result.breakdown.mission_openness);
    println!("- hospitality: {}", result.breakdown.hospitality);
    println!("- financial: {:.0}", result.breakdown.financial);
    println!("- missionary bonus: {:.0}", result.breakdown.missionary_bonus);
    println!("- weighted average: {:.2}", result.breakdown.weighted_average);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("unable to render JSON: {err}"),
    }
}
