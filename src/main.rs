use macro_menu::config::AppConfig;
use macro_menu::error::AppError;
use macro_menu::menu::{MenuPipeline, ProfileKind};
use macro_menu::telemetry;
use tracing::info;

const SAMPLE_ROWS: usize = 12;

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let pipeline = MenuPipeline::new(config.menu.tuning);
    let run = pipeline.run_path(&config.menu.source_path)?;
    let summary = run.write_artifact(&config.menu.artifact_path)?;

    info!(
        generated_at = %summary.generated_at,
        rows_loaded = summary.rows_loaded,
        rows_scored = summary.rows_scored,
        degenerate = summary.degenerate_scores,
        "menu run complete"
    );

    println!("Rows scored: {}", summary.rows_scored);
    println!(
        "Rows loaded: {} (dropped {} without identity, {} with invalid calories)",
        summary.rows_loaded,
        summary.normalization.dropped_missing_identity,
        summary.normalization.dropped_invalid_calories
    );
    println!(
        "CUT matches: {} | BULK matches: {}",
        summary.cut_matches, summary.bulk_matches
    );
    println!("Wrote {}", config.menu.artifact_path.display());

    for kind in ProfileKind::ordered() {
        let listing = run.listing(kind);
        println!(
            "\n{} top {} per restaurant ({} matches)",
            kind.label(),
            listing.per_restaurant_limit,
            listing.total_matches
        );
        print!("{}", listing.render_table(SAMPLE_ROWS));
    }

    Ok(())
}
