use clap::{Args, ValueEnum};
use macro_menu::config::AppConfig;
use macro_menu::error::AppError;
use macro_menu::menu::{
    GateReport, MenuPipeline, MenuRun, ProfileKind, ProfileListing, ScoredItem,
};
use macro_menu::telemetry;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProfileChoice {
    Cut,
    Bulk,
}

impl From<ProfileChoice> for ProfileKind {
    fn from(value: ProfileChoice) -> Self {
        match value {
            ProfileChoice::Cut => ProfileKind::Cut,
            ProfileChoice::Bulk => ProfileKind::Bulk,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ProfilesArgs {
    /// Menu export to score (defaults to MENU_SOURCE_PATH)
    #[arg(long)]
    pub(crate) source: Option<PathBuf>,
    /// Profile to list; both are printed when omitted
    #[arg(long, value_enum)]
    pub(crate) profile: Option<ProfileChoice>,
    /// Entries kept per restaurant (defaults to the tuned listing limit)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit the listing as JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
    /// Show which gate criteria the named item meets or misses instead of a listing
    #[arg(long, value_name = "ITEM")]
    pub(crate) explain: Option<String>,
}

pub(crate) fn run_profiles(args: ProfilesArgs) -> Result<(), AppError> {
    let ProfilesArgs {
        source,
        profile,
        limit,
        json,
        explain,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let source = source.unwrap_or(config.menu.source_path);
    let pipeline = MenuPipeline::new(config.menu.tuning);
    let run = pipeline.run_path(&source)?;

    let kinds: Vec<ProfileKind> = match profile {
        Some(choice) => vec![choice.into()],
        None => ProfileKind::ordered().to_vec(),
    };

    if let Some(item_name) = explain {
        if json {
            let rendered = serde_json::to_string_pretty(&explain_json(&run, &item_name, &kinds))
                .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
            println!("{rendered}");
        } else {
            for line in explain_lines(&run, &item_name, &kinds) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    let listings: Vec<ProfileListing> = kinds
        .into_iter()
        .map(|kind| listing_for(&run, kind, limit))
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&listings)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "Scored {} unique items from {}",
        run.items().len(),
        source.display()
    );
    for listing in &listings {
        render_listing(listing);
    }

    Ok(())
}

fn listing_for(run: &MenuRun, kind: ProfileKind, limit: Option<usize>) -> ProfileListing {
    match limit {
        Some(limit) => run.listing_with_limit(kind, limit),
        None => run.listing(kind),
    }
}

pub(crate) fn render_listing(listing: &ProfileListing) {
    println!(
        "\n{} profile: {} matching items, top {} per restaurant across {} restaurants",
        listing.profile.label(),
        listing.total_matches,
        listing.per_restaurant_limit,
        listing.restaurants().len()
    );
    if listing.entries.is_empty() {
        println!("- no items pass the {} gate", listing.profile.label());
        return;
    }
    print!("{}", listing.render_table(listing.entries.len()));
}

fn selected_reports(run: &MenuRun, item: &ScoredItem, kinds: &[ProfileKind]) -> Vec<GateReport> {
    run.gate_reports(item)
        .into_iter()
        .filter(|report| kinds.contains(&report.profile))
        .collect()
}

pub(crate) fn explain_lines(run: &MenuRun, item_name: &str, kinds: &[ProfileKind]) -> Vec<String> {
    let matches = run.find_items(item_name);
    if matches.is_empty() {
        return vec![format!("no scored item named '{}'", item_name.trim())];
    }

    let mut lines = Vec::new();
    for item in matches {
        lines.push(format!(
            "{} / {} ({:.0} kcal, score {:.1})",
            item.item.restaurant,
            item.item.item_name,
            item.calories(),
            item.macro_score
        ));
        for report in selected_reports(run, item, kinds) {
            if report.passes() {
                lines.push(format!("  {}: passes", report.profile.label()));
            } else {
                let reasons: Vec<String> =
                    report.failures.iter().map(|failure| failure.summary()).collect();
                lines.push(format!(
                    "  {}: fails ({})",
                    report.profile.label(),
                    reasons.join("; ")
                ));
            }
        }
    }
    lines
}

fn explain_json(run: &MenuRun, item_name: &str, kinds: &[ProfileKind]) -> Value {
    let items: Vec<Value> = run
        .find_items(item_name)
        .into_iter()
        .map(|item| {
            json!({
                "restaurant": item.item.restaurant,
                "item_name": item.item.item_name,
                "macro_score": item.macro_score,
                "gates": selected_reports(run, item, kinds),
            })
        })
        .collect();
    Value::Array(items)
}
