use macro_menu::menu::{
    MenuPipeline, MenuRun, PipelineError, PipelineTuning, ProfileKind, ScoredItem,
};
use std::collections::HashSet;

const HEADER: &str = "restaurant,item_name,food_category,calories,protein,total_fat,saturated_fat,dietary_fiber,sugar,sodium";

fn run_csv(body: &str) -> MenuRun {
    let csv = format!("{HEADER}\n{body}");
    MenuPipeline::new(PipelineTuning::default())
        .run_reader(csv.as_bytes())
        .expect("pipeline runs")
}

fn find<'a>(run: &'a MenuRun, restaurant: &str, name: &str) -> &'a ScoredItem {
    run.items()
        .iter()
        .find(|item| item.item.restaurant == restaurant && item.item.item_name == name)
        .expect("item present")
}

fn member_names(run: &MenuRun, kind: ProfileKind) -> Vec<&str> {
    run.profiles()
        .members(kind)
        .iter()
        .map(|&item| item.item.item_name.as_str())
        .collect()
}

fn spread_rows() -> &'static str {
    "Z,filler-1,Sides,300,5,12,4,2,20,600\n\
Z,filler-2,Sides,650,12,35,14,3,45,1400\n\
Z,filler-3,Drinks,180,1,0,0,0,40,50\n"
}

#[test]
fn sodium_in_grams_is_reconciled_to_milligrams() {
    let run = run_csv("X,A,Entrees,500,30,,4,5,10,1.2\n");

    let web = run.web_items();
    assert_eq!(web.len(), 1);
    assert_eq!(web[0].chain, "X");
    assert_eq!(web[0].name, "A");
    assert_eq!(web[0].sodium_mg, Some(1200.0));
    assert_eq!(web[0].protein_g, Some(30.0));
    assert_eq!(web[0].calories, 500.0);
}

#[test]
fn richest_duplicate_wins() {
    let run = run_csv(
        "Y,B,,400,20,,,,,\n\
Y,B,,400,20,10,,3,5,\n",
    );

    let web = run.web_items();
    assert_eq!(web.len(), 1);
    assert_eq!(web[0].fat_g, Some(10.0));
    assert_eq!(web[0].fiber_g, Some(3.0));
    assert_eq!(web[0].sugar_g, Some(5.0));
}

#[test]
fn cut_gate_accepts_and_rejects_by_protein_density() {
    let body = format!(
        "C,accept,Entrees,400,30,,3,,5,800\n\
C,reject,Entrees,400,20,,3,,5,800\n{}",
        spread_rows()
    );
    let run = run_csv(&body);

    assert_eq!(find(&run, "C", "accept").protein_per_100kcal, Some(7.5));
    let cut = run.profiles();
    let names: Vec<&str> = cut
        .members(ProfileKind::Cut)
        .iter()
        .map(|item| item.item.item_name.as_str())
        .collect();
    assert!(names.contains(&"accept"));
    assert!(!names.contains(&"reject"));
}

#[test]
fn bulk_gate_accepts_calorie_dense_item() {
    let body = format!("E,dense,Entrees,900,50,,15,,25,1500\n{}", spread_rows());
    let run = run_csv(&body);

    let profiles = run.profiles();
    assert!(profiles
        .members(ProfileKind::Bulk)
        .iter()
        .any(|item| item.item.item_name == "dense"));
    assert!(!profiles
        .members(ProfileKind::Cut)
        .iter()
        .any(|item| item.item.item_name == "dense"));
}

#[test]
fn more_protein_scores_at_least_as_high() {
    let run = run_csv(
        "F,high,Entrees,500,40,20,5,4,8,900\n\
F,low,Entrees,500,20,20,5,4,8,900\n",
    );

    assert!(find(&run, "F", "high").macro_score >= find(&run, "F", "low").macro_score);
}

#[test]
fn scores_cover_full_range_with_distinct_inputs() {
    let body = format!("C,accept,Entrees,400,30,,3,,5,800\n{}", spread_rows());
    let run = run_csv(&body);

    let scores: Vec<f64> = run.items().iter().map(|item| item.macro_score).collect();
    assert!(scores.iter().all(|score| (0.0..=100.0).contains(score)));
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(min.abs() < 1e-6);
    assert!((max - 100.0).abs() < 1e-6);
    assert!(!run.scoring().degenerate);
}

#[test]
fn identical_nutrition_gets_uniform_fallback_score() {
    let run = run_csv(
        "S,one,,500,30,20,5,4,8,900\n\
S,two,,500,30,20,5,4,8,900\n\
T,one,,500,30,20,5,4,8,900\n",
    );

    assert!(run.scoring().degenerate);
    assert!(run.items().iter().all(|item| item.macro_score == 50.0));
}

#[test]
fn empty_export_fails_with_schema_empty() {
    let error = MenuPipeline::new(PipelineTuning::default())
        .run_reader(format!("{HEADER}\n").as_bytes())
        .expect_err("empty export rejected");
    assert!(matches!(error, PipelineError::SchemaEmpty));
}

#[test]
fn missing_sugar_column_is_tolerated() {
    let csv = "restaurant,item_name,calories,protein,saturated_fat,sodium\n\
G,lean,400,30,3,800\n\
G,fatty,600,15,20,1000\n";

    let run = MenuPipeline::new(PipelineTuning::default())
        .run_reader(csv.as_bytes())
        .expect("runs without sugar");

    assert!(run.items().iter().all(|item| item.item.nutrients.sugar.is_none()));
    assert!(run
        .profiles()
        .members(ProfileKind::Cut)
        .iter()
        .any(|item| item.item.item_name == "lean"));
    assert!(run.web_items().iter().all(|item| item.sugar_g.is_none()));
}

#[test]
fn zero_calorie_rows_are_dropped() {
    let run = run_csv(
        "H,water,Drinks,0,0,0,0,0,0,0\n\
H,burger,Entrees,550,30,25,9,2,6,1000\n",
    );

    assert_eq!(run.items().len(), 1);
    assert_eq!(run.items()[0].item.item_name, "burger");
}

#[test]
fn negative_protein_is_erased_and_row_kept() {
    let run = run_csv(
        "N,odd,Entrees,450,-12,20,6,3,5,700\n\
N,fine,Entrees,450,25,20,6,3,5,700\n",
    );

    let odd = find(&run, "N", "odd");
    assert_eq!(odd.item.nutrients.protein, None);
    assert_eq!(odd.protein_per_100kcal, None);
    assert!(odd.macro_score.is_finite());
}

#[test]
fn output_pairs_are_unique_and_calories_positive() {
    let body = format!(
        "U,A,,400,30,,3,,5,800\n\
U,A,,400,30,10,3,2,5,800\n\
U,B,,0.4,1,,,,,\n\
V,A,,400,30,,3,,5,800\n{}",
        spread_rows()
    );
    let run = run_csv(&body);

    let mut seen = HashSet::new();
    for item in run.items() {
        assert!(seen.insert((item.item.restaurant.clone(), item.item.item_name.clone())));
        assert!(item.calories() >= 1.0);
        assert!(item.macro_score.is_finite());
    }
    assert_eq!(find(&run, "U", "A").item.nutrients.total_fat, Some(10.0));
}

#[test]
fn listings_cap_each_restaurant() {
    let mut body = String::new();
    for index in 0..12 {
        body.push_str(&format!(
            "L,item-{index},Entrees,{},35,10,3,4,5,800\n",
            400 + index * 10
        ));
    }
    body.push_str("M,solo,Entrees,450,35,10,3,4,5,800\n");
    body.push_str(spread_rows());
    let run = run_csv(&body);

    let listing = run.listing(ProfileKind::Cut);

    assert_eq!(listing.total_matches, 13);
    assert_eq!(listing.entries.len(), 11);
    assert_eq!(listing.restaurants(), vec!["L", "M"]);
    let l_scores: Vec<f64> = listing
        .entries
        .iter()
        .filter(|entry| entry.restaurant == "L")
        .map(|entry| entry.macro_score)
        .collect();
    assert!(l_scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn calorie_window_edges_are_inclusive() {
    let body = format!(
        "B,cut-floor,Entrees,250,25,,3,,5,400\n\
B,bulk-floor,Entrees,500,30,,10,,10,900\n\
B,bulk-ceiling,Entrees,1200,60,,10,,10,900\n\
B,bulk-over,Entrees,1201,60,,10,,10,900\n{}",
        spread_rows()
    );
    let run = run_csv(&body);

    assert!(member_names(&run, ProfileKind::Cut).contains(&"cut-floor"));
    let bulk = member_names(&run, ProfileKind::Bulk);
    assert!(bulk.contains(&"bulk-floor"));
    assert!(bulk.contains(&"bulk-ceiling"));
    assert!(!bulk.contains(&"bulk-over"));
}

#[test]
fn bulk_gate_counts_missing_fat_and_sugar_as_zero() {
    let body = format!(
        "K,bare,Entrees,800,45,,,,,900\n\
K,heavy,Entrees,800,45,,30,,60,900\n{}",
        spread_rows()
    );
    let run = run_csv(&body);

    let bulk = member_names(&run, ProfileKind::Bulk);
    assert!(bulk.contains(&"bare"));
    assert!(!bulk.contains(&"heavy"));
}

#[test]
fn undecodable_bytes_do_not_abort_the_run() {
    let mut csv = b"restaurant,item_name,item_description,calories,protein\n".to_vec();
    csv.extend_from_slice(b"X,A,Caf\xE9 wrap,500,30\n");
    csv.extend_from_slice(b"X,B,plain,400,20\n");

    let run = MenuPipeline::new(PipelineTuning::default())
        .run_reader(csv.as_slice())
        .expect("run survives a latin-1 byte");

    assert_eq!(run.items().len(), 2);
    assert_eq!(find(&run, "X", "B").calories(), 400.0);
    assert!(find(&run, "X", "A")
        .item
        .item_description
        .as_deref()
        .is_some_and(|text| text.starts_with("Caf")));
}

#[test]
fn workbook_source_runs_end_to_end() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("menu_sample.xlsx");

    let run = MenuPipeline::new(PipelineTuning::default())
        .run_path(&path)
        .expect("workbook runs");

    assert_eq!(run.items().len(), 3);
    let web = run.web_items();
    assert_eq!(web[0].chain, "X");
    assert_eq!(web[0].sodium_mg, Some(1200.0));
    assert_eq!(web[1].name, "Side Salad");
    assert_eq!(web[1].sodium_mg, None);
    assert!(run
        .profiles()
        .members(ProfileKind::Cut)
        .iter()
        .any(|item| item.item.item_name == "Grilled Chicken"));
}
