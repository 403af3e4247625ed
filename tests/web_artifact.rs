use macro_menu::menu::{MenuPipeline, PipelineTuning};
use serde_json::Value;
use std::fs;

const EXPORT: &str = "\
restaurant,item_name,food_category,menu_item_id,calories,protein,carbohydrates,total_fat,saturated_fat,trans_fat,cholesterol,dietary_fiber,sugar,sodium
X,A,Entrees,1,500,30,40,18,4,0,80,5,10,1.2
Y,B,Entrees,2,400,20,,,,,,,,
Y,B,Entrees,3,400,20,35,10,3,0,60,3,5,700
Z,Salad,Sides,4,250,9,20,14,2,0,15,6,7,430
Z,Shake,Drinks,5,820,18,120,28,17,1,95,1,98,390
";

const WEB_KEYS: [&str; 13] = [
    "chain",
    "name",
    "food_category",
    "calories",
    "protein_g",
    "carbs_g",
    "fat_g",
    "fiber_g",
    "sugar_g",
    "satfat_g",
    "trans_fat",
    "cholesterol",
    "sodium_mg",
];

fn pipeline() -> MenuPipeline {
    MenuPipeline::new(PipelineTuning::default())
}

fn records(bytes: &[u8]) -> Vec<serde_json::Map<String, Value>> {
    let document: Value = serde_json::from_slice(bytes).expect("artifact is json");
    document
        .as_array()
        .expect("artifact is an array")
        .iter()
        .map(|record| record.as_object().expect("record is an object").clone())
        .collect()
}

#[test]
fn repeated_runs_produce_identical_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    pipeline()
        .run_reader(EXPORT.as_bytes())
        .expect("first run")
        .write_artifact(&first)
        .expect("first write");
    pipeline()
        .run_reader(EXPORT.as_bytes())
        .expect("second run")
        .write_artifact(&second)
        .expect("second write");

    assert_eq!(
        fs::read(&first).expect("read first"),
        fs::read(&second).expect("read second")
    );
}

#[test]
fn records_carry_exactly_the_web_keys() {
    let run = pipeline().run_reader(EXPORT.as_bytes()).expect("run");
    let records = records(&run.render_artifact().expect("render"));

    assert_eq!(records.len(), 4);
    for record in &records {
        let mut keys: Vec<&str> = record.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected = WEB_KEYS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    let first = &records[0];
    assert_eq!(first["chain"], "X");
    assert_eq!(first["name"], "A");
    assert_eq!(first["sodium_mg"].as_f64(), Some(1200.0));
    assert_eq!(first["protein_g"].as_f64(), Some(30.0));
}

#[test]
fn missing_values_are_written_as_null() {
    let export = "restaurant,item_name,calories,protein\nQ,plain,300,12\nQ,other,450,25\n";
    let run = pipeline().run_reader(export.as_bytes()).expect("run");
    let records = records(&run.render_artifact().expect("render"));

    let plain = &records[0];
    assert_eq!(plain["name"], "plain");
    assert!(plain["food_category"].is_null());
    assert!(plain["sodium_mg"].is_null());
    assert!(plain["carbs_g"].is_null());
    assert_eq!(plain["calories"].as_f64(), Some(300.0));
}

#[test]
fn rebuilt_artifact_replaces_previous_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data").join("items_for_web.json");

    let summary = pipeline()
        .run_reader(EXPORT.as_bytes())
        .expect("run")
        .write_artifact(&path)
        .expect("write into fresh directory");
    assert_eq!(summary.rows_scored, 4);
    assert_eq!(summary.artifact_path.as_deref(), Some(path.as_path()));

    let smaller = "restaurant,item_name,calories,protein\nQ,plain,300,12\n";
    pipeline()
        .run_reader(smaller.as_bytes())
        .expect("rerun")
        .write_artifact(&path)
        .expect("replace artifact");

    let records = records(&fs::read(&path).expect("read artifact"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["chain"], "Q");

    let leftovers: Vec<_> = fs::read_dir(path.parent().expect("parent"))
        .expect("list data dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.path() != path)
        .collect();
    assert!(leftovers.is_empty());
}
