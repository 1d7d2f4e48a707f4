use std::path::Path;

use docsieve_core::config::{Config, ReportFormat};
use docsieve_core::report;
use docsieve_core::Validator;
use docsieve_loader::DirectoryLoader;

fn shipped_config() -> Config {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
    let content = std::fs::read_to_string(path).unwrap();
    toml::from_str(&content).unwrap()
}

#[test]
fn shipped_config_matches_defaults() {
    let config = shipped_config();
    assert_eq!(config, Config::default());
    config.validate().unwrap();
}

#[tokio::test]
async fn text_report_for_mixed_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let good = "Extraction produced clean prose with sentences, commas, and periods. ".repeat(3);
    std::fs::write(dir.path().join("01_good.txt"), &good).unwrap();
    std::fs::write(dir.path().join("02_noise.txt"), "=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=").unwrap();
    std::fs::write(dir.path().join("03_blank.txt"), "").unwrap();
    let wall = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor ".repeat(6);
    std::fs::write(dir.path().join("04_wall.txt"), wall).unwrap();

    let config = Config::default();
    let docs = DirectoryLoader::with_defaults(&config.loader.glob, config.loader.max_file_size)
        .load_all(dir.path())
        .await
        .unwrap();
    assert_eq!(docs.len(), 4);

    let outcome = Validator::from_config(&config).validate(docs.as_slice());
    let text = report::render(&outcome, ReportFormat::Text).unwrap();

    assert!(text.contains("  Count : 4\n"));
    assert!(text.contains("1 chunks have low entropy (< 2.5). Example indices: [1]"));
    assert!(text.contains("[WARN] 1 chunks are empty or near-empty (< 5 chars). Example indices: [2]"));
    assert!(text.contains("1 chunks are long but have almost no punctuation."));
    assert!(text.contains("Example indices: [3]"));

    let shown = report::render_inspection(&docs, &[1]);
    assert!(shown.contains("02_noise.txt"));
}

#[tokio::test]
async fn json_report_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..4 {
        std::fs::write(dir.path().join(format!("page_{i}.txt")), "Running header").unwrap();
    }

    let docs = DirectoryLoader::default().load_all(dir.path()).await.unwrap();
    let outcome = Validator::default().validate(docs.as_slice());
    let json = report::render(&outcome, ReportFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["status"], "completed");
    assert_eq!(value["duplicates"]["groups_over_threshold"], 1);
    assert_eq!(value["duplicates"]["top"][0]["count"], 4);
    assert_eq!(value["lengths"]["very_short"]["count"], 4);
}
