/// Tick file generation: layout, determinism and failure behaviour

use std::fs;

use tick_synth::config::ConfigError;
use tick_synth::protocol::price_to_cents;
use tick_synth::{generate, read_records, GenerateError, GeneratorConfig, Record, COLUMNS};

fn config_in(dir: &std::path::Path, ticks: i64, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        output_dir: dir.to_path_buf(),
        tick_count: ticks,
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn test_default_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path(), 1_000, 42);

    let report = generate(&config).unwrap();
    assert_eq!(report.path, tmp.path().join("synthetic_ticks.csv"));
    assert_eq!(report.records, 1_000);
    assert_eq!(report.seed, 42);

    let text = fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1_001);
    assert_eq!(lines[0], COLUMNS.join(","));

    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[2], "SYNTH");
        match fields[0] {
            "QUOTE" => {
                assert!(fields[3].is_empty() && fields[4].is_empty());
                assert!(fields[5..].iter().all(|f| !f.is_empty()));
            }
            "TRADE" => {
                assert!(!fields[3].is_empty() && !fields[4].is_empty());
                assert!(fields[5..].iter().all(|f| f.is_empty()));
            }
            other => panic!("unexpected row type {}", other),
        }
    }

    // no leftover partial file
    assert!(!tmp.path().join("synthetic_ticks.csv.partial").exists());
}

#[test]
fn test_output_reads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let report = generate(&config_in(tmp.path(), 2_000, 7)).unwrap();

    let records = read_records(fs::File::open(&report.path).unwrap()).unwrap();
    assert_eq!(records.len(), 2_000);
    assert!(records
        .windows(2)
        .all(|w| w[0].timestamp_ns() < w[1].timestamp_ns()));
    assert!(records[0].timestamp_ns() > config_in(tmp.path(), 1, 1).start_timestamp_ns);

    for record in &records {
        if let Record::Quote(q) = record {
            assert_eq!(price_to_cents(q.ask_price) - price_to_cents(q.bid_price), 2);
        }
    }
    assert_eq!(report.stats.total_records(), 2_000);
}

#[test]
fn test_fixed_seed_is_byte_identical() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();

    let first = generate(&config_in(a.path(), 3_000, 2024)).unwrap();
    let second = generate(&config_in(b.path(), 3_000, 2024)).unwrap();

    assert_eq!(fs::read(&first.path).unwrap(), fs::read(&second.path).unwrap());
}

#[test]
fn test_custom_symbol_and_name() {
    let tmp = tempfile::tempdir().unwrap();
    let config = GeneratorConfig {
        output_dir: tmp.path().join("nested").join("dir"),
        file_name: "x.csv".into(),
        symbol: "X".into(),
        tick_count: 1,
        seed: Some(1),
        ..Default::default()
    };

    let report = generate(&config).unwrap();
    assert_eq!(report.path, tmp.path().join("nested/dir/x.csv"));

    let records = read_records(fs::File::open(&report.path).unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].symbol(), "X");
}

#[test]
fn test_non_positive_ticks_rejected_before_output() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("never");

    for ticks in [0, -1] {
        let config = GeneratorConfig {
            output_dir: out_dir.clone(),
            tick_count: ticks,
            ..Default::default()
        };
        let result = generate(&config);
        assert!(matches!(
            result,
            Err(GenerateError::Config(ConfigError::InvalidTickCount(_)))
        ));
    }
    assert!(!out_dir.exists());
}

#[test]
fn test_write_failure_leaves_destination_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path(), 100, 3);
    let dest = config.output_path();

    fs::write(&dest, "previous contents").unwrap();
    // a directory where the partial file should go makes the create fail
    fs::create_dir(tmp.path().join("synthetic_ticks.csv.partial")).unwrap();

    let result = generate(&config);
    assert!(matches!(result, Err(GenerateError::Io { action: "create", .. })));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "previous contents");
}

#[test]
fn test_output_dir_is_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let config = config_in(&blocker, 10, 1);
    let result = generate(&config);
    assert!(matches!(result, Err(GenerateError::Io { .. })));
}

#[test]
fn test_config_file_drives_generation() {
    let tmp = tempfile::tempdir().unwrap();
    let toml_path = tmp.path().join("synth.toml");
    let out_dir = tmp.path().join("out");
    fs::write(
        &toml_path,
        format!(
            "output_dir = {:?}\ntick_count = 25\nsymbol = \"CFG\"\nseed = 5\n",
            out_dir.display().to_string()
        ),
    )
    .unwrap();

    let config = GeneratorConfig::load(toml_path.display().to_string()).unwrap();
    let report = generate(&config).unwrap();

    assert_eq!(report.records, 25);
    let records = read_records(fs::File::open(&report.path).unwrap()).unwrap();
    assert!(records.iter().all(|r| r.symbol() == "CFG"));
}

#[test]
fn test_bundled_config_matches_defaults() {
    let config = GeneratorConfig::load("synth.toml").unwrap();
    assert_eq!(config, GeneratorConfig::default());
}
