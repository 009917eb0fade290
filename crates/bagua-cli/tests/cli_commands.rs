//! Integration tests for the `bagua` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small content library.
fn content_file() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("content.json");
    fs::write(
        &path,
        r#"[
    {
        "number": 1,
        "name": "Qian",
        "coreViewpoint": "Sustained initiative",
        "summary": "Creative force in motion.",
        "mentalModels": "First principles",
        "keywords": ["strength", "leadership"]
    },
    {
        "number": 2,
        "name": "Kun",
        "coreViewpoint": "Receptive support",
        "keywords": "devotion"
    }
]"#,
    )
    .unwrap();
    (dir, path)
}

fn bagua() -> Command {
    Command::cargo_bin("bagua").unwrap()
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_by_number() {
    bagua()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1 Qian (The Creative)")
                .and(predicate::str::contains("line 1 -> ䷫ 44 Gou"))
                .and(predicate::str::contains("heaven"))
                .and(predicate::str::contains("completeness of the natural number system")),
        );
}

#[test]
fn show_by_name() {
    bagua()
        .args(["show", "tai"])
        .assert()
        .success()
        .stdout(predicate::str::contains("11 Tai (Peace)"));
}

#[test]
fn show_rejects_unknown_hexagram() {
    bagua()
        .args(["show", "65"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid hexagram number: 65"));

    bagua()
        .args(["show", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hexagram not found"));
}

#[test]
fn show_with_content() {
    let (_dir, path) = content_file();
    bagua()
        .args(["show", "1", "--content", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sustained initiative")
                .and(predicate::str::contains("strength, leadership")),
        );
}

#[test]
fn show_json() {
    let output = bagua().args(["show", "2", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["hexagram"]["number"], 2);
    assert_eq!(value["hexagram"]["lines"], serde_json::json!([0, 0, 0, 0, 0, 0]));
    assert!(value["content"].is_null());
    assert_eq!(value["combinations"]["concrete"], "Boolean algebra and logic circuits");
}

// ---------------------------------------------------------------------------
// table
// ---------------------------------------------------------------------------

#[test]
fn table_check_passes() {
    bagua()
        .args(["table", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("384 entries"));
}

#[test]
fn table_json_has_every_entry() {
    let output = bagua().args(["table", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value.as_object().unwrap();
    assert_eq!(rows.len(), 64);
    assert_eq!(value["1"]["1"], 44);
    assert_eq!(value["1"]["6"], 43);
    assert_eq!(value["2"]["1"], 24);
}

#[test]
fn table_grid() {
    bagua()
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wei Ji").and(predicate::str::contains("line 6")));
}

// ---------------------------------------------------------------------------
// trigrams, policy, links
// ---------------------------------------------------------------------------

#[test]
fn trigrams_per_model() {
    bagua()
        .args(["trigrams", "--model", "concrete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("golden ratio").and(predicate::str::contains("<->")));

    bagua()
        .arg("trigrams")
        .assert()
        .success()
        .stdout(predicate::str::contains("natural numbers"));
}

#[test]
fn trigrams_analysis_reports_coverage() {
    bagua()
        .args(["trigrams", "--analysis"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("coverage: 24/64 pairs (37.5%)")
                .and(predicate::str::contains("open:     40 pairs")),
        );

    let output = bagua()
        .args(["trigrams", "--model", "concrete", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["covered"], 19);
    assert_eq!(value["open_combinations"].as_array().unwrap().len(), 45);
}

#[test]
fn trigrams_rejects_unknown_model() {
    bagua()
        .args(["trigrams", "--model", "poetic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown model"));
}

#[test]
fn policy_single_count() {
    bagua()
        .args(["policy", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upper_line"));
}

#[test]
fn policy_table_and_bounds() {
    bagua()
        .arg("policy")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("base_only")
                .and(predicate::str::contains("base_and_result"))
                .and(predicate::str::contains("result_centric")),
        );

    bagua()
        .args(["policy", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid changing-line count"));
}

#[test]
fn links_for_one_hexagram() {
    bagua()
        .args(["links", "64"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("63 Ji Ji")
                .and(predicate::str::contains("35 Jin"))
                .and(predicate::str::contains("1 Qian")),
        );
}

#[test]
fn links_from_replacement_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("links.json");
    fs::write(&good, r#"{"5": [6]}"#).unwrap();
    bagua()
        .args(["links", "--file", good.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 hexagrams with links"));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"5": [5]}"#).unwrap();
    bagua()
        .args(["links", "--file", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("links to itself"));
}

// ---------------------------------------------------------------------------
// cast
// ---------------------------------------------------------------------------

#[test]
fn cast_chains_after_first() {
    bagua()
        .args(["cast", "--seed", "7", "-n", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Cast 1")
                .and(predicate::str::contains("(fresh)"))
                .and(predicate::str::contains("Cast 3"))
                .and(predicate::str::contains("(chained)")),
        );
}

#[test]
fn cast_json_links_bases() {
    let output = bagua()
        .args(["cast", "--seed", "42", "-n", "4", "--method", "coins", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let casts: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(casts.len(), 4);
    assert_eq!(casts[0]["cast"]["mode"], "fresh");
    for pair in casts.windows(2) {
        assert_eq!(pair[1]["cast"]["base"], pair[0]["cast"]["result"]);
        assert_eq!(pair[1]["cast"]["mode"], "chained");
    }
}

#[test]
fn cast_is_reproducible_with_seed() {
    let run = || {
        bagua()
            .args(["cast", "--seed", "99", "-n", "5", "--json"])
            .output()
            .unwrap()
    };
    let a: serde_json::Value = serde_json::from_slice(&run().stdout).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&run().stdout).unwrap();
    for i in 0..5 {
        assert_eq!(a[i]["cast"], b[i]["cast"]);
    }
}

#[test]
fn cast_prints_prompt() {
    let (_dir, path) = content_file();
    bagua()
        .args(["cast", "--seed", "3", "--prompt", "--content", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Base hexagram:")
                .and(predicate::str::contains("Guideline:"))
                .and(predicate::str::contains("Focus:")),
        );
}

#[test]
fn cast_rejects_zero_count() {
    bagua()
        .args(["cast", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value '0'"));
}

#[test]
fn cast_rejects_unknown_method() {
    bagua()
        .args(["cast", "--method", "yarrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown draw method"));
}

#[test]
fn cast_rejects_malformed_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    bagua()
        .args(["cast", "--content", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed content data"));
}

// ---------------------------------------------------------------------------
// session
// ---------------------------------------------------------------------------

#[test]
fn session_cast_status_reset() {
    bagua()
        .args(["session", "--seed", "11"])
        .write_stdin("cast\ncast\nstatus\nlog md\nreset\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Cast 2")
                .and(predicate::str::contains("casts:    2"))
                .and(predicate::str::contains("# Divination Log"))
                .and(predicate::str::contains("Session reset"))
                .and(predicate::str::contains("none (next cast is fresh)"))
                .and(predicate::str::contains("Goodbye!")),
        );
}

#[test]
fn session_help_lists_every_command() {
    bagua()
        .arg("session")
        .write_stdin("help\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("  help  ")
                .and(predicate::str::contains("  log [md|text]"))
                .and(predicate::str::contains("  quit  ")),
        );
}

#[test]
fn session_reports_unknown_commands() {
    bagua()
        .arg("session")
        .write_stdin("prompt\nfly\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("nothing cast yet")
                .and(predicate::str::contains("unknown command: fly")),
        );
}

// ---------------------------------------------------------------------------
// transform
// ---------------------------------------------------------------------------

#[test]
fn transform_by_number() {
    bagua()
        .args(["transform", "1", "--lines", "1,2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1 Qian (The Creative)")
                .and(predicate::str::contains("33 Dun (Retreat)"))
                .and(predicate::str::contains("changing:  1, 2"))
                .and(predicate::str::contains("upper_line"))
                .and(predicate::str::contains("line 2 of hexagram 1"))
                .and(predicate::str::contains("explore the result, 33")),
        );
}

#[test]
fn transform_from_trigrams() {
    bagua()
        .args(["transform", "--upper", "water", "--lower", "4", "--lines", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 Zhun")
                .and(predicate::str::contains("24 Fu (Return)"))
                .and(predicate::str::contains("single_line"))
                .and(predicate::str::contains("line 5 leads to 24")),
        );
}

#[test]
fn transform_without_lines_keeps_base() {
    bagua()
        .args(["transform", "li"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("changing:  none")
                .and(predicate::str::contains("base_only"))
                .and(predicate::str::contains("result:    ䷝ 30 Li")),
        );
}

#[test]
fn transform_to_target_steps_through_each_line() {
    let output = bagua()
        .args(["transform", "1", "--to", "2", "--steps", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["cast"]["mode"], "chosen");
    assert_eq!(value["cast"]["result"], 2);
    assert_eq!(value["cast"]["changing"], serde_json::json!([1, 2, 3, 4, 5, 6]));
    let steps = value["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 6);
    assert_eq!(steps[0]["line"], 1);
    assert_eq!(steps[0]["hexagram"], 44);
    assert_eq!(steps[5]["hexagram"], 2);
}

#[test]
fn transform_steps_follow_typed_order() {
    bagua()
        .args(["transform", "1", "--lines", "6,1", "--steps"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("line 6 -> ䷪ 43 Guai")
                .and(predicate::str::contains("line 1 -> ")),
        );
}

#[test]
fn transform_rejects_bad_input() {
    bagua()
        .args(["transform", "1", "--lines", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid line position: 7"));

    bagua()
        .args(["transform", "1", "--lines", "2,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2 listed twice"));

    bagua()
        .args(["transform", "--upper", "cloud", "--lower", "earth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown trigram: \"cloud\""));

    bagua().arg("transform").assert().failure();

    bagua()
        .args(["transform", "1", "--upper", "water", "--lower", "fire"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_content() {
    let (_dir, path) = content_file();
    bagua()
        .args(["search", "devotion", "--content", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Kun")
                .and(predicate::str::contains("1 match"))
                .and(predicate::str::contains("1 matches").not()),
        );

    bagua()
        .args(["search", "water", "--content", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hexagrams mention"));
}
