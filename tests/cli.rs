//! Command line tests that stop short of rendering, so they run without a GPU.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trendplot() -> Command {
  Command::cargo_bin("trendplot").unwrap()
}

#[test]
fn help_lists_every_chart() {
  trendplot()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("box-whisker"))
    .stdout(predicate::str::contains("search-trends"))
    .stdout(predicate::str::contains("trend"));
}

#[test]
fn missing_input_is_reported() {
  let dir = TempDir::new().unwrap();

  trendplot()
    .current_dir(dir.path())
    .args(["box-whisker", "does-not-exist.tsv"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to load does-not-exist.tsv"));
}

#[test]
fn more_titles_than_inputs_is_rejected() {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join("counts.tsv"), "1\t2\n5\t7\n").unwrap();

  trendplot()
    .current_dir(dir.path())
    .args(["box-whisker", "counts.tsv", "--title", "a", "--title", "b"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("got 2 titles for 1 inputs"));
}

#[test]
fn irregular_index_needs_an_explicit_period() {
  let dir = TempDir::new().unwrap();
  fs::write(
    dir.path().join("deaths.txt"),
    "Date Death\n2020-03-01 4\n2020-03-02 6\n2020-03-05 9\n2020-03-11 3\n",
  )
  .unwrap();

  trendplot()
    .current_dir(dir.path())
    .args(["trend", "deaths.txt"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("pass one explicitly"));
}

#[test]
fn components_are_written_before_rendering() {
  let dir = TempDir::new().unwrap();
  let mut text = String::from("Date Death\n");
  for day in 0..28 {
    text.push_str(&format!("2020-04-{:02} {}\n", day + 1, 20 + day % 7));
  }
  fs::write(dir.path().join("deaths.txt"), text).unwrap();

  // Rendering may fail on machines without a GPU adapter; the components
  // are written either way.
  trendplot()
    .current_dir(dir.path())
    .args(["trend", "deaths.txt", "--components", "components.csv", "-o", "trend.png"])
    .assert();

  let written = fs::read_to_string(dir.path().join("components.csv")).unwrap();
  assert!(written.starts_with("date,Death,trend,seasonal,resid"));
  assert_eq!(written.lines().count(), 29);
}
