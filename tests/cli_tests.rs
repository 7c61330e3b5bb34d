//! Integration tests for the travel binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use tempfile::tempdir;

const FOUR_CYCLE: &str = "4\nA B 1\nB C 2\nC D 1\nD A 4\n";

fn travel() -> Command {
    let mut cmd = cargo_bin_cmd!("travel");
    cmd.env_remove("RUST_LOG").env_remove("TRAVEL_LOG");
    cmd
}

fn roads(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roads.txt");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_help() {
    travel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("route"))
        .stdout(predicate::str::contains("walk"));
}

#[test]
fn test_vertices_in_id_order() {
    let (_dir, path) = roads(FOUR_CYCLE);
    travel()
        .arg(&path)
        .arg("vertices")
        .assert()
        .success()
        .stdout("A\nB\nC\nD\n");
}

#[test]
fn test_route_prints_distance() {
    let (_dir, path) = roads(FOUR_CYCLE);
    travel()
        .arg(&path)
        .args(["route", "A", "C"])
        .assert()
        .success()
        .stdout("3.00\n");
}

#[test]
fn test_route_with_path() {
    let (_dir, path) = roads(FOUR_CYCLE);
    travel()
        .arg(&path)
        .args(["route", "A", "C", "--path"])
        .assert()
        .success()
        .stdout("3.00\nA -> B -> C\n");
}

#[test]
fn test_route_unreachable_fails() {
    let (_dir, path) = roads("5\nA B 1\nB C 2\nC D 1\nE E 0\n");
    travel()
        .arg(&path)
        .args(["route", "A", "E"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot go from A to E"));
}

#[test]
fn test_unknown_location_fails() {
    let (_dir, path) = roads(FOUR_CYCLE);
    travel()
        .arg(&path)
        .args(["route", "A", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"Z\" does not exist"));
}

#[test]
fn test_distances_marks_unreachable() {
    let (_dir, path) = roads("3\nA B 1.5\nC C 0\n");
    travel()
        .arg(&path)
        .args(["distances", "A"])
        .assert()
        .success()
        .stdout("A\t0.00\nB\t1.50\nC\tinf\n");
}

#[test]
fn test_graph_prints_adjacency() {
    let (_dir, path) = roads("2\nA B 1\n");
    travel()
        .arg(&path)
        .arg("graph")
        .assert()
        .success()
        .stdout("[0-A]: (1-B, 1.00), \n[1-B]: (0-A, 1.00), \n");
}

#[test]
fn test_walk_to_destination() {
    let (_dir, path) = roads(FOUR_CYCLE);
    travel()
        .arg(&path)
        .args(["walk", "A", "C"])
        .write_stdin("2\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("RECOMMENDED MOVE: B"))
        .stdout(predicate::str::contains("YOU MADE IT."))
        .stdout(predicate::str::contains("Total Distance: 3.00"));
}

#[test]
fn test_walk_give_up() {
    let (_dir, path) = roads(FOUR_CYCLE);
    travel()
        .arg(&path)
        .args(["walk", "A", "C"])
        .write_stdin("7\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid move. Try again"))
        .stdout(predicate::str::contains("Thank you for traveling!"));
}

#[test]
fn test_hash_choice_does_not_change_answers() {
    let (_dir, path) = roads(FOUR_CYCLE);
    for hash in ["naive", "weighted"] {
        travel()
            .arg(&path)
            .args(["route", "B", "D", "--hash", hash, "--buckets", "1"])
            .assert()
            .success()
            .stdout("3.00\n");
    }
}

#[test]
fn test_missing_file_fails() {
    let dir = tempdir().unwrap();
    travel()
        .arg(dir.path().join("nope.txt"))
        .arg("vertices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_malformed_line_reports_line_number() {
    let (_dir, path) = roads("2\nA B 1\nB C\n");
    travel()
        .arg(&path)
        .arg("vertices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let (_dir, path) = roads(FOUR_CYCLE);
    travel()
        .arg(&path)
        .args(["--verbose", "vertices"])
        .assert()
        .success()
        .stdout("A\nB\nC\nD\n")
        .stderr(predicate::str::contains("road map built"));
}

#[test]
fn test_header_mismatch_warns() {
    let (_dir, path) = roads("1\nA B 1\n");
    travel()
        .arg(&path)
        .arg("vertices")
        .assert()
        .success()
        .stdout("A\nB\n")
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn test_huge_header_is_advisory() {
    let (_dir, path) = roads("1000000000000000000\nA B 1\n");
    travel()
        .arg(&path)
        .args(["route", "A", "B"])
        .assert()
        .success()
        .stdout("1.00\n")
        .stderr(predicate::str::contains("does not match"));
}
