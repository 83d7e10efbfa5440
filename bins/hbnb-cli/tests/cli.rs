//! CLI surface smoke tests (no network)

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("hbnb")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("places"))
        .stdout(predicate::str::contains("bookings"));
}

#[test]
fn places_requires_an_action() {
    Command::cargo_bin("hbnb")
        .unwrap()
        .arg("places")
        .assert()
        .failure();
}
