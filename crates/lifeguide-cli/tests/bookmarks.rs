//! Integration tests for bookmark commands and the offline bookmark cache.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{bookmark, can_bind_localhost, temp_home, unreachable_url, write_session};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_online_then_offline() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    write_session(home.path(), "tok");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bookmarks": [
            bookmark("t_cpr", Some("CPR Basics")),
            bookmark("t_gone", None)
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", home.path())
        .env("LIFEGUIDE_API_URL", server.uri())
        .args(["bookmarks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t_cpr  CPR Basics"))
        .stdout(predicate::str::contains("t_gone"))
        .stdout(predicate::str::contains("(offline)").not());

    // Server gone: the cached set is shown, minus entries without a topic.
    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", home.path())
        .env("LIFEGUIDE_API_URL", unreachable_url())
        .args(["bookmarks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(offline)"))
        .stdout(predicate::str::contains("t_cpr  CPR Basics"))
        .stdout(predicate::str::contains("t_gone").not());
}

#[tokio::test]
async fn test_add_then_offline_list_shows_last_cached_set() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    write_session(home.path(), "tok");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bookmarks": [
            bookmark("t_burns", Some("Treating Burns"))
        ]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/bookmarks"))
        .and(body_json(json!({"topic_id": "t_cpr"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookmark("t_cpr", None)))
        .expect(1)
        .mount(&server)
        .await;

    for args in [["bookmarks", "list"].as_slice(), &["bookmarks", "add", "t_cpr"]] {
        cargo_bin_cmd!("lifeguide")
            .env("LIFEGUIDE_HOME", home.path())
            .env("LIFEGUIDE_API_URL", server.uri())
            .args(args)
            .assert()
            .success();
    }

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", home.path())
        .env("LIFEGUIDE_API_URL", unreachable_url())
        .args(["bookmarks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t_burns"))
        .stdout(predicate::str::contains("t_cpr").not());
}

#[test]
fn test_offline_remove_fails_and_cache_keeps_entry() {
    let home = temp_home();
    write_session(home.path(), "tok");
    let cache = home.path().join("cache");
    std::fs::create_dir_all(&cache).unwrap();
    std::fs::write(
        cache.join("bookmarks.json"),
        json!({"bookmarks": [bookmark("t_cpr", Some("CPR Basics"))]}).to_string(),
    )
    .unwrap();

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", home.path())
        .env("LIFEGUIDE_API_URL", unreachable_url())
        .args(["bookmarks", "remove", "t_cpr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreachable"));

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", home.path())
        .env("LIFEGUIDE_API_URL", unreachable_url())
        .args(["bookmarks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t_cpr  CPR Basics"));
}

#[test]
fn test_bookmarks_require_login() {
    let home = temp_home();

    for args in [
        ["bookmarks", "list"].as_slice(),
        &["bookmarks", "add", "t_cpr"],
        &["bookmarks", "remove", "t_cpr"],
    ] {
        cargo_bin_cmd!("lifeguide")
            .env("LIFEGUIDE_HOME", home.path())
            .env("LIFEGUIDE_API_URL", unreachable_url())
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in."));
    }
}

#[tokio::test]
async fn test_rejected_session_hides_cached_bookmarks() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    write_session(home.path(), "tok-stale");
    let cache = home.path().join("cache");
    std::fs::create_dir_all(&cache).unwrap();
    std::fs::write(
        cache.join("bookmarks.json"),
        json!({"bookmarks": [bookmark("t_cpr", Some("CPR Basics"))]}).to_string(),
    )
    .unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", home.path())
        .env("LIFEGUIDE_API_URL", server.uri())
        .args(["bookmarks", "list"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("CPR Basics").not())
        .stderr(predicate::str::contains("Not logged in."));

    assert!(!home.path().join("session.json").exists());
}
