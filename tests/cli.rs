use assert_cmd::prelude::*;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

fn token_expiring_in(seconds: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = json!({ "sub": "admin", "exp": Utc::now().timestamp() + seconds });
    let body = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

fn write_session(dir: &Path, role: &str) -> PathBuf {
    let path = dir.join("session.json");
    let user = json!({ "id": 1, "username": "admin", "role": role }).to_string();
    let contents = json!({ "token": token_expiring_in(3600), "user": user });
    fs::write(&path, contents.to_string()).expect("failed to write session");
    path
}

/// Command pointed at a throwaway config and session file
fn folioctl(temp: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folioctl"));
    cmd.arg("--config")
        .arg(temp.path().join("config.yaml"))
        .arg("--session")
        .arg(temp.path().join("session.json"))
        .env_remove("FOLIO_CONFIG")
        .env_remove("FOLIO_SESSION")
        .env_remove("FOLIO_FORMAT")
        .env_remove("FOLIO_API_HOST")
        .env_remove("FOLIO_LANG")
        .env_remove("FOLIO_PASSWORD");
    cmd
}

#[test]
fn status_without_session_reports_signed_out() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    let assert = folioctl(&temp).arg("status").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Not signed in"));
    assert!(stdout.contains("http://localhost:8080/api"));
    assert!(stdout.contains(&temp.path().join("config.yaml").to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_json_reports_admin_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_session(temp.path(), "ADMIN");

    let assert = folioctl(&temp)
        .args(["--format", "json", "status"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["data"]["session"]["admin"], json!(true));
    assert_eq!(value["data"]["session"]["state"], json!("authenticated"));
    assert_eq!(value["data"]["session"]["user"]["username"], json!("admin"));

    Ok(())
}

#[test]
fn expired_session_is_wiped_on_start() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let path = temp.path().join("session.json");
    let user = json!({ "username": "admin", "role": "ADMIN" }).to_string();
    let contents = json!({ "token": token_expiring_in(-60), "user": user });
    fs::write(&path, contents.to_string())?;

    folioctl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));

    let saved = fs::read_to_string(&path).unwrap_or_default();
    assert!(!saved.contains("token"));

    Ok(())
}

#[test]
fn logout_clears_session_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let path = write_session(temp.path(), "ADMIN");

    folioctl(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    let saved = fs::read_to_string(&path).unwrap_or_default();
    assert!(!saved.contains("token"));
    assert!(!saved.contains("user"));

    // Second logout is a no-op
    folioctl(&temp).arg("logout").assert().success();

    Ok(())
}

#[test]
fn admin_command_without_session_asks_for_login() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    folioctl(&temp)
        .args(["admin", "list", "skills"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("folioctl login"))
        .stderr(predicate::str::contains("/admin/skills"));

    Ok(())
}

#[test]
fn non_admin_session_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_session(temp.path(), "USER");

    folioctl(&temp)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("admin privileges"));

    Ok(())
}

#[test]
fn update_collection_entry_requires_id() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_session(temp.path(), "ADMIN");

    folioctl(&temp)
        .args(["admin", "update", "skills", "--data", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("An entry ID is required"));

    Ok(())
}

#[test]
fn config_set_persists_and_show_reads_back() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    folioctl(&temp)
        .args(["config", "set", "locale", "en"])
        .assert()
        .success();
    folioctl(&temp)
        .args(["config", "set", "max_retries", "4"])
        .assert()
        .success();

    let saved = fs::read_to_string(temp.path().join("config.yaml"))?;
    assert!(saved.contains("locale: en"));
    assert!(saved.contains("max_retries: 4"));

    let assert = folioctl(&temp)
        .args(["--format", "json", "config", "show"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&assert.get_output().stdout))?;
    assert_eq!(value["data"]["locale"], json!("en"));
    assert_eq!(value["data"]["preferences"]["max_retries"], json!(4));

    Ok(())
}

#[test]
fn config_set_rejects_bad_format() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    folioctl(&temp)
        .args(["config", "set", "format", "yaml"])
        .assert()
        .failure();
    assert!(!temp.path().join("config.yaml").exists());

    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    folioctl(&temp)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folioctl"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_stores_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let token = token_expiring_in(3600);

    let _login = server
        .mock("POST", "/api/auth/login")
        .match_body(mockito::Matcher::Json(
            json!({ "username": "admin", "password": "admin123" }),
        ))
        .with_status(200)
        .with_body(
            json!({
                "token": token,
                "type": "Bearer",
                "id": 1,
                "username": "admin",
                "email": "admin@example.com",
                "role": "ADMIN"
            })
            .to_string(),
        )
        .create();

    let temp = tempdir()?;
    folioctl(&temp)
        .args(["--api-host", server.url().as_str()])
        .args(["login", "-u", "admin", "-p", "admin123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as"));

    let saved = fs::read_to_string(temp.path().join("session.json"))?;
    assert!(saved.contains(&token));
    assert!(saved.contains("admin@example.com"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn failed_login_keeps_no_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create();

    let temp = tempdir()?;
    folioctl(&temp)
        .args(["--api-host", server.url().as_str()])
        .args(["login", "-u", "admin", "-p", "wrong"])
        .assert()
        .failure();

    let saved = fs::read_to_string(temp.path().join("session.json")).unwrap_or_default();
    assert!(!saved.contains("token"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn admin_list_renders_entries() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _skills = server
        .mock("GET", "/api/v1/admin/skills")
        .match_header("authorization", mockito::Matcher::Regex("^Bearer ".to_string()))
        .with_status(200)
        .with_body(r#"[{"id":4,"name":"Rust","category":"Backend","proficiencyLevel":90}]"#)
        .create();

    let temp = tempdir()?;
    write_session(temp.path(), "ADMIN");

    let assert = folioctl(&temp)
        .args(["--api-host", server.url().as_str(), "--format", "json"])
        .args(["admin", "list", "skills"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Rust"));
    assert!(stdout.contains("\"meta\""));
    assert!(!stdout.contains("\"error\""));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn dashboard_failure_renders_fallback_and_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _stats = server
        .mock("GET", "/api/v1/admin/dashboard/stats")
        .with_status(500)
        .with_body(r#"{"message":"boom"}"#)
        .create();

    let temp = tempdir()?;
    write_session(temp.path(), "ADMIN");

    let assert = folioctl(&temp)
        .args(["--api-host", server.url().as_str(), "--format", "json"])
        .arg("dashboard")
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["data"]["totalProjects"], json!(0));
    assert!(value["meta"]["error"].is_string());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn unauthorized_response_ends_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _messages = server
        .mock("GET", "/api/v1/admin/messages")
        .with_status(401)
        .create();

    let temp = tempdir()?;
    let session_path = write_session(temp.path(), "ADMIN");

    folioctl(&temp)
        .args(["--api-host", server.url().as_str()])
        .args(["messages", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("folioctl login"));

    let saved = fs::read_to_string(session_path).unwrap_or_default();
    assert!(!saved.contains("token"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn forbidden_admin_list_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _skills = server
        .mock("GET", "/api/v1/admin/skills")
        .with_status(403)
        .with_body(r#"{"message":"Access denied"}"#)
        .create();

    let temp = tempdir()?;
    let session_path = write_session(temp.path(), "ADMIN");

    let assert = folioctl(&temp)
        .args(["--api-host", server.url().as_str(), "--format", "json"])
        .args(["admin", "list", "skills"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("admin privileges"));

    assert!(assert.get_output().stdout.is_empty());
    // A refusal is not a logout
    let saved = fs::read_to_string(session_path)?;
    assert!(saved.contains("token"));

    Ok(())
}
