//! End-to-end journeys against the scripted site
//!
//! These run the full suite over `MockDriver`, exercising the same
//! orchestration the CLI uses against Chromium.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use onboard_probe::{
    scripted_site, Flavor, Journey, JourneyTrace, LocatorOptions, MockDriver, MockLauncher,
    ProbeError, ScenarioStatus, Selector, Session, Suite, SuiteConfig,
};
use std::sync::Arc;

fn fast_config() -> SuiteConfig {
    SuiteConfig {
        base_url: "https://commerceos.test/registration/".to_string(),
        wait_timeout_ms: 200,
        action_timeout_ms: 100,
        poll_interval_ms: 5,
        ..SuiteConfig::default()
    }
}

fn count(history: &[String], entry: &str) -> usize {
    history.iter().filter(|h| h.as_str() == entry).count()
}

// ============================================================================
// Full suite
// ============================================================================

#[tokio::test]
async fn test_both_flavors_pass() {
    let config = fast_config();
    let launcher = MockLauncher::scripted(&config);
    let suite = Suite::new(config, &[]).unwrap();

    let report = suite.run(&launcher).await;

    assert!(report.all_passed(), "{report:#?}");
    let names: Vec<&str> = report.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["fashion journey", "santander journey"]);
}

#[tokio::test]
async fn test_launch_and_quit_exactly_once() {
    let config = fast_config();
    let launcher = MockLauncher::scripted(&config);
    let suite = Suite::new(config, &[]).unwrap();

    let _ = suite.run(&launcher).await;

    assert_eq!(launcher.launches(), 1);
    assert_eq!(launcher.driver().quit_count(), 1);
    assert_eq!(launcher.driver().history().last().map(String::as_str), Some("quit"));
}

#[tokio::test]
async fn test_santander_activates_get_started_twice() {
    let config = fast_config();
    let launcher = MockLauncher::scripted(&config);
    let suite = Suite::new(config, &[Flavor::Santander]).unwrap();

    let report = suite.run(&launcher).await;

    assert!(report.all_passed(), "{report:#?}");
    let history = launcher.driver().history();
    assert_eq!(
        count(&history, "click:css=button.welcome-screen-content-button"),
        2
    );
    assert_eq!(count(&history, "click:css=#mat-option-1"), 1);
}

#[tokio::test]
async fn test_fashion_never_touches_industry() {
    let config = fast_config();
    let launcher = MockLauncher::scripted(&config);
    let suite = Suite::new(config, &[Flavor::Fashion]).unwrap();

    let report = suite.run(&launcher).await;

    assert!(report.all_passed(), "{report:#?}");
    let history = launcher.driver().history();
    assert!(!history.iter().any(|h| h.contains("mat-autocomplete-trigger")));
    assert_eq!(
        count(&history, "click:css=button.welcome-screen-content-button"),
        1
    );
}

#[tokio::test]
async fn test_registration_typed_in_order() {
    let config = fast_config();
    let launcher = MockLauncher::scripted(&config);
    let suite = Suite::new(config, &[Flavor::Fashion]).unwrap();

    let _ = suite.run(&launcher).await;

    let typed: Vec<String> = launcher
        .driver()
        .history()
        .into_iter()
        .filter(|h| h.starts_with("type:"))
        .collect();
    assert_eq!(
        typed[..5],
        [
            r#"type:css=input[formcontrolname="firstName"]=Saurav"#.to_string(),
            r#"type:css=input[formcontrolname="lastName"]=Kumar"#.to_string(),
            r#"type:css=input[formcontrolname="email"]=saurav222@gmail.com"#.to_string(),
            r#"type:css=input[formcontrolname="password"]=Jxcvbnmlk@1"#.to_string(),
            r#"type:css=input[formcontrolname="confirmPass"]=Jxcvbnmlk@1"#.to_string(),
        ]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_tile_fails_assertion() {
    let config = fast_config();
    let launcher = MockLauncher::scripted(&config);
    // the site shows every default tile; demand one more
    let mut data = Flavor::Fashion.default_data();
    let mut tiles: Vec<String> = Flavor::Fashion
        .expected_tiles()
        .iter()
        .map(|t| (*t).to_string())
        .collect();
    tiles.insert(2, "Marketing".to_string());
    data.expected_tiles = Some(tiles);

    let session = Session::open(&launcher, config.locator_options()).await.unwrap();
    let journey = Journey::new(Flavor::Fashion, &config.base_url, data).unwrap();
    let mut trace = JourneyTrace::default();
    let err = journey
        .run(&session.context(config.wait_options()), &mut trace)
        .await
        .unwrap_err();

    match err {
        ProbeError::AssertionFailed { message } => assert!(message.contains("Marketing")),
        other => panic!("unexpected error {other}"),
    }
    // everything but the tile assertion completed
    assert_eq!(trace.len(), journey.plan().unwrap().len() - 1);
}

#[tokio::test]
async fn test_removed_tile_fails_suite_but_quits() {
    let config = fast_config();
    let site = scripted_site(&config);
    let driver = Arc::new(site);
    let launcher = MockLauncher::new(Arc::clone(&driver));
    let mut config = config;
    let mut data = Flavor::Santander.default_data();
    data.expected_tiles = Some(vec!["Point of Sale".to_string(), "Studio".to_string()]);
    let _ = config.journeys.insert(Flavor::Santander, data);
    let suite = Suite::new(config, &[Flavor::Santander]).unwrap();

    let report = suite.run(&launcher).await;

    assert_eq!(report.failed_count(), 1);
    let outcome = &report.scenarios[0];
    assert_eq!(outcome.status, ScenarioStatus::Failed);
    assert_eq!(outcome.error_kind.as_deref(), Some("assertion_failed"));
    assert_eq!(driver.quit_count(), 1);
}

#[tokio::test]
async fn test_unreachable_page_times_out() {
    let launcher = MockLauncher::new(Arc::new(MockDriver::new()));
    let suite = Suite::new(fast_config(), &[Flavor::Fashion]).unwrap();

    let report = suite.run(&launcher).await;

    let outcome = &report.scenarios[0];
    assert_eq!(outcome.error_kind.as_deref(), Some("timeout"));
    assert!(outcome
        .error
        .as_deref()
        .unwrap()
        .contains("first name input"));
    assert_eq!(launcher.driver().quit_count(), 1);
}

#[tokio::test]
async fn test_disabled_submit_is_not_interactable() {
    let config = fast_config();
    let driver = Arc::new(scripted_site(&config));
    driver.disable(Selector::css("button.signup-button"));
    let launcher = MockLauncher::new(Arc::clone(&driver));
    let suite = Suite::new(config, &[Flavor::Fashion]).unwrap();

    let report = suite.run(&launcher).await;

    let outcome = &report.scenarios[0];
    assert_eq!(outcome.error_kind.as_deref(), Some("element_not_interactable"));
    assert!(outcome
        .completed_steps
        .iter()
        .any(|s| s.starts_with("fill registration")));
    assert_eq!(driver.quit_count(), 1);
}

#[tokio::test]
async fn test_launch_failure_runs_nothing() {
    let launcher = MockLauncher::failing("chromium not found");
    let suite = Suite::new(fast_config(), &[]).unwrap();

    let report = suite.run(&launcher).await;

    assert!(!report.all_passed());
    assert!(report
        .scenarios
        .iter()
        .all(|s| s.status == ScenarioStatus::Skipped));
    assert!(launcher.driver().history().is_empty());
}

#[tokio::test]
async fn test_screens_shared_across_scenarios() {
    let config = fast_config();
    let launcher = MockLauncher::scripted(&config);
    let session = Session::open(&launcher, LocatorOptions::default()).await.unwrap();
    let ctx = session.context(config.wait_options());

    for flavor in Flavor::ALL {
        let journey = Journey::with_defaults(flavor, &config.base_url).unwrap();
        let mut trace = JourneyTrace::default();
        journey.run(&ctx, &mut trace).await.unwrap();
    }
    session.quit().await.unwrap();
    assert_eq!(launcher.driver().quit_count(), 1);
}
