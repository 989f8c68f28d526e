//! Claim loading and rendering through the CLI crate

use std::path::PathBuf;

use domain_claims::{CheckKind, EngineConfig, RuleRegistry};
use interface_cli::error::CliError;
use interface_cli::load_claim;
use interface_cli::render::{render_json, render_text};
use test_utils::{ClaimFixtures, TemporalFixtures};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("claim-check-{}-{}.json", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_fixture_claim_from_file() {
    let claim = ClaimFixtures::bundled_chemotherapy();
    let path = write_temp("fixture", &serde_json::to_string(&claim).unwrap());

    let loaded = load_claim(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, claim);
}

#[test]
fn test_load_hand_written_claim() {
    let path = write_temp(
        "hand-written",
        r#"{
            "patient": { "name": "Sam Ortiz", "date_of_birth": "1981-02-09", "gender": "m" },
            "insurance": { "member_id": "U7781", "payer_id": "UHC", "payer_name": "UnitedHealthcare" },
            "provider": { "npi": "1234567893", "name": "Northside Clinic" },
            "date_of_service": "2024-05-30",
            "place_of_service": "11",
            "service_lines": [
                { "procedure_code": "99213", "diagnosis_codes": ["I10"], "charge_amount": "120.00" }
            ]
        }"#,
    );

    let claim = load_claim(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
    let report = registry.validate(&claim, TemporalFixtures::evaluation_time(), None);
    assert_eq!(report.score, 100);

    let text = render_text(&report, "WARNING");
    assert!(text.contains("Score: 100/100"));
}

#[test]
fn test_missing_file_is_read_error() {
    let err = load_claim(&PathBuf::from("/nonexistent/claim.json")).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let path = write_temp("malformed", "{ \"service_lines\": [ ");
    let err = load_claim(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, CliError::Parse { .. }));
    assert!(err.to_string().contains("not valid JSON"));
}

#[test]
fn test_filtered_json_report() {
    let registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
    let report = registry.validate(
        &ClaimFixtures::obstetric_conflict(),
        TemporalFixtures::evaluation_time(),
        Some(&[CheckKind::Bundling]),
    );

    let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["results"][0]["check_kind"], "ncci_edits");
    assert_eq!(json["results"][0]["denial_code"], "CO-97");
    assert_eq!(json["results"][0]["metadata"]["edit"]["edit"], "mutually_exclusive");
}
