//! HabPlan Headless Harness
//!
//! Validates the layout engine and backend collaborators end to end,
//! entirely in-process — no UI, no file I/O, no networking.
//!
//! Usage:
//!   cargo run -p habplan-simtest
//!   cargo run -p habplan-simtest -- --verbose

use habplan_logic::catalog::{required_total_m2, ZoneType, CATALOG_SIZE};
use habplan_logic::habitat::{validate_config, HabitatConfig};
use habplan_logic::scoring::{aggregate_by_type, constraints_summary, mission_score};
use habplan_logic::session::DesignSession;
use habplan_logic::zone::ZoneFit;
use habplan_server::identity::{AuthError, IdentityService, MemoryUserRepo};
use habplan_server::store::{save_design, DesignStore, MemoryStore};
use serde_json::json;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== HabPlan Headless Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog integrity
    results.extend(validate_catalog(verbose));

    // 2. Session + scoring sweep
    results.extend(validate_design_flow(verbose));

    // 3. Design store flow
    results.extend(validate_store_flow(verbose));

    // 4. Identity flow
    results.extend(validate_identity_flow(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(_verbose: bool) -> Vec<TestResult> {
    println!("--- Zone Catalog ---");
    let mut results = Vec::new();

    results.push(check(
        "catalog_size",
        ZoneType::all().len() == CATALOG_SIZE,
        format!("{} zone types", ZoneType::all().len()),
    ));

    let bad_area: Vec<_> = ZoneType::all()
        .into_iter()
        .filter(|t| t.min_area_m2() <= 0.0)
        .collect();
    results.push(check(
        "catalog_positive_minimums",
        bad_area.is_empty(),
        format!("{} types with non-positive minimum", bad_area.len()),
    ));

    results.push(check(
        "catalog_required_total",
        required_total_m2() == 138.0,
        format!("required total {} m²", required_total_m2()),
    ));

    let roundtrip_ok = (0..CATALOG_SIZE as u8)
        .all(|i| ZoneType::from_u8(i).map(|t| t as u8) == Some(i));
    results.push(check(
        "catalog_id_roundtrip",
        roundtrip_ok && ZoneType::from_u8(CATALOG_SIZE as u8).is_none(),
        "u8 ids roundtrip, out-of-range rejected".to_string(),
    ));

    results
}

// ── 2. Session + scoring ────────────────────────────────────────────────

fn validate_design_flow(verbose: bool) -> Vec<TestResult> {
    println!("--- Design Flow ---");
    let mut results = Vec::new();

    let config = HabitatConfig::default();
    results.push(check(
        "default_config_valid",
        validate_config(&config).is_empty(),
        format!(
            "volume {:.1} m³, floor area {:.1} m²",
            config.total_volume_m3(),
            config.total_floor_area_m2()
        ),
    ));

    let floor = config.total_floor_area_m2();
    let mut session = DesignSession::with_seed(config, 42);

    // Empty design scores zero.
    let empty = mission_score(session.zones(), floor);
    results.push(check(
        "empty_design_scores_zero",
        empty.score == 0,
        format!("score {}", empty.score),
    ));

    // The worked example: one 300×300 sleep zone against a 300 m² habitat.
    let id = session.add_zone(ZoneType::Sleep);
    session.resize_zone(id, 300.0, 300.0);
    let zone = &session.zones()[0];
    results.push(check(
        "worked_example_zone_ok",
        zone.area_m2() == 400.0 && zone.status() == ZoneFit::Ok,
        format!("{} m², status {:?}", zone.area_m2(), zone.status()),
    ));

    let breakdown = mission_score(session.zones(), floor);
    if verbose {
        println!(
            "    coverage {} efficiency {} compliance {}",
            breakdown.coverage, breakdown.efficiency, breakdown.compliance
        );
    }
    results.push(check(
        "worked_example_score",
        breakdown.score == 64,
        format!("score {} (expected 64)", breakdown.score),
    ));

    // Aggregate policy: an undersized storage zone warns, an absent type
    // errors. 50×50 px ≈ 11 m² against the 20 m² storage minimum.
    let sid = session.add_zone(ZoneType::Storage);
    session.resize_zone(sid, 50.0, 50.0);
    let storage = aggregate_by_type(session.zones(), ZoneType::Storage);
    let command = aggregate_by_type(session.zones(), ZoneType::Command);
    results.push(check(
        "aggregate_policy",
        storage.status == ZoneFit::Warning && command.status == ZoneFit::Error,
        format!("storage {:?}, command {:?}", storage.status, command.status),
    ));

    let summary = constraints_summary(session.zones());
    results.push(check(
        "missing_types_tracked",
        summary.missing_types.len() == 8,
        format!("{} types missing", summary.missing_types.len()),
    ));

    results
}

// ── 3. Design store ─────────────────────────────────────────────────────

fn validate_store_flow(_verbose: bool) -> Vec<TestResult> {
    println!("--- Design Store ---");
    let mut results = Vec::new();

    let mut store = MemoryStore::new();
    let mut session = DesignSession::with_seed(HabitatConfig::default(), 7);
    session.add_zone(ZoneType::Sleep);
    session.add_zone(ZoneType::Food);

    let payload = match serde_json::to_value(session.snapshot()) {
        Ok(v) => v,
        Err(e) => {
            results.push(check("snapshot_serializes", false, e.to_string()));
            return results;
        }
    };

    let saved = save_design(&mut store, &payload);
    results.push(check(
        "save_accepts_valid_payload",
        matches!(&saved, Ok(outcome) if outcome.habitat.id == 1),
        format!("{:?}", saved.as_ref().map(|o| o.message)),
    ));

    let rejected = save_design(&mut store, &json!({ "config": {} }));
    results.push(check(
        "save_rejects_missing_zones",
        matches!(&rejected, Err(e) if e.is_client_error()),
        format!("{:?}", rejected.as_ref().err().map(|e| e.to_string())),
    ));

    let listed = store.list_all();
    results.push(check(
        "list_returns_only_accepted",
        matches!(&listed, Ok(records) if records.len() == 1 && records[0].snapshot.zones.len() == 2),
        format!("{} records", listed.map(|r| r.len()).unwrap_or(0)),
    ));

    results
}

// ── 4. Identity ─────────────────────────────────────────────────────────

fn validate_identity_flow(_verbose: bool) -> Vec<TestResult> {
    println!("--- Identity ---");
    let mut results = Vec::new();

    let mut svc = IdentityService::with_seed(MemoryUserRepo::new(), 42);

    let signup = svc.signup("Ada", "ada@example.com", "hunter2");
    results.push(check(
        "signup_succeeds",
        signup.is_ok(),
        format!("{:?}", signup.as_ref().map(|g| g.user.id)),
    ));

    let duplicate = svc.signup("Eve", "ada@example.com", "other");
    results.push(check(
        "duplicate_email_rejected",
        duplicate.as_ref().err() == Some(&AuthError::EmailTaken),
        format!("{:?}", duplicate.err()),
    ));

    let bad_login = svc.login("ada@example.com", "wrong");
    results.push(check(
        "wrong_password_rejected",
        bad_login.as_ref().err() == Some(&AuthError::WrongPassword),
        format!("{:?}", bad_login.err()),
    ));

    let login = svc.login("ada@example.com", "hunter2");
    let profile = login
        .as_ref()
        .ok()
        .map(|grant| svc.profile(Some(grant.token.as_str())));
    results.push(check(
        "login_then_profile",
        matches!(&profile, Some(Ok(p)) if p.email == "ada@example.com"),
        format!("{profile:?}"),
    ));

    let no_token = svc.profile(None);
    results.push(check(
        "profile_requires_token",
        no_token.as_ref().err() == Some(&AuthError::MissingToken),
        format!("{:?}", no_token.err()),
    ));

    results
}
