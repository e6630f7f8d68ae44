//! End-to-end checks of the benchmark scenarios.

use deltablue_constraint::{Diagnostic, Planner, Strength, VariableId};
use deltablue_scenarios::{
    chain_test, chain_test_at, change, projection_test, projection_test_at, run, Projection,
    ScenarioConfig, ScenarioError, CHAIN_STEPS,
};
use proptest::prelude::*;

fn value(planner: &Planner, v: VariableId) -> f64 {
    planner.value(v).unwrap()
}

#[test]
fn test_chain_of_ten() {
    let planner = chain_test(10).unwrap();
    assert!(planner.diagnostics().is_empty());
    for i in 0..10 {
        assert_eq!(value(&planner, VariableId(i)), (CHAIN_STEPS - 1) as f64);
    }
}

#[test]
fn test_projection_of_five_step_by_step() {
    let mut planner = Planner::new();
    let p = Projection::build(&mut planner, 5).unwrap();
    let last = 4;

    change(&mut planner, p.src[last], 17.0, 10).unwrap();
    assert_eq!(value(&planner, p.dst[last]), 1170.0);

    change(&mut planner, p.dst[last], 1050.0, 10).unwrap();
    assert_eq!(value(&planner, p.src[last]), 5.0);

    change(&mut planner, p.scale, 5.0, 10).unwrap();
    for i in 0..last {
        assert_eq!(value(&planner, p.dst[i]), i as f64 * 5.0 + 1000.0);
    }
    assert_eq!(value(&planner, p.dst[last]), 1025.0);

    change(&mut planner, p.offset, 2000.0, 10).unwrap();
    for i in 0..last {
        assert_eq!(value(&planner, p.dst[i]), i as f64 * 5.0 + 2000.0);
    }
    assert_eq!(value(&planner, p.dst[last]), 2025.0);

    assert!(p.check_consistent(&planner, "final").is_ok());
    assert!(planner.diagnostics().is_empty());
}

#[test]
fn test_projection_of_five() {
    let planner = projection_test(5).unwrap();
    assert!(planner.diagnostics().is_empty());
}

#[test]
fn test_strong_preferred_edits() {
    let planner = chain_test_at(10, Strength::StrongPreferred).unwrap();
    assert!(planner.diagnostics().is_empty());
    let planner = projection_test_at(5, Strength::StrongPreferred, 3).unwrap();
    assert!(planner.diagnostics().is_empty());
}

#[test]
fn test_removed_edit_hands_back_to_stay() {
    let mut planner = Planner::new();
    let p = Projection::build(&mut planner, 3).unwrap();

    // While the edit holds dst, the src stay is displaced.
    let edit = planner.add_edit(p.dst[2], Strength::Preferred).unwrap();
    let stay = planner.variable(p.src[2]).unwrap().constraints()[0];
    assert!(!planner.constraint(stay).unwrap().is_satisfied());

    planner.destroy_constraint(edit).unwrap();
    assert!(planner.constraint(stay).unwrap().is_satisfied());
    assert_eq!(
        planner.variable(p.src[2]).unwrap().determined_by(),
        Some(stay)
    );
}

#[test]
fn test_conflicting_required_edit_is_diagnosed() {
    let mut planner = Planner::new();
    let p = Projection::build(&mut planner, 1).unwrap();
    planner.add_stay(p.dst[0], Strength::Required).unwrap();

    // The pinned dst now drives src through the required scale.
    let edit = planner.add_edit(p.src[0], Strength::Required).unwrap();
    assert_eq!(
        planner.diagnostics(),
        &[Diagnostic::RequiredUnsatisfiable { constraint: edit }]
    );
}

#[test]
fn test_config_file_drives_run() {
    let path = std::env::temp_dir().join(format!("deltablue-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "chain_length = 8\nprojection_size = 3\nwarmup_rounds = 0\nrounds = 1\nchange_repeat = 2\n",
    )
    .unwrap();

    let config = ScenarioConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.chain_length, 8);

    let report = run(&config).unwrap();
    assert_eq!(report.timing("chain").unwrap().runs, 1);
    assert_eq!(report.timing("projection").unwrap().runs, 1);
}

#[test]
fn test_invalid_config_surfaces_as_scenario_error() {
    let config = ScenarioConfig::new().with_projection_size(0);
    assert!(matches!(run(&config), Err(ScenarioError::Config(_))));
}

proptest! {
    #[test]
    fn prop_chain_of_any_length(n in 1usize..40) {
        let planner = chain_test(n).unwrap();
        prop_assert!(planner.diagnostics().is_empty());
        prop_assert_eq!(planner.value(VariableId(n - 1)), Some((CHAIN_STEPS - 1) as f64));
    }

    #[test]
    fn prop_projection_of_any_size(n in 1usize..20) {
        prop_assert!(projection_test(n).is_ok());
    }
}
