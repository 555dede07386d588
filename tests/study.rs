mod common;

use approx::assert_relative_eq;
use common::{FakeNoise, FakeSolver, write_study};
use uam_trade_study::export::{REPORT_FILE, RESULTS_FILE, render_report};
use uam_trade_study::model::names::aircraft as av;
use uam_trade_study::model::{ModelKind, SubstitutionError};
use uam_trade_study::solver::SolveError;
use uam_trade_study::substitutions::ResolveError;
use uam_trade_study::units::Unit;
use uam_trade_study::{Study, StudyError, export_results};

const TWO_CONFIGS: &str = r#"
time_frame = "2025"
use_case = "Intra-City"
configurations = ["Lift + cruise", "Helicopter"]
"#;

fn study(body: &str) -> Study {
    let dir = tempfile::tempdir().expect("tempdir");
    Study::load(write_study(dir.path(), body)).expect("study loads")
}

#[test]
fn lift_cruise_problem_carries_the_table_row() {
    let study = study(TWO_CONFIGS);
    let problem = study.problem("Lift + cruise").unwrap();
    let get = |name: &str| {
        problem
            .substitutions()
            .get(&ModelKind::Aircraft.var(name))
            .copied()
            .unwrap()
    };
    assert_relative_eq!(get(av::EMPTY_MASS_FRACTION).value_si(), 0.53);
    assert_relative_eq!(
        get(av::V_CRUISE).value_in(Unit::MilePerHour).unwrap(),
        93.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(get(av::L_D_CRUISE).value_si(), 10.0);
    assert_relative_eq!(get(av::ROTORS_N).value_si(), 8.0);
    assert_eq!(
        problem.objective().to_string(),
        "OnDemandMissionCost.cost_per_trip"
    );
}

#[test]
fn validate_reports_complete_aircraft_sets() {
    let summaries = study(TWO_CONFIGS).validate().unwrap();
    assert_eq!(summaries.len(), 2);
    for summary in &summaries {
        assert!(summary.missing.is_empty(), "{:?}", summary.missing);
        assert!(summary.total_substitutions > summary.aircraft_substitutions);
    }
}

#[test]
fn unknown_configuration_fails_validation() {
    let study = study(r#"configurations = ["Hoverbike"]"#);
    match study.validate() {
        Err(StudyError::Resolve(ResolveError::UnknownConfiguration(name))) => {
            assert_eq!(name, "Hoverbike")
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn unknown_reserve_is_rejected_when_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_study(dir.path(), r#"reserve = "10-minute hop""#);
    let err = Study::load(path).unwrap_err();
    assert_eq!(err.to_string(), "Reserve type 10-minute hop not recognized.");
}

#[test]
fn overrides_reach_the_aircraft_and_are_capped() {
    let study = study(
        r#"
time_frame = "2025"
configurations = ["Helicopter"]

[overrides.Helicopter]
v_cruise_mph = 180.0
rotor_count = 2.0
"#,
    );
    let problem = study.problem("Helicopter").unwrap();
    let subs = problem.substitutions();
    let v = subs.get(&ModelKind::Aircraft.var(av::V_CRUISE)).unwrap();
    assert_relative_eq!(
        v.value_in(Unit::MilePerHour).unwrap(),
        150.0,
        max_relative = 1e-12
    );
    let n = subs.get(&ModelKind::Aircraft.var(av::ROTORS_N)).unwrap();
    assert_relative_eq!(n.value_si(), 2.0);
}

#[test]
fn run_collects_results_in_study_order() {
    let study = study(TWO_CONFIGS);
    let solver = FakeSolver::new(0.0);
    let table = study.run(&solver, Some(&FakeNoise)).unwrap();

    assert_eq!(
        table.configurations().collect::<Vec<_>>(),
        ["Lift + cruise", "Helicopter"]
    );
    assert_eq!(solver.seen.borrow().as_slice(), ["8@300", "1@300"]);
    let lift = table.get("Lift + cruise").unwrap();
    assert_eq!(lift.noise.unwrap().unweighted.spl_db, 68.0);
    assert_eq!(lift.noise.unwrap().a_weighted.spl_db, 63.0);

    let report = render_report(&table).unwrap();
    assert!(report.contains("Configuration\t\t\tLift + cruise\tHelicopter\tUnits"));
    assert!(report.contains("Max takeoff mass\t\t1800\t\t1800\t\tkg"));
}

#[test]
fn solver_failure_is_fatal_to_the_run() {
    let study = study(TWO_CONFIGS);
    let err = study.run(&FakeSolver::new(1_000.0), None).unwrap_err();
    match err {
        StudyError::Solve {
            configuration,
            source: SolveError::Infeasible(_),
        } => assert_eq!(configuration, "Lift + cruise"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn export_writes_report_and_sidecar() {
    let study = study(TWO_CONFIGS);
    let table = study.run(&FakeSolver::new(0.0), None).unwrap();
    let out = tempfile::tempdir().unwrap();
    let summary = export_results(out.path(), study.scenario(), &table, false).unwrap();

    assert!(summary.figures.is_empty());
    assert_eq!(summary.report_path, out.path().join(REPORT_FILE));
    let on_disk = std::fs::read_to_string(&summary.report_path).unwrap();
    assert_eq!(on_disk, summary.report);
    assert!(on_disk.contains("Hover SPL (unweighted)\t\tn/a\t\tn/a\t\tdimensionless"));

    let sidecar: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path().join(RESULTS_FILE)).unwrap())
            .unwrap();
    assert_eq!(sidecar["scenario"]["time_frame"], "2025");
    assert_eq!(sidecar["scenario"]["use_case"], "Intra-City");
    assert_eq!(sidecar["configurations"].as_array().unwrap().len(), 2);
}

#[test]
fn merged_problem_rejects_foreign_overrides() {
    let mut problem = study(TWO_CONFIGS).problem("Helicopter").unwrap();
    let err = problem
        .override_substitution("Elsewhere.x".parse().unwrap(), 1.0)
        .unwrap_err();
    assert!(matches!(err, SubstitutionError::UnknownModel { .. }));
}

#[test]
fn shipped_study_file_validates() {
    let study = Study::load("configs/study.toml").expect("configs/study.toml");
    assert_eq!(study.configurations().len(), 7);
    assert!(study.config().solver.is_some());
    assert!(study.validate().unwrap().iter().all(|s| s.missing.is_empty()));
}
