//! Scenario loading, data-directory overrides and batch runs against real
//! files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use lineup_core::data::{BUILTIN_DOCTRINES, BUILTIN_UNIT_CATALOG};
use lineup_core::doctrine::DoctrineId;
use lineup_core::error::LineupError;
use lineup_core::target::Objective;
use lineup_test_utils::fixtures::{builtin_engine, demo_outpost};
use lineup_tools::batch::{run_batch, BatchConfig};
use lineup_tools::data::{load_engine_from_dir, DataLoadError, CATALOG_FILE, DOCTRINES_FILE};
use lineup_tools::scenario::{Scenario, ScenarioError};
use lineup_tools::validate::validate_data_directory;
use tempfile::TempDir;

fn shipped_scenario(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../scenarios")
        .join(name)
}

fn data_dir(catalog: &str, doctrines: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CATALOG_FILE), catalog).unwrap();
    fs::write(dir.path().join(DOCTRINES_FILE), doctrines).unwrap();
    dir
}

// =============================================================================
// Scenario Files
// =============================================================================

mod scenario_files {
    use super::*;

    #[test]
    fn test_shipped_demo_matches_fixture() {
        let scenario = Scenario::load(shipped_scenario("demo_outpost.ron")).unwrap();
        assert_eq!(scenario.name, "Demo outpost");
        assert_eq!(scenario.objective, Some(Objective::MaxWinChance));
        assert_eq!(scenario.extracted, demo_outpost());
    }

    #[test]
    fn test_shipped_json_scenario_loads() {
        let scenario = Scenario::load(shipped_scenario("vehicle_camp.json")).unwrap();
        assert_eq!(scenario.objective, Some(Objective::MinRepairTime));
        assert_eq!(scenario.options.cp_limit, Some(300));
        assert_eq!(scenario.extracted.target.terrain_tags, ["forest"]);
    }

    #[test]
    fn test_missing_file() {
        let err = Scenario::load("/no/such/scenario.ron").unwrap_err();
        assert!(matches!(err, ScenarioError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scenario.toml");
        fs::write(&path, "name = 'x'").unwrap();
        let err = Scenario::load(&path).unwrap_err();
        assert!(matches!(err, ScenarioError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_malformed_ron_and_json() {
        let dir = TempDir::new().unwrap();

        let ron_path = dir.path().join("bad.ron");
        fs::write(&ron_path, "Scenario(name: ").unwrap();
        assert!(matches!(
            Scenario::load(&ron_path).unwrap_err(),
            ScenarioError::ParseError(_)
        ));

        let json_path = dir.path().join("bad.json");
        fs::write(&json_path, r#"{"name": "x"}"#).unwrap();
        assert!(matches!(
            Scenario::load(&json_path).unwrap_err(),
            ScenarioError::JsonError(_)
        ));
    }

    #[test]
    fn test_unknown_objective_is_rejected() {
        let json = r#"{
            "name": "x",
            "objective": "max_fun",
            "extracted": { "target": { "type": "camp" } }
        }"#;
        assert!(Scenario::from_json_str(json).is_err());
    }
}

// =============================================================================
// Data Directory
// =============================================================================

mod data_directory {
    use super::*;

    const ONE_UNIT_CATALOG: &str = r#"
        UnitCatalog(units: [
            (
                key: "gdi_rifleman",
                name: "Rifleman Squad",
                faction: gdi,
                unit_type: infantry,
                cost: 10,
                armor: light,
                range: 2,
                speed: 4,
                economy_tier: cheap,
            ),
        ])
    "#;

    const BALANCED_ONLY: &str = r#"
        DoctrineTable(doctrines: [
            (
                id: balanced,
                name: "Balanced",
                soak_units: [],
                core_units: [],
                support_units: [],
                priorities: [],
            ),
        ])
    "#;

    #[test]
    fn test_copy_of_builtin_data_validates() {
        let dir = data_dir(BUILTIN_UNIT_CATALOG, BUILTIN_DOCTRINES);
        validate_data_directory(dir.path()).unwrap();

        let engine = load_engine_from_dir(dir.path()).unwrap();
        assert_eq!(engine.catalog().len(), builtin_engine().catalog().len());
    }

    #[test]
    fn test_doctrines_referencing_missing_units_fail_validation() {
        let dir = data_dir(ONE_UNIT_CATALOG, BUILTIN_DOCTRINES);

        // Loads fine; only validation looks across files.
        assert!(load_engine_from_dir(dir.path()).is_ok());

        let err = validate_data_directory(dir.path()).unwrap_err();
        match err {
            DataLoadError::Data(LineupError::ValidationFailed(problems)) => {
                assert!(problems.iter().any(|p| p.contains("nod_militant")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_incomplete_doctrine_table_fails_to_load() {
        let dir = data_dir(BUILTIN_UNIT_CATALOG, BALANCED_ONLY);
        let err = load_engine_from_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Data(LineupError::MissingDoctrine(_))
        ));
    }

    #[test]
    fn test_missing_catalog_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DOCTRINES_FILE), BUILTIN_DOCTRINES).unwrap();
        let err = load_engine_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::IoError(..)));
    }
}

// =============================================================================
// Batch Runs
// =============================================================================

mod batch {
    use super::*;

    fn scenario_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in ["demo_outpost.ron", "vehicle_camp.json"] {
            fs::copy(shipped_scenario(name), dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("broken.ron"), "not a scenario").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        dir
    }

    #[test]
    fn test_batch_sorted_by_file_name() {
        let dir = scenario_dir();
        let results = run_batch(&builtin_engine(), dir.path(), &BatchConfig::default()).unwrap();

        let files: Vec<&str> = results.entries.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(files, ["demo_outpost.ron", "vehicle_camp.json"]);
        assert_eq!(results.errors.len(), 1);
        assert_eq!(results.errors[0].file, "broken.ron");
    }

    #[test]
    fn test_batch_uses_scenario_settings() {
        let dir = scenario_dir();
        let results = run_batch(&builtin_engine(), dir.path(), &BatchConfig::default()).unwrap();

        let demo = &results.entries[0];
        assert_eq!(demo.doctrine, DoctrineId::AntiInfantry);
        assert_eq!(demo.cp_total, 355);
        assert_eq!(demo.risk, 46);
        assert!((demo.score - 100.0).abs() < f64::EPSILON);

        let camp = &results.entries[1];
        assert_eq!(camp.objective, Objective::MinRepairTime);
        assert_eq!(camp.doctrine, DoctrineId::AntiVehicle);
        assert_eq!(camp.cp_total, 225);
        // One cheap entry plus two vehicle counters.
        assert!((camp.score - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_batch_overrides() {
        let dir = scenario_dir();
        let config = BatchConfig {
            objective: Some(Objective::MaxWinChance),
            options: lineup_core::engine::EngineOptions::with_cp_limit(20),
        };
        let results = run_batch(&builtin_engine(), dir.path(), &config).unwrap();

        for entry in &results.entries {
            assert_eq!(entry.objective, Objective::MaxWinChance);
            assert!(entry.cp_total <= 20);
        }
    }

    #[test]
    fn test_batch_rejects_missing_directory() {
        let err = run_batch(
            &builtin_engine(),
            Path::new("/no/such/dir"),
            &BatchConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioError::FileNotFound(_)));
    }
}
