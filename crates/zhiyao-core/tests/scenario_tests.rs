//! End-to-end scenarios over JSON-loaded knowledge.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use zhiyao_core::{
    Catalog, Database, DbError, Drug, InteractionChecker, KnowledgeBase, LoadError, MedicationList,
    RiskLevel, RuleSet,
};

const DRUGS: &str = r#"[
    {"id": "A", "name": "Aspirin"},
    {"id": "B", "name": "Warfarin"},
    {"id": "C", "name": "Ibuprofen"}
]"#;

const INTERACTIONS: &str = r#"[
    {"drugs": ["A", "B"], "risk_level": "red", "description": "bleeding risk"}
]"#;

fn write_files(drugs: &str, interactions: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let drugs_path = dir.path().join("drugs.json");
    let interactions_path = dir.path().join("interactions.json");
    fs::write(&drugs_path, drugs).unwrap();
    fs::write(&interactions_path, interactions).unwrap();
    (dir, drugs_path, interactions_path)
}

fn triggered(kb: &KnowledgeBase, list: &MedicationList) -> Vec<String> {
    kb.checker()
        .check(list)
        .into_iter()
        .map(|rule| rule.description.clone())
        .collect()
}

#[test]
fn test_add_remove_scenario() {
    let (_dir, drugs, interactions) = write_files(DRUGS, INTERACTIONS);
    let kb = KnowledgeBase::load(&drugs, &interactions).unwrap();
    let catalog = kb.catalog();
    let mut list = MedicationList::new();

    assert!(triggered(&kb, &list).is_empty());

    list.add(catalog.find_by_id("A").unwrap().clone());
    assert!(triggered(&kb, &list).is_empty());

    list.add(catalog.find_by_id("B").unwrap().clone());
    assert_eq!(triggered(&kb, &list), vec!["bleeding risk"]);

    list.add(catalog.find_by_id("C").unwrap().clone());
    assert_eq!(triggered(&kb, &list), vec!["bleeding risk"]);

    assert!(list.remove("A").is_some());
    assert!(triggered(&kb, &list).is_empty());
}

#[test]
fn test_round_trip_find_by_id() {
    let (_dir, drugs, _) = write_files(DRUGS, INTERACTIONS);
    let catalog = Catalog::load(&drugs).unwrap();
    let source: Vec<Drug> = serde_json::from_str(DRUGS).unwrap();

    assert_eq!(catalog.len(), source.len());
    for drug in &source {
        let found = catalog.find_by_id(&drug.id).unwrap();
        assert_eq!(found, drug);
        assert_eq!(found.name, drug.name);
    }
}

#[test]
fn test_missing_file_fails() {
    let (dir, drugs, _) = write_files(DRUGS, INTERACTIONS);
    let missing = dir.path().join("nope.json");

    let result = KnowledgeBase::load(&drugs, &missing);
    match result {
        Err(LoadError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_malformed_drugs_fail() {
    let (_dir, drugs, interactions) =
        write_files(r#"[{"id": "A", "name": "Aspirin"}, {"name": "No id"}]"#, INTERACTIONS);

    assert!(matches!(
        KnowledgeBase::load(&drugs, &interactions),
        Err(LoadError::Malformed { .. })
    ));
}

#[test]
fn test_truncated_interactions_fail() {
    let (_dir, drugs, interactions) = write_files(DRUGS, r#"[{"drugs": ["A", "B"], "risk_"#);

    assert!(matches!(
        RuleSet::load(&interactions),
        Err(LoadError::Malformed { .. })
    ));
    assert!(KnowledgeBase::load(&drugs, &interactions).is_err());
}

#[test]
fn test_json_to_sqlite_to_check() {
    let (dir, drugs, interactions) = write_files(DRUGS, INTERACTIONS);
    let kb = KnowledgeBase::load(&drugs, &interactions).unwrap();

    let db_path = dir.path().join("zhiyao.db");
    Database::open(&db_path).unwrap().import_knowledge(&kb).unwrap();

    let reloaded = Database::open_existing(&db_path)
        .unwrap()
        .load_knowledge()
        .unwrap();
    let list: MedicationList = ["A", "B"]
        .iter()
        .map(|id| reloaded.catalog().find_by_id(id).unwrap().clone())
        .collect();

    let found = InteractionChecker::new(reloaded.rules()).check(&list);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].risk_level, RiskLevel::Red);
}

#[test]
fn test_missing_database_fails_without_creating_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("typo.db");

    let result = Database::open_existing(&missing)
        .map_err(LoadError::from)
        .and_then(|db| db.load_knowledge());

    assert!(matches!(
        result,
        Err(LoadError::Database(DbError::NotFound(_)))
    ));
    assert!(!missing.exists());
}

#[test]
fn test_sample_data_loads() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let kb = KnowledgeBase::load(root.join("drugs.json"), root.join("interactions.json")).unwrap();

    assert!(!kb.catalog().is_empty());
    assert!(!kb.rules().is_empty());
    assert!(kb.dangling_drug_ids().is_empty());
}
