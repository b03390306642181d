use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::{ExpenseError, Result},
    utils::write_atomic,
};

use super::{Snapshot, SnapshotStore, SNAPSHOT_SCHEMA_VERSION};

/// Stores the snapshot as pretty-printed JSON at a single file path.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        load_snapshot_from_path(&self.path)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        save_snapshot_to_path(snapshot, &self.path)
    }
}

/// Writes the snapshot by staging to a sibling temp file and renaming it over `path`.
/// Snapshots with non-finite numbers are refused before anything is written.
pub fn save_snapshot_to_path(snapshot: &Snapshot, path: &Path) -> Result<()> {
    snapshot.validate()?;
    let json = serde_json::to_string_pretty(snapshot)?;
    write_atomic(path, &json)
}

pub fn load_snapshot_from_path(path: &Path) -> Result<Option<Snapshot>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let snapshot: Snapshot = serde_json::from_str(&data)?;
    if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
        return Err(ExpenseError::Storage(format!(
            "snapshot `{}` uses schema v{}, newer than supported v{}",
            path.display(),
            snapshot.schema_version,
            SNAPSHOT_SCHEMA_VERSION
        )));
    }
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::tmp_path;
    use crate::domain::{Expense, ExpenseEntry};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        Snapshot::new(
            vec![
                ExpenseEntry::new(Expense::new(500.0, "Food", date, "Lunch")),
                ExpenseEntry::new(Expense::new(-20.0, "", date, "")),
            ],
            750.0,
        )
    }

    #[test]
    fn missing_file_loads_as_none() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonSnapshotStore::new(temp.path().join("absent.json"));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonSnapshotStore::new(temp.path().join("expenses.json"));
        let snapshot = sample_snapshot();
        store.save(&snapshot).expect("save snapshot");
        let loaded = store.load().expect("load").expect("snapshot present");
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn save_creates_parent_directories_and_leaves_no_temp_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("deeper").join("expenses.json");
        let store = JsonSnapshotStore::new(&path);
        store.save(&Snapshot::default()).expect("save snapshot");
        assert!(path.exists());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn non_finite_values_are_refused_and_previous_file_kept() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("expenses.json");
        let store = JsonSnapshotStore::new(&path);
        let snapshot = sample_snapshot();
        store.save(&snapshot).expect("save snapshot");

        let bad_budget = Snapshot::new(snapshot.expenses.clone(), f64::INFINITY);
        assert!(matches!(
            store.save(&bad_budget),
            Err(ExpenseError::InvalidInput(_))
        ));

        let mut bad_amount = snapshot.clone();
        bad_amount.expenses[1].expense =
            bad_amount.expenses[1].expense.clone().with_amount(f64::NAN);
        match store.save(&bad_amount) {
            Err(ExpenseError::InvalidInput(message)) => {
                assert!(message.contains("position 1"), "unexpected error: {message}")
            }
            other => panic!("expected invalid input, got {other:?}"),
        }

        assert_eq!(store.load().expect("load"), Some(snapshot));
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn newer_schema_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("future.json");
        let snapshot = Snapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION + 1,
            ..Snapshot::default()
        };
        fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let err = JsonSnapshotStore::new(&path)
            .load()
            .expect_err("future schema should fail");
        match err {
            ExpenseError::Storage(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not valid").unwrap();
        assert!(JsonSnapshotStore::new(&path).load().is_err());
    }
}
