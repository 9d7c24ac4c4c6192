use std::fs;
use std::path::Path;

use tempfile::tempdir;
use trail_replay::replay::error::{LoadError, StoreError};
use trail_replay::replay::grid::Grid;
use trail_replay::replay::store::{discover, iteration_number, load_dir, LoadOptions, Snapshot, SnapshotStore};

fn write_snapshot(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn snapshot(iteration: u64) -> Snapshot {
    Snapshot {
        iteration,
        grid: Grid::from_rows(&[vec![0.0]]).unwrap(),
    }
}

#[test]
fn test_iteration_number_from_file_name() {
    assert_eq!(iteration_number(Path::new("iter_050.csv")), Some(50));
    assert_eq!(iteration_number(Path::new("dir/iter_000.csv")), Some(0));
    assert_eq!(iteration_number(Path::new("run_7_iter_12.csv")), Some(12));
    assert_eq!(iteration_number(Path::new("iter_final.csv")), None);
    assert_eq!(iteration_number(Path::new("iter_.csv")), None);
    assert_eq!(iteration_number(Path::new("iter_-5.csv")), None);
}

#[test]
fn test_store_sorts_by_iteration() {
    let store = SnapshotStore::new(vec![snapshot(50), snapshot(5), snapshot(100)]).unwrap();
    assert_eq!(store.count(), 3);
    assert_eq!(store.iterations().collect::<Vec<_>>(), vec![5, 50, 100]);
}

#[test]
fn test_store_rejects_empty_and_duplicates() {
    assert!(matches!(SnapshotStore::new(Vec::new()), Err(LoadError::EmptySequence)));
    assert!(matches!(
        SnapshotStore::new(vec![snapshot(3), snapshot(3)]),
        Err(LoadError::DuplicateIteration { iteration: 3 })
    ));
}

#[test]
fn test_store_get_out_of_range_fails() {
    let store = SnapshotStore::new(vec![snapshot(1), snapshot(2)]).unwrap();
    assert_eq!(store.get(1).unwrap().iteration, 2);
    assert_eq!(
        store.get(2).unwrap_err(),
        StoreError::IndexOutOfRange { index: 2, len: 2 }
    );
}

#[test]
fn test_load_dir_orders_by_iteration() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "iter_50.csv", "0,0\n0,0\n");
    write_snapshot(dir.path(), "iter_5.csv", "-1,0.5\n0,-2\n");
    write_snapshot(dir.path(), "iter_100.csv", "1,1\n1,1\n");
    write_snapshot(dir.path(), "notes.txt", "ignored");

    let store = load_dir(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(store.iterations().collect::<Vec<_>>(), vec![5, 50, 100]);
}

#[test]
fn test_load_dir_transposes_by_default() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "iter_000.csv", "0,0,0\n-1,-1,-1\n");

    let store = load_dir(dir.path(), &LoadOptions::default()).unwrap();
    let grid = &store.get(0).unwrap().grid;
    assert_eq!((grid.width(), grid.height()), (2, 3));

    let options = LoadOptions {
        transpose: false,
        ..LoadOptions::default()
    };
    let store = load_dir(dir.path(), &options).unwrap();
    let grid = &store.get(0).unwrap().grid;
    assert_eq!((grid.width(), grid.height()), (3, 2));
}

#[test]
fn test_missing_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("visualizacao");
    let err = load_dir(&missing, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingDirectory(_)));
    let msg = err.to_string();
    assert!(msg.contains("visualizacao"));
    assert!(msg.contains("simulation engine"));
}

#[test]
fn test_empty_directory_is_fatal() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "readme.md", "nothing here");
    let err = load_dir(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::NoSnapshots { .. }));
    assert!(err.to_string().contains("iter_*.csv"));
}

#[test]
fn test_unparseable_iteration_token_is_fatal() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "iter_1.csv", "0\n");
    write_snapshot(dir.path(), "iter_last.csv", "0\n");
    assert!(matches!(
        discover(dir.path(), &LoadOptions::default()),
        Err(LoadError::BadIterationToken(_))
    ));
}

#[test]
fn test_duplicate_iteration_on_disk_is_fatal() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "iter_7.csv", "0\n");
    write_snapshot(dir.path(), "iter_007.csv", "0\n");
    assert!(matches!(
        load_dir(dir.path(), &LoadOptions::default()),
        Err(LoadError::DuplicateIteration { iteration: 7 })
    ));
}

#[test]
fn test_malformed_grid_names_the_file() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "iter_2.csv", "0,0\n0\n");
    let err = load_dir(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("iter_2.csv"));
}
