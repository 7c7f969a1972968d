use fastq_pairs::group::{
    collect_fastq_files_by_directory, find_grouped_fastq_files, find_r1_fastq_files,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn make_tree(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
    }
    dir
}

#[test]
fn finds_r1_files_recursively() {
    let dir = make_tree(&[
        "a/sample1_R1.fastq",
        "a/sample1_R2.fastq",
        "b/c/sample2_1.fq.gz",
        "b/c/sample2_2.fq.gz",
        "b/readme.txt",
        "unrelated.fastq.bak",
    ]);
    let found: Vec<PathBuf> = find_r1_fastq_files(dir.path())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        found,
        vec![
            dir.path().join("a/sample1_R1.fastq"),
            dir.path().join("b/c/sample2_1.fq.gz"),
        ]
    );
}

#[test]
fn r1_listing_skips_directories_with_fastq_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("decoy_R1.fastq")).unwrap();
    let found: Vec<PathBuf> = find_r1_fastq_files(dir.path())
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn groups_complete_sets_and_skips_incomplete_ones() {
    let dir = make_tree(&[
        "something_R1.fastq",
        "something_R2.fastq",
        "something_R3.fastq",
        "something_R4.fastq",
        "lone_R1.fastq",
    ]);
    let groups: Vec<Vec<PathBuf>> = find_grouped_fastq_files(&[dir.path()], 4, false)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0],
        (1..=4)
            .map(|i| dir.path().join(format!("something_R{}.fastq", i)))
            .collect::<Vec<_>>()
    );
}

#[test]
fn groups_lane_indexed_pairs() {
    let dir = make_tree(&[
        "run/H4L1-4_S64_L001_R1_001.fastq.gz",
        "run/H4L1-4_S64_L001_R2_001.fastq.gz",
    ]);
    let groups: Vec<Vec<PathBuf>> = find_grouped_fastq_files(&[dir.path()], 2, false)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        groups,
        vec![vec![
            dir.path().join("run/H4L1-4_S64_L001_R1_001.fastq.gz"),
            dir.path().join("run/H4L1-4_S64_L001_R2_001.fastq.gz"),
        ]]
    );
}

#[test]
fn groups_from_multiple_directories() {
    let dir_a = make_tree(&["x_1.fq", "x_2.fq"]);
    let dir_b = make_tree(&["y_R1.fastq.gz", "y_R2.fastq.gz"]);
    let dirs = [dir_a.path().to_path_buf(), dir_b.path().to_path_buf()];
    let groups: Vec<Vec<PathBuf>> = find_grouped_fastq_files(&dirs, 2, false)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0][0], dir_a.path().join("x_1.fq"));
    assert_eq!(groups[1][0], dir_b.path().join("y_R1.fastq.gz"));
}

#[test]
fn group_of_one_needs_no_siblings() {
    let dir = make_tree(&["solo_R1.fastq"]);
    let groups: Vec<Vec<PathBuf>> = find_grouped_fastq_files(&[dir.path()], 1, false)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(groups, vec![vec![dir.path().join("solo_R1.fastq")]]);
}

#[test]
fn collects_fastq_files_by_relative_directory() {
    let dir = make_tree(&[
        "run1/a_1.fastq",
        "run1/a_2.fastq",
        "run1/b_1.fastq",
        "run2/c_R1.fastq",
        "run2/c_R2.fastq",
        "run2/d.fastq",
        "run3/notes.txt",
    ]);
    let mapping = collect_fastq_files_by_directory(dir.path()).unwrap();
    let keys: Vec<&Path> = mapping.keys().map(|dir| dir.as_path()).collect();
    assert_eq!(keys, vec![Path::new("run1"), Path::new("run2")]);
    assert_eq!(mapping[Path::new("run1")].len(), 3);
    assert_eq!(mapping[Path::new("run2")].len(), 3);
    assert_eq!(
        mapping[Path::new("run2")][0],
        dir.path().join("run2/c_R1.fastq")
    );
}

#[test]
fn collects_root_level_files_under_empty_key() {
    let dir = make_tree(&["toplevel.fastq", "sub/nested.fq.gz"]);
    let mapping = collect_fastq_files_by_directory(dir.path()).unwrap();
    assert_eq!(mapping[Path::new("")], vec![dir.path().join("toplevel.fastq")]);
    assert_eq!(
        mapping[Path::new("sub")],
        vec![dir.path().join("sub/nested.fq.gz")]
    );
}

#[test]
fn empty_tree_collects_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = collect_fastq_files_by_directory(dir.path()).unwrap();
    assert!(mapping.is_empty());
}
