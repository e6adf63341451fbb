use common::{TestRepository, committed_repository, repository};
use pretty_assertions::assert_eq;
use rstest::rstest;
use twig::artifacts::merge::MergeOutcome;
use twig::artifacts::merge::merge_engine::ConflictKind;
use twig::artifacts::objects::file_snapshot::FileSnapshot;
use twig::artifacts::objects::tree::MerkleTree;
use twig::errors::{ErrorKind, RepositoryError};

mod common;

/// master and `f` both start from a commit holding `a.txt` = "x"
fn diverge(repo: &mut TestRepository, feature: &[(&str, &str)], master: &[(&str, &str)]) {
    repo.repository.create_branch("f").unwrap();
    repo.repository.checkout("f").unwrap();
    repo.commit_files("on f", feature);

    repo.repository.checkout("master").unwrap();
    repo.commit_files("on master", master);
    repo.output.clear();
}

#[rstest]
fn both_sides_modifying_a_file_conflicts(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    diverge(repo, &[("a.txt", "y")], &[("a.txt", "z")]);
    let master_head = repo.repository.head_commit().unwrap().id().clone();
    let feature_head = repo
        .repository
        .refs()
        .get_branch("f")
        .and_then(|branch| branch.head())
        .unwrap()
        .clone();

    let outcome = repo.repository.merge("f").unwrap();

    let MergeOutcome::Conflicted(conflicts) = outcome else {
        panic!("expected a conflict");
    };
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].path(), "a.txt");
    assert_eq!(conflicts[0].kind(), ConflictKind::Content);

    // no merge commit
    assert_eq!(repo.repository.head_commit().unwrap().id(), &master_head);

    let expected = format!(
        "<<<<<<< HEAD\nz\n=======\ny\n>>>>>>> {}\n",
        feature_head.to_short_oid()
    );
    assert_eq!(repo.read_file("a.txt"), expected);

    let staged = repo.repository.staged_files();
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].content(), Some(expected.as_str()));

    let output = repo.output.contents();
    assert!(output.contains("Merging f into master..."));
    assert!(output.contains("MERGE CONFLICT! Fix conflicts manually."));
    assert!(output.contains("CONFLICT (Content): a.txt"));
}

#[rstest]
fn disjoint_changes_merge_cleanly(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    diverge(
        repo,
        &[("a.txt", "x"), ("feature.txt", "from f")],
        &[("a.txt", "x"), ("master.txt", "from master")],
    );
    let master_head = repo.repository.head_commit().unwrap().id().clone();
    let feature_head = repo
        .repository
        .refs()
        .get_branch("f")
        .and_then(|branch| branch.head())
        .unwrap()
        .clone();

    let outcome = repo.repository.merge("f").unwrap();

    let MergeOutcome::Merged(merge_id) = outcome else {
        panic!("expected a clean merge");
    };
    let merge = repo.repository.head_commit().unwrap();
    assert_eq!(merge.id(), &merge_id);
    assert!(merge.is_merge_commit());
    assert_eq!(merge.parent1(), Some(&master_head));
    assert_eq!(merge.parent2(), Some(&feature_head));
    assert_eq!(merge.message(), "Merge branch 'f'");
    assert_eq!(merge.author(), "MergeUser");
    assert_eq!(
        merge
            .files()
            .iter()
            .map(FileSnapshot::path)
            .collect::<Vec<_>>(),
        vec!["a.txt", "master.txt", "feature.txt"]
    );
    assert_eq!(
        merge.tree_hash(),
        &MerkleTree::hash(&[
            FileSnapshot::new("a.txt", "x"),
            FileSnapshot::new("master.txt", "from master"),
            FileSnapshot::new("feature.txt", "from f"),
        ])
    );

    assert!(repo.repository.staged_files().is_empty());
    assert_eq!(repo.read_file("feature.txt"), "from f");
    assert!(repo.output.contents().contains("Merge successful."));
}

#[rstest]
fn one_sided_modification_takes_their_content(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    diverge(
        repo,
        &[("a.txt", "changed on f"), ("b.txt", "b")],
        &[("a.txt", "x"), ("b.txt", "b")],
    );

    let outcome = repo.repository.merge("f").unwrap();

    assert!(matches!(outcome, MergeOutcome::Merged(_)));
    assert_eq!(repo.read_file("a.txt"), "changed on f");
    assert!(!repo.output.contents().contains("CONFLICT"));
}

#[rstest]
fn merge_commit_shows_both_parents_in_log(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    diverge(
        repo,
        &[("a.txt", "x"), ("feature.txt", "f")],
        &[("a.txt", "x"), ("master.txt", "m")],
    );
    repo.repository.merge("f").unwrap();
    repo.output.clear();

    repo.repository.log().unwrap();

    let history = repo.repository.history();
    assert_eq!(history.len(), 4);
    assert!(repo.output.contents().contains(&format!(
        "Merge:  {} {}",
        history[0].parent1().unwrap().to_short_oid(),
        history[0].parent2().unwrap().to_short_oid()
    )));
}

#[rstest]
fn merging_an_unknown_branch_is_not_found(mut committed_repository: TestRepository) {
    let error = committed_repository.repository.merge("nope").unwrap_err();

    assert_eq!(RepositoryError::kind_of(&error), Some(ErrorKind::NotFound));
}

#[rstest]
fn merging_the_same_head_is_already_up_to_date(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    repo.repository.create_branch("f").unwrap();
    let head = repo.repository.head_commit().unwrap().id().clone();

    let outcome = repo.repository.merge("f").unwrap();

    assert_eq!(outcome, MergeOutcome::AlreadyUpToDate);
    assert_eq!(repo.repository.head_commit().unwrap().id(), &head);
    assert_eq!(repo.output.contents(), "Branch created: f\nAlready up to date.\n");
}

#[rstest]
fn merging_without_history_has_nothing_to_merge(mut repository: TestRepository) {
    let outcome = repository.repository.merge("master").unwrap();

    assert_eq!(outcome, MergeOutcome::NothingToMerge);
    assert_eq!(repository.output.contents(), "Nothing to merge.\n");
}

#[rstest]
fn merging_an_ancestor_still_creates_a_merge_commit(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    repo.repository.create_branch("old").unwrap();
    repo.commit_files("ahead", &[("a.txt", "x2")]);

    let outcome = repo.repository.merge("old").unwrap();

    assert!(matches!(outcome, MergeOutcome::Merged(_)));
    let merge = repo.repository.head_commit().unwrap();
    assert!(merge.is_merge_commit());
    assert_eq!(repo.read_file("a.txt"), "x2");
}

#[rstest]
fn resolving_a_conflict_and_committing(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    diverge(repo, &[("a.txt", "y")], &[("a.txt", "z")]);
    assert!(repo.repository.merge("f").unwrap().is_conflicted());

    repo.repository.add("a.txt", "resolved").unwrap();
    repo.repository.commit("resolve", "tester").unwrap();

    let head = repo.repository.head_commit().unwrap();
    assert_eq!(head.message(), "resolve");
    assert_eq!(head.files().len(), 1);
    assert!(repo.repository.staged_files().is_empty());
}

#[rstest]
fn deletion_on_one_side_is_kept(mut committed_repository: TestRepository) {
    let repo = &mut committed_repository;
    diverge(
        repo,
        &[("b.txt", "new on f")],
        &[("a.txt", "x"), ("c.txt", "new on master")],
    );

    let outcome = repo.repository.merge("f").unwrap();

    assert!(matches!(outcome, MergeOutcome::Merged(_)));
    let paths = repo
        .repository
        .head_commit()
        .unwrap()
        .files()
        .iter()
        .map(|file| file.path().to_string())
        .collect::<Vec<_>>();
    assert_eq!(paths, vec!["c.txt", "b.txt"]);
}
