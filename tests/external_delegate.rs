#![cfg(unix)]

use std::fs;

use vertex_reorder::graph::{Edge, EdgeList};
use vertex_reorder::order::{Collaborator, ExternalDelegate, OrderSource, OrderingStrategy};
use vertex_reorder::pipeline::reorder;
use vertex_reorder::ReorderError;

fn triangle(weighted: bool) -> EdgeList {
    [(0, 1, "4"), (1, 2, "5"), (2, 0, "6")]
        .into_iter()
        .map(|(s, d, w)| if weighted { Edge::weighted(s, d, w) } else { Edge::new(s, d) })
        .collect()
}

fn shell(script: &str) -> Collaborator {
    Collaborator::new("sh").with_args(["-c", script, "sh", "{input}", "{output}"])
}

#[test]
fn reads_permutation_file_written_by_program() {
    let dir = tempfile::tempdir().unwrap();
    let collaborator = shell("test -f \"$1\" && printf '2\\n0\\n1\\n' > new_order.el");
    let delegate = ExternalDelegate::new(collaborator).with_work_dir(dir.path());

    let perm = delegate.compute(&triangle(true)).unwrap();
    assert_eq!(perm.to_order().unwrap(), vec![2, 0, 1]);

    // the program only ever sees the two-column form
    let input = fs::read_to_string(dir.path().join("input.el")).unwrap();
    assert_eq!(input, "0 1\n1 2\n2 0\n");
}

#[test]
fn argument_placeholders_reach_the_program() {
    let dir = tempfile::tempdir().unwrap();
    let collaborator = Collaborator::new("sh").with_args([
        "-c",
        "[ \"$1\" = 64 ] && [ \"$2\" = ./input.el ] && [ \"$3\" = ./output.el ] && printf '0\\n1\\n2\\n' > new_order.el",
        "sh",
        "64",
        "{input}",
        "{output}",
    ]);
    let delegate = ExternalDelegate::new(collaborator).with_work_dir(dir.path());
    assert!(delegate.compute(&triangle(false)).is_ok());
}

#[test]
fn reads_permutation_from_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let collaborator = shell("printf '1\\n2\\n0\\n'").with_order_source(OrderSource::Stdout);
    let delegate = ExternalDelegate::new(collaborator).with_work_dir(dir.path());

    let reordered = reorder(&triangle(true), &delegate, true).unwrap();
    assert_eq!(reordered.permutation.to_order().unwrap(), vec![0, 2, 1]);
    assert_eq!(reordered.zero_displaced, Some(2));
    assert_eq!(
        reordered.graph.edges,
        vec![Edge::weighted(0, 2, "4"), Edge::weighted(2, 1, "5"), Edge::weighted(1, 0, "6")]
    );
}

#[test]
fn non_zero_exit_carries_code_and_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let delegate = ExternalDelegate::new(shell("echo 'out of memory' >&2; exit 3")).with_work_dir(dir.path());

    match delegate.compute(&triangle(false)) {
        Err(ReorderError::CollaboratorFailure { exit_code, stderr, .. }) => {
            assert_eq!(exit_code, Some(3));
            assert_eq!(stderr.trim(), "out of memory");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_or_stale_order_file_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("new_order.el"), "0\n1\n2\n").unwrap();
    let delegate = ExternalDelegate::new(shell("true")).with_work_dir(dir.path());

    assert!(matches!(
        delegate.compute(&triangle(false)),
        Err(ReorderError::CollaboratorFailure { .. })
    ));
}

#[test]
fn short_or_invalid_order_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    for script in [
        "printf '0\\n1\\n' > new_order.el",
        "printf '0\\n0\\n1\\n' > new_order.el",
        "printf '0\\nx\\n1\\n' > new_order.el",
    ] {
        let delegate = ExternalDelegate::new(shell(script)).with_work_dir(dir.path());
        assert!(
            matches!(delegate.compute(&triangle(false)), Err(ReorderError::CollaboratorFailure { .. })),
            "script {script:?} should fail"
        );
    }
}

#[test]
fn unknown_program_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let delegate = ExternalDelegate::new(Collaborator::new("./definitely/not/here")).with_work_dir(dir.path());
    assert!(matches!(
        delegate.compute(&triangle(false)),
        Err(ReorderError::CollaboratorFailure { exit_code: None, .. })
    ));
}
