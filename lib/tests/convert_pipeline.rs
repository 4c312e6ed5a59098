use lib::dag_model::load_dag_set_model;
use lib::error::{ConvertError, InconsistentInputError};
use lib::output_log::dump_rtdag_set_to_yaml;
use lib::rtdag::{generate_rtdag_set, RtDag, RunLength};
use lib::solution::load_solution;
use lib::tables::{TaskType, Tables};
use std::fs;
use std::path::Path;

fn convert(dag_path: &str, solution_path: &str, outdir: &Path) -> Result<Vec<RtDag>, ConvertError> {
    let dag_set = load_dag_set_model(Path::new(dag_path))?;
    let solution = load_solution(Path::new(solution_path))?;
    let run_length = RunLength::new(&dag_set, 10, 0)?;
    let rtdag_set = generate_rtdag_set(&dag_set, &solution, &Tables::default(), run_length)?;
    dump_rtdag_set_to_yaml(outdir, &rtdag_set)?;
    Ok(rtdag_set)
}

#[test]
fn test_convert_single_dag_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let outdir = dir.path().join("rtdag");
    convert(
        "tests/sample_inputs/single_dag.yaml",
        "tests/sample_inputs/solution_zcu102.yaml",
        &outdir,
    )
    .unwrap();

    let entries: Vec<_> = fs::read_dir(&outdir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["dag0.yaml"], "exactly one descriptor is expected");

    let file_contents = fs::read_to_string(outdir.join("dag0.yaml")).unwrap();
    let rtdag: RtDag = serde_yaml::from_str(&file_contents).unwrap();
    assert_eq!(*rtdag.n_tasks(), 3);
    assert_eq!(rtdag.adjacency_matrix().len(), 3);
    assert!(rtdag.adjacency_matrix().iter().all(|row| row.len() == 3));
    assert_eq!(rtdag.cpus_freq(), &vec![1200, 1200]);
    assert_eq!(rtdag.tasks_affinity(), &vec![0, 1, 0]);
    assert_eq!(rtdag.tasks_wcet(), &vec![10_000, 20_000, 15_000]);
    assert_eq!(rtdag.tasks_runtime(), &vec![12_000, 22_000, 16_000]);
    assert_eq!(*rtdag.hyperperiod(), 1_000_000);
    assert_eq!(*rtdag.dag_deadline(), 800_000);
    assert_eq!(*rtdag.max_out_edges(), 2);
    assert_eq!(*rtdag.max_in_edges(), 1);
}

#[test]
fn test_convert_two_dags_on_odroid() {
    let dir = tempfile::tempdir().unwrap();
    let rtdag_set = convert(
        "tests/sample_inputs/two_dags.yaml",
        "tests/sample_inputs/solution_odroid.yaml",
        dir.path(),
    )
    .unwrap();

    assert_eq!(rtdag_set.len(), 2);
    assert!(dir.path().join("dag0.yaml").is_file());
    assert!(dir.path().join("dag1.yaml").is_file());

    let dag0 = &rtdag_set[0];
    assert_eq!(dag0.tasks_affinity(), &vec![0, 4, 1]);
    assert_eq!(dag0.tasks_wcet(), &vec![1_000, 2_000, 900], "zero wcet_ref takes the runtime");
    assert_eq!(dag0.tasks_type(), &vec![TaskType::Cpu; 3]);
    assert_eq!(dag0.cpus_freq(), &vec![1400, 1400, 1400, 1400, 2000, 2000, 2000, 2000]);
    assert_eq!(*dag0.hyperperiod(), 300_000);

    let dag1 = &rtdag_set[1];
    assert_eq!(dag1.dag_name(), "dag1");
    assert_eq!(dag1.tasks_affinity(), &vec![0, 5]);
    assert_eq!(*dag1.dag_period(), 150_000);
    assert_eq!(*dag1.dag_deadline(), 120_000);
    assert_eq!(
        dag1.adjacency_matrix(),
        &vec![vec![0, 1], vec![0, 0]],
        "a labelled edge is expected to count as an edge"
    );
}

#[test]
fn test_convert_unsolved_dag_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let outdir = dir.path().join("rtdag");
    let result = convert(
        "tests/sample_inputs/two_dags.yaml",
        "tests/sample_inputs/solution_zcu102.yaml",
        &outdir,
    );
    assert!(matches!(
        result,
        Err(ConvertError::Inconsistent(
            InconsistentInputError::TaskCountMismatch { dag_id: 1, .. }
        ))
    ));
    assert!(!outdir.exists());
}

#[test]
fn test_convert_unparsable_solution() {
    let dir = tempfile::tempdir().unwrap();
    let result = convert(
        "tests/sample_inputs/two_dags.yaml",
        "tests/sample_inputs/not_yaml.txt",
        dir.path(),
    );
    match result {
        Err(err @ ConvertError::Parse { .. }) => {
            assert!(err.is_input_document_error());
            assert!(err.to_string().contains("not_yaml.txt"));
        }
        other => panic!("expected Parse error, got {:?}", other),
    }
}
