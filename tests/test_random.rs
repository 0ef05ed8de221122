use std::cmp::Ordering;

use pg_dump_sort::comparator::compare;
use pg_dump_sort::sort::MergeSort;
use rand::seq::SliceRandom;

mod common;

#[test]
fn test_permutation_invariant() -> Result<(), anyhow::Error> {
    let work_dir = common::setup();
    let mut input: Vec<String> = (0..1000)
        .map(|i| format!("{}\t{}\n", i % 50, common::random_token()))
        .collect();
    input.shuffle(&mut rand::thread_rng());

    let mut merge_sort = MergeSort::new();
    merge_sort.with_work_dir(work_dir);
    merge_sort.with_max_memory(4 * 1024);
    for line in &input {
        merge_sort.append(line.clone())?;
    }
    let output = merge_sort.drain().collect::<Result<Vec<String>, anyhow::Error>>()?;
    assert!(merge_sort.partition_count() > 1);

    // comparator order, with nothing lost and nothing invented
    for pair in output.windows(2) {
        assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
    }
    let mut expected = input.clone();
    let mut actual = output.clone();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
    Ok(())
}
