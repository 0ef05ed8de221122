use pg_dump_sort::sort::MergeSort;

mod common;

// one bulk-data block whose columns exercise the NULL token, empty fields, signed
// fractions and plain text against each other
const UNSORTED: [[&str; 3]; 9] = [
    ["\\N", "\\N", "\\N"],
    ["\\N", "", "\\N"],
    ["\\N", "-.52", "baz"],
    ["\\N", "-.4", "foo"],
    ["\\N", ".42", "bar"],
    ["\\N", "42", "\\N"],
    ["\\N", "\\N", ""],
    ["\\N", "\\N", "\\N"],
    ["\\N", "foo", ".42"],
];

// the empty field sorts first, numerals next, then the NULL token, then plain text
const EXPECTED: [[&str; 3]; 9] = [
    ["\\N", "", "\\N"],
    ["\\N", "-.52", "baz"],
    ["\\N", "-.4", "foo"],
    ["\\N", ".42", "bar"],
    ["\\N", "42", "\\N"],
    ["\\N", "\\N", ""],
    ["\\N", "\\N", "\\N"],
    ["\\N", "\\N", "\\N"],
    ["\\N", "foo", ".42"],
];

fn lines(rows: &[[&str; 3]]) -> Vec<String> {
    rows.iter().map(|row| format!("{}\n", row.join("\t"))).collect()
}

#[test]
fn test_null_token_order_resident() -> Result<(), anyhow::Error> {
    let mut merge_sort = MergeSort::new();
    merge_sort.with_work_dir("./target/missing-spill-dir");
    for line in lines(&UNSORTED) {
        merge_sort.append(line)?;
    }
    let sorted = merge_sort.drain().collect::<Result<Vec<String>, anyhow::Error>>()?;
    assert_eq!(sorted, lines(&EXPECTED));
    Ok(())
}

#[test]
fn test_null_token_order_spilled() -> Result<(), anyhow::Error> {
    let work_dir = common::setup();
    let mut merge_sort = MergeSort::new();
    merge_sort.with_work_dir(work_dir);
    // one partition per line forces the duplicates through the merge heap
    merge_sort.with_max_memory(1);
    for line in lines(&UNSORTED) {
        merge_sort.append(line)?;
    }
    let sorted = merge_sort.drain().collect::<Result<Vec<String>, anyhow::Error>>()?;
    assert_eq!(sorted, lines(&EXPECTED));
    assert_eq!(merge_sort.partition_count(), 9);
    Ok(())
}
