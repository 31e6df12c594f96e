//! JSON shape of serialized results (requires the `serde` feature).

#![cfg(feature = "serde")]

use sectioned::SectionedResults;

#[test]
fn results_serialize_as_section_list() {
    let results = SectionedResults::new(
        vec![("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)],
        |row: &(String, u32)| row.0.clone(),
    );
    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "id": "a", "elements": [["a", 1], ["a", 3]] },
            { "id": "b", "elements": [["b", 2]] },
        ])
    );
}

#[test]
fn empty_results_serialize_as_empty_list() {
    let results = SectionedResults::new(Vec::<u8>::new(), |n: &u8| *n);
    assert_eq!(serde_json::to_string(&results).unwrap(), "[]");
}
