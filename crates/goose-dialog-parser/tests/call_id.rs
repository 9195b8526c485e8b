mod common;

use common::{run_whole, Event};

fn call_ids(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::CallFinish(id) => Some(id.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn stable_across_repeated_parses() {
    let input = "@alice do the thing\nwith a body\n@/\n";
    let first = call_ids(&run_whole(input).await.events());
    let second = call_ids(&run_whole(input).await.events());
    assert_eq!(first, second);
}

#[tokio::test]
async fn distinct_within_a_single_stream_for_identical_calls() {
    let input = "@alice do it\n@alice do it\n";
    let ids = call_ids(&run_whole(input).await.events());
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn call_ids_are_lowercase_hex() {
    let input = "@alice do it\n";
    let ids = call_ids(&run_whole(input).await.events());
    assert_eq!(ids.len(), 1);
    assert!(ids[0].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert!(!ids[0].is_empty());
}

#[tokio::test]
async fn aborted_call_attempt_does_not_advance_counter() {
    // Two aborted attempts followed by one real call: the counter input for
    // the real call must be the same regardless of how many aborted
    // attempts preceded it, since aborted attempts never call `callFinish`.
    let with_aborts = "@.\n@.\n@alice do it\n";
    let without_aborts = "@alice do it\n";
    let ids_with = call_ids(&run_whole(with_aborts).await.events());
    let ids_without = call_ids(&run_whole(without_aborts).await.events());
    assert_eq!(ids_with, ids_without);
}
