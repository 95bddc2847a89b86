use autodidact::store::StoreError;
use autodidact::store::model::{EOS_TOKEN, ModelState, PAD_TOKEN};

fn sample_state() -> ModelState {
    let mut state = ModelState::new();
    state.step = 3;
    state.update_vocab(&["the".to_string(), "cat".to_string(), "sat".to_string()]);
    *state
        .transitions
        .entry("the".to_string())
        .or_default()
        .entry("cat".to_string())
        .or_insert(0.0) += 2.0;
    *state
        .transitions
        .entry("cat".to_string())
        .or_default()
        .entry("sat".to_string())
        .or_insert(0.0) += 1.0;
    state.totals.insert("the".to_string(), 2.0);
    state.totals.insert("cat".to_string(), 1.0);
    state
}

#[test]
fn test_new_state_carries_reserved_tokens() {
    let state = ModelState::new();

    assert_eq!(state.vocab, vec![PAD_TOKEN, EOS_TOKEN]);
    assert_eq!(state.step, 0);
}

#[test]
fn test_encode_empty_state_layout() {
    let state = ModelState::new();

    let text = state.encode();

    assert_eq!(text, "STEP 0\nVOCAB 2\n<pad>\n<eos>\nTRANSITIONS 0\nTOTALS 0\n");
}

#[test]
fn test_round_trip_empty_state() {
    let state = ModelState::new();

    let decoded = ModelState::decode(&state.encode()).unwrap();

    assert_eq!(decoded, state);
}

#[test]
fn test_round_trip_preserves_counts_and_vocab() {
    let state = sample_state();

    let decoded = ModelState::decode(&state.encode()).unwrap();

    assert_eq!(decoded.vocab, state.vocab);
    assert_eq!(decoded.transitions, state.transitions);
    assert_eq!(decoded.totals, state.totals);
    assert_eq!(decoded.step, 3);
}

#[test]
fn test_round_trip_preserves_totals_asymmetry() {
    // Totals accumulate independently of the transition rows; a total that
    // disagrees with its row sum is a characteristic of the model, not
    // corruption, and must survive a round trip untouched.
    let mut state = ModelState::new();
    state.update_vocab(&["a".to_string(), "b".to_string()]);
    state
        .transitions
        .entry("a".to_string())
        .or_default()
        .insert("b".to_string(), 3.0);
    state.totals.insert("a".to_string(), 7.5);

    let decoded = ModelState::decode(&state.encode()).unwrap();

    assert_eq!(decoded.totals.get("a"), Some(&7.5));
    assert_eq!(decoded.transitions["a"]["b"], 3.0);
}

#[test]
fn test_transition_count_is_derived_from_rows() {
    let state = sample_state();

    let text = state.encode();

    assert!(text.contains("\nTRANSITIONS 2\n"));
}

#[test]
fn test_encode_is_deterministic_across_insertion_orders() {
    let mut forward = ModelState::new();
    forward.update_vocab(&["a".to_string(), "b".to_string()]);
    forward.totals.insert("a".to_string(), 1.0);
    forward.totals.insert("b".to_string(), 2.0);

    let mut reverse = ModelState::new();
    reverse.update_vocab(&["a".to_string(), "b".to_string()]);
    reverse.totals.insert("b".to_string(), 2.0);
    reverse.totals.insert("a".to_string(), 1.0);

    assert_eq!(forward.encode(), reverse.encode());
}

#[test]
fn test_vocab_count_mismatch_is_corruption() {
    let text = "STEP 1\nVOCAB 5\na\nb\nTRANSITIONS 0\nTOTALS 0\n";

    let result = ModelState::decode(text);

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_wrong_keyword_is_corruption() {
    let result = ModelState::decode("EPOCH 3\nVOCAB 0\nTRANSITIONS 0\nTOTALS 0\n");

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_empty_input_is_corruption() {
    let result = ModelState::decode("");

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_unparseable_count_is_corruption() {
    let result = ModelState::decode("STEP 1\nVOCAB many\n");

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_truncated_transitions_is_corruption() {
    let text = "STEP 1\nVOCAB 2\n<pad>\n<eos>\nTRANSITIONS 2\na\tb\t1\n";

    let result = ModelState::decode(text);

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_unparseable_transition_count_is_corruption() {
    let text = "STEP 1\nVOCAB 2\n<pad>\n<eos>\nTRANSITIONS 1\na\tb\tlots\nTOTALS 0\n";

    let result = ModelState::decode(text);

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_malformed_totals_row_is_corruption() {
    let text = "STEP 1\nVOCAB 2\n<pad>\n<eos>\nTRANSITIONS 0\nTOTALS 1\nno-tab-here\n";

    let result = ModelState::decode(text);

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_reserved_tokens_appended_after_decode() {
    let text = "STEP 0\nVOCAB 1\nhello\nTRANSITIONS 0\nTOTALS 0\n";

    let state = ModelState::decode(text).unwrap();

    assert_eq!(state.vocab, vec!["hello", PAD_TOKEN, EOS_TOKEN]);
}

#[test]
fn test_decode_tolerates_crlf_line_endings() {
    let text = "STEP 2\r\nVOCAB 1\r\nword\r\nTRANSITIONS 0\r\nTOTALS 0\r\n";

    let state = ModelState::decode(text).unwrap();

    assert_eq!(state.step, 2);
    assert_eq!(state.vocab[0], "word");
}

#[test]
fn test_update_vocab_keeps_discovery_order_and_dedupes() {
    let mut state = ModelState::new();

    state.update_vocab(&[
        "b".to_string(),
        "a".to_string(),
        "b".to_string(),
        "<eos>".to_string(),
    ]);

    assert_eq!(state.vocab, vec![PAD_TOKEN, EOS_TOKEN, "b", "a"]);
}
