use std::fs;

use autodidact::config::TrainingConfig;
use autodidact::store::StoreError;
use autodidact::store::state::StateManager;

#[test]
fn test_first_run_initializes_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::new(dir.path().join("state"));

    let config = manager.load_or_init_config().unwrap();
    let dataset = manager.load_or_init_dataset().unwrap();
    let state = manager.load_or_init_model_state().unwrap();

    assert_eq!(config, TrainingConfig::default());
    assert_eq!(dataset.len(), 3);
    assert_eq!(state.step, 0);
    assert!(manager.config_path().exists());
    assert!(manager.dataset_path().exists());
    assert!(manager.model_state_path().exists());
}

#[test]
fn test_existing_config_is_respected() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::new(dir.path());
    fs::write(
        manager.config_path(),
        "request_timeout_ms=500\nretries=0\n",
    )
    .unwrap();

    let config = manager.load_or_init_config().unwrap();

    assert_eq!(config.request_timeout_ms, 500);
    assert_eq!(config.retries, 0);
}

#[test]
fn test_dataset_strips_carriage_returns() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::new(dir.path());
    fs::write(manager.dataset_path(), "line one\r\nline two\r\n").unwrap();

    let dataset = manager.load_or_init_dataset().unwrap();

    assert_eq!(dataset, vec!["line one", "line two"]);
}

#[test]
fn test_empty_dataset_falls_back_to_builtin_line() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::new(dir.path());
    fs::write(manager.dataset_path(), "").unwrap();

    let dataset = manager.load_or_init_dataset().unwrap();

    assert_eq!(dataset.len(), 1);
    assert!(!dataset[0].is_empty());
}

#[test]
fn test_model_state_round_trips_through_manager() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::new(dir.path());

    let mut state = manager.load_or_init_model_state().unwrap();
    state.step = 9;
    state.update_vocab(&["token".to_string()]);
    state
        .transitions
        .entry("token".to_string())
        .or_default()
        .insert("<eos>".to_string(), 4.0);
    state.totals.insert("token".to_string(), 4.0);
    manager.save_model_state(&state).unwrap();

    let reloaded = manager.load_or_init_model_state().unwrap();

    assert_eq!(reloaded, state);
}

#[test]
fn test_corrupt_model_state_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::new(dir.path());
    fs::write(manager.model_state_path(), "not a model state file").unwrap();

    let result = manager.load_or_init_model_state();

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
    // The corrupt file must not be silently re-initialized.
    assert_eq!(
        fs::read_to_string(manager.model_state_path()).unwrap(),
        "not a model state file"
    );
}

#[test]
fn test_save_rewrites_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::new(dir.path());

    let mut state = manager.load_or_init_model_state().unwrap();
    state.totals.insert("once".to_string(), 1.0);
    manager.save_model_state(&state).unwrap();
    state.totals.remove("once");
    manager.save_model_state(&state).unwrap();

    let content = fs::read_to_string(manager.model_state_path()).unwrap();
    assert!(!content.contains("once"));
}
