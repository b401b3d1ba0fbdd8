//! Public types must be shareable across threads

fn assert_sync_send<T: Sync + Send>() {}

#[test]
fn test_config_is_sync_send() {
    assert_sync_send::<gitward_core::GitwardConfig>();
    assert_sync_send::<gitward_core::HookConfig>();
}

#[test]
fn test_errors_are_sync_send() {
    assert_sync_send::<gitward_core::HookError>();
    assert_sync_send::<gitward_core::ValidationError>();
}
