use catalog_core::{update, AppState, Msg};

#[test]
fn noop_leaves_fresh_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn noop_after_hydration_writes_nothing() {
    let (mut state, _) = update(AppState::new(), Msg::UrlHydrated("?tags=UI".into()));
    state.consume_dirty();

    let (mut next, effects) = update(state.clone(), Msg::NoOp);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next.url_query(), state.url_query());
}
