use catalog_core::url_sync::{full_url, parse_query, serialize_query};
use catalog_core::{update, AppState, Effect, Msg, UrlState, ViewMode, ViewParam};
use pretty_assertions::assert_eq;

fn hydrate(raw: &str) -> AppState {
    update(AppState::new(), Msg::UrlHydrated(raw.to_string())).0
}

#[test]
fn parses_tags_query_and_view() {
    let parsed = parse_query("?tags=Cyberpunk,Retro&q=neon&view=discover");
    assert_eq!(
        parsed,
        UrlState {
            tags: vec!["Cyberpunk".to_string(), "Retro".to_string()],
            query: "neon".to_string(),
            view: Some(ViewParam::Discover),
        }
    );
}

#[test]
fn tags_are_trimmed_and_empties_dropped() {
    let parsed = parse_query("tags=%20UI%20,,Retro,");
    assert_eq!(parsed.tags, vec!["UI".to_string(), "Retro".to_string()]);
}

#[test]
fn duplicate_tags_collapse_to_first_casing() {
    let parsed = parse_query("tags=Retro,UI,retro,ui,RETRO");
    assert_eq!(parsed.tags, vec!["Retro".to_string(), "UI".to_string()]);
}

#[test]
fn query_is_decoded() {
    assert_eq!(parse_query("q=neon+city%21").query, "neon city!");
}

#[test]
fn malformed_input_degrades_to_defaults() {
    for raw in ["", "?", "&&==&", "tags", "view=sideways", "%zz=%zz", "q"] {
        let parsed = parse_query(raw);
        assert!(parsed.tags.is_empty(), "{raw}");
        assert_eq!(parsed.view, None, "{raw}");
        assert_eq!(parsed.target_mode(), None, "{raw}");
    }
}

#[test]
fn first_occurrence_wins() {
    let parsed = parse_query("q=first&q=second&view=home&view=discover");
    assert_eq!(parsed.query, "first");
    assert_eq!(parsed.view, Some(ViewParam::Home));
}

#[test]
fn serializes_only_present_params() {
    assert_eq!(serialize_query(&[], "", ViewMode::Landing), "");
    assert_eq!(serialize_query(&[], "   ", ViewMode::Detail), "");
    assert_eq!(serialize_query(&[], "", ViewMode::Listing), "view=discover");
    assert_eq!(
        serialize_query(
            &["Cyberpunk".to_string(), "Retro".to_string()],
            "  neon city ",
            ViewMode::Listing
        ),
        "tags=Cyberpunk,Retro&q=neon+city&view=discover"
    );
}

#[test]
fn view_is_omitted_outside_listing() {
    assert_eq!(serialize_query(&[], "neon", ViewMode::Landing), "q=neon");
    assert_eq!(
        serialize_query(&["UI".to_string()], "", ViewMode::Detail),
        "tags=UI"
    );
}

#[test]
fn filtered_detail_address_reopens_listing() {
    let (state, _) = update(AppState::new(), Msg::UrlHydrated(String::new()));
    let (state, _) = update(state, Msg::TagToggled("UI".into()));
    let (state, effects) = update(state, Msg::ItemSelected("A".into()));
    assert_eq!(
        effects,
        vec![
            Effect::ScrollToContentTop,
            Effect::ReplaceUrl {
                query: "tags=UI".to_string()
            }
        ]
    );

    let reloaded = hydrate(&state.url_query());
    assert_eq!(reloaded.mode(), ViewMode::Listing);
    assert_eq!(reloaded.active_tags(), ["UI"]);
}

#[test]
fn scenario_url_hydrates_listing() {
    let state = hydrate("?tags=Cyberpunk,Retro&q=neon&view=discover");
    assert_eq!(state.active_tags(), ["Cyberpunk", "Retro"]);
    assert_eq!(state.search_text(), "neon");
    assert_eq!(state.mode(), ViewMode::Listing);
}

#[test]
fn filters_without_view_open_listing() {
    assert_eq!(hydrate("tags=UI").mode(), ViewMode::Listing);
    assert_eq!(hydrate("q=neon").mode(), ViewMode::Listing);
    assert_eq!(hydrate("q=+++").mode(), ViewMode::Landing);
}

#[test]
fn explicit_home_wins_over_filters() {
    let state = hydrate("tags=UI&q=neon&view=home");
    assert_eq!(state.mode(), ViewMode::Landing);
    assert_eq!(state.active_tags(), ["UI"]);
}

#[test]
fn no_params_leave_mode_unchanged() {
    let (state, _) = update(AppState::new(), Msg::UrlHydrated("view=discover".into()));
    let (state, _) = update(state, Msg::Navigated(String::new()));
    assert_eq!(state.mode(), ViewMode::Listing);
    assert!(state.active_tags().is_empty());
}

/// States whose address hydrates back to the same mode. Filters outside the
/// listing hydrate as the listing and are covered above.
#[test]
fn round_trip_is_stable_for_reachable_states() {
    let states = [
        (vec![], "", ViewMode::Landing),
        (vec![], "", ViewMode::Listing),
        (vec![], "", ViewMode::Detail),
        (vec!["UI".to_string()], "", ViewMode::Listing),
        (vec![], " neon & chrome ", ViewMode::Listing),
        (
            vec!["Quality of Life".to_string(), "Sci-Fi".to_string()],
            "100% pure",
            ViewMode::Listing,
        ),
    ];
    for (tags, search, mode) in states {
        let first = serialize_query(&tags, search, mode);
        let hydrated = parse_query(&first);
        let next_mode = hydrated.target_mode().unwrap_or(mode);
        let second = serialize_query(&hydrated.tags, &hydrated.query, next_mode);
        assert_eq!(first, second, "{tags:?} {search:?} {mode:?}");
    }
}

#[test]
fn full_url_joins_base_path() {
    assert_eq!(full_url("/", "tags=UI&view=discover"), "/?tags=UI&view=discover");
}
