use catalog_core::{format_stat, AppViewModel, Item, Screen};

const CAROUSEL_WIDTH: usize = 5;

/// Renders the view model as terminal text, headed by the current address.
pub fn render(view: &AppViewModel, address: &str) -> String {
    let mut lines = vec![format!("[{address}]")];

    if view.loading {
        lines.push("Loading catalog...".to_string());
    }
    lines.push(format!(
        "{} mods | {} downloads",
        format_stat(view.stats.item_count as u64),
        format_stat(view.stats.total_downloads)
    ));
    if let Some(error) = &view.last_error {
        lines.push(format!("! {error}"));
    }
    if let Some(id) = &view.missing_selection {
        lines.push(format!("! {id} is no longer in the catalog"));
    }
    if view.has_filters {
        lines.push(filter_line(view));
    }

    match view.screen {
        Screen::Landing => render_landing(view, &mut lines),
        Screen::Listing => render_listing(view, &mut lines),
        Screen::Detail => match &view.selected {
            Some(item) => render_detail(item, &mut lines),
            None => render_listing(view, &mut lines),
        },
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn filter_line(view: &AppViewModel) -> String {
    let mut parts = Vec::new();
    if !view.active_tags.is_empty() {
        parts.push(format!("tags: {}", view.active_tags.join(", ")));
    }
    let search = view.search_text.trim();
    if !search.is_empty() {
        parts.push(format!("search: {search:?}"));
    }
    format!("Filters ({}) {}", view.result_count, parts.join(" | "))
}

fn render_landing(view: &AppViewModel, lines: &mut Vec<String>) {
    carousel("Featured", &view.featured, lines);
    carousel("Newest", &view.newest, lines);
    carousel("Trending", &view.trending, lines);
    if !view.available_tags.is_empty() {
        lines.push(format!("Tags: {}", view.available_tags.join(" ")));
    }
}

fn carousel(title: &str, items: &[Item], lines: &mut Vec<String>) {
    if items.is_empty() {
        return;
    }
    let names: Vec<&str> = items
        .iter()
        .take(CAROUSEL_WIDTH)
        .map(|item| item.title.as_str())
        .collect();
    let more = items.len().saturating_sub(CAROUSEL_WIDTH);
    if more > 0 {
        lines.push(format!("{title}: {} (+{more})", names.join(", ")));
    } else {
        lines.push(format!("{title}: {}", names.join(", ")));
    }
}

fn render_listing(view: &AppViewModel, lines: &mut Vec<String>) {
    if view.results.is_empty() {
        lines.push("No mods match these filters.".to_string());
        return;
    }
    for item in &view.results {
        lines.push(format_row(item));
    }
}

fn format_row(item: &Item) -> String {
    let star = if item.featured() { "*" } else { " " };
    format!(
        "{star} {id:<24} {title} by {author} ({downloads})",
        id = item.id,
        title = item.title,
        author = item.author_name,
        downloads = format_stat(item.downloads)
    )
}

fn render_detail(item: &Item, lines: &mut Vec<String>) {
    lines.push(format!("{} v{} (game {})", item.title, item.version, item.game_version));
    lines.push(format!(
        "by {} | {} downloads | uploaded {}",
        item.author_name,
        item.downloads,
        item.uploaded_at.format("%Y-%m-%d")
    ));
    if !item.tags.is_empty() {
        lines.push(format!("tags: {}", item.tags.join(", ")));
    }
    lines.push(item.long_description.clone());
    for feature in &item.feature_list {
        lines.push(format!("  - {feature}"));
    }
    if !item.installation_guide.is_empty() {
        lines.push(format!("Install: {}", item.installation_guide));
    }
    if !item.changelog.is_empty() {
        lines.push(format!("Changes: {}", item.changelog));
    }
}
