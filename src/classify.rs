/// Icon category of a named point, derived from its source filename.
///
/// Never persisted in the wire document; the viewer recomputes it from
/// `filename` on every render, so derivation must stay idempotent and
/// depend on the filename alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerCategory {
    TodoPrimary,
    Warning,
    Standard,
    Other,
}

/// Which marker layer a named point lands on. Orthogonal to the icon
/// category: grouping matches the bare substring `TODO`, the icon
/// category matches the more specific `TODO_MAIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayGroup {
    Todo,
    General,
}

// First match wins, top to bottom.
const CATEGORY_RULES: &[(&str, MarkerCategory)] = &[
    ("TODO_MAIN", MarkerCategory::TodoPrimary),
    ("WP_WAR_RB", MarkerCategory::Warning),
    ("WP_", MarkerCategory::Standard),
];

pub fn category_for(filename: &str) -> MarkerCategory {
    CATEGORY_RULES
        .iter()
        .find(|(needle, _)| filename.contains(needle))
        .map(|(_, category)| *category)
        .unwrap_or(MarkerCategory::Other)
}

pub fn display_group(filename: &str) -> DisplayGroup {
    if filename.contains("TODO") {
        DisplayGroup::Todo
    } else {
        DisplayGroup::General
    }
}
