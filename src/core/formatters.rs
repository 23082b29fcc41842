//! Display helpers for upstream identifiers.

/// Placeholder upstream uses for the player character's chosen name.
pub const NICKNAME_PLACEHOLDER: &str = "{NICKNAME}";

/// Official path name for an internal upstream path identifier.
/// Unknown identifiers pass through unchanged.
pub fn official_path(internal: &str) -> &str {
    match internal {
        "Knight" => "Preservation",
        "Warrior" => "Destruction",
        "Rogue" => "Hunt",
        "Mage" => "Erudition",
        "Shaman" => "Harmony",
        "Warlock" => "Nihility",
        "Priest" => "Abundance",
        "Memory" => "Remembrance",
        other => other,
    }
}

/// Replace the nickname placeholder in `text` with `nickname`.
pub fn substitute_nickname(text: &str, nickname: &str) -> String {
    text.replace(NICKNAME_PLACEHOLDER, nickname)
}
