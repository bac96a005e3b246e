// Display colors for languages.

/// Color for languages missing from the palette.
pub const DEFAULT_COLOR: &str = "#8b949e";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("SCSS", "#c6538c"),
    ("Shell", "#89e051"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Ruby", "#701516"),
    ("PHP", "#4F5D95"),
    ("Swift", "#F05138"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
    ("Vue", "#41b883"),
    ("React", "#61dafb"),
];

/// Look up the display color for a language name (exact match).
pub fn language_color(name: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(language, _)| *language == name)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_colors() {
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("C"), "#555555");
        assert_eq!(language_color("rust"), DEFAULT_COLOR);
        assert_eq!(language_color("Brainfuck"), DEFAULT_COLOR);
    }
}
