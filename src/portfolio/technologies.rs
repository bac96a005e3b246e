// Technology list construction from repository topics and primary language.

/// Build the technology list for a repository.
///
/// Topics minus the `control` topics are capitalized and deduplicated
/// case-insensitively. The primary language always leads the list exactly
/// once; a topic naming the same language is folded into it.
pub fn build_technologies(topics: &[String], language: Option<&str>, control: &[&str]) -> Vec<String> {
    let mut technologies: Vec<String> = Vec::new();

    for topic in topics.iter().filter(|t| !control.contains(&t.as_str())) {
        let tech = capitalize(topic);
        if !contains_ignore_case(&technologies, &tech) {
            technologies.push(tech);
        }
    }

    if let Some(language) = language.filter(|l| !l.is_empty()) {
        let lowered = language.to_lowercase();
        technologies.retain(|tech| tech.to_lowercase() != lowered);
        technologies.insert(0, language.to_string());
    }

    technologies
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    let value = value.to_lowercase();
    list.iter().any(|item| item.to_lowercase() == value)
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
