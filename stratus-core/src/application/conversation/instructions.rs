/// Placeholder replaced by the comma-separated subject list.
pub const SUBJECTS_PLACEHOLDER: &str = "{{subjects}}";

pub const DEFAULT_SYSTEM_TEMPLATE: &str = "You are a helpful weather assistant. You have access to weather data \
for various cities through the available tools. When users ask about weather, use the \
appropriate tools to fetch the information and provide clear, conversational responses.

Available cities: {{subjects}}

If a user asks about a city not in the list, politely inform them and suggest available cities.";

/// Build the system turn text.
///
/// `template` falls back to [`DEFAULT_SYSTEM_TEMPLATE`] when absent or blank.
/// Guidance sent by the tool host during initialization is appended last.
pub fn compose_system_turn(
    template: Option<&str>,
    subjects: &[String],
    host_guidance: Option<&str>,
) -> String {
    let template = match template {
        Some(text) if !text.trim().is_empty() => text,
        _ => DEFAULT_SYSTEM_TEMPLATE,
    };
    let mut text = template.replace(SUBJECTS_PLACEHOLDER, &subjects.join(", "));

    if let Some(guidance) = host_guidance.map(str::trim).filter(|g| !g.is_empty()) {
        text.push_str("\n\nTool server guidance: ");
        text.push_str(guidance);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects() -> Vec<String> {
        ["New York", "London", "Tokyo"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn default_template_lists_subjects() {
        let text = compose_system_turn(None, &subjects(), None);
        assert!(text.starts_with("You are a helpful weather assistant."));
        assert!(text.contains("Available cities: New York, London, Tokyo"));
        assert!(!text.contains(SUBJECTS_PLACEHOLDER));
    }

    #[test]
    fn custom_template_and_guidance() {
        let text = compose_system_turn(
            Some("Quote prices for {{subjects}}."),
            &["ACME".to_string()],
            Some("  Prices are delayed 15 minutes. "),
        );
        assert_eq!(
            text,
            "Quote prices for ACME.\n\nTool server guidance: Prices are delayed 15 minutes."
        );
    }

    #[test]
    fn blank_template_falls_back() {
        let text = compose_system_turn(Some("   "), &subjects(), Some(""));
        assert!(text.starts_with("You are a helpful weather assistant."));
        assert!(!text.contains("guidance"));
    }
}
