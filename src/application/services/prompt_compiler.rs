use crate::domain::find_action;

const DELIMITER_WIDTH: usize = 50;

const PREAMBLE: &str = "You are an expert document analysis assistant. Please analyze the following document and complete the requested tasks.";

const FORMATTING_INSTRUCTIONS: [&str; 6] = [
    "INSTRUCTIONS:",
    "- Please complete each requested task thoroughly and professionally",
    "- Structure your response clearly with headers for each task",
    "- Provide detailed, actionable insights",
    "- If any task cannot be completed due to document content limitations, explain why",
    "- Use markdown formatting for better readability",
];

const CLOSING_LINE: &str = "Please begin your analysis:";

/// Builds the full instruction payload for the text-generation backend.
///
/// Returns an empty string when no actions are selected. Task lines are
/// numbered by their position in `selected_action_keys`; keys missing from the
/// catalog are skipped without renumbering.
pub fn compile_prompt<S: AsRef<str>>(document_content: &str, selected_action_keys: &[S]) -> String {
    if selected_action_keys.is_empty() {
        return String::new();
    }

    let delimiter = "=".repeat(DELIMITER_WIDTH);

    let mut lines: Vec<String> = vec![
        PREAMBLE.to_string(),
        String::new(),
        "DOCUMENT CONTENT:".to_string(),
        delimiter.clone(),
        document_content.to_string(),
        delimiter,
        String::new(),
        "REQUESTED ANALYSIS TASKS:".to_string(),
    ];

    for (position, key) in selected_action_keys.iter().enumerate() {
        if let Some(action) = find_action(key.as_ref()) {
            lines.push(format!(
                "{}. {}: {}",
                position + 1,
                action.name,
                action.instruction
            ));
        }
    }

    lines.push(String::new());
    lines.extend(FORMATTING_INSTRUCTIONS.iter().map(|l| l.to_string()));
    lines.push(String::new());
    lines.push(CLOSING_LINE.to_string());

    lines.join("\n")
}
