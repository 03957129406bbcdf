/// A named analysis intent the user can select for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
}

/// Fixed catalog. Order defines numbered selection and task ordering in prompts.
static ACTIONS: [Action; 8] = [
    Action {
        key: "summarize",
        name: "Summarize Document",
        description: "Create a comprehensive summary of the document",
        instruction: "Please provide a detailed summary of this document, highlighting the main points and key information.",
    },
    Action {
        key: "analyze",
        name: "Analyze Content",
        description: "Perform in-depth analysis of themes, tone, and structure",
        instruction: "Please analyze this document in detail, including themes, tone, writing style, structure, and any notable patterns or insights.",
    },
    Action {
        key: "extract_key_points",
        name: "Extract Key Points",
        description: "Identify and list the most important points",
        instruction: "Please extract and list the key points from this document in a clear, organized format.",
    },
    Action {
        key: "generate_questions",
        name: "Generate Questions",
        description: "Create relevant questions based on the content",
        instruction: "Generate thoughtful questions that could be asked about this document, including comprehension questions and discussion points.",
    },
    Action {
        key: "identify_entities",
        name: "Identify Entities",
        description: "Extract named entities (people, places, organizations, dates)",
        instruction: "Identify and categorize all named entities in this document, including people, places, organizations, dates, and other significant entities.",
    },
    Action {
        key: "sentiment_analysis",
        name: "Sentiment Analysis",
        description: "Analyze the emotional tone and sentiment",
        instruction: "Analyze the sentiment and emotional tone of this document, identifying positive, negative, and neutral elements.",
    },
    Action {
        key: "action_items",
        name: "Extract Action Items",
        description: "Identify tasks, recommendations, and action items",
        instruction: "Extract any action items, tasks, recommendations, or next steps mentioned in this document.",
    },
    Action {
        key: "translate",
        name: "Language Detection",
        description: "Detect language and provide translation insights",
        instruction: "Detect the primary language of this document and identify any foreign terms or phrases that might need translation.",
    },
];

pub fn available_actions() -> &'static [Action] {
    &ACTIONS
}

pub fn find_action(key: &str) -> Option<&'static Action> {
    ACTIONS.iter().find(|action| action.key == key)
}

/// Keeps the keys present in the catalog, in input order.
pub fn validate_actions<S: AsRef<str>>(keys: &[S]) -> Vec<&'static str> {
    keys.iter()
        .filter_map(|key| find_action(key.as_ref()))
        .map(|action| action.key)
        .collect()
}

pub fn action_description(key: &str) -> &'static str {
    find_action(key)
        .map(|action| action.description)
        .unwrap_or("Unknown action")
}
