pub const UNKNOWN_DOCUMENT: &str = "Unknown Document";

const REPORT_TITLE: &str = "# 📄 Document Analysis Results";
const ATTRIBUTION_FOOTER: &str = "*Analysis completed by MCP Document Processing Agent*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub document_name: String,
    pub action_count: usize,
    pub body: String,
}

impl Report {
    pub fn new(document_name: Option<&str>, action_count: usize, body: String) -> Self {
        Self {
            document_name: document_name.unwrap_or(UNKNOWN_DOCUMENT).to_string(),
            action_count,
            body,
        }
    }

    /// Header, rule, verbatim body, rule, footer.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 160);
        out.push_str(REPORT_TITLE);
        out.push_str("\n\n");
        out.push_str(&format!("**Document:** {}\n", self.document_name));
        out.push_str(&format!("**Actions Completed:** {}\n\n", self.action_count));
        out.push_str("---\n\n");
        out.push_str(&self.body);
        out.push_str("\n\n---\n");
        out.push_str(ATTRIBUTION_FOOTER);
        out
    }
}
