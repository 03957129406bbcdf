use lectern::application::ports::LlmClientError;
use lectern::application::services::{
    GenerationFailurePolicy, format_response, generation_failure_body,
};
use lectern::domain::Report;

const FOOTER: &str = "\n\n---\n*Analysis completed by MCP Document Processing Agent*";

#[test]
fn given_answer_and_name_when_formatting_then_header_body_and_footer() {
    let formatted = format_response("X", &["summarize"], Some("test.txt"));

    assert!(formatted.starts_with(
        "# 📄 Document Analysis Results\n\n**Document:** test.txt\n**Actions Completed:** 1\n\n---\n\nX"
    ));
    assert!(formatted.ends_with(FOOTER));
}

#[test]
fn given_no_name_when_formatting_then_unknown_document() {
    let formatted = format_response("body", &["summarize", "analyze"], None);

    assert!(formatted.contains("**Document:** Unknown Document\n**Actions Completed:** 2\n"));
}

#[test]
fn given_markdown_answer_when_formatting_then_body_passed_through_verbatim() {
    let answer = "## Summary\n\n- point *one*\n- point `two`";

    let formatted = format_response(answer, &["summarize"], Some("a.txt"));

    assert!(formatted.contains(&format!("---\n\n{answer}{FOOTER}")));
}

#[test]
fn given_report_when_rendering_then_same_envelope_as_formatter() {
    let report = Report::new(Some("a.txt"), 1, "X".to_string());

    assert_eq!(report.render(), format_response("X", &["analyze"], Some("a.txt")));
}

#[test]
fn given_embed_policy_when_folding_failure_then_error_becomes_body() {
    let body = GenerationFailurePolicy::EmbedInReport
        .fold(&LlmClientError::RateLimited)
        .unwrap();

    assert_eq!(
        body,
        "Error processing with AI: rate limited\n\nPlease check your API configuration and try again."
    );
    assert_eq!(body, generation_failure_body(&LlmClientError::RateLimited));
}

#[test]
fn given_propagate_policy_when_folding_failure_then_nothing_folded() {
    assert!(
        GenerationFailurePolicy::Propagate
            .fold(&LlmClientError::InvalidResponse("bad".into()))
            .is_none()
    );
    assert_eq!(
        GenerationFailurePolicy::default(),
        GenerationFailurePolicy::EmbedInReport
    );
}
