pub const SUMMARY_SYSTEM: &str = "You are a professional technical recruiter.";

/// `{resume_text}` is replaced with the (truncated) candidate text.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Analyze the following resume content:

{resume_text}

Provide a summary with:
- Key strengths
- Weaknesses
- Technologies used
- Project experience
Keep it clear and concise."#;
