use crate::requirements::RequirementRecord;

fn base_rules() -> &'static str {
r#"You are an expert web developer. Generate complete HTML files with embedded CSS and JS.

RULES:
1. Output ONLY pure HTML (no markdown, no explanations, no code fences).
2. Must include <!DOCTYPE html>.
3. CSS must be inside a single <style> block in <head>.
4. JS must be inside a single <script> block before the document close.
5. Must be fully functional and interactive, with a modern UI and clean UX.
6. Include API integrations if required.
7. If the app needs an API (like PDF summarizer, weather app, etc.):
   - Include full working API integration code
   - For PDF: Use PDF.js from CDN: https://cdnjs.cloudflare.com/ajax/libs/pdf.js/3.11.174/pdf.min.js
   - For PDF: Extract text client-side and send it to the API for real summarization
8. No external dependencies except CDN-hosted libraries where necessary.
9. Follow this exact structure:

<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8"></meta>
<!-- meta, css, cdns -->
</head>
<body>
</body>
<script>
</script>
</html>"#
}

fn llm_integration_rules() -> &'static str {
r#"LLM Integration Rules:
- Use the LLM Foundry API exactly as shown:
const response = await fetch("https://llmfoundry.straive.com/openai/v1/chat/completions", {
  method: "POST",
  headers: { "Content-Type": "application/json" },
  credentials: "include",
  body: JSON.stringify({
    model: "gpt-4o-mini",
    messages: [{ role: "user", content: "What is 2 + 2" }],
  }),
});
await response.json()

Instructions:
1. Use only the provided LLM Foundry fetch API in the generated code if the application requires an LLM.
2. Never embed an API key in the generated code; any secret belongs in server-side configuration."#
}

/// Composes the system instruction from fixed fragments. The only branch is
/// the LLM-integration block, gated on the requirement record.
pub fn build_system_prompt(requirements: &RequirementRecord) -> String {
    let mut prompt = String::from(base_rules());
    if requirements.needs_llm_integration {
        prompt.push_str("\n\n");
        prompt.push_str(llm_integration_rules());
    }
    prompt
}

pub fn generation_user_prompt(description: &str) -> String {
    format!("Create a complete HTML file for: {description}")
}

pub fn rectify_system_prompt() -> &'static str {
    "You are an expert web developer. Improve the HTML based on the given feedback. Return ONLY the full corrected HTML."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::analyze;

    #[test]
    fn base_prompt_mandates_structure() {
        let prompt = build_system_prompt(&analyze("Build a weather app"));
        assert!(prompt.contains("<!DOCTYPE html>"));
        assert!(prompt.contains("ONLY pure HTML"));
        assert!(!prompt.contains("LLM Integration Rules"));
    }

    #[test]
    fn integration_block_appended_when_needed() {
        let prompt = build_system_prompt(&analyze("Build an AI summarizer"));
        assert!(prompt.contains("LLM Integration Rules"));
        assert!(prompt.contains("llmfoundry.straive.com"));
        assert!(prompt.starts_with(base_rules()));
    }

    #[test]
    fn builder_is_deterministic() {
        let rec = analyze("pdf summarizer");
        assert_eq!(build_system_prompt(&rec), build_system_prompt(&rec));
    }
}
