use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    SingleHtml,
}

/// What the description asks for, distilled to the flags the prompt builder
/// cares about. Built once per generate request and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementRecord {
    pub description: String,
    pub needs_llm_integration: bool,
    pub output_type: OutputType,
    pub must_follow_structural_rules: bool,
}

/// Pure function of the description: same text always yields the same record.
pub fn analyze(description: &str) -> RequirementRecord {
    let lowered = description.to_lowercase();
    RequirementRecord {
        description: description.to_string(),
        needs_llm_integration: lowered.contains("summarizer") || lowered.contains("ai"),
        output_type: OutputType::SingleHtml,
        must_follow_structural_rules: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_app_needs_no_llm() {
        let rec = analyze("Build a weather app");
        assert!(!rec.needs_llm_integration);
        assert_eq!(rec.output_type, OutputType::SingleHtml);
        assert!(rec.must_follow_structural_rules);
    }

    #[test]
    fn ai_in_any_casing_triggers_llm() {
        assert!(analyze("Build an AI summarizer").needs_llm_integration);
        assert!(analyze("an Ai chatbot").needs_llm_integration);
        assert!(analyze("pdf summarizer").needs_llm_integration);
    }

    #[test]
    fn same_input_same_record() {
        let a = analyze("Make a paint tool");
        let b = analyze("Make a paint tool");
        assert_eq!(a.needs_llm_integration, b.needs_llm_integration);
    }
}
