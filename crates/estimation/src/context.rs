//! Context payload assembly for the delegation call.

use sdlc_store::{EstimationInputs, Screen};

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Package the gated artifacts into the single context message sent to
/// the generative backend. Section order is fixed; optional sections
/// (tech stack, screens, sequence diagrams) are skipped when absent.
/// Callers must have run the precondition gate first: the required
/// bodies are expected to be present here.
pub fn build_context(inputs: &EstimationInputs, screens: &[Screen]) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(format!("## PROJECT NAME\n{}", inputs.name));

    if let Some(prefs) = &inputs.tech_preferences {
        let rendered = serde_json::to_string_pretty(prefs).unwrap_or_default();
        sections.push(format!("## TECHNOLOGY STACK\n{rendered}"));
    }

    sections.push(format!(
        "## PRODUCT REQUIREMENTS DOCUMENT\n{}",
        inputs.prd.as_deref().unwrap_or_default()
    ));

    if !screens.is_empty() {
        let rendered = serde_json::to_string_pretty(screens).unwrap_or_default();
        sections.push(format!("## CONFIRMED UI SCREENS\n{rendered}"));
    }

    sections.push(format!(
        "## ARCHITECTURE OVERVIEW\n{}",
        inputs.architecture.as_deref().unwrap_or_default()
    ));
    sections.push(format!(
        "## DATA MODEL\n{}",
        inputs.data_model.as_deref().unwrap_or_default()
    ));
    sections.push(format!(
        "## API CONTRACT\n{}",
        inputs.api_contract.as_deref().unwrap_or_default()
    ));

    if let Some(diagrams) = inputs
        .sequence_diagrams
        .as_deref()
        .filter(|body| !body.trim().is_empty())
    {
        sections.push(format!("## SEQUENCE DIAGRAMS\n{diagrams}"));
    }

    sections.push(format!(
        "## IMPLEMENTATION PLAN\n{}",
        inputs.implementation_plan.as_deref().unwrap_or_default()
    ));

    sections.join(SECTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> EstimationInputs {
        serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Billing Portal",
            "tech_preferences": {"database": "Postgres"},
            "prd_content": "PRD BODY",
            "arch_overview_content": "ARCH BODY",
            "data_model_content": "DATA BODY",
            "api_contract_content": "API BODY",
            "sequence_diagrams_content": "SEQ BODY",
            "implementation_plan_content": "PLAN BODY"
        }))
        .unwrap()
    }

    #[test]
    fn payload_contains_every_required_body_and_preferences() {
        let context = build_context(&inputs(), &[]);
        for body in ["PRD BODY", "ARCH BODY", "DATA BODY", "API BODY", "PLAN BODY"] {
            assert!(context.contains(body), "missing section body: {body}");
        }
        assert!(context.contains("Billing Portal"));
        assert!(context.contains("\"database\": \"Postgres\""));
        assert!(context.contains("SEQ BODY"));
    }

    #[test]
    fn optional_sections_are_skipped_when_absent() {
        let mut inputs = inputs();
        inputs.tech_preferences = None;
        inputs.sequence_diagrams = Some("  ".into());
        let context = build_context(&inputs, &[]);
        assert!(!context.contains("TECHNOLOGY STACK"));
        assert!(!context.contains("SEQUENCE DIAGRAMS"));
        assert!(!context.contains("CONFIRMED UI SCREENS"));
    }

    #[test]
    fn screens_are_packaged_as_json() {
        let screens: Vec<Screen> = serde_json::from_value(serde_json::json!([
            {"id": "s1", "name": "Login", "complexity": "low"}
        ]))
        .unwrap();
        let context = build_context(&inputs(), &screens);
        assert!(context.contains("CONFIRMED UI SCREENS"));
        assert!(context.contains("\"name\": \"Login\""));
    }

    #[test]
    fn sections_keep_the_fixed_order() {
        let context = build_context(&inputs(), &[]);
        let order = [
            "## PROJECT NAME",
            "## TECHNOLOGY STACK",
            "## PRODUCT REQUIREMENTS DOCUMENT",
            "## ARCHITECTURE OVERVIEW",
            "## DATA MODEL",
            "## API CONTRACT",
            "## SEQUENCE DIAGRAMS",
            "## IMPLEMENTATION PLAN",
        ];
        let mut last = 0;
        for heading in order {
            let at = context.find(heading).unwrap_or_else(|| panic!("missing {heading}"));
            assert!(at >= last, "{heading} out of order");
            last = at;
        }
    }
}
