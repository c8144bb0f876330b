//! Narrative concept topics written by the text generator.
//!
//! Generation never fails the pipeline: a generator error yields a fixed
//! sentence and a malformed response is kept as plain text.
use super::xml::check_paragraph;
use super::{Document, DocumentBody, DocumentKind, Narrative};
use crate::lm::TextGenerator;
use crate::records::ProductRecord;

const CONCEPT_PROMPT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/concept_summary.md"
));

const MISSING_VALUE: &str = "N/A";

/// Build a concept topic, asking `generator` for the narrative paragraph.
pub fn build_concept(record: &ProductRecord, generator: &dyn TextGenerator) -> Document {
    let prompt = build_prompt(record);
    let narrative = match generator.generate(&prompt) {
        Ok(response) => coerce_narrative(&response),
        Err(err) => {
            tracing::warn!(
                product = record.id(),
                error = %format!("{err:#}"),
                "generation failed; using fallback summary"
            );
            Narrative::Text(fallback_sentence(record.name()))
        }
    };

    Document {
        kind: DocumentKind::Concept,
        id: format!("{}_summary", record.id()),
        title: format!("About the {}", record.name()),
        body: DocumentBody::Narrative(narrative),
    }
}

/// Assemble the generation prompt for one product.
pub fn build_prompt(record: &ProductRecord) -> String {
    let field = |name: &str| {
        record
            .get(name)
            .filter(|value| !value.is_empty())
            .unwrap_or(MISSING_VALUE)
            .to_string()
    };
    fill_template(
        CONCEPT_PROMPT,
        &[
            ("product_name", record.name().to_string()),
            ("specifications", record.to_listing()),
            ("voltage", field("Voltage")),
            ("max_speed", field("MaxSpeed")),
        ],
    )
}

/// Substitute `{name}` placeholders in one pass; substituted text is never
/// rescanned and unknown placeholders are left as written.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            values
                .iter()
                .find(|(name, _)| *name == &after[..close])
                .map(|(_, value)| (close, value))
        });
        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Summary used when the generator cannot be reached.
pub fn fallback_sentence(product_name: &str) -> String {
    format!(
        "An AI-generated summary for the {product_name} could not be created at this time due to an error."
    )
}

/// Turn a raw response into a single paragraph.
///
/// Responses not already opening with `<p>` are wrapped; if the result is not
/// one well-formed `<p>` element, the trimmed response is kept as text.
pub fn coerce_narrative(response: &str) -> Narrative {
    let raw = response.trim();
    let content = strip_code_fence(raw);
    let wrapped = if opens_paragraph(content) {
        content.to_string()
    } else {
        format!("<p>{content}</p>")
    };

    match check_paragraph(&wrapped) {
        Ok(()) => Narrative::Markup(wrapped),
        Err(err) => {
            tracing::warn!(error = %err, "generated summary is not well-formed; keeping raw text");
            Narrative::Text(raw.to_string())
        }
    }
}

fn opens_paragraph(text: &str) -> bool {
    text.starts_with("<p>") || text.starts_with("<p ")
}

/// Strip a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Skip language identifier if present
    match inner.split_once('\n') {
        Some((lang, body)) if !lang.contains('<') => body.trim(),
        _ => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::cell::RefCell;

    struct ScriptedGenerator {
        response: Result<String, String>,
        prompts: RefCell<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn replying(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.response.clone().map_err(|message| anyhow!(message))
        }
    }

    fn record() -> ProductRecord {
        ProductRecord::from_fields(vec![
            ("ProductID".to_string(), "B-20".to_string()),
            ("ProductName".to_string(), "Breeze Fan".to_string()),
            ("Voltage".to_string(), "220V".to_string()),
        ])
        .unwrap()
    }

    fn narrative(document: &Document) -> &Narrative {
        match &document.body {
            DocumentBody::Narrative(narrative) => narrative,
            DocumentBody::Properties(_) => panic!("expected narrative body"),
        }
    }

    #[test]
    fn prompt_embeds_name_fields_and_missing_markers() {
        let prompt = build_prompt(&record());
        assert!(prompt.contains("for the product 'Breeze Fan'"));
        assert!(prompt.contains("Voltage        220V"));
        assert!(prompt.contains("standard voltage of 220V"));
        assert!(prompt.contains("maximum speed of N/A"));
        assert!(prompt.contains("enclosed in a single <p> tag"));
    }

    #[test]
    fn placeholders_inside_field_values_are_kept_verbatim() {
        let record = ProductRecord::from_fields(vec![
            ("ProductID".to_string(), "B-20".to_string()),
            ("ProductName".to_string(), "Fan".to_string()),
            (
                "Notes".to_string(),
                "literal {product_name} and {voltage}".to_string(),
            ),
        ])
        .unwrap();
        let prompt = build_prompt(&record);
        assert!(prompt.contains("Notes          literal {product_name} and {voltage}"));
        assert!(prompt.contains("for the product 'Fan'"));
        assert!(prompt.contains("standard voltage of N/A"));
    }

    #[test]
    fn template_leaves_unknown_and_unclosed_braces() {
        let values = [("name", "X".to_string())];
        assert_eq!(fill_template("{name} {other} {", &values), "X {other} {");
        assert_eq!(fill_template("{{name}}", &values), "{X}");
    }

    #[test]
    fn concept_sends_one_prompt_and_keeps_paragraph() {
        let generator = ScriptedGenerator::replying("  <p>Meet the <b>Breeze Fan</b>.</p>\n");
        let document = build_concept(&record(), &generator);

        assert_eq!(generator.prompts.borrow().len(), 1);
        assert_eq!(document.id, "B-20_summary");
        assert_eq!(document.title, "About the Breeze Fan");
        assert_eq!(
            narrative(&document),
            &Narrative::Markup("<p>Meet the <b>Breeze Fan</b>.</p>".to_string())
        );
    }

    #[test]
    fn generator_error_yields_fallback_sentence() {
        let generator = ScriptedGenerator::failing("quota exceeded");
        let document = build_concept(&record(), &generator);
        assert_eq!(
            narrative(&document),
            &Narrative::Text(
                "An AI-generated summary for the Breeze Fan could not be created at this time due to an error."
                    .to_string()
            )
        );
    }

    #[test]
    fn bare_text_is_wrapped_in_paragraph() {
        assert_eq!(
            coerce_narrative("A quiet fan."),
            Narrative::Markup("<p>A quiet fan.</p>".to_string())
        );
    }

    #[test]
    fn malformed_markup_keeps_raw_text_verbatim() {
        let raw = "<p>An <b>unclosed tag here.</p>";
        assert_eq!(coerce_narrative(raw), Narrative::Text(raw.to_string()));
    }

    #[test]
    fn stray_closing_tag_keeps_raw_text() {
        let raw = "Great value</p>";
        assert_eq!(coerce_narrative(raw), Narrative::Text(raw.to_string()));
    }

    #[test]
    fn fenced_paragraph_is_unwrapped() {
        let raw = "```html\n<p>Fenced.</p>\n```";
        assert_eq!(
            coerce_narrative(raw),
            Narrative::Markup("<p>Fenced.</p>".to_string())
        );
    }

    #[test]
    fn paragraph_with_attributes_is_not_rewrapped() {
        assert_eq!(
            coerce_narrative("<p outputclass=\"lead\">Hi.</p>"),
            Narrative::Markup("<p outputclass=\"lead\">Hi.</p>".to_string())
        );
    }
}
