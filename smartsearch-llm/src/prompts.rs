//! Prompt builders for the expansion call.

/// Prompt asking the model for follow-up search keywords.
///
/// The output contract matters more than the wording: the model must answer
/// with 3 to 5 keywords on a single line, separated by single spaces, with
/// multi-word keywords joined by `+`. [`crate::expander::QueryExpander`]
/// splits the reply on exactly that contract.
pub fn expansion_prompt(query: &str, summary: &str) -> String {
    format!(
        r#"You are a smart search assistant that analyzes a user's search intent and expands it into more specific search keywords.

Task:
Given the user's search query "{query}" and a summary of that query's search results "{summary}", first decide the core type of content the user is after (for example: concept definitions, tool usage, historical background, technical principles), then derive further detail keywords of that type. The keywords should help the user narrow the search and reach more specific, deeper material.

Output rules:
- Output 3 to 5 detail keywords; not more, not fewer.
- Output only the keywords, with no other text or explanation.
- Separate the keywords with a single space " ".
- If a keyword contains several words, join them with a plus sign "+" instead of spaces or any other separator.
- All keywords must be in English.

Example:
Input:
query = trigonometric functions
summary = Trigonometric functions are a family of angle functions common in mathematics. They relate the interior angles of a right triangle to ratios of its sides, and can equally be defined through lengths of segments on the unit circle. They play an important role in studying the properties of geometric shapes such as triangles and circles, and are a foundational tool for analyzing vibrations, waves, celestial motion, and other periodic phenomena. In mathematical analysis they are also defined as infinite series or as solutions of particular differential equations, which extends their values to arbitrary real and even complex numbers.
Output:
definitions purposes general+formulas

Follow the format and the example strictly."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_query_and_summary_verbatim() {
        let prompt = expansion_prompt("rust borrow checker", "The borrow checker enforces...");
        assert!(prompt.contains("\"rust borrow checker\""));
        assert!(prompt.contains("\"The borrow checker enforces...\""));
    }

    #[test]
    fn prompt_pins_the_output_contract() {
        let prompt = expansion_prompt("q", "s");
        assert!(prompt.contains("3 to 5"));
        assert!(prompt.contains("single space"));
        assert!(prompt.contains("definitions purposes general+formulas"));
    }
}
