//! Prompt rendering for the intake loop.
//!
//! Questions and answers are rendered as ordered dash lists, in the order
//! they were asked and given, with a fixed placeholder when a list is still
//! empty. Rendering is pure string work so both controllers stay free of
//! formatting concerns.

use super::state::IntakeState;

/// Placeholder used when no questions have been asked yet.
const NO_QUESTIONS_YET: &str = "None yet.";
/// Placeholder used when no answers have been given yet.
const NO_ANSWERS_YET: &str = "None provided.";

/// Builds the prompt for a clarifying-question round.
pub fn question_round_prompt(state: &IntakeState) -> String {
    format!(
        "You are an AI legal intake assistant. Your role is to gather information \
about a client's legal situation by asking clarifying questions.\n\n\
The client has provided this initial description:\n{}\n\n\
Questions already asked:\n{}\n\n\
Answers already given:\n{}\n\n\
Ask 1-3 specific, factual questions that would help a lawyer understand the \
situation. Do not provide legal advice and do not make assumptions about the \
law. Respond in the language of the initial description. If you already have \
enough information to write a comprehensive case summary, ask no further \
questions and mark the intake as complete.",
        state.initial_description,
        render_list(&state.questions, NO_QUESTIONS_YET),
        render_list(&state.answers, NO_ANSWERS_YET),
    )
}

/// Builds the prompt for finalizing the case description.
///
/// Question/answer pairs are aligned positionally and truncated to the
/// shorter list.
pub fn finalize_prompt(state: &IntakeState) -> String {
    let qa = state
        .qa_pairs()
        .iter()
        .map(|(q, a)| format!("- Q: {}\n  A: {}", q, a))
        .collect::<Vec<_>>()
        .join("\n");
    let qa = if qa.is_empty() {
        NO_ANSWERS_YET.to_string()
    } else {
        qa
    };

    format!(
        "You are an AI legal assistant. Based on the information below, write a \
professional, comprehensive case description a lawyer could use to understand \
the situation.\n\n\
Initial description:\n{}\n\n\
Questions and answers:\n{}\n\n\
Synthesize this into a clear, well-structured case summary covering: the key \
facts, the legal issues involved (without offering legal advice), relevant \
timelines, and the client's apparent goals or concerns. Be thorough but \
concise. Do NOT provide legal advice or recommendations.\n\n\
End with this disclaimer: This is an AI-generated summary based solely on the \
information provided.",
        state.initial_description, qa,
    )
}

fn render_list(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_uses_placeholders_for_fresh_session() {
        let state = IntakeState::new("I want to apply for a divorce");
        let prompt = question_round_prompt(&state);

        assert!(prompt.contains("I want to apply for a divorce"));
        assert!(prompt.contains(NO_QUESTIONS_YET));
        assert!(prompt.contains(NO_ANSWERS_YET));
    }

    #[test]
    fn question_prompt_lists_prior_rounds_in_order() {
        let mut state = IntakeState::new("desc");
        state.questions = vec!["Where do you reside?".to_string(), "Any children?".to_string()];
        state.answers = vec!["Dubai".to_string()];

        let prompt = question_round_prompt(&state);
        let reside = prompt.find("- Where do you reside?").unwrap();
        let children = prompt.find("- Any children?").unwrap();
        assert!(reside < children);
        assert!(prompt.contains("- Dubai"));
    }

    #[test]
    fn finalize_prompt_pairs_questions_and_answers() {
        let mut state = IntakeState::new("desc");
        state.questions = vec!["Q1".to_string(), "Q2".to_string()];
        state.answers = vec!["A1".to_string(), "A2".to_string()];

        let prompt = finalize_prompt(&state);
        assert!(prompt.contains("- Q: Q1\n  A: A1"));
        assert!(prompt.contains("- Q: Q2\n  A: A2"));
    }

    #[test]
    fn finalize_prompt_truncates_to_shorter_list() {
        let mut state = IntakeState::new("desc");
        state.questions = vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()];
        state.answers = vec!["A1".to_string()];

        let prompt = finalize_prompt(&state);
        assert!(prompt.contains("- Q: Q1\n  A: A1"));
        assert!(!prompt.contains("Q2"));
        assert!(!prompt.contains("Q3"));
    }

    #[test]
    fn finalize_prompt_handles_no_pairs() {
        let state = IntakeState::new("desc");
        let prompt = finalize_prompt(&state);
        assert!(prompt.contains(NO_ANSWERS_YET));
    }
}
