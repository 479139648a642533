//! Prompt template for query expansion

use crate::endpoint::{ConversationMessage, Role};

/// System prompt for query expansion
pub const SYSTEM_PROMPT: &str = "You are an expert at expanding user questions into multiple variations. \
Perform query expansion. If there are multiple common ways of phrasing a user question \
or common synonyms for key words in the question, make sure to return multiple versions \
of the query with the different phrasings.

If there are acronyms or words you are not familiar with, do not try to rephrase them.

Return at least 3 versions of the question that maintain the original intent.";

const QUESTION_PLACEHOLDER: &str = "{question}";

/// Ordered (role, template) pairs rendered into a conversation
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    parts: Vec<(Role, String)>,
}

impl PromptTemplate {
    pub fn from_messages(parts: Vec<(Role, String)>) -> Self {
        Self { parts }
    }

    /// System instructions followed by the bare question
    pub fn expansion(system_prompt: &str) -> Self {
        Self::from_messages(vec![
            (Role::System, system_prompt.to_string()),
            (Role::Human, QUESTION_PLACEHOLDER.to_string()),
        ])
    }

    /// Substitute the question into every template. The question itself is
    /// inserted verbatim, placeholders inside it are not expanded again.
    pub fn format(&self, question: &str) -> Vec<ConversationMessage> {
        self.parts
            .iter()
            .map(|(role, template)| ConversationMessage {
                role: *role,
                content: template
                    .split(QUESTION_PLACEHOLDER)
                    .collect::<Vec<_>>()
                    .join(question),
            })
            .collect()
    }
}
