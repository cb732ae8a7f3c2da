//! Chat messages sent to the LLM

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Instructions from the operator
    System,
    /// The classification request itself
    User,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// One block of message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Plain text
    Text(String),
    /// Image embedded as a `data:` URL
    Image {
        /// `data:image/png;base64,...`
        data_url: String,
    },
}

/// A single chat message: ordered text and image blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author
    pub role: Role,
    /// Content in display order
    pub content: Vec<ContentBlock>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }

    /// Create a user message holding one text block
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![ContentBlock::Text(text.into())])
    }

    /// Concatenation of all text blocks, separated by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text(text) => Some(text.as_str()),
                ContentBlock::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of image blocks
    pub fn image_count(&self) -> usize {
        self.content
            .iter()
            .filter(|block| matches!(block, ContentBlock::Image { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_skips_images() {
        let message = ChatMessage::user(vec![
            ContentBlock::Text("a".to_string()),
            ContentBlock::Image {
                data_url: "data:image/png;base64,AA==".to_string(),
            },
            ContentBlock::Text("b".to_string()),
        ]);

        assert_eq!(message.text(), "a\nb");
        assert_eq!(message.image_count(), 1);
        assert_eq!(message.role.as_str(), "user");
    }
}
