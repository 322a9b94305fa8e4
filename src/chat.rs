// src/chat.rs

pub const CANNED_REPLY: &str = "Your financial profile looks suitable for a business loan.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Produces the assistant's reply for one user turn. The session only
/// depends on this contract, so a real assistant can replace the canned
/// stub without touching transcript handling.
pub trait ReplyStrategy {
    fn reply(&mut self, input: &str) -> String;
}

pub struct CannedReply;

impl ReplyStrategy for CannedReply {
    fn reply(&mut self, _input: &str) -> String {
        CANNED_REPLY.to_string()
    }
}

/// Append-only chat transcript plus the pending input buffer. Cleared only
/// by process restart.
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    pub pending_input: String,
    replier: Box<dyn ReplyStrategy>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_replier(Box::new(CannedReply))
    }

    pub fn with_replier(replier: Box<dyn ReplyStrategy>) -> Self {
        Self {
            transcript: Vec::new(),
            pending_input: String::new(),
            replier,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Appends the user's turn verbatim followed by exactly one bot reply,
    /// then clears the input buffer. Whitespace-only input is ignored.
    pub fn submit(&mut self) {
        if self.pending_input.trim().is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.pending_input);
        let reply = self.replier.reply(&text);
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            text,
        });
        self.transcript.push(ChatMessage {
            role: ChatRole::Bot,
            text: reply,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_appends_user_then_bot() {
        let mut chat = ChatSession::new();
        chat.pending_input = "Can I get a loan?".to_string();
        chat.submit();

        let transcript = chat.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, ChatRole::User);
        assert_eq!(transcript[0].text, "Can I get a loan?");
        assert_eq!(transcript[1].role, ChatRole::Bot);
        assert_eq!(transcript[1].text, CANNED_REPLY);
        assert!(chat.pending_input.is_empty());
    }

    #[test]
    fn each_submission_grows_the_transcript_by_two() {
        let mut chat = ChatSession::new();
        for i in 0..3 {
            chat.pending_input = format!("question {i}");
            chat.submit();
        }

        let transcript = chat.transcript();
        assert_eq!(transcript.len(), 6);
        for pair in transcript.chunks(2) {
            assert_eq!(pair[0].role, ChatRole::User);
            assert_eq!(pair[1].role, ChatRole::Bot);
        }
    }

    #[test]
    fn empty_and_whitespace_input_is_ignored() {
        let mut chat = ChatSession::new();
        chat.submit();
        chat.pending_input = "   \t".to_string();
        chat.submit();
        assert!(chat.transcript().is_empty());
    }

    #[test]
    fn reply_strategy_is_pluggable() {
        struct Echo;
        impl ReplyStrategy for Echo {
            fn reply(&mut self, input: &str) -> String {
                format!("echo: {input}")
            }
        }

        let mut chat = ChatSession::with_replier(Box::new(Echo));
        chat.pending_input = "hello".to_string();
        chat.submit();
        assert_eq!(chat.transcript()[1].text, "echo: hello");
    }
}
