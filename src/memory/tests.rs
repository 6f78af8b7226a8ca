#[cfg(test)]
mod tests {
    use crate::memory::{ChatMessage, Memory, Role};

    #[test]
    fn test_memory_starts_empty() {
        let memory = Memory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.len(), 0);
    }

    #[test]
    fn test_memory_from_history() {
        let history = vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant("hi there"),
        ];
        let memory = Memory::from_history(&history);

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.messages(), history.as_slice());
    }

    #[test]
    fn test_record_exchange_appends_in_order() {
        let mut memory = Memory::new();
        memory.record_exchange("prompt one", "completion one");
        memory.record_exchange("prompt two", "completion two");

        let messages = memory.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "prompt one");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "completion one");
        assert_eq!(messages[2].content, "prompt two");
        assert_eq!(messages[3].content, "completion two");
    }

    #[test]
    fn test_appends_never_modify_existing_entries() {
        let history = vec![
            ChatMessage::system("be helpful"),
            ChatMessage::user("hello"),
        ];
        let mut memory = Memory::from_history(&history);
        memory.push(ChatMessage::user("a new topic"));
        memory.record_exchange("prompt", "completion");

        // pure extension: the original prefix is intact
        assert!(memory.len() >= history.len());
        assert_eq!(&memory.messages()[..history.len()], history.as_slice());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut memory = Memory::new();
        memory.push(ChatMessage::user("hello"));

        let snapshot = memory.snapshot();
        memory.push(ChatMessage::assistant("hi"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::user("a").role, Role::User);
        assert_eq!(ChatMessage::assistant("b").role, Role::Assistant);
        assert_eq!(ChatMessage::system("c").role, Role::System);
    }

    #[test]
    fn test_role_serde_lowercase() {
        let message = ChatMessage::assistant("done");
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains(r#""role":"assistant""#));

        let parsed: ChatMessage = serde_json::from_str(r#"{"role":"system","content":"x"}"#).unwrap();
        assert_eq!(parsed.role, Role::System);
    }
}
