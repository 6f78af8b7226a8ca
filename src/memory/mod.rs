use serde::{Deserialize, Serialize};

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

/// 一条带角色标记的对话消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// 一次报告生成运行内共享的对话日志
///
/// 只允许追加，运行期间不会截断或改写已有条目。每次模型调用把
/// 发出的提示词与返回的补全按顺序写入。
#[derive(Debug, Default)]
pub struct Memory {
    messages: Vec<ChatMessage>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以宿主提供的历史为起点创建日志
    pub fn from_history(history: &[ChatMessage]) -> Self {
        Self {
            messages: history.to_vec(),
        }
    }

    /// 追加一条消息
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// 记录一次模型调用：先追加发出的提示词，再追加返回的补全
    pub fn record_exchange(&mut self, prompt: &str, completion: &str) {
        self.messages.push(ChatMessage::user(prompt));
        self.messages.push(ChatMessage::assistant(completion));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// 复制当前完整日志
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// Include tests
#[cfg(test)]
mod tests;
