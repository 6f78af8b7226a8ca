use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    llm::LLMClient,
    memory::{ChatMessage, Memory},
    search::SearchClient,
};

/// 生成器上下文
///
/// 一次报告生成运行的全部协作方。对话日志在各阶段间共享，每个阶段
/// 只负责追加自己的交换。
#[derive(Clone)]
pub struct GeneratorContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 检索客户端
    pub search_client: SearchClient,
    /// 配置
    pub config: Config,
    /// 本次运行的对话日志
    pub memory: Arc<RwLock<Memory>>,
}

impl GeneratorContext {
    /// 创建新的生成器上下文
    pub fn new(config: Config) -> Result<Self> {
        Self::with_history(config, &[])
    }

    /// 以宿主提供的对话历史为起点创建上下文
    pub fn with_history(config: Config, history: &[ChatMessage]) -> Result<Self> {
        let llm_client = LLMClient::new(config.llm.clone())?;
        let search_client = SearchClient::new(&config.search);
        let memory = Arc::new(RwLock::new(Memory::from_history(history)));

        Ok(Self {
            llm_client,
            search_client,
            config,
            memory,
        })
    }

    /// 执行一次模型调用并把这轮交换写入对话日志
    ///
    /// 发出的用户提示词与返回的补全按顺序追加，每个阶段的每一轮都经由这里。
    pub async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let history = self.memory.read().await.snapshot();
        let completion = self
            .llm_client
            .chat(system_prompt, user_prompt, &history)
            .await?;

        let mut memory = self.memory.write().await;
        memory.record_exchange(user_prompt, &completion);
        Ok(completion)
    }

    /// 向对话日志追加一条消息
    pub async fn push_message(&self, message: ChatMessage) {
        self.memory.write().await.push(message);
    }

    /// 复制当前完整对话日志
    pub async fn memory_snapshot(&self) -> Vec<ChatMessage> {
        self.memory.read().await.snapshot()
    }
}
