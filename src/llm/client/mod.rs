//! LLM客户端 - 提供统一的LLM服务接口

use std::future::Future;

use anyhow::Result;
use rig::completion::Message;

use crate::config::{LLMConfig, LLMProvider};
use crate::llm::error::LlmError;
use crate::memory::{ChatMessage, Role};

mod providers;

use providers::ProviderClient;

/// LLM客户端 - 提供统一的LLM服务接口
///
/// 无状态：每次调用都携带完整的角色标记消息历史，对话连续性由调用方维护。
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    ///
    /// 凭证缺失在这里即失败，任何一次运行开始之前就会被拦截。
    pub fn new(config: LLMConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() && config.provider != LLMProvider::Ollama {
            return Err(LlmError::MissingApiKey.into());
        }
        let client = ProviderClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self
            .chat("You are a helpful assistant.", "Hello", &[])
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e.into())
            }
        }
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    ///
    /// 只对可重试错误生效，配置性错误直接返回。
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T, LlmError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        let max_retries = self.config.retry_attempts;
        let retry_delay_ms = self.config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    /// 携带对话历史的单轮补全
    ///
    /// 系统提示词作为Agent preamble下发，历史消息原样转换后随行。
    pub async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        history: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let agent = self
            .client
            .create_agent(&self.config.model, system_prompt, &self.config);
        let rig_history = to_rig_history(history);

        self.retry_with_backoff(|| async {
            let completion = agent.chat(user_prompt, rig_history.clone()).await?;
            if completion.trim().is_empty() {
                return Err(LlmError::EmptyCompletion);
            }
            Ok(completion)
        })
        .await
    }
}

/// 将角色标记消息转换为rig的消息类型
///
/// rig的消息模型没有对话中途的system角色，历史中的system条目并入user轮次。
fn to_rig_history(history: &[ChatMessage]) -> Vec<Message> {
    history
        .iter()
        .map(|message| match message.role {
            Role::Assistant => Message::assistant(&message.content),
            Role::User | Role::System => Message::user(&message.content),
        })
        .collect()
}
