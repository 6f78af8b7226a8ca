use thiserror::Error;

/// 模型服务调用错误
///
/// 区分两类失败：配置性错误（不可恢复，启动阶段即应拦截）与
/// 传输性错误（可按配置的次数重试）。
#[derive(Debug, Error)]
pub enum LlmError {
    /// LLM凭证缺失
    #[error("LLM API KEY未配置，请通过配置文件、--llm-api-key或QUILL_LLM_API_KEY环境变量提供")]
    MissingApiKey,

    /// 模型服务或传输层错误
    #[error("模型服务调用失败: {0}")]
    Completion(#[from] rig::completion::PromptError),

    /// 模型返回了空补全
    #[error("模型返回内容为空")]
    EmptyCompletion,
}

impl LlmError {
    /// 该错误是否值得重试
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::MissingApiKey => false,
            LlmError::Completion(_) | LlmError::EmptyCompletion => true,
        }
    }
}
