use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 调研主题（CLI模式下必填）
    pub topic: Option<String>,

    /// 输出路径
    pub output_path: PathBuf,

    /// 报告生成配置
    pub report: ReportConfig,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 检索服务配置
    pub search: SearchConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// 报告生成配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    /// 报告组织结构模板，指导规划阶段的章节划分
    pub structure: String,

    /// 每个阶段生成的检索查询数量，最小为1
    pub number_of_queries: usize,

    /// 单章节"检索-撰写-评审"循环的最大轮数，最小为1
    pub max_search_depth: usize,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 推理模型
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 检索服务配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Tavily API KEY，配置后优先使用Tavily检索
    pub tavily_api_key: Option<String>,

    /// 在没有Tavily凭证时是否回退到DuckDuckGo
    pub enable_duckduckgo: bool,

    /// 单条查询返回的最大结果数
    pub max_results: usize,

    /// 单条查询的超时时间（秒）
    pub timeout_seconds: u64,
}

/// 默认的报告组织结构模板
pub const DEFAULT_REPORT_STRUCTURE: &str = r#"Use this structure to create a report on the user-provided topic:

1. Introduction (no research needed)
   - Brief overview of the topic area

2. Main Body Sections:
   - Each section should focus on a sub-topic of the user-provided topic

3. Conclusion (no research needed)
   - Concise summary distilling the main body sections"#;

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: None,
            output_path: PathBuf::from("./quill.report"),
            report: ReportConfig::default(),
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            verbose: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            structure: DEFAULT_REPORT_STRUCTURE.to_string(),
            number_of_queries: 2,
            max_search_depth: 2,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("QUILL_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://openrouter.ai/api/v1"),
            model: String::from("openrouter/optimus-alpha"),
            max_tokens: 32768,
            temperature: 0.1,
            retry_attempts: 5,
            retry_delay_ms: 5000,
            timeout_seconds: 300,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: std::env::var("TAVILY_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            enable_duckduckgo: true,
            max_results: 5,
            timeout_seconds: 15,
        }
    }
}
