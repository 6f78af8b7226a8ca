use crate::config::{Config, LLMProvider};
use clap::Parser;
use std::path::PathBuf;

/// DeepResearch-RS - 由Rust与AI驱动的深度调研报告生成引擎
#[derive(Parser, Debug)]
#[command(name = "Quill (deepresearch-rs)")]
#[command(
    about = "AI-based deep research report generation engine. It plans report sections for a topic, retrieves web sources, then iteratively drafts and grades each section until it passes or the search depth is exhausted."
)]
#[command(version)]
pub struct Args {
    /// 调研主题
    #[arg(short, long)]
    pub topic: Option<String>,

    /// 输出路径
    #[arg(short, long, default_value = "./quill.report")]
    pub output_path: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 每个阶段生成的检索查询数量
    #[arg(long)]
    pub number_of_queries: Option<usize>,

    /// 单章节"检索-撰写-评审"循环的最大轮数
    #[arg(long)]
    pub max_search_depth: Option<usize>,

    /// LLM Provider (openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 推理模型
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Tavily API KEY
    #[arg(long)]
    pub tavily_api_key: Option<String>,

    /// 禁用DuckDuckGo回退检索
    #[arg(long)]
    pub no_duckduckgo: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("quill.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 覆盖配置文件中的设置
        if let Some(topic) = self.topic {
            config.topic = Some(topic);
        }
        config.output_path = self.output_path;

        // 覆盖报告生成配置
        if let Some(number_of_queries) = self.number_of_queries {
            config.report.number_of_queries = number_of_queries;
        }
        if let Some(max_search_depth) = self.max_search_depth {
            config.report.max_search_depth = max_search_depth;
        }
        // 查询数与循环轮数的下限均为1
        config.report.number_of_queries = config.report.number_of_queries.max(1);
        config.report.max_search_depth = config.report.max_search_depth.max(1);

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 覆盖检索配置
        if let Some(tavily_api_key) = self.tavily_api_key {
            config.search.tavily_api_key = Some(tavily_api_key).filter(|key| !key.is_empty());
        }
        if self.no_duckduckgo {
            config.search.enable_duckduckgo = false;
        }

        config.verbose = self.verbose;

        config
    }
}
