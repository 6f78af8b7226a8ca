use serde::{Deserialize, Serialize};

/// 报告章节
///
/// 字段名与模型约定的JSON契约保持一致（name/description/research/content）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// 章节名
    pub name: String,

    /// 章节主题描述
    #[serde(default)]
    pub description: String,

    /// 是否需要走"检索-撰写-评审"调研循环
    #[serde(default)]
    pub research: bool,

    /// 章节正文，每轮撰写整体覆盖而非追加
    #[serde(default)]
    pub content: String,
}

impl Section {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        research: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            research,
            content: String::new(),
        }
    }
}

/// 章节规划解析的三级结果
///
/// 依次尝试：结构化JSON、按行的松散列表、固定兜底章节。任何一级
/// 都能摊平为非空章节列表，规划阶段因此从不失败。
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// JSON中的sections字段解析成功
    Structured(Vec<Section>),
    /// 响应没有JSON括号，按非空行生成章节
    LooseList(Vec<Section>),
    /// 解析失败，使用单个默认章节
    Fallback(Section),
}

impl PlanOutcome {
    /// 摊平为章节列表
    pub fn into_sections(self) -> Vec<Section> {
        match self {
            PlanOutcome::Structured(sections) | PlanOutcome::LooseList(sections) => sections,
            PlanOutcome::Fallback(section) => vec![section],
        }
    }

    /// 解析层级名称，用于日志
    pub fn tier_name(&self) -> &'static str {
        match self {
            PlanOutcome::Structured(_) => "structured",
            PlanOutcome::LooseList(_) => "loose-list",
            PlanOutcome::Fallback(_) => "fallback",
        }
    }
}

/// 评审结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "pass")]
    Pass,
    #[serde(rename = "fail")]
    Fail,
}

/// 追问查询
///
/// 评审后模型可能返回裸字符串，也可能返回带search_query字段的记录，
/// 两种形态都在解析边界归一化为查询串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FollowUpQuery {
    Annotated { search_query: String },
    Raw(String),
}

impl FollowUpQuery {
    pub fn into_query(self) -> String {
        match self {
            FollowUpQuery::Annotated { search_query } => search_query,
            FollowUpQuery::Raw(query) => query,
        }
    }
}

/// 评审反馈
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub grade: Grade,
    #[serde(default)]
    pub follow_up_queries: Vec<FollowUpQuery>,
}

impl Feedback {
    /// 解析失败时的默认反馈：视为通过，调研循环随之结束
    pub fn pass_by_default() -> Self {
        Self {
            grade: Grade::Pass,
            follow_up_queries: Vec::new(),
        }
    }
}

/// 单章节调研循环的终止方式
///
/// 两种终止都保留最后一轮撰写的内容，均不视为错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOutcome {
    /// 评审通过
    Passed,
    /// 达到最大调研轮数仍未通过，接受当前内容
    ExhaustedRetries,
}
