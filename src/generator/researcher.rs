//! 章节调研循环 - 报告生成的核心状态机
//!
//! 每个研究章节经历"查询生成 → 检索 → 撰写 → 评审"的循环，评审通过
//! 或达到最大轮数即终止，两种终止都保留最后一轮撰写的内容。

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::grader::grade_section;
use crate::generator::planner::split_queries;
use crate::generator::types::{Feedback, FollowUpQuery, Grade, Section, SectionOutcome};

/// 章节查询生成的系统指令
fn query_writer_instructions(topic: &str, section_topic: &str, number_of_queries: usize) -> String {
    format!(
        r#"You are writing targeted web search queries for one section of a research report.

<Report topic>
{topic}
</Report topic>

<Section topic>
{section_topic}
</Section topic>

<Task>
Generate {number_of_queries} search queries that will gather comprehensive information on the section topic.
Return one query per line, with no numbering and no extra commentary.
</Task>"#
    )
}

const QUERY_WRITER_MESSAGE: &str = "Generate search queries on the provided topic.";

/// 章节撰写的系统指令
const SECTION_WRITER_INSTRUCTIONS: &str = r#"You are writing one section of a research report.

Guidelines:
- Write in markdown, starting with the section name as a '## ' heading.
- Ground every claim in the provided source material.
- If existing section content is provided, rewrite it into an improved version instead of appending to it.
- Be specific: prefer concrete facts, numbers and named entities over generalities.
- Keep the section focused on its stated topic."#;

/// 章节撰写的输入材料
fn section_writer_inputs(
    topic: &str,
    section_name: &str,
    section_topic: &str,
    context: &str,
    section_content: &str,
) -> String {
    format!(
        r#"<Report topic>
{topic}
</Report topic>

<Section name>
{section_name}
</Section name>

<Section topic>
{section_topic}
</Section topic>

<Existing section content (if populated)>
{section_content}
</Existing section content>

<Source material>
{context}
</Source material>"#
    )
}

/// 评审后的状态转移
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GradeDecision {
    /// 终止循环，接受当前内容
    Accept(SectionOutcome),
    /// 带着追问查询进入下一轮
    Retry(Vec<String>),
}

/// 由评审反馈与已完成轮数决定循环走向
///
/// 评审通过立即终止；未通过但已达最大轮数时接受当前内容，不视为错误。
pub(crate) fn evaluate_feedback(
    feedback: Feedback,
    cycles_done: usize,
    max_depth: usize,
) -> GradeDecision {
    match feedback.grade {
        Grade::Pass => GradeDecision::Accept(SectionOutcome::Passed),
        Grade::Fail if cycles_done >= max_depth => {
            GradeDecision::Accept(SectionOutcome::ExhaustedRetries)
        }
        Grade::Fail => GradeDecision::Retry(
            feedback
                .follow_up_queries
                .into_iter()
                .map(FollowUpQuery::into_query)
                .collect(),
        ),
    }
}

/// 对单个研究章节执行调研循环
///
/// 第0轮的查询由章节主题生成；之后各轮改用评审给出的追问，不再重新生成。
pub async fn research_section(
    context: &GeneratorContext,
    topic: &str,
    section: &mut Section,
) -> Result<SectionOutcome> {
    let max_depth = context.config.report.max_search_depth;

    let mut queries = generate_section_queries(context, topic, section).await?;
    let mut iteration = 0;

    loop {
        if context.config.verbose {
            println!(
                "   🔎 第 {} 轮检索，共 {} 条查询",
                iteration + 1,
                queries.len()
            );
        }
        let sources = context.search_client.execute(&queries).await;

        let content = draft_section(context, topic, section, &sources).await?;
        section.content = content;

        let feedback = grade_section(context, topic, section).await?;
        match evaluate_feedback(feedback, iteration + 1, max_depth) {
            GradeDecision::Accept(outcome) => return Ok(outcome),
            GradeDecision::Retry(follow_ups) => {
                queries = follow_ups;
                iteration += 1;
            }
        }
    }
}

/// 为章节生成初始检索查询
async fn generate_section_queries(
    context: &GeneratorContext,
    topic: &str,
    section: &Section,
) -> Result<Vec<String>> {
    let instructions = query_writer_instructions(
        topic,
        &section.description,
        context.config.report.number_of_queries,
    );
    let text = context.chat(&instructions, QUERY_WRITER_MESSAGE).await?;
    Ok(split_queries(&text))
}

/// 基于检索材料撰写章节正文，整体覆盖既有内容
async fn draft_section(
    context: &GeneratorContext,
    topic: &str,
    section: &Section,
    sources: &str,
) -> Result<String> {
    let inputs = section_writer_inputs(
        topic,
        &section.name,
        &section.description,
        sources,
        &section.content,
    );
    context.chat(SECTION_WRITER_INSTRUCTIONS, &inputs).await
}

// Include tests
#[cfg(test)]
mod tests;
