//! 章节评审 - 将模型评审输出解析为结构化结论

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::types::{Feedback, Section};

/// 章节评审的系统指令
fn section_grader_instructions(
    topic: &str,
    section_topic: &str,
    section_content: &str,
    number_of_follow_up_queries: usize,
) -> String {
    format!(
        r#"Review a report section relative to the overall report topic.

<Report topic>
{topic}
</Report topic>

<Section topic>
{section_topic}
</Section topic>

<Section content>
{section_content}
</Section content>

<Task>
Evaluate whether the section content adequately addresses the section topic.
If it does not, generate {number_of_follow_up_queries} follow-up search queries to gather the missing information.

Respond with a JSON object of the form:
{{"grade": "pass" or "fail", "follow_up_queries": ["query", ...]}}
</Task>"#
    )
}

const SECTION_GRADER_MESSAGE: &str = "Grade the report and consider follow-up questions for missing information. If the grade is 'pass', return empty strings for all follow-up queries. If the grade is 'fail', provide specific search queries to gather missing information.";

/// 评审一个章节的当前内容
pub async fn grade_section(
    context: &GeneratorContext,
    topic: &str,
    section: &Section,
) -> Result<Feedback> {
    let instructions = section_grader_instructions(
        topic,
        &section.description,
        &section.content,
        context.config.report.number_of_queries,
    );
    let output = context.chat(&instructions, SECTION_GRADER_MESSAGE).await?;
    Ok(parse_feedback(&output))
}

/// 从模型输出中解析评审反馈
///
/// 取第一个'{'到最后一个'}'之间的子串做JSON解析；任何解析失败都
/// 视为通过并清空追问，调研循环随之结束。
pub fn parse_feedback(text: &str) -> Feedback {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Feedback::pass_by_default();
    };
    if start > end {
        return Feedback::pass_by_default();
    }

    serde_json::from_str(&text[start..=end]).unwrap_or_else(|_| Feedback::pass_by_default())
}
