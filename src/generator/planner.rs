//! 章节规划 - 从主题生成有序章节列表
//!
//! 规划解析走三级降级，从不向调用方抛错，任何输入都产出至少一个章节。

use anyhow::Result;
use serde::Deserialize;

use crate::generator::context::GeneratorContext;
use crate::generator::types::{PlanOutcome, Section};

/// 规划阶段查询生成的系统指令
fn plan_query_writer_instructions(
    topic: &str,
    structure: &str,
    number_of_queries: usize,
) -> String {
    format!(
        r#"You are performing research for a report.

<Report topic>
{topic}
</Report topic>

<Report organization>
{structure}
</Report organization>

<Task>
Generate {number_of_queries} web search queries that will help gather information for planning the report sections.
The queries should cover the breadth of the report organization above.
Return one query per line, with no numbering and no extra commentary.
</Task>"#
    )
}

const PLAN_QUERY_WRITER_MESSAGE: &str =
    "Generate search queries that will help with planning the sections of the report.";

/// 章节规划的系统指令
fn report_planner_instructions(topic: &str, structure: &str, context: &str) -> String {
    format!(
        r#"You are planning the sections of a research report.

<Report topic>
{topic}
</Report topic>

<Report organization>
{structure}
</Report organization>

<Context>
{context}
</Context>

<Task>
Generate the ordered list of report sections. Each section must have:
- name: the section title
- description: what the section covers
- research: true when the section needs web research, false for sections that only synthesize the rest of the report
- content: leave as an empty string

Respond with a JSON object containing a single key "sections" whose value is the list of sections.
</Task>"#
    )
}

const REPORT_PLANNER_MESSAGE: &str = "Generate the sections of the report. Your response must include a 'sections' field containing a list of sections. Each section must have: name, description, research, and content fields.";

#[derive(Debug, Deserialize)]
struct ReportPlan {
    #[serde(default)]
    sections: Vec<Section>,
}

/// 生成报告章节规划
///
/// 先为规划生成检索查询，用检索结果作为规划上下文，再解析模型给出的章节列表。
pub async fn generate_plan(context: &GeneratorContext, topic: &str) -> Result<Vec<Section>> {
    println!("🗺️ 正在规划报告章节...");
    let report = &context.config.report;

    let instructions =
        plan_query_writer_instructions(topic, &report.structure, report.number_of_queries);
    let queries_text = context.chat(&instructions, PLAN_QUERY_WRITER_MESSAGE).await?;
    let queries = split_queries(&queries_text);

    let sources = context.search_client.execute(&queries).await;

    let instructions = report_planner_instructions(topic, &report.structure, &sources);
    let sections_text = context.chat(&instructions, REPORT_PLANNER_MESSAGE).await?;

    let outcome = parse_plan(&sections_text);
    if context.config.verbose {
        println!("   📋 章节规划解析层级: {}", outcome.tier_name());
    }

    let sections = outcome.into_sections();
    println!("✓ 规划完成，共 {} 个章节", sections.len());
    Ok(sections)
}

/// 将模型响应按行拆分为查询串，丢弃空白行
pub fn split_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// 章节规划的三级解析
///
/// (a) 取第一个'{'到最后一个'}'之间的子串做JSON解析；
/// (b) 没有JSON括号时，每个非空行作为一个自动生成章节；
/// (c) 其余任何失败都退化为单个默认章节。
pub fn parse_plan(text: &str) -> PlanOutcome {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) => {
            if start > end {
                return PlanOutcome::Fallback(default_section());
            }
            match serde_json::from_str::<ReportPlan>(&text[start..=end]) {
                Ok(plan) if !plan.sections.is_empty() => PlanOutcome::Structured(plan.sections),
                _ => PlanOutcome::Fallback(default_section()),
            }
        }
        _ => {
            let sections: Vec<Section> = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| Section::new(line, "Auto-generated section", true))
                .collect();

            if sections.is_empty() {
                PlanOutcome::Fallback(default_section())
            } else {
                PlanOutcome::LooseList(sections)
            }
        }
    }
}

fn default_section() -> Section {
    Section::new("Research Report", "Generated research on the topic", true)
}
