//! 报告生成工作流
//!
//! 串起"规划 → 章节调研 → 综合撰写 → 汇编"的完整流程，并维护贯穿
//! 一次运行的对话日志。执行完全串行：章节、查询与模型调用都逐个进行。

use anyhow::Result;

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::outlet;
use crate::generator::planner;
use crate::generator::researcher;
use crate::generator::types::{Section, SectionOutcome};
use crate::generator::writer;
use crate::memory::ChatMessage;

/// 启动CLI模式的报告生成工作流
pub async fn launch(config: &Config) -> Result<()> {
    let Some(topic) = config.topic.clone() else {
        anyhow::bail!("未指定调研主题，请通过 --topic 提供");
    };

    let context = GeneratorContext::new(config.clone())?;

    // 启动时检查模型连接
    context.llm_client.check_connection().await?;

    let (report, _history) = run_report(&context, &topic).await?;

    let path = outlet::save(config, &report)?;
    println!("🎉 报告生成完成: {}", path.display());
    Ok(())
}

/// 宿主边界入口：基于既有对话历史生成报告
///
/// 返回报告文本与扩展后的完整对话日志。原有条目保持不变，本次运行
/// 的全部交换与最终报告只会追加在其后。
pub async fn generate_report(
    config: &Config,
    history: &[ChatMessage],
    query: &str,
) -> Result<(String, Vec<ChatMessage>)> {
    let context = GeneratorContext::with_history(config.clone(), history)?;
    run_report(&context, query).await
}

/// 完整的"规划-调研-撰写-汇编"流程
async fn run_report(
    context: &GeneratorContext,
    topic: &str,
) -> Result<(String, Vec<ChatMessage>)> {
    context.push_message(ChatMessage::user(topic)).await;

    println!("🚀 开始生成调研报告: {}", topic);

    let mut sections = planner::generate_plan(context, topic).await?;

    // 研究章节按规划顺序逐个调研
    let mut completed = Vec::new();
    for section in sections.iter_mut().filter(|section| section.research) {
        println!("🔍 调研章节: {}", section.name);
        match researcher::research_section(context, topic, section).await? {
            SectionOutcome::Passed => println!("✓ 章节评审通过: {}", section.name),
            SectionOutcome::ExhaustedRetries => {
                println!("⚠️ 章节达到最大调研轮数，保留当前内容: {}", section.name)
            }
        }
        completed.push(section.clone());
    }

    // 非研究章节在全部研究章节定稿后撰写
    let completed_context = writer::format_sections(&completed);
    for section in sections.iter_mut().filter(|section| !section.research) {
        println!("📝 撰写章节: {}", section.name);
        let content =
            writer::write_final_section(context, topic, section, &completed_context).await?;
        section.content = content;
    }

    let report = assemble(&sections);
    context
        .push_message(ChatMessage::assistant(report.clone()))
        .await;

    Ok((report, context.memory_snapshot().await))
}

/// 将各章节正文按规划顺序拼接为完整报告
///
/// 输出只由章节正文与顺序决定；空正文渲染为空块，不是错误。
pub fn assemble(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| section.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
