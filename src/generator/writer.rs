//! 非研究章节撰写 - 基于已完成的研究章节做单轮综合
//!
//! 引言、结论这类章节不检索、不评审，只在所有研究章节定稿之后
//! 以它们的完成内容为条件一次写成。

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::types::Section;

/// 综合章节撰写的系统指令
fn final_section_writer_instructions(
    topic: &str,
    section_name: &str,
    section_topic: &str,
    context: &str,
) -> String {
    format!(
        r#"You are writing a section that synthesizes the completed research sections of a report.

<Report topic>
{topic}
</Report topic>

<Section name>
{section_name}
</Section name>

<Section topic>
{section_topic}
</Section topic>

<Completed report sections>
{context}
</Completed report sections>

<Task>
Write the section in markdown, starting with the section name as a '## ' heading.
For an introduction, motivate the topic and preview the report. For a conclusion,
distill the main findings of the completed sections. Do not introduce claims that
are not supported by the completed sections.
</Task>"#
    )
}

const FINAL_SECTION_WRITER_MESSAGE: &str =
    "Generate a report section based on the provided sources.";

/// 撰写一个非研究章节
pub async fn write_final_section(
    context: &GeneratorContext,
    topic: &str,
    section: &Section,
    completed_context: &str,
) -> Result<String> {
    let instructions = final_section_writer_instructions(
        topic,
        &section.name,
        &section.description,
        completed_context,
    );
    context
        .chat(&instructions, FINAL_SECTION_WRITER_MESSAGE)
        .await
}

/// 将已完成章节格式化为后续撰写的参考上下文
///
/// 每个章节带分隔线、名称、描述、研究标记与正文；未写正文的章节
/// 渲染为[Not yet written]。
pub fn format_sections(sections: &[Section]) -> String {
    let rule = "=".repeat(60);
    let mut formatted = String::new();
    for (idx, section) in sections.iter().enumerate() {
        let content = if section.content.is_empty() {
            "[Not yet written]"
        } else {
            &section.content
        };
        formatted.push_str(&format!(
            "\n{rule}\nSection {}: {}\n{rule}\nDescription:\n{}\nRequires Research: \n{}\n\nContent:\n{}\n\n",
            idx + 1,
            section.name,
            section.description,
            section.research,
            content
        ));
    }
    formatted
}

// Include tests
#[cfg(test)]
mod tests;
