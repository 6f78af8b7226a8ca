use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

/// 保存报告文本到输出目录
pub fn save(config: &Config, report: &str) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_path).context("Failed to create output directory")?;

    let path = config.output_path.join("report.md");
    fs::write(&path, report).context("Failed to write report file")?;

    println!(
        "📄 报告已保存: {} ({})",
        path.display(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(path)
}
