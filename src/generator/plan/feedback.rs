//! 人工检查点 - 在访谈开始前确认分析师小组

use anyhow::Result;
use std::io::Write;

use crate::types::Analyst;

/// 检查点的裁决结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackDecision {
    /// 通过，采用当前小组
    Approve,
    /// 退回，携带调整意见重新生成
    Revise(String),
}

/// 检查点反馈来源
///
/// 交互式运行时从终端读取，测试与无人值守运行时使用脚本化实现。
pub trait FeedbackSource: Send {
    fn review(&mut self, analysts: &[Analyst]) -> Result<FeedbackDecision>;
}

/// 自动通过（`--auto-approve`）
pub struct AutoApprove;

impl FeedbackSource for AutoApprove {
    fn review(&mut self, _analysts: &[Analyst]) -> Result<FeedbackDecision> {
        Ok(FeedbackDecision::Approve)
    }
}

/// 终端交互式反馈
#[derive(Default)]
pub struct ConsoleFeedback;

impl FeedbackSource for ConsoleFeedback {
    fn review(&mut self, _analysts: &[Analyst]) -> Result<FeedbackDecision> {
        print!("📝 直接回车采用该小组，或输入调整意见后回车: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(parse_feedback_line(&line))
    }
}

/// 解析一行操作者输入
pub fn parse_feedback_line(line: &str) -> FeedbackDecision {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return FeedbackDecision::Approve;
    }
    match trimmed.to_lowercase().as_str() {
        "y" | "yes" | "ok" | "approve" | "通过" => FeedbackDecision::Approve,
        _ => FeedbackDecision::Revise(trimmed.to_string()),
    }
}

/// 在终端打印分析师小组概览
pub fn print_panel(analysts: &[Analyst]) {
    println!("\n👥 生成的分析师小组（{}位）:", analysts.len());
    for (i, analyst) in analysts.iter().enumerate() {
        println!(
            "   {}. {} - {} @ {}",
            i + 1,
            analyst.name,
            analyst.role,
            analyst.affiliation
        );
        println!("      {}", analyst.description);
    }
}
