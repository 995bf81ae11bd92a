// 调研规划阶段
// 1. AnalystFactory 根据主题合成分析师小组
// 2. 人工检查点确认小组构成，反馈会触发重新生成（有轮数上限）

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::plan::agents::AnalystFactory;
use crate::generator::plan::feedback::{
    AutoApprove, ConsoleFeedback, FeedbackDecision, FeedbackSource, print_panel,
};
use crate::generator::plan::memory::PlanMemory;
use crate::generator::step_forward_agent::StepForwardAgent;
use crate::types::{Analyst, GenerateAnalystsState};

pub mod agents;
pub mod feedback;
pub mod memory;
pub mod types;

/// 执行规划阶段
pub async fn execute(context: &GeneratorContext) -> Result<Vec<Analyst>> {
    let topic = context.config.require_topic()?;
    println!("\n🧭 执行调研规划阶段...");
    println!("🎯 调研主题: {}", topic);

    context.store_topic(&topic).await?;

    let mut feedback_source: Box<dyn FeedbackSource> = if context.config.auto_approve {
        Box::new(AutoApprove)
    } else {
        Box::new(ConsoleFeedback)
    };

    execute_with_feedback(context, feedback_source.as_mut()).await
}

/// 带检查点的小组生成循环
pub async fn execute_with_feedback(
    context: &GeneratorContext,
    feedback_source: &mut dyn FeedbackSource,
) -> Result<Vec<Analyst>> {
    let factory = AnalystFactory;
    let max_rounds = context.config.max_feedback_rounds.max(1);

    let mut state = GenerateAnalystsState {
        topic: context
            .get_topic()
            .await
            .ok_or_else(|| anyhow::anyhow!("调研主题数据不可用"))?,
        max_analysts: context.config.max_analysts,
        human_feedback: None,
        analysts: Vec::new(),
    };

    for round in 1..=max_rounds {
        let perspectives = factory.execute(context).await?;
        if perspectives.analysts.is_empty() {
            return Err(anyhow::anyhow!("分析师小组生成结果为空"));
        }
        state.analysts = perspectives.analysts;
        context.store_analysts(&state.analysts).await?;
        print_panel(&state.analysts);

        match feedback_source.review(&state.analysts)? {
            FeedbackDecision::Approve => {
                println!("✓ 分析师小组已确认");
                return Ok(state.analysts);
            }
            FeedbackDecision::Revise(feedback) => {
                println!(
                    "🔁 收到调整意见，重新生成小组 (第 {} / {} 轮)",
                    round, max_rounds
                );
                state.human_feedback = Some(feedback.clone());
                context.store_human_feedback(&feedback).await?;
            }
        }
    }

    // 达到反馈轮数上限，采用最近一版小组继续
    println!("⚠️ 已达到反馈轮数上限，采用最近一版分析师小组");
    if state.analysts.is_empty() {
        return Err(anyhow::anyhow!("分析师小组数据不可用"));
    }
    Ok(state.analysts)
}
