// 访谈阶段
// 每位分析师一场独立访谈：提问 -> 网络检索 -> 专家应答的循环，
// 完成后保存访谈记录并转写为报告章节。整组访谈受限并发执行。

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::interview::engine::InterviewEngine;
use crate::generator::plan::memory::PlanMemory;
use crate::utils::threads::do_parallel_with_limit;

pub mod agents;
pub mod engine;
pub mod memory;

/// 执行访谈阶段
pub async fn execute(context: &GeneratorContext) -> Result<()> {
    println!("\n🎤 执行访谈阶段...");

    let topic = context
        .get_topic()
        .await
        .ok_or_else(|| anyhow::anyhow!("调研主题数据不可用"))?;
    let analysts = context
        .get_analysts()
        .await
        .ok_or_else(|| anyhow::anyhow!("分析师小组数据不可用"))?;

    if !context.search_client.is_available() {
        println!("⚠️ 网络搜索不可用，访谈将仅依赖模型自身知识");
    }

    let max_parallels = context.config.llm.max_parallels;
    println!(
        "🚀 启动并发访谈，共 {} 位分析师，最大并发数：{}",
        analysts.len(),
        max_parallels
    );

    let interview_futures: Vec<_> = analysts
        .into_iter()
        .map(|analyst| {
            let context_clone = context.clone();
            let topic_clone = topic.clone();
            let analyst_name = analyst.name.clone();

            Box::pin(async move {
                let engine = InterviewEngine::new(analyst);
                let result = engine.execute(&context_clone, &topic_clone).await;
                (analyst_name, result)
            })
        })
        .collect();

    let results = do_parallel_with_limit(interview_futures, max_parallels).await;

    for (analyst_name, result) in results {
        result.map_err(|e| anyhow::anyhow!("分析师 {} 的访谈失败: {}", analyst_name, e))?;
    }

    println!("✓ 访谈阶段执行完毕");
    Ok(())
}
