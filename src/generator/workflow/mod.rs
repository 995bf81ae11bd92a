use crate::config::Config;
use crate::generator::compose::memory::ComposeMemory;
use crate::generator::compose::types::AgentType;
use crate::generator::context::GeneratorContext;
use crate::generator::interview::memory::InterviewMemory;
use crate::generator::plan::memory::PlanMemory;
use crate::types::ResearchGraphState;

use anyhow::Result;

/// 启动报告生成工作流
///
/// 阶段顺序：规划（含人工检查点）-> 访谈 -> 报告撰写 -> 拼装导出。
pub async fn launch(config: &Config) -> Result<()> {
    let context = GeneratorContext::new(config.clone())?;

    // 强制重新生成时先清空缓存
    if config.force_regenerate {
        let cache = context.cache_manager.read().await;
        cache.clear_all().await?;
    }

    // 启动时检查模型连接
    context.llm_client.check_connection().await?;

    // 执行工作流
    if !config.skip_interviews {
        crate::generator::plan::execute(&context).await?;
        crate::generator::interview::execute(&context).await?;
    } else {
        // 跳过访谈时仍需主题供撰写阶段使用
        let topic = config.require_topic()?;
        context.store_topic(&topic).await?;
        println!("⚠️ 跳过访谈阶段");
    }

    if !config.skip_compose {
        crate::generator::compose::execute(&context).await?;
        crate::generator::outlet::save(&context).await?;
    } else {
        println!("⚠️ 跳过报告撰写阶段，不输出最终报告");
    }

    // 留档本次运行的状态快照
    let snapshot = snapshot_state(&context).await;
    persist_snapshot(config, &snapshot)?;

    if config.verbose {
        let (hits, misses) = context.cache_manager.read().await.stats();
        println!("📊 缓存命中 {} 次 / 未命中 {} 次", hits, misses);
        let memory_stats = context.get_memory_stats().await;
        for (scope, size) in memory_stats {
            println!("📊 Memory作用域 {} 占用 {} 字节", scope, size);
        }
    }

    println!("\n🏁 调研流程执行完毕");
    Ok(())
}

/// 汇总各Memory作用域为整体状态快照
pub async fn snapshot_state(context: &GeneratorContext) -> ResearchGraphState {
    ResearchGraphState {
        topic: context.get_topic().await.unwrap_or_default(),
        analysts: context.get_analysts().await.unwrap_or_default(),
        sections: context.collect_sections().await,
        introduction: context
            .get_document(&AgentType::Introduction.to_string())
            .await
            .unwrap_or_default(),
        content: context
            .get_document(&AgentType::ReportBody.to_string())
            .await
            .unwrap_or_default(),
        conclusion: context
            .get_document(&AgentType::Conclusion.to_string())
            .await
            .unwrap_or_default(),
        final_report: context
            .get_document(&AgentType::FinalReport.to_string())
            .await
            .unwrap_or_default(),
    }
}

/// 把状态快照写入内部工作目录
fn persist_snapshot(config: &Config, snapshot: &ResearchGraphState) -> Result<()> {
    std::fs::create_dir_all(&config.internal_path)?;
    let snapshot_path = config.internal_path.join("state.json");
    std::fs::write(&snapshot_path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}
