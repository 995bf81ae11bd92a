//! Agent执行辅助 - 带缓存的LLM调用入口

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generator::context::GeneratorContext;
use crate::llm::client::utils::estimate_token_usage;

/// 一次Agent调用的参数
pub struct AgentExecuteParams {
    /// 系统提示词
    pub prompt_sys: String,
    /// 用户提示词
    pub prompt_user: String,
    /// 缓存分类（一般为`scope/agent_type`）
    pub cache_scope: String,
    /// 日志标签
    pub log_tag: String,
}

impl AgentExecuteParams {
    fn cache_key(&self) -> String {
        format!("{}\n===\n{}", self.prompt_sys, self.prompt_user)
    }
}

/// 结构化提取调用，优先回放缓存
pub async fn extract<T>(context: &GeneratorContext, params: AgentExecuteParams) -> Result<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    let cache_key = params.cache_key();

    {
        let cache = context.cache_manager.read().await;
        if let Some(cached) = cache.get::<T>(&params.cache_scope, &cache_key).await? {
            if context.config.verbose {
                println!("   💾 [{}] 命中缓存，跳过模型调用", params.log_tag);
            }
            return Ok(cached);
        }
    }

    let result: T = context
        .llm_client
        .extract(&params.prompt_sys, &params.prompt_user)
        .await?;

    let rendered = serde_json::to_string(&result)?;
    let token_usage = estimate_token_usage(&cache_key, &rendered);
    if context.config.verbose {
        println!(
            "   📊 [{}] 估算token消耗: {}",
            params.log_tag, token_usage.total_tokens
        );
    }

    {
        let cache = context.cache_manager.read().await;
        cache
            .set(
                &params.cache_scope,
                &cache_key,
                &result,
                Some(token_usage),
                Some(context.config.llm.model_efficient.clone()),
            )
            .await?;
    }

    Ok(result)
}

/// 文本生成调用，优先回放缓存
pub async fn prompt(context: &GeneratorContext, params: AgentExecuteParams) -> Result<String> {
    let cache_key = params.cache_key();

    {
        let cache = context.cache_manager.read().await;
        if let Some(cached) = cache.get::<String>(&params.cache_scope, &cache_key).await? {
            if context.config.verbose {
                println!("   💾 [{}] 命中缓存，跳过模型调用", params.log_tag);
            }
            return Ok(cached);
        }
    }

    let result = context
        .llm_client
        .prompt(&params.prompt_sys, &params.prompt_user)
        .await?;

    let token_usage = estimate_token_usage(&cache_key, &result);
    if context.config.verbose {
        println!(
            "   📊 [{}] 估算token消耗: {}",
            params.log_tag, token_usage.total_tokens
        );
    }

    {
        let cache = context.cache_manager.read().await;
        cache
            .set(
                &params.cache_scope,
                &cache_key,
                &result,
                Some(token_usage),
                Some(context.config.llm.model_efficient.clone()),
            )
            .await?;
    }

    Ok(result)
}
