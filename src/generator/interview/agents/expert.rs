use anyhow::Result;

use crate::generator::agent_executor::{AgentExecuteParams, prompt};
use crate::generator::context::GeneratorContext;
use crate::generator::interview::memory::MemoryScope;
use crate::types::InterviewState;

/// 专家应答生成器 - 基于检索材料回答分析师的提问
pub struct ExpertResponder;

impl ExpertResponder {
    /// 针对最近一个问题生成有引用依据的专家回答
    pub async fn generate(
        context: &GeneratorContext,
        topic: &str,
        state: &InterviewState,
    ) -> Result<String> {
        let question = state
            .last_question()
            .ok_or_else(|| anyhow::anyhow!("没有待回答的访谈问题"))?;

        let context_docs = state.render_context();
        let material = if context_docs.trim().is_empty() {
            "（本轮没有检索材料，请基于你的领域知识谨慎回答，避免编造数据）".to_string()
        } else {
            context_docs
        };

        let system_prompt = format!(
            r#"你是一位接受分析师访谈的领域专家，访谈主题为：{topic}

提问的分析师画像如下：
{persona}

回答要求：
1. 只使用下方提供的检索材料中的信息作答，不要引入无依据的事实
2. 在用到某份材料的论述后紧跟引用标记，如 [1]、[2]
3. 回答末尾不需要单独罗列来源，引用标记即可
4. 风格专业、信息密度高，直接回答问题

## 检索材料
{material}

{language}"#,
            topic = topic,
            persona = state.analyst.persona(),
            material = material,
            language = context.config.target_language.prompt_instruction(),
        );

        let user_prompt = format!(
            "访谈记录：\n\n{}\n\n请回答分析师的最新问题：{}",
            state.render_transcript(),
            question
        );

        let params = AgentExecuteParams {
            prompt_sys: system_prompt,
            prompt_user: user_prompt,
            cache_scope: format!("{}/answer_{}", MemoryScope::INTERVIEWS, state.analyst.slug()),
            log_tag: format!("answer:{}", state.analyst.slug()),
        };

        prompt(context, params).await
    }
}
