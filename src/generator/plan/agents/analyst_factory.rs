use anyhow::Result;
use async_trait::async_trait;

use crate::generator::context::GeneratorContext;
use crate::generator::plan::memory::MemoryScope;
use crate::generator::plan::types::AgentType;
use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, StepForwardAgent,
};
use crate::types::Perspectives;

/// 分析师小组合成器 - 根据调研主题生成一组视角互补的分析师画像
#[derive(Default)]
pub struct AnalystFactory;

#[async_trait]
impl StepForwardAgent for AnalystFactory {
    type Output = Perspectives;

    fn agent_type(&self) -> String {
        AgentType::AnalystFactory.to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::PLAN.to_string()
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![DataSource::TOPIC],
            optional_sources: vec![DataSource::HUMAN_FEEDBACK],
        }
    }

    async fn provide_custom_prompt_content(
        &self,
        context: &GeneratorContext,
    ) -> Result<Option<String>> {
        Ok(Some(format!(
            "### 小组规模\n最多生成 {} 位分析师。\n",
            context.config.max_analysts
        )))
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"你是一位调研策划专家，负责为给定的调研主题组建一个分析师小组。

你的任务是基于提供的主题信息，设计一组视角互补的分析师画像：
1. 先识别该主题下最值得关注的几个子议题
2. 为每个子议题设计一位分析师，明确其姓名、角色、所属机构
3. 在description中描述该分析师的关注点、顾虑与动机
4. 各分析师的视角必须彼此不同，避免重复

如果素材中包含操作者反馈，必须优先依据反馈调整小组构成。

请以结构化的JSON格式返回分析师小组。"#
                .to_string(),

            opening_instruction: "基于以下素材，为调研主题组建分析师小组：".to_string(),

            closing_instruction: r#"
## 生成要求：
- 每位分析师的视角聚焦一个子议题，彼此不重叠
- 画像信息具体可信，避免空泛的描述
- 不超过指定的小组规模上限"#
                .to_string(),

            llm_call_mode: LLMCallMode::Extract,
            formatter_config: FormatterConfig::default(),
        }
    }
}
