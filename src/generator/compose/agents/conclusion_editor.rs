use crate::generator::compose::memory::MemoryScope;
use crate::generator::compose::types::AgentType;
use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, StepForwardAgent,
};

/// 结论撰写器 - 基于完成的报告主体撰写结论
#[derive(Default)]
pub struct ConclusionEditor;

impl StepForwardAgent for ConclusionEditor {
    type Output = String;

    fn agent_type(&self) -> String {
        AgentType::Conclusion.to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::DOCUMENTATION.to_string()
    }

    fn should_include_timestamp(&self) -> bool {
        true
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![
                DataSource::TOPIC,
                DataSource::ComposedDocument(AgentType::ReportBody.to_string()),
            ],
            optional_sources: vec![],
        }
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"你是一位研究报告主笔，负责为已完成主体内容的报告撰写结论。

写作要求：
1. 结论约100词，提炼报告主体的核心发现与启示
2. 不要逐条复述章节内容，聚焦全局性的判断
3. 不要引入主体内容之外的论断，也不要使用引用标记"#
                .to_string(),

            opening_instruction: "基于以下素材，为这份研究报告撰写结论：".to_string(),

            closing_instruction: r#"
## 输出格式要求：
- 以`## Conclusion`开头
- 随后为结论正文
- 除结论外不要输出任何其他内容"#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
