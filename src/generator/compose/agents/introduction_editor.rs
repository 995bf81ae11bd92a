use crate::generator::compose::memory::MemoryScope;
use crate::generator::compose::types::AgentType;
use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, StepForwardAgent,
};

/// 引言撰写器 - 基于完成的报告主体撰写标题与引言
#[derive(Default)]
pub struct IntroductionEditor;

impl StepForwardAgent for IntroductionEditor {
    type Output = String;

    fn agent_type(&self) -> String {
        AgentType::Introduction.to_string()
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
            system_prompt: r#"你是一位研究报告主笔，负责为已完成主体内容的报告撰写标题与引言。

写作要求：
1. 标题简洁有力，准确概括报告主题
2. 引言约100词，预览报告主体将展开的核心发现
3. 不要引入主体内容之外的论断，也不要使用引用标记"#
                .to_string(),

            opening_instruction: "基于以下素材，为这份研究报告撰写标题与引言：".to_string(),

            closing_instruction: r#"
## 输出格式要求：
- 第一行为`# <报告标题>`
- 随后为`## Introduction`小节与引言正文
- 除标题与引言外不要输出任何其他内容"#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
