use crate::generator::compose::memory::MemoryScope;
use crate::generator::compose::types::AgentType;
use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, StepForwardAgent,
};

/// 报告主体撰写器 - 把各分析师的章节备忘整合为连贯的报告主体
#[derive(Default)]
pub struct ReportBodyEditor;

impl StepForwardAgent for ReportBodyEditor {
    type Output = String;

    fn agent_type(&self) -> String {
        AgentType::ReportBody.to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::DOCUMENTATION.to_string()
    }

    fn should_include_timestamp(&self) -> bool {
        true
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![DataSource::TOPIC, DataSource::SectionCollection],
            optional_sources: vec![DataSource::ANALYST_PANEL],
        }
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"你是一位研究报告主笔，负责把多位分析师的章节备忘整合为一份报告的主体部分。

整合要求：
1. 识别各章节之间的共同主题与分歧点，重新组织为连贯的论述，而不是简单拼接
2. 保留原章节中的引用标记（如 [1]、[2]），引用编号冲突时统一重新编号
3. 所有论述必须能追溯到章节备忘，不要引入新的事实
4. 信息密度高，删除重复内容"#
                .to_string(),

            opening_instruction: "基于以下素材，撰写研究报告的主体部分：".to_string(),

            closing_instruction: r#"
## 输出格式要求：
- 以`## Insights`作为主体部分的开头标题
- 正文使用Markdown组织，可包含小标题
- 末尾附`## Sources`小节，按统一后的引用编号列出全部来源，每行一条，形如`[1] https://...`
- 不要输出引言或结论，这些由其他环节撰写
- 除主体内容外不要输出任何其他说明文字"#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
