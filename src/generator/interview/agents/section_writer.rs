use anyhow::Result;
use async_trait::async_trait;

use crate::generator::context::GeneratorContext;
use crate::generator::interview::memory::{InterviewMemory, MemoryScope, section_key};
use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, StepForwardAgent,
};
use crate::types::Analyst;

/// 章节撰写器 - 将一场访谈的记录与检索材料转写为报告章节
///
/// 每位分析师对应一个实例，产出以`section_<slug>`为键存入访谈作用域。
pub struct SectionWriter {
    analyst: Analyst,
    context_docs: String,
}

impl SectionWriter {
    pub fn new(analyst: Analyst, context_docs: String) -> Self {
        Self {
            analyst,
            context_docs,
        }
    }
}

#[async_trait]
impl StepForwardAgent for SectionWriter {
    type Output = String;

    fn agent_type(&self) -> String {
        section_key(&self.analyst.slug())
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::INTERVIEWS.to_string()
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![DataSource::TOPIC],
            optional_sources: vec![],
        }
    }

    async fn provide_custom_prompt_content(
        &self,
        context: &GeneratorContext,
    ) -> Result<Option<String>> {
        let transcript = context
            .get_transcript(&self.analyst.slug())
            .await
            .ok_or_else(|| {
                anyhow::anyhow!("分析师 {} 的访谈记录不可用", self.analyst.name)
            })?;

        let mut content = format!("### 分析师画像\n{}\n\n", self.analyst.persona());
        content.push_str(&format!("### 访谈记录\n{}\n\n", transcript));
        if !self.context_docs.trim().is_empty() {
            content.push_str(&format!("### 检索材料\n{}\n\n", self.context_docs));
        }
        Ok(Some(content))
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"你是一位资深的技术写作专家，负责把一场专家访谈转写为研究报告中的一个章节。

写作要求：
1. 以分析师的关注点为线索组织内容，而不是逐条复述问答
2. 保留访谈回答中的引用标记（如 [1]、[2]），不得改动其编号
3. 只陈述访谈记录与检索材料支持的内容，不要添加臆测
4. 语言精炼、信息密度高"#
                .to_string(),

            opening_instruction: "基于以下素材，撰写该分析师视角的报告章节：".to_string(),

            closing_instruction: r#"
## 输出格式要求：
- 以`## <章节标题>`开头，标题概括该视角的核心发现
- 正文使用Markdown，可包含小标题与要点列表
- 末尾附`### Sources`小节，按引用编号列出来源链接，每行一条，形如`[1] https://...`
- 除章节内容外不要输出任何其他说明文字"#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
