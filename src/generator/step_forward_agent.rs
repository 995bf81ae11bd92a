use anyhow::{Result, anyhow};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generator::agent_executor::{AgentExecuteParams, extract, prompt};
use crate::generator::compose::memory::MemoryScope as ComposeScope;
use crate::generator::interview::memory::InterviewMemory;
use crate::generator::plan::memory::{MemoryScope as PlanScope, ScopedKeys};
use crate::{generator::context::GeneratorContext, types::Analyst};

/// 替换时间占位符为实际时间信息
/// 这个函数将LLM响应中的时间占位符替换为当前的实际时间
pub fn replace_time_placeholders(content: &str) -> String {
    let now = chrono::Utc::now();
    content
        .replace(
            "__CURRENT_UTC_TIME__",
            &format!("{} (UTC)", now.format("%Y-%m-%d %H:%M:%S")),
        )
        .replace("__CURRENT_TIMESTAMP__", &now.timestamp().to_string())
}

/// 数据源配置 - 基于Memory Key的直接数据访问机制
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// 从Memory中获取数据
    MemoryData {
        scope: &'static str,
        key: &'static str,
    },
    /// 访谈阶段产出的全部报告章节
    SectionCollection,
    /// 报告撰写阶段已产出的组件（引言、主体、结论）
    ComposedDocument(String),
}

impl DataSource {
    /// 预定义的常用数据源
    pub const TOPIC: DataSource = DataSource::MemoryData {
        scope: PlanScope::PLAN,
        key: ScopedKeys::TOPIC,
    };
    pub const ANALYST_PANEL: DataSource = DataSource::MemoryData {
        scope: PlanScope::PLAN,
        key: ScopedKeys::ANALYSTS,
    };
    pub const HUMAN_FEEDBACK: DataSource = DataSource::MemoryData {
        scope: PlanScope::PLAN,
        key: ScopedKeys::HUMAN_FEEDBACK,
    };
}

/// Agent数据配置 - 声明所需的数据源
#[derive(Debug, Clone)]
pub struct AgentDataConfig {
    /// 必需的数据源 - 缺少时执行失败
    pub required_sources: Vec<DataSource>,
    /// 可选的数据源 - 缺少时不影响执行
    pub optional_sources: Vec<DataSource>,
}

/// LLM调用方式配置
#[derive(Debug, Clone, PartialEq)]
pub enum LLMCallMode {
    /// 使用extract方法，返回特定要求的结构化数据
    Extract,
    /// 使用prompt方法，返回泛化推理文本
    Prompt,
}

/// 数据格式化配置
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// 章节内容显示数量限制，None为不限制
    pub sections_limit: Option<usize>,
    /// 单个章节内容截断长度，None为不截断
    pub section_truncate_length: Option<usize>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            sections_limit: None,
            section_truncate_length: None,
        }
    }
}

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
    /// LLM调用方式
    pub llm_call_mode: LLMCallMode,
    /// 数据格式化配置
    pub formatter_config: FormatterConfig,
}

/// 通用数据格式化器
pub struct DataFormatter {
    config: FormatterConfig,
}

impl DataFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// 格式化调研主题
    pub fn format_topic(&self, topic: &str) -> String {
        format!("### 调研主题\n{}\n\n", topic)
    }

    /// 格式化分析师小组信息
    pub fn format_analysts(&self, analysts: &[Analyst]) -> String {
        let mut content = String::from("### 分析师小组\n");
        for (i, analyst) in analysts.iter().enumerate() {
            content.push_str(&format!("{}. {}\n", i + 1, analyst.persona().replace('\n', "; ")));
        }
        content.push('\n');
        content
    }

    /// 格式化检查点反馈
    pub fn format_human_feedback(&self, feedback: &str) -> String {
        format!("### 操作者反馈\n{}\n\n", feedback)
    }

    /// 格式化已完成的访谈章节
    pub fn format_sections(&self, sections: &[String]) -> String {
        let limit = self.config.sections_limit.unwrap_or(sections.len());

        let mut content = String::from("### 访谈章节备忘\n");
        for section in sections.iter().take(limit) {
            let body = match self.config.section_truncate_length {
                Some(max_len) if section.chars().count() > max_len => {
                    let truncated: String = section.chars().take(max_len).collect();
                    format!("{}...(已截断)", truncated)
                }
                _ => section.clone(),
            };
            content.push_str(&body);
            content.push_str("\n\n");
        }
        content
    }

    /// 格式化已产出的报告组件
    pub fn format_composed_document(&self, doc_key: &str, content_body: &str) -> String {
        format!("### 已完成的报告组件：{}\n{}\n\n", doc_key, content_body)
    }
}

/// 标准的报告Agent Prompt构建器
pub struct GeneratorPromptBuilder {
    template: PromptTemplate,
    formatter: DataFormatter,
}

impl GeneratorPromptBuilder {
    pub fn new(template: PromptTemplate) -> Self {
        let formatter = DataFormatter::new(template.formatter_config.clone());
        Self {
            template,
            formatter,
        }
    }

    /// 构建标准的prompt（系统提示词和用户提示词）
    pub async fn build_prompts(
        &self,
        context: &GeneratorContext,
        data_sources: &[DataSource],
        custom_content: Option<String>,
        include_timestamp: bool,
    ) -> Result<(String, String)> {
        let system_prompt = self.template.system_prompt.clone();
        let user_prompt = self
            .build_standard_user_prompt(context, data_sources, custom_content, include_timestamp)
            .await?;
        Ok((system_prompt, user_prompt))
    }

    /// 构建标准的用户提示词
    async fn build_standard_user_prompt(
        &self,
        context: &GeneratorContext,
        data_sources: &[DataSource],
        custom_content: Option<String>,
        include_timestamp: bool,
    ) -> Result<String> {
        let mut prompt = String::new();

        // 开头说明性指令
        prompt.push_str(&self.template.opening_instruction);
        prompt.push_str("\n\n");

        // 根据参数决定是否添加当前时间信息（使用占位符）
        if include_timestamp {
            prompt.push_str(
                "## 当前时间信息\n生成时间: __CURRENT_UTC_TIME__\n时间戳: __CURRENT_TIMESTAMP__\n\n",
            );
        }

        // 素材参考部分
        prompt.push_str("## 素材参考\n");

        // 插入自定义内容（如果有）
        if let Some(custom) = custom_content {
            prompt.push_str(&custom);
            prompt.push('\n');
        }

        // 收集并格式化各种数据源
        for source in data_sources {
            match source {
                DataSource::MemoryData { scope, key } => match *key {
                    ScopedKeys::TOPIC => {
                        if let Some(topic) = context.get_from_memory::<String>(scope, key).await {
                            prompt.push_str(&self.formatter.format_topic(&topic));
                        }
                    }
                    ScopedKeys::ANALYSTS => {
                        if let Some(analysts) = context
                            .get_from_memory::<Vec<Analyst>>(scope, key)
                            .await
                        {
                            prompt.push_str(&self.formatter.format_analysts(&analysts));
                        }
                    }
                    ScopedKeys::HUMAN_FEEDBACK => {
                        if let Some(feedback) = context.get_from_memory::<String>(scope, key).await
                        {
                            if !feedback.trim().is_empty() {
                                prompt.push_str(&self.formatter.format_human_feedback(&feedback));
                            }
                        }
                    }
                    _ => {}
                },
                DataSource::SectionCollection => {
                    let sections = context.collect_sections().await;
                    if !sections.is_empty() {
                        prompt.push_str(&self.formatter.format_sections(&sections));
                    }
                }
                DataSource::ComposedDocument(doc_key) => {
                    if let Some(content_body) = context
                        .get_from_memory::<String>(ComposeScope::DOCUMENTATION, doc_key)
                        .await
                    {
                        prompt.push_str(
                            &self
                                .formatter
                                .format_composed_document(doc_key, &content_body),
                        );
                    }
                }
            }
        }

        // 结尾强调性指令
        prompt.push_str(&self.template.closing_instruction);

        Ok(prompt)
    }
}

/// 极简Agent trait - 大幅简化agent实现
#[async_trait]
pub trait StepForwardAgent: Send + Sync {
    /// Agent的输出类型 - 必须支持JSON序列化
    type Output: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static;

    /// Agent类型标识
    fn agent_type(&self) -> String;

    fn memory_scope_key(&self) -> String;

    /// 数据源配置
    fn data_config(&self) -> AgentDataConfig;

    /// Prompt模板配置
    fn prompt_template(&self) -> PromptTemplate;

    /// 可选的后处理钩子
    fn post_process(&self, _result: &Self::Output, _context: &GeneratorContext) -> Result<()> {
        Ok(())
    }

    /// 可选的自定义prompt内容提供钩子
    /// 返回自定义的prompt内容，将被插入到标准prompt的素材参考部分
    async fn provide_custom_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// 是否在prompt中包含时间戳信息
    /// 默认为false，报告撰写阶段的editor agents需要重写为true
    fn should_include_timestamp(&self) -> bool {
        false
    }

    /// 默认实现的execute方法 - 完全标准化，自动数据验证
    async fn execute(&self, context: &GeneratorContext) -> Result<Self::Output> {
        // 1. 获取数据配置
        let config = self.data_config();

        // 2. 检查required数据源是否可用（自动验证）
        for source in &config.required_sources {
            match source {
                DataSource::MemoryData { scope, key } => {
                    if !context.has_memory_data(scope, key).await {
                        return Err(anyhow!("必需的数据源 {}:{} 不可用", scope, key));
                    }
                }
                DataSource::SectionCollection => {
                    if context.collect_sections().await.is_empty() {
                        return Err(anyhow!("必需的访谈章节数据不可用"));
                    }
                }
                DataSource::ComposedDocument(doc_key) => {
                    if !context
                        .has_memory_data(ComposeScope::DOCUMENTATION, doc_key)
                        .await
                    {
                        return Err(anyhow!("必需的报告组件 {} 不可用", doc_key));
                    }
                }
            }
        }

        // 3. 收集所有数据源（required + optional）
        let all_sources = [config.required_sources, config.optional_sources].concat();

        // 4. 使用标准模板构建prompt，并根据目标语言调整
        let mut template = self.prompt_template();

        // 根据配置的目标语言添加语言指令
        let language_instruction = context.config.target_language.prompt_instruction();
        template.system_prompt = format!("{}\n\n{}", template.system_prompt, language_instruction);

        let prompt_builder = GeneratorPromptBuilder::new(template.clone());

        // 获取自定义prompt内容
        let custom_content = self.provide_custom_prompt_content(context).await?;

        // 检查是否需要包含时间戳
        let include_timestamp = self.should_include_timestamp();

        let (system_prompt, user_prompt) = prompt_builder
            .build_prompts(context, &all_sources, custom_content, include_timestamp)
            .await?;

        // 5. 根据配置选择LLM调用方式
        let params = AgentExecuteParams {
            prompt_sys: system_prompt,
            prompt_user: user_prompt,
            cache_scope: format!("{}/{}", self.memory_scope_key(), self.agent_type()),
            log_tag: self.agent_type().to_string(),
        };

        let result_value = match template.llm_call_mode {
            LLMCallMode::Extract => {
                let result: Self::Output = extract(context, params).await?;
                serde_json::to_value(&result)?
            }
            LLMCallMode::Prompt => {
                let result_text: String = prompt(context, params).await?;
                // 替换时间占位符
                let processed_text = replace_time_placeholders(&result_text);
                serde_json::to_value(&processed_text)?
            }
        };

        // 6. 存储结果
        context
            .store_to_memory(
                &self.memory_scope_key(),
                &self.agent_type(),
                result_value.clone(),
            )
            .await?;

        // 7. 执行后处理
        if let Ok(typed_result) = serde_json::from_value::<Self::Output>(result_value) {
            self.post_process(&typed_result, context)?;
            println!("✅ Sub-Agent [{}]执行完成", self.agent_type());
            Ok(typed_result)
        } else {
            Err(anyhow::format_err!(
                "Sub-Agent [{}]结果反序列化失败",
                self.agent_type()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_time_placeholders() {
        let content = "生成时间: __CURRENT_UTC_TIME__ / __CURRENT_TIMESTAMP__";
        let replaced = replace_time_placeholders(content);
        assert!(!replaced.contains("__CURRENT_UTC_TIME__"));
        assert!(!replaced.contains("__CURRENT_TIMESTAMP__"));
        assert!(replaced.contains("(UTC)"));
    }

    #[test]
    fn test_formatter_truncates_sections() {
        let formatter = DataFormatter::new(FormatterConfig {
            sections_limit: Some(1),
            section_truncate_length: Some(5),
        });
        let sections = vec!["abcdefghij".to_string(), "second".to_string()];
        let formatted = formatter.format_sections(&sections);
        assert!(formatted.contains("abcde...(已截断)"));
        assert!(!formatted.contains("second"));
    }

    #[test]
    fn test_formatter_analysts_are_numbered() {
        let formatter = DataFormatter::new(FormatterConfig::default());
        let analysts = vec![
            Analyst {
                name: "A".to_string(),
                role: "r1".to_string(),
                affiliation: "org1".to_string(),
                description: "d1".to_string(),
            },
            Analyst {
                name: "B".to_string(),
                role: "r2".to_string(),
                affiliation: "org2".to_string(),
                description: "d2".to_string(),
            },
        ];
        let formatted = formatter.format_analysts(&analysts);
        assert!(formatted.contains("1. Name: A"));
        assert!(formatted.contains("2. Name: B"));
    }
}
