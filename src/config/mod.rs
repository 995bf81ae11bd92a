use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::i18n::TargetLanguage;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "moonshot")]
    Moonshot,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Moonshot => write!(f, "moonshot"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "moonshot" => Ok(LLMProvider::Moonshot),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 调研主题
    pub topic: Option<String>,

    /// 输出路径
    pub output_path: PathBuf,

    /// 内部工作目录路径 (.scribe)
    pub internal_path: PathBuf,

    /// 目标语言
    pub target_language: TargetLanguage,

    /// 分析师数量上限
    pub max_analysts: usize,

    /// 每场访谈中专家回答轮数上限
    pub max_interview_turns: usize,

    /// 检查点反馈重新生成分析师的最大轮数
    pub max_feedback_rounds: usize,

    /// 跳过人工检查点，直接采用生成的分析师小组
    pub auto_approve: bool,

    /// 是否导出docx版本
    pub export_docx: bool,

    /// 是否导出PDF版本
    pub export_pdf: bool,

    /// 是否将访谈记录与报告一起落盘
    pub save_transcripts: bool,

    /// 强制重新生成（清除缓存）
    pub force_regenerate: bool,

    /// 跳过访谈阶段（要求Memory/缓存中已有章节数据）
    pub skip_interviews: bool,

    /// 跳过报告撰写阶段
    pub skip_compose: bool,

    /// 是否启用详细日志
    pub verbose: bool,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 网络搜索配置
    pub search: SearchConfig,

    /// 缓存配置
    pub cache: CacheConfig,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 高能效模型，优先用于Scribe引擎的常规推理任务
    pub model_efficient: String,

    /// 高质量模型，优先用于Scribe引擎的复杂推理任务，以及作为efficient失效情况下的兜底
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,

    /// 访谈并发上限
    pub max_parallels: usize,
}

/// 网络搜索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// 是否启用网络搜索增强
    pub enabled: bool,

    /// 搜索服务API KEY
    pub api_key: String,

    /// 搜索服务API基地址
    pub api_base_url: String,

    /// 每个问题检索的结果数量
    pub max_results: usize,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 获取调研主题，未配置时报错
    pub fn require_topic(&self) -> Result<String> {
        match &self.topic {
            Some(topic) if !topic.trim().is_empty() => Ok(topic.trim().to_string()),
            _ => Err(anyhow::anyhow!(
                "No research topic configured. Pass one on the command line or set `topic` in scribe.toml"
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: None,
            output_path: PathBuf::from("./scribe.reports"),
            internal_path: PathBuf::from("./.scribe"),
            target_language: TargetLanguage::default(),
            max_analysts: 3,
            max_interview_turns: 2,
            max_feedback_rounds: 3,
            auto_approve: false,
            export_docx: true,
            export_pdf: true,
            save_transcripts: true,
            force_regenerate: false,
            skip_interviews: false,
            skip_compose: false,
            verbose: false,
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("SCRIBE_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api-inference.modelscope.cn/v1"),
            model_efficient: String::from("Qwen/Qwen3-Next-80B-A3B-Instruct"),
            model_powerful: String::from("Qwen/Qwen3-235B-A22B-Instruct-2507"),
            max_tokens: 131072,
            temperature: 0.1,
            retry_attempts: 5,
            retry_delay_ms: 5000,
            timeout_seconds: 300,
            max_parallels: 3,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: std::env::var("SCRIBE_SEARCH_API_KEY")
                .or_else(|_| std::env::var("TAVILY_API_KEY"))
                .unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            max_results: 3,
            timeout_seconds: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: PathBuf::from(".scribe/cache"),
            expire_hours: 8760,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
