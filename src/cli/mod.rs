use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use clap::Parser;
use std::path::PathBuf;

/// DeepReport-RS - 由Rust与AI驱动的自主调研报告生成引擎
#[derive(Parser, Debug)]
#[command(name = "Scribe (deepreport-rs)")]
#[command(
    about = "AI-based autonomous research report engine. It synthesizes a panel of analyst personas for a topic, runs web-search-augmented interviews, and composes a polished, exportable research report."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 调研主题
    #[arg(short, long)]
    pub topic: Option<String>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 分析师数量上限
    #[arg(long)]
    pub max_analysts: Option<usize>,

    /// 每场访谈中专家回答轮数上限
    #[arg(long)]
    pub max_interview_turns: Option<usize>,

    /// 跳过人工检查点，直接采用生成的分析师小组
    #[arg(short = 'y', long)]
    pub auto_approve: bool,

    /// 跳过访谈阶段（要求缓存中已有章节数据）
    #[arg(long)]
    pub skip_interviews: bool,

    /// 跳过报告撰写阶段
    #[arg(long)]
    pub skip_compose: bool,

    /// 不导出docx版本
    #[arg(long)]
    pub no_docx: bool,

    /// 不导出PDF版本
    #[arg(long)]
    pub no_pdf: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 高能效模型，优先用于Scribe引擎的常规推理任务
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，优先用于Scribe引擎的复杂推理任务，以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 访谈并发上限
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// LLM Provider (openai, moonshot, deepseek, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 目标语言 (zh, en, ja, ko, de, fr, ru)
    #[arg(long)]
    pub target_language: Option<String>,

    /// 搜索服务API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 每个问题检索的结果数量
    #[arg(long)]
    pub max_search_results: Option<usize>,

    /// 禁用网络搜索增强（访谈仅依赖模型自身知识）
    #[arg(long)]
    pub no_search: bool,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 强制重新生成（清除缓存）
    #[arg(long)]
    pub force_regenerate: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("scribe.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 主题处理：CLI参数优先级最高
        if let Some(topic) = self.topic {
            config.topic = Some(topic);
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        // 报告规模配置
        if let Some(max_analysts) = self.max_analysts {
            config.max_analysts = max_analysts;
        }
        if let Some(max_interview_turns) = self.max_interview_turns {
            config.max_interview_turns = max_interview_turns;
        }
        if self.auto_approve {
            config.auto_approve = true;
        }
        if self.no_docx {
            config.export_docx = false;
        }
        if self.no_pdf {
            config.export_pdf = false;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        } else if config.llm.model_powerful.trim().is_empty() {
            config.llm.model_powerful = config.llm.model_efficient.to_string();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels;
        }

        // 搜索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(max_search_results) = self.max_search_results {
            config.search.max_results = max_search_results;
        }
        if self.no_search {
            config.search.enabled = false;
        }

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = target_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的目标语言: {}，使用默认语言 (English)",
                    target_language_str
                );
            }
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 其他配置
        config.force_regenerate = self.force_regenerate;
        config.skip_interviews = self.skip_interviews;
        config.skip_compose = self.skip_compose;
        config.verbose = self.verbose;

        config
    }
}
