#[cfg(test)]
mod tests {
    use crate::config::{CacheConfig, Config, LLMConfig, LLMProvider, SearchConfig};
    use crate::i18n::TargetLanguage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(config.topic.is_none());
        assert_eq!(config.output_path, PathBuf::from("./scribe.reports"));
        assert_eq!(config.internal_path, PathBuf::from("./.scribe"));
        assert_eq!(config.target_language, TargetLanguage::English);
        assert_eq!(config.max_analysts, 3);
        assert_eq!(config.max_interview_turns, 2);
        assert_eq!(config.max_feedback_rounds, 3);
        assert!(!config.auto_approve);
        assert!(config.export_docx);
        assert!(config.export_pdf);
        assert!(config.save_transcripts);
        assert!(!config.force_regenerate);
        assert!(!config.skip_interviews);
        assert!(!config.skip_compose);
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "moonshot".parse::<LLMProvider>().unwrap(),
            LLMProvider::Moonshot
        );
        assert_eq!(
            "deepseek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "OLLAMA".parse::<LLMProvider>().unwrap(),
            LLMProvider::Ollama
        );
        assert!("unknown".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn test_llm_config_default() {
        let llm = LLMConfig::default();
        assert!(!llm.api_base_url.is_empty());
        assert!(!llm.model_efficient.is_empty());
        assert!(!llm.model_powerful.is_empty());
        assert_eq!(llm.max_tokens, 131072);
        assert_eq!(llm.temperature, 0.1);
        assert_eq!(llm.retry_attempts, 5);
        assert_eq!(llm.retry_delay_ms, 5000);
        assert_eq!(llm.max_parallels, 3);
    }

    #[test]
    fn test_search_config_default() {
        let search = SearchConfig::default();
        assert!(search.enabled);
        assert_eq!(search.api_base_url, "https://api.tavily.com");
        assert_eq!(search.max_results, 3);
        assert_eq!(search.timeout_seconds, 30);
    }

    #[test]
    fn test_cache_config_default() {
        let cache = CacheConfig::default();
        assert!(cache.enabled);
        assert_eq!(cache.cache_dir, PathBuf::from(".scribe/cache"));
        assert_eq!(cache.expire_hours, 8760);
    }

    #[test]
    fn test_require_topic() {
        let mut config = Config::default();
        assert!(config.require_topic().is_err());

        config.topic = Some("   ".to_string());
        assert!(config.require_topic().is_err());

        config.topic = Some("  The future of solid-state batteries ".to_string());
        assert_eq!(
            config.require_topic().unwrap(),
            "The future of solid-state batteries"
        );
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("scribe.toml");
        let content = r#"
topic = "AI in drug discovery"
output_path = "./out"
internal_path = "./.scribe"
target_language = "zh"
max_analysts = 5
max_interview_turns = 4
max_feedback_rounds = 2
auto_approve = true
export_docx = false
export_pdf = false
save_transcripts = false
force_regenerate = false
skip_interviews = false
skip_compose = false
verbose = true

[llm]
provider = "deepseek"
api_key = "test-key"
api_base_url = "https://api.deepseek.com"
model_efficient = "deepseek-chat"
model_powerful = "deepseek-reasoner"
max_tokens = 8192
temperature = 0.2
retry_attempts = 3
retry_delay_ms = 1000
timeout_seconds = 120
max_parallels = 2

[search]
enabled = true
api_key = "tvly-test"
api_base_url = "https://api.tavily.com"
max_results = 5
timeout_seconds = 20

[cache]
enabled = false
cache_dir = ".scribe/cache"
expire_hours = 24
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.topic.as_deref(), Some("AI in drug discovery"));
        assert_eq!(config.target_language, TargetLanguage::Chinese);
        assert_eq!(config.max_analysts, 5);
        assert_eq!(config.max_interview_turns, 4);
        assert!(config.auto_approve);
        assert!(!config.export_docx);
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.model_efficient, "deepseek-chat");
        assert_eq!(config.search.max_results, 5);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_config_from_missing_file() {
        let path = PathBuf::from("/nonexistent/scribe.toml");
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_config_from_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("scribe.toml");
        std::fs::write(&config_path, "not [ valid = toml").unwrap();
        assert!(Config::from_file(&config_path).is_err());
    }
}
