use serde::{Deserialize, Serialize};

/// 目标语言类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ru")]
    Russian,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::Korean => write!(f, "ko"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
            TargetLanguage::Russian => write!(f, "ru"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "en" | "english" | "英文" => Ok(TargetLanguage::English),
            "ja" | "japanese" | "日本語" | "日文" => Ok(TargetLanguage::Japanese),
            "ko" | "korean" | "한국어" | "韩文" => Ok(TargetLanguage::Korean),
            "de" | "german" | "deutsch" | "德文" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" | "法文" => Ok(TargetLanguage::French),
            "ru" | "russian" | "русский" | "俄文" => Ok(TargetLanguage::Russian),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "中文",
            TargetLanguage::English => "English",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::Korean => "한국어",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
            TargetLanguage::Russian => "Русский",
        }
    }

    /// 获取语言的提示词指令
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "请使用中文撰写内容，确保语言表达准确、专业、易于理解。",
            TargetLanguage::English => {
                "Please write the content in English, ensuring accurate, professional, and easy-to-understand language."
            }
            TargetLanguage::Japanese => {
                "日本語で内容を作成してください。正確で専門的で理解しやすい言語表現を心がけてください。"
            }
            TargetLanguage::Korean => {
                "한국어로 내용을 작성해 주세요. 정확하고 전문적이며 이해하기 쉬운 언어 표현을 사용해 주세요."
            }
            TargetLanguage::German => {
                "Bitte schreiben Sie den Inhalt auf Deutsch und stellen Sie sicher, dass die Sprache präzise, professionell und leicht verständlich ist."
            }
            TargetLanguage::French => {
                "Veuillez rédiger le contenu en français, en vous assurant que le langage soit précis, professionnel et facile à comprendre."
            }
            TargetLanguage::Russian => {
                "Пожалуйста, напишите содержание на русском языке, обеспечив точность, профессионализм и понятность изложения."
            }
        }
    }

    /// 获取最终报告的文件名（Markdown版本，导出格式只替换扩展名）
    pub fn report_filename(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "研究报告.md",
            TargetLanguage::English => "Report.md",
            TargetLanguage::Japanese => "研究レポート.md",
            TargetLanguage::Korean => "연구-보고서.md",
            TargetLanguage::German => "Bericht.md",
            TargetLanguage::French => "Rapport.md",
            TargetLanguage::Russian => "Отчёт.md",
        }
    }

    /// 获取访谈记录的子目录名
    pub fn transcripts_directory(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "访谈记录",
            TargetLanguage::English => "interviews",
            TargetLanguage::Japanese => "インタビュー",
            TargetLanguage::Korean => "인터뷰",
            TargetLanguage::German => "interviews",
            TargetLanguage::French => "entretiens",
            TargetLanguage::Russian => "интервью",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("zh".parse::<TargetLanguage>(), Ok(TargetLanguage::Chinese));
        assert_eq!(
            "English".parse::<TargetLanguage>(),
            Ok(TargetLanguage::English)
        );
        assert!("klingon".parse::<TargetLanguage>().is_err());
    }

    #[test]
    fn test_report_filename_has_md_extension() {
        for lang in [
            TargetLanguage::Chinese,
            TargetLanguage::English,
            TargetLanguage::Japanese,
            TargetLanguage::Korean,
            TargetLanguage::German,
            TargetLanguage::French,
            TargetLanguage::Russian,
        ] {
            assert!(lang.report_filename().ends_with(".md"));
        }
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(TargetLanguage::default(), TargetLanguage::English);
    }
}
