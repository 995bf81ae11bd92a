use crate::generator::context::GeneratorContext;

pub struct MemoryScope;

impl MemoryScope {
    pub const INTERVIEWS: &'static str = "interviews";
}

const TRANSCRIPT_PREFIX: &str = "transcript_";
const SECTION_PREFIX: &str = "section_";

/// 访谈记录的Memory键
pub fn transcript_key(analyst_slug: &str) -> String {
    format!("{}{}", TRANSCRIPT_PREFIX, analyst_slug)
}

/// 报告章节的Memory键
pub fn section_key(analyst_slug: &str) -> String {
    format!("{}{}", SECTION_PREFIX, analyst_slug)
}

pub trait InterviewMemory {
    async fn store_transcript(&self, analyst_slug: &str, transcript: &str) -> anyhow::Result<()>;

    async fn get_transcript(&self, analyst_slug: &str) -> Option<String>;

    async fn store_section(&self, analyst_slug: &str, section: &str) -> anyhow::Result<()>;

    async fn get_section(&self, analyst_slug: &str) -> Option<String>;

    /// 收集全部访谈记录，按分析师slug排序返回`(slug, transcript)`
    async fn collect_transcripts(&self) -> Vec<(String, String)>;

    /// 收集全部报告章节，按分析师slug排序
    async fn collect_sections(&self) -> Vec<String>;
}

impl InterviewMemory for GeneratorContext {
    async fn store_transcript(&self, analyst_slug: &str, transcript: &str) -> anyhow::Result<()> {
        self.store_to_memory(
            MemoryScope::INTERVIEWS,
            &transcript_key(analyst_slug),
            transcript,
        )
        .await
    }

    async fn get_transcript(&self, analyst_slug: &str) -> Option<String> {
        self.get_from_memory(MemoryScope::INTERVIEWS, &transcript_key(analyst_slug))
            .await
    }

    async fn store_section(&self, analyst_slug: &str, section: &str) -> anyhow::Result<()> {
        self.store_to_memory(
            MemoryScope::INTERVIEWS,
            &section_key(analyst_slug),
            section,
        )
        .await
    }

    async fn get_section(&self, analyst_slug: &str) -> Option<String> {
        self.get_from_memory(MemoryScope::INTERVIEWS, &section_key(analyst_slug))
            .await
    }

    async fn collect_transcripts(&self) -> Vec<(String, String)> {
        let mut keys: Vec<String> = self
            .list_memory_keys(MemoryScope::INTERVIEWS)
            .await
            .into_iter()
            .filter(|key| key.starts_with(TRANSCRIPT_PREFIX))
            .collect();
        keys.sort();

        let mut transcripts = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(transcript) = self
                .get_from_memory::<String>(MemoryScope::INTERVIEWS, &key)
                .await
            {
                let slug = key[TRANSCRIPT_PREFIX.len()..].to_string();
                transcripts.push((slug, transcript));
            }
        }
        transcripts
    }

    async fn collect_sections(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .list_memory_keys(MemoryScope::INTERVIEWS)
            .await
            .into_iter()
            .filter(|key| key.starts_with(SECTION_PREFIX))
            .collect();
        keys.sort();

        let mut sections = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(section) = self
                .get_from_memory::<String>(MemoryScope::INTERVIEWS, &key)
                .await
            {
                sections.push(section);
            }
        }
        sections
    }
}
