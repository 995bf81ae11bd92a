use crate::generator::context::GeneratorContext;
use crate::types::Analyst;

pub struct MemoryScope;

impl MemoryScope {
    pub const PLAN: &'static str = "plan";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const TOPIC: &'static str = "topic";
    pub const ANALYSTS: &'static str = "analysts";
    pub const HUMAN_FEEDBACK: &'static str = "human_feedback";
}

pub trait PlanMemory {
    async fn store_topic(&self, topic: &str) -> anyhow::Result<()>;

    async fn get_topic(&self) -> Option<String>;

    async fn store_analysts(&self, analysts: &[Analyst]) -> anyhow::Result<()>;

    async fn get_analysts(&self) -> Option<Vec<Analyst>>;

    async fn store_human_feedback(&self, feedback: &str) -> anyhow::Result<()>;

    async fn get_human_feedback(&self) -> Option<String>;
}

impl PlanMemory for GeneratorContext {
    /// 存储调研主题
    async fn store_topic(&self, topic: &str) -> anyhow::Result<()> {
        self.store_to_memory(MemoryScope::PLAN, ScopedKeys::TOPIC, topic)
            .await
    }

    /// 获取调研主题
    async fn get_topic(&self) -> Option<String> {
        self.get_from_memory(MemoryScope::PLAN, ScopedKeys::TOPIC)
            .await
    }

    /// 存储分析师小组
    async fn store_analysts(&self, analysts: &[Analyst]) -> anyhow::Result<()> {
        self.store_to_memory(MemoryScope::PLAN, ScopedKeys::ANALYSTS, analysts)
            .await
    }

    /// 获取分析师小组
    async fn get_analysts(&self) -> Option<Vec<Analyst>> {
        self.get_from_memory(MemoryScope::PLAN, ScopedKeys::ANALYSTS)
            .await
    }

    /// 存储检查点反馈
    async fn store_human_feedback(&self, feedback: &str) -> anyhow::Result<()> {
        self.store_to_memory(MemoryScope::PLAN, ScopedKeys::HUMAN_FEEDBACK, feedback)
            .await
    }

    /// 获取检查点反馈
    async fn get_human_feedback(&self) -> Option<String> {
        self.get_from_memory(MemoryScope::PLAN, ScopedKeys::HUMAN_FEEDBACK)
            .await
    }
}
