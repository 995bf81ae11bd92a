use crate::generator::context::GeneratorContext;

pub struct MemoryScope;

impl MemoryScope {
    pub const DOCUMENTATION: &'static str = "documentation";
}

pub trait ComposeMemory {
    async fn store_document(&self, doc_key: &str, content: &str) -> anyhow::Result<()>;

    async fn get_document(&self, doc_key: &str) -> Option<String>;
}

impl ComposeMemory for GeneratorContext {
    /// 存储报告组件
    async fn store_document(&self, doc_key: &str, content: &str) -> anyhow::Result<()> {
        self.store_to_memory(MemoryScope::DOCUMENTATION, doc_key, content)
            .await
    }

    /// 获取报告组件
    async fn get_document(&self, doc_key: &str) -> Option<String> {
        self.get_from_memory(MemoryScope::DOCUMENTATION, doc_key)
            .await
    }
}
