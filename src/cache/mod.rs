use anyhow::Result;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

use crate::config::CacheConfig;
use crate::llm::client::types::TokenUsage;

/// 缓存管理器
///
/// 以prompt的MD5为键将LLM结果落盘，中断后重跑时可以廉价回放
/// 已完成的推理步骤。
pub struct CacheManager {
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// 缓存条目
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: u64,
    /// prompt的MD5哈希值，用于缓存键的生成和验证
    pub prompt_hash: String,
    /// token使用情况（可选，用于统计）
    pub token_usage: Option<TokenUsage>,
    /// 使用的模型名称（可选）
    pub model_name: Option<String>,
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// 生成prompt的MD5哈希
    pub fn hash_prompt(&self, prompt: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 获取缓存文件路径
    fn get_cache_path(&self, category: &str, hash: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(category)
            .join(format!("{}.json", hash))
    }

    /// 检查缓存是否过期
    fn is_expired(&self, timestamp: u64) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let expire_seconds = self.config.expire_hours * 3600;
        now.saturating_sub(timestamp) > expire_seconds
    }

    /// 获取缓存
    pub async fn get<T>(&self, category: &str, prompt: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !self.config.enabled {
            return Ok(None);
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if !cache_path.exists() {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return Ok(None);
        }

        match fs::read_to_string(&cache_path).await {
            Ok(content) => match serde_json::from_str::<CacheEntry<T>>(&content) {
                Ok(entry) => {
                    if self.is_expired(entry.timestamp) {
                        // 删除过期缓存
                        let _ = fs::remove_file(&cache_path).await;
                        self.misses.fetch_add(1, Ordering::Relaxed);
                        return Ok(None);
                    }
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    Ok(Some(entry.data))
                }
                Err(e) => {
                    eprintln!("⚠️ 缓存反序列化失败（{}），按未命中处理: {}", category, e);
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    Ok(None)
                }
            },
            Err(e) => {
                eprintln!("⚠️ 缓存读取失败（{}），按未命中处理: {}", category, e);
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// 设置缓存
    pub async fn set<T>(
        &self,
        category: &str,
        prompt: &str,
        data: T,
        token_usage: Option<TokenUsage>,
        model_name: Option<String>,
    ) -> Result<()>
    where
        T: Serialize,
    {
        if !self.config.enabled {
            return Ok(());
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let entry = CacheEntry {
            data,
            timestamp,
            prompt_hash: hash,
            token_usage,
            model_name,
        };

        let content = serde_json::to_string(&entry)?;
        fs::write(&cache_path, content).await?;
        Ok(())
    }

    /// 清空全部缓存（用于强制重新生成）
    pub async fn clear_all(&self) -> Result<()> {
        if self.config.cache_dir.exists() {
            fs::remove_dir_all(&self.config.cache_dir).await?;
        }
        Ok(())
    }

    /// 获取命中/未命中统计
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_manager(enabled: bool, expire_hours: u64) -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = CacheConfig {
            enabled,
            cache_dir: temp_dir.path().join("cache"),
            expire_hours,
        };
        (CacheManager::new(config), temp_dir)
    }

    #[test]
    fn test_hash_prompt_is_stable() {
        let (manager, _dir) = test_manager(true, 1);
        let a = manager.hash_prompt("same prompt");
        let b = manager.hash_prompt("same prompt");
        let c = manager.hash_prompt("different prompt");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        let (manager, _dir) = test_manager(true, 24);
        manager
            .set("plan/analysts", "prompt-x", "cached value".to_string(), None, None)
            .await
            .unwrap();

        let value: Option<String> = manager.get("plan/analysts", "prompt-x").await.unwrap();
        assert_eq!(value.as_deref(), Some("cached value"));

        let (hits, misses) = manager.stats();
        assert_eq!(hits, 1);
        assert_eq!(misses, 0);
    }

    #[tokio::test]
    async fn test_miss_on_unknown_prompt() {
        let (manager, _dir) = test_manager(true, 24);
        let value: Option<String> = manager.get("plan/analysts", "never seen").await.unwrap();
        assert!(value.is_none());
        let (_, misses) = manager.stats();
        assert_eq!(misses, 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_skips_everything() {
        let (manager, _dir) = test_manager(false, 24);
        manager
            .set("c", "p", "v".to_string(), None, None)
            .await
            .unwrap();
        let value: Option<String> = manager.get("c", "p").await.unwrap();
        assert!(value.is_none());
        assert_eq!(manager.stats(), (0, 0));
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted() {
        let (manager, _dir) = test_manager(true, 0);
        manager
            .set("c", "p", "v".to_string(), None, None)
            .await
            .unwrap();

        // expire_hours为0意味着所有已落盘条目立即过期
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        let value: Option<String> = manager.get("c", "p").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (manager, _dir) = test_manager(true, 24);
        manager
            .set("c", "p", "v".to_string(), None, None)
            .await
            .unwrap();
        manager.clear_all().await.unwrap();
        let value: Option<String> = manager.get("c", "p").await.unwrap();
        assert!(value.is_none());
    }
}
