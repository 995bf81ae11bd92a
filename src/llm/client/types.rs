use serde::{Deserialize, Serialize};

/// Token使用统计
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TokenUsage {
    /// 输入token数
    pub input_tokens: usize,
    /// 输出token数
    pub output_tokens: usize,
    /// 总token数
    pub total_tokens: usize,
}

impl TokenUsage {
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}
