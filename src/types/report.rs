use serde::{Deserialize, Serialize};

use crate::types::analyst::Analyst;

/// 整体调研流程的状态快照
///
/// 运行期间各阶段数据存放在Memory的不同作用域中，流程收尾时
/// 汇总为该结构，便于序列化留档与测试断言。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResearchGraphState {
    /// 调研主题
    pub topic: String,
    /// 参与访谈的分析师小组
    pub analysts: Vec<Analyst>,
    /// 每位分析师产出的报告章节
    pub sections: Vec<String>,
    /// 报告引言
    pub introduction: String,
    /// 报告主体内容
    pub content: String,
    /// 报告结论
    pub conclusion: String,
    /// 拼装完成的最终报告
    pub final_report: String,
}
