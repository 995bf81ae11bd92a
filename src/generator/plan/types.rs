/// 规划阶段的Agent类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentType {
    /// 分析师小组合成
    AnalystFactory,
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentType::AnalystFactory => write!(f, "analyst_factory"),
        }
    }
}
