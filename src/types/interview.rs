use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::analyst::Analyst;

/// 访谈中一轮发言的角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum TurnRole {
    /// 分析师提出的问题
    Question,
    /// 专家（由LLM扮演）给出的回答
    Answer,
}

/// 访谈中的一轮发言
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InterviewTurn {
    pub role: TurnRole,
    pub content: String,
}

/// 单场访谈的状态 - 问答轮次、检索材料与上限控制
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewState {
    /// 接受访谈视角的分析师
    pub analyst: Analyst,
    /// 专家回答轮数上限
    pub max_turns: usize,
    /// 按时间顺序记录的问答轮次
    pub turns: Vec<InterviewTurn>,
    /// 为回答检索到的网络材料（已格式化）
    pub context_docs: Vec<String>,
}

impl InterviewState {
    pub fn new(analyst: Analyst, max_turns: usize) -> Self {
        Self {
            analyst,
            max_turns,
            turns: Vec::new(),
            context_docs: Vec::new(),
        }
    }

    pub fn push_question(&mut self, content: String) {
        self.turns.push(InterviewTurn {
            role: TurnRole::Question,
            content,
        });
    }

    pub fn push_answer(&mut self, content: String) {
        self.turns.push(InterviewTurn {
            role: TurnRole::Answer,
            content,
        });
    }

    /// 已完成的专家回答轮数
    pub fn answered_turns(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.role == TurnRole::Answer)
            .count()
    }

    /// 最近一个尚未回答的问题
    pub fn last_question(&self) -> Option<&str> {
        match self.turns.last() {
            Some(turn) if turn.role == TurnRole::Question => Some(turn.content.as_str()),
            _ => None,
        }
    }

    /// 渲染为Markdown格式的访谈记录
    pub fn render_transcript(&self) -> String {
        let mut transcript = format!("# Interview with {}\n\n", self.analyst.name);
        for turn in &self.turns {
            match turn.role {
                TurnRole::Question => {
                    transcript.push_str(&format!("**{}**: {}\n\n", self.analyst.name, turn.content));
                }
                TurnRole::Answer => {
                    transcript.push_str(&format!("**Expert**: {}\n\n", turn.content));
                }
            }
        }
        transcript
    }

    /// 渲染检索材料，供专家回答时引用
    pub fn render_context(&self) -> String {
        self.context_docs.join("\n\n---\n\n")
    }
}
