use anyhow::Result;

use crate::generator::agent_executor::{AgentExecuteParams, prompt};
use crate::generator::context::GeneratorContext;
use crate::generator::interview::memory::MemoryScope;
use crate::types::InterviewState;

/// 访谈结束的礼貌性收尾语，分析师说出它即表示没有更多问题
pub const CLOSING_PHRASE: &str = "Thank you so much for your help";

/// 访谈提问生成器 - 以分析师视角向专家提问
pub struct QuestionGenerator;

impl QuestionGenerator {
    /// 根据访谈进展生成分析师的下一个问题
    pub async fn generate(
        context: &GeneratorContext,
        topic: &str,
        state: &InterviewState,
    ) -> Result<String> {
        let system_prompt = format!(
            r#"你是一位正在访谈领域专家的分析师，访谈主题为：{topic}

你的画像如下：
{persona}

你的目标是挖掘与你的关注点相关的、具体而非常识性的洞见：
1. 有趣：找到出人意料的具体信息
2. 具体：避免泛泛而谈，追问细节和实例

访谈规则：
- 从你的视角出发，围绕主题持续追问
- 每次只提出一个问题
- 当你觉得理解已经足够充分、没有更多问题时，只回复：{closing}!

{language}"#,
            topic = topic,
            persona = state.analyst.persona(),
            closing = CLOSING_PHRASE,
            language = context.config.target_language.prompt_instruction(),
        );

        let user_prompt = if state.turns.is_empty() {
            "请以符合你画像的语气做简短的自我介绍，并提出你的第一个问题。".to_string()
        } else {
            format!(
                "以下是目前的访谈记录：\n\n{}\n\n请继续提出下一个问题（或在没有更多问题时收尾）。",
                state.render_transcript()
            )
        };

        let params = AgentExecuteParams {
            prompt_sys: system_prompt,
            prompt_user: user_prompt,
            cache_scope: format!("{}/question_{}", MemoryScope::INTERVIEWS, state.analyst.slug()),
            log_tag: format!("question:{}", state.analyst.slug()),
        };

        prompt(context, params).await
    }

    /// 判断问题是否是收尾语
    pub fn is_closing(question: &str) -> bool {
        question
            .to_lowercase()
            .contains(&CLOSING_PHRASE.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_closing_detects_phrase() {
        assert!(QuestionGenerator::is_closing(
            "Thank you so much for your help!"
        ));
        assert!(QuestionGenerator::is_closing(
            "That covers everything. thank you so much for your help."
        ));
        assert!(!QuestionGenerator::is_closing(
            "Thanks, but what about recycling costs?"
        ));
    }
}
