use anyhow::Result;
use async_trait::async_trait;

use crate::generator::context::GeneratorContext;
use crate::generator::interview::agents::{ExpertResponder, QuestionGenerator, SectionWriter};
use crate::generator::interview::memory::InterviewMemory;
use crate::generator::step_forward_agent::StepForwardAgent;
use crate::search::format_documents;
use crate::types::{Analyst, InterviewState};

/// 访谈轮次提供者 - 把提问、检索、应答抽象为可替换实现
///
/// 生产路径由LLM与搜索服务驱动，测试使用脚本化实现验证循环逻辑。
#[async_trait]
pub trait InterviewTurnProvider: Send + Sync {
    async fn next_question(&self, topic: &str, state: &InterviewState) -> Result<String>;

    async fn retrieve(&self, question: &str) -> Vec<String>;

    async fn answer(&self, topic: &str, state: &InterviewState) -> Result<String>;
}

/// 生产实现：LLM提问/应答 + 网络搜索检索
pub struct LiveTurnProvider<'a> {
    context: &'a GeneratorContext,
}

impl<'a> LiveTurnProvider<'a> {
    pub fn new(context: &'a GeneratorContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl InterviewTurnProvider for LiveTurnProvider<'_> {
    async fn next_question(&self, topic: &str, state: &InterviewState) -> Result<String> {
        QuestionGenerator::generate(self.context, topic, state).await
    }

    async fn retrieve(&self, question: &str) -> Vec<String> {
        if !self.context.search_client.is_available() {
            return Vec::new();
        }
        match self.context.search_client.search(question).await {
            Ok(documents) => {
                if documents.is_empty() {
                    Vec::new()
                } else {
                    vec![format_documents(&documents)]
                }
            }
            Err(e) => {
                eprintln!("⚠️ 检索失败，本轮回答不附加网络材料: {}", e);
                Vec::new()
            }
        }
    }

    async fn answer(&self, topic: &str, state: &InterviewState) -> Result<String> {
        ExpertResponder::generate(self.context, topic, state).await
    }
}

/// 访谈引擎 - 驱动一位分析师与专家之间的完整问答循环
pub struct InterviewEngine {
    analyst: Analyst,
}

impl InterviewEngine {
    pub fn new(analyst: Analyst) -> Self {
        Self { analyst }
    }

    /// 执行完整访谈：问答循环、落盘访谈记录、转写报告章节
    pub async fn execute(&self, context: &GeneratorContext, topic: &str) -> Result<()> {
        println!("🎙️ [{}] 访谈开始...", self.analyst.name);

        let provider = LiveTurnProvider::new(context);
        let mut state =
            InterviewState::new(self.analyst.clone(), context.config.max_interview_turns);

        Self::run_loop(&mut state, topic, &provider).await?;

        // 保存访谈记录
        let transcript = state.render_transcript();
        context
            .store_transcript(&self.analyst.slug(), &transcript)
            .await?;
        println!(
            "🎙️ [{}] 访谈完成，共 {} 轮回答",
            self.analyst.name,
            state.answered_turns()
        );

        // 转写报告章节
        let section_writer = SectionWriter::new(self.analyst.clone(), state.render_context());
        section_writer.execute(context).await?;

        Ok(())
    }

    /// 问答循环：提问 -> 检索 -> 应答，直到分析师收尾或达到轮数上限
    pub async fn run_loop(
        state: &mut InterviewState,
        topic: &str,
        provider: &dyn InterviewTurnProvider,
    ) -> Result<()> {
        let mut early_closings = 0;
        while state.answered_turns() < state.max_turns {
            let question = provider.next_question(topic, state).await?;

            if QuestionGenerator::is_closing(&question) {
                // 收尾语只在至少有一轮回答后生效，保证每场访谈都有内容；
                // 连续两次在开场就收尾则放弃这场访谈
                if state.answered_turns() > 0 {
                    break;
                }
                early_closings += 1;
                if early_closings > 1 {
                    break;
                }
                continue;
            }

            state.push_question(question.clone());

            for doc in provider.retrieve(&question).await {
                state.context_docs.push(doc);
            }

            let answer = provider.answer(topic, state).await?;
            state.push_answer(answer);
        }
        Ok(())
    }
}
