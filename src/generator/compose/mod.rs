use crate::generator::compose::agents::{ConclusionEditor, IntroductionEditor, ReportBodyEditor};
use crate::generator::context::GeneratorContext;
use crate::generator::step_forward_agent::StepForwardAgent;
use anyhow::Result;

mod agents;
pub mod memory;
pub mod types;

/// 执行报告撰写阶段
pub async fn execute(context: &GeneratorContext) -> Result<()> {
    let composer = ReportComposer;
    composer.execute(context).await
}

/// 报告撰写器
#[derive(Default)]
pub struct ReportComposer;

impl ReportComposer {
    pub async fn execute(&self, context: &GeneratorContext) -> Result<()> {
        println!("\n🤖 执行报告撰写流程...");
        println!(
            "📝 目标语言: {}",
            context.config.target_language.display_name()
        );

        // 先整合主体，引言与结论都依据完成的主体撰写
        let report_body_editor = ReportBodyEditor;
        report_body_editor.execute(context).await?;

        let introduction_editor = IntroductionEditor;
        introduction_editor.execute(context).await?;

        let conclusion_editor = ConclusionEditor;
        conclusion_editor.execute(context).await?;

        Ok(())
    }
}
