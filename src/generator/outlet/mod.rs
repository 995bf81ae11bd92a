use crate::generator::compose::memory::{ComposeMemory, MemoryScope};
use crate::generator::compose::types::AgentType;
use crate::generator::context::GeneratorContext;
use crate::generator::interview::memory::InterviewMemory;
use anyhow::Result;
use std::fs;

pub mod docx_exporter;
pub mod pdf_exporter;

pub use docx_exporter::DocxExporter;
pub use pdf_exporter::PdfExporter;

/// 拼装并保存最终报告
pub async fn save(context: &GeneratorContext) -> Result<()> {
    let introduction = context
        .get_document(&AgentType::Introduction.to_string())
        .await
        .unwrap_or_default();
    let body = context
        .get_document(&AgentType::ReportBody.to_string())
        .await
        .ok_or_else(|| anyhow::anyhow!("报告主体内容不可用，无法拼装最终报告"))?;
    let conclusion = context
        .get_document(&AgentType::Conclusion.to_string())
        .await
        .unwrap_or_default();

    let final_report = ReportAssembler::finalize_report(&introduction, &body, &conclusion);
    context
        .store_document(&AgentType::FinalReport.to_string(), &final_report)
        .await?;

    let outlet = DiskOutlet;
    outlet.save(context).await
}

/// 报告拼装器 - 把引言、主体、结论拼成最终报告并合并来源列表
pub struct ReportAssembler;

impl ReportAssembler {
    /// 拼装最终报告
    ///
    /// 各组件中的`Sources`小节会被摘出，去重后统一追加到报告末尾。
    pub fn finalize_report(introduction: &str, body: &str, conclusion: &str) -> String {
        let (introduction, mut sources) = Self::split_sources(introduction);
        let (body, body_sources) = Self::split_sources(body);
        let (conclusion, conclusion_sources) = Self::split_sources(conclusion);
        sources.extend(body_sources);
        sources.extend(conclusion_sources);

        let sources = Self::dedupe_sources(sources);
        let body = Self::normalize_body(&body);

        let mut report = String::new();
        if !introduction.trim().is_empty() {
            report.push_str(introduction.trim());
            report.push_str("\n\n---\n\n");
        }
        report.push_str(&body);
        if !conclusion.trim().is_empty() {
            report.push_str("\n\n---\n\n");
            report.push_str(conclusion.trim());
        }
        if !sources.is_empty() {
            report.push_str("\n\n## Sources\n");
            for source in &sources {
                report.push_str(source);
                report.push('\n');
            }
        }
        report.push('\n');
        report
    }

    /// 摘出`Sources`小节，返回(剩余正文, 来源行)
    fn split_sources(text: &str) -> (String, Vec<String>) {
        let mut content_lines = Vec::new();
        let mut sources = Vec::new();
        let mut in_sources = false;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed == "## Sources" || trimmed == "### Sources" {
                in_sources = true;
                continue;
            }
            if in_sources {
                // 新的小节标题结束来源块
                if trimmed.starts_with('#') {
                    in_sources = false;
                    content_lines.push(line);
                    continue;
                }
                if !trimmed.is_empty() {
                    sources.push(trimmed.to_string());
                }
            } else {
                content_lines.push(line);
            }
        }

        (content_lines.join("\n").trim().to_string(), sources)
    }

    /// 保序去重来源行
    fn dedupe_sources(sources: Vec<String>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        sources
            .into_iter()
            .filter(|source| seen.insert(source.clone()))
            .collect()
    }

    /// 规整报告主体：剥离误生成的一级标题，保证以`## Insights`开头
    fn normalize_body(body: &str) -> String {
        let mut body = body.trim().to_string();
        if body.starts_with("# ") {
            // 标题由引言环节负责，主体中的一级标题整行剥离
            body = body
                .lines()
                .skip(1)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string();
        }
        if !body.starts_with("## Insights") {
            body = format!("## Insights\n\n{}", body);
        }
        body
    }
}

/// Markdown结构块 - 供docx/PDF导出器共用的轻量解析结果
#[derive(Debug, Clone, PartialEq)]
pub enum MarkdownBlock {
    Heading { level: usize, text: String },
    Bullet(String),
    Paragraph(String),
}

/// 把Markdown按行解析为标题、要点与段落块
pub fn parse_markdown_blocks(markdown: &str) -> Vec<MarkdownBlock> {
    let mut blocks = Vec::new();
    let mut paragraph = String::new();

    let mut flush_paragraph = |paragraph: &mut String, blocks: &mut Vec<MarkdownBlock>| {
        if !paragraph.trim().is_empty() {
            blocks.push(MarkdownBlock::Paragraph(paragraph.trim().to_string()));
        }
        paragraph.clear();
    };

    for line in markdown.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed == "---" {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if trimmed.starts_with('#') {
            flush_paragraph(&mut paragraph, &mut blocks);
            let level = trimmed.chars().take_while(|c| *c == '#').count();
            let text = trimmed.trim_start_matches('#').trim().to_string();
            if !text.is_empty() {
                blocks.push(MarkdownBlock::Heading { level, text });
            }
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(MarkdownBlock::Bullet(item.trim().to_string()));
            continue;
        }

        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(trimmed);
    }
    flush_paragraph(&mut paragraph, &mut blocks);

    blocks
}

pub trait Outlet {
    async fn save(&self, context: &GeneratorContext) -> Result<()>;
}

/// 磁盘输出 - Markdown报告、访谈记录与可选的docx/PDF导出
pub struct DiskOutlet;

impl Outlet for DiskOutlet {
    async fn save(&self, context: &GeneratorContext) -> Result<()> {
        println!("\n🖊️ 报告存储中...");

        let final_report = context
            .get_from_memory::<String>(
                MemoryScope::DOCUMENTATION,
                &AgentType::FinalReport.to_string(),
            )
            .await
            .ok_or_else(|| anyhow::anyhow!("最终报告内容不可用"))?;

        // 创建输出目录
        let output_dir = &context.config.output_path;
        if output_dir.exists() {
            fs::remove_dir_all(output_dir)?;
        }
        fs::create_dir_all(output_dir)?;

        // Markdown是规范产物，始终写出
        let language = &context.config.target_language;
        let report_path = output_dir.join(language.report_filename());
        fs::write(&report_path, &final_report)?;
        println!("💾 已保存报告: {}", report_path.display());

        // 访谈记录
        if context.config.save_transcripts {
            let transcripts = context.collect_transcripts().await;
            if !transcripts.is_empty() {
                let transcripts_dir = output_dir.join(language.transcripts_directory());
                fs::create_dir_all(&transcripts_dir)?;
                for (slug, transcript) in transcripts {
                    let transcript_path = transcripts_dir.join(format!("{}.md", slug));
                    fs::write(&transcript_path, transcript)?;
                    println!("💾 已保存访谈记录: {}", transcript_path.display());
                }
            }
        }

        // 导出失败不中断主流程，Markdown报告已经落盘
        if context.config.export_docx {
            let docx_path = report_path.with_extension("docx");
            match DocxExporter::save_as_docx(&final_report, &docx_path) {
                Ok(()) => println!("💾 已导出docx: {}", docx_path.display()),
                Err(e) => eprintln!("⚠️ docx导出失败: {}", e),
            }
        }
        if context.config.export_pdf {
            let pdf_path = report_path.with_extension("pdf");
            match PdfExporter::save_as_pdf(&final_report, &pdf_path) {
                Ok(()) => println!("💾 已导出PDF: {}", pdf_path.display()),
                Err(e) => eprintln!("⚠️ PDF导出失败: {}", e),
            }
        }

        println!("💾 报告保存完成，输出目录: {}", output_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_report_stitch_order() {
        let report = ReportAssembler::finalize_report(
            "# Title\n\n## Introduction\nintro text",
            "## Insights\nbody text\n\n## Sources\n[1] https://a.example",
            "## Conclusion\nconclusion text",
        );

        let title_pos = report.find("# Title").unwrap();
        let body_pos = report.find("## Insights").unwrap();
        let conclusion_pos = report.find("## Conclusion").unwrap();
        let sources_pos = report.find("## Sources").unwrap();
        assert!(title_pos < body_pos);
        assert!(body_pos < conclusion_pos);
        assert!(conclusion_pos < sources_pos);
        assert!(report.contains("[1] https://a.example"));
    }

    #[test]
    fn test_finalize_report_dedupes_sources() {
        let report = ReportAssembler::finalize_report(
            "intro",
            "## Insights\nbody\n\n## Sources\n[1] https://a.example\n[2] https://b.example",
            "conclusion\n\n## Sources\n[1] https://a.example",
        );

        assert_eq!(report.matches("https://a.example").count(), 1);
        assert_eq!(report.matches("https://b.example").count(), 1);
        // 全文只保留一个Sources小节
        assert_eq!(report.matches("## Sources").count(), 1);
    }

    #[test]
    fn test_finalize_report_normalizes_body_header() {
        let report = ReportAssembler::finalize_report(
            "intro",
            "# Stray Title\nplain body without insights header",
            "",
        );
        assert!(report.contains("## Insights"));
        assert!(!report.contains("# Stray Title"));
    }

    #[test]
    fn test_finalize_report_without_optional_parts() {
        let report = ReportAssembler::finalize_report("", "## Insights\nonly body", "");
        assert!(report.starts_with("## Insights"));
        assert!(!report.contains("---"));
        assert!(!report.contains("## Sources"));
    }

    #[test]
    fn test_split_sources_stops_at_next_heading() {
        let (content, sources) = ReportAssembler::split_sources(
            "body\n\n### Sources\n[1] https://a.example\n\n## Appendix\nmore",
        );
        assert_eq!(sources, vec!["[1] https://a.example"]);
        assert!(content.contains("## Appendix"));
        assert!(content.contains("more"));
    }

    #[test]
    fn test_parse_markdown_blocks() {
        let blocks = parse_markdown_blocks(
            "# Title\n\nfirst paragraph\nstill first\n\n- point one\n- point two\n\n---\n\n## Section\nsecond paragraph",
        );

        assert_eq!(
            blocks[0],
            MarkdownBlock::Heading {
                level: 1,
                text: "Title".to_string()
            }
        );
        assert_eq!(
            blocks[1],
            MarkdownBlock::Paragraph("first paragraph still first".to_string())
        );
        assert_eq!(blocks[2], MarkdownBlock::Bullet("point one".to_string()));
        assert_eq!(blocks[3], MarkdownBlock::Bullet("point two".to_string()));
        assert_eq!(
            blocks[4],
            MarkdownBlock::Heading {
                level: 2,
                text: "Section".to_string()
            }
        );
        assert_eq!(
            blocks[5],
            MarkdownBlock::Paragraph("second paragraph".to_string())
        );
    }
}
