//! docx导出器 - 把最终报告的Markdown结构转写为Word文档

use anyhow::{Context, Result};
use docx_rs::{AlignmentType, Docx, Paragraph, Run};
use std::fs::File;
use std::path::Path;

use crate::generator::outlet::{MarkdownBlock, parse_markdown_blocks};

/// docx导出器
pub struct DocxExporter;

impl DocxExporter {
    /// 将Markdown报告保存为docx文件
    pub fn save_as_docx(markdown: &str, output_path: &Path) -> Result<()> {
        let mut docx = Docx::new();

        for block in parse_markdown_blocks(markdown) {
            docx = docx.add_paragraph(Self::block_to_paragraph(block));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(output_path)
            .context(format!("Failed to create docx file: {:?}", output_path))?;
        docx.build()
            .pack(file)
            .context("Failed to pack docx document")?;
        Ok(())
    }

    /// 把一个Markdown块转换为docx段落
    fn block_to_paragraph(block: MarkdownBlock) -> Paragraph {
        match block {
            MarkdownBlock::Heading { level, text } => {
                // docx字号单位为半磅
                let size = match level {
                    1 => 36,
                    2 => 30,
                    _ => 26,
                };
                let paragraph = Paragraph::new().add_run(Run::new().add_text(text).size(size).bold());
                if level == 1 {
                    paragraph.align(AlignmentType::Center)
                } else {
                    paragraph
                }
            }
            MarkdownBlock::Bullet(text) => {
                Paragraph::new().add_run(Run::new().add_text(format!("• {}", text)).size(22))
            }
            MarkdownBlock::Paragraph(text) => {
                Paragraph::new().add_run(Run::new().add_text(text).size(22))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_as_docx_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.docx");

        let markdown = "# Research Report\n\n## Insights\n\nBody paragraph [1].\n\n- first point\n- second point\n\n## Sources\n[1] https://a.example\n";
        DocxExporter::save_as_docx(markdown, &output_path).unwrap();

        let metadata = std::fs::metadata(&output_path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_save_as_docx_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("nested/dir/report.docx");
        DocxExporter::save_as_docx("# Title\n\ntext", &output_path).unwrap();
        assert!(output_path.exists());
    }
}
