//! PDF导出器 - 把最终报告的Markdown结构渲染为PDF文档

use anyhow::{Context, Result};
use genpdf::elements::{Break, Paragraph};
use genpdf::{Document, SimplePageDecorator};
use std::path::Path;

use crate::generator::outlet::{MarkdownBlock, parse_markdown_blocks};

/// PDF导出器
pub struct PdfExporter;

impl PdfExporter {
    /// 将Markdown报告保存为PDF文件
    pub fn save_as_pdf(markdown: &str, output_path: &Path) -> Result<()> {
        let font_family = Self::load_font_family()?;

        let mut doc = Document::new(font_family);
        doc.set_title("Research Report");

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(30);
        doc.set_page_decorator(decorator);

        for block in parse_markdown_blocks(markdown) {
            match block {
                MarkdownBlock::Heading { level, text } => {
                    let size = match level {
                        1 => 18,
                        2 => 15,
                        _ => 13,
                    };
                    let style = genpdf::style::Style::new().bold().with_font_size(size);
                    doc.push(Paragraph::new(genpdf::style::StyledString::new(text, style)));
                    doc.push(Break::new(1));
                }
                MarkdownBlock::Bullet(text) => {
                    doc.push(Paragraph::new(format!("• {}", text)));
                }
                MarkdownBlock::Paragraph(text) => {
                    doc.push(Paragraph::new(text));
                    doc.push(Break::new(0.5));
                }
            }
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        doc.render_to_file(output_path)
            .context(format!("Failed to render PDF: {:?}", output_path))?;
        Ok(())
    }

    /// 依次尝试常见的系统字体位置
    fn load_font_family() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>> {
        let candidates = [
            ("", "LiberationSans"),
            ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
            ("/usr/share/fonts/liberation", "LiberationSans"),
            ("/System/Library/Fonts", "Helvetica"),
            ("/Library/Fonts", "Arial"),
        ];

        for (dir, name) in candidates {
            if let Ok(family) = genpdf::fonts::from_files(dir, name, None) {
                return Ok(family);
            }
        }
        Err(anyhow::anyhow!(
            "No suitable font found on this system for PDF export"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // PDF渲染依赖系统字体；无字体环境下跳过断言而不是失败
    #[test]
    fn test_save_as_pdf_creates_file_when_fonts_available() {
        if PdfExporter::load_font_family().is_err() {
            eprintln!("skipping: no system fonts available");
            return;
        }

        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.pdf");
        let markdown = "# Research Report\n\n## Insights\n\nBody paragraph.\n\n- a point\n";
        PdfExporter::save_as_pdf(markdown, &output_path).unwrap();

        let metadata = std::fs::metadata(&output_path).unwrap();
        assert!(metadata.len() > 0);
    }
}
