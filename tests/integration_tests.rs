use tempfile::TempDir;

use deepreport_rs::config::Config;
use deepreport_rs::generator::compose::memory::ComposeMemory;
use deepreport_rs::generator::compose::types::AgentType;
use deepreport_rs::generator::context::GeneratorContext;
use deepreport_rs::generator::interview::memory::InterviewMemory;
use deepreport_rs::generator::outlet;
use deepreport_rs::generator::plan::memory::PlanMemory;
use deepreport_rs::generator::workflow::snapshot_state;
use deepreport_rs::types::Analyst;

/// 构建一个与临时目录绑定的测试上下文
fn create_test_context() -> (GeneratorContext, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config {
        topic: Some("the economics of vertical farming".to_string()),
        output_path: temp_dir.path().join("output"),
        internal_path: temp_dir.path().join(".scribe"),
        export_docx: true,
        export_pdf: false,
        ..Default::default()
    };
    config.cache.cache_dir = temp_dir.path().join(".scribe/cache");
    config.search.enabled = false;

    let context = GeneratorContext::new(config).unwrap();
    (context, temp_dir)
}

fn sample_analyst() -> Analyst {
    Analyst {
        name: "Tomás Rivera".to_string(),
        role: "Agronomist".to_string(),
        affiliation: "AgriTech Institute".to_string(),
        description: "Focuses on crop yield per square meter.".to_string(),
    }
}

#[tokio::test]
async fn test_memory_flow_across_phases() {
    let (context, _temp_dir) = create_test_context();
    let analyst = sample_analyst();

    // 规划阶段产物
    context
        .store_topic("the economics of vertical farming")
        .await
        .unwrap();
    context.store_analysts(&[analyst.clone()]).await.unwrap();

    // 访谈阶段产物
    context
        .store_transcript(&analyst.slug(), "# Interview with Tomás Rivera\n\n**Tomás Rivera**: q\n\n**Expert**: a [1]\n")
        .await
        .unwrap();
    context
        .store_section(
            &analyst.slug(),
            "## Yield economics\n\nContent [1].\n\n### Sources\n[1] https://a.example",
        )
        .await
        .unwrap();

    // 撰写阶段产物
    context
        .store_document(&AgentType::ReportBody.to_string(), "## Insights\n\nbody")
        .await
        .unwrap();

    let sections = context.collect_sections().await;
    assert_eq!(sections.len(), 1);

    let transcripts = context.collect_transcripts().await;
    assert_eq!(transcripts.len(), 1);
    assert_eq!(transcripts[0].0, analyst.slug());

    let snapshot = snapshot_state(&context).await;
    assert_eq!(snapshot.topic, "the economics of vertical farming");
    assert_eq!(snapshot.analysts.len(), 1);
    assert_eq!(snapshot.sections.len(), 1);
    assert_eq!(snapshot.content, "## Insights\n\nbody");
}

#[tokio::test]
async fn test_outlet_saves_assembled_report_and_exports() {
    let (context, _temp_dir) = create_test_context();
    let analyst = sample_analyst();

    context
        .store_transcript(&analyst.slug(), "# Interview with Tomás Rivera\n")
        .await
        .unwrap();
    context
        .store_document(
            &AgentType::Introduction.to_string(),
            "# Vertical Farming Economics\n\n## Introduction\nintro text",
        )
        .await
        .unwrap();
    context
        .store_document(
            &AgentType::ReportBody.to_string(),
            "## Insights\n\nbody text [1]\n\n## Sources\n[1] https://a.example",
        )
        .await
        .unwrap();
    context
        .store_document(&AgentType::Conclusion.to_string(), "## Conclusion\nwrap up")
        .await
        .unwrap();

    outlet::save(&context).await.unwrap();

    // Markdown报告
    let report_path = context
        .config
        .output_path
        .join(context.config.target_language.report_filename());
    assert!(report_path.exists());
    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("# Vertical Farming Economics"));
    assert!(report.contains("## Insights"));
    assert!(report.contains("## Conclusion"));
    assert!(report.contains("[1] https://a.example"));

    // 访谈记录
    let transcript_path = context
        .config
        .output_path
        .join(context.config.target_language.transcripts_directory())
        .join(format!("{}.md", analyst.slug()));
    assert!(transcript_path.exists());

    // docx导出
    let docx_path = report_path.with_extension("docx");
    assert!(docx_path.exists());
    assert!(std::fs::metadata(&docx_path).unwrap().len() > 0);

    // 最终报告同时写回Memory
    let stored = context
        .get_document(&AgentType::FinalReport.to_string())
        .await
        .unwrap();
    assert_eq!(stored, report);
}

#[tokio::test]
async fn test_outlet_requires_report_body() {
    let (context, _temp_dir) = create_test_context();
    let result = outlet::save(&context).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_outlet_overwrites_previous_run() {
    let (context, _temp_dir) = create_test_context();

    std::fs::create_dir_all(&context.config.output_path).unwrap();
    let stale_path = context.config.output_path.join("stale.md");
    std::fs::write(&stale_path, "old artifact").unwrap();

    context
        .store_document(&AgentType::ReportBody.to_string(), "## Insights\n\nfresh")
        .await
        .unwrap();
    outlet::save(&context).await.unwrap();

    // 上一次运行的产物被清理
    assert!(!stale_path.exists());
    let report_path = context
        .config
        .output_path
        .join(context.config.target_language.report_filename());
    assert!(report_path.exists());
}

#[test]
fn test_config_file_roundtrip_drives_context() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("scribe.toml");

    let config = Config {
        topic: Some("municipal heat networks".to_string()),
        internal_path: temp_dir.path().join(".scribe"),
        output_path: temp_dir.path().join("reports"),
        ..Default::default()
    };
    std::fs::write(&config_path, toml::to_string(&config).unwrap()).unwrap();

    let loaded = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded.require_topic().unwrap(), "municipal heat networks");

    let context = GeneratorContext::new(loaded);
    assert!(context.is_ok());
}
