use report_aggregator::aggregate::RenderOutcome;
use report_aggregator::core::AggregatorError;
use report_aggregator::test_utils::TestProject;

use crate::run;

fn builder() -> report_aggregator::test_utils::TestProjectBuilder {
    TestProject::builder()
        .unwrap()
        .with_module("core", "jar")
        .with_module("web", "war")
        .with_setting("copy_pattern", "\"pit-reports\"")
}

/// The built-in index lists every module and links the stylesheet
#[test]
fn test_builtin_templates_mention_every_module() {
    let project = builder()
        .with_setting("name", "\"Mutation Coverage\"")
        .build()
        .unwrap();

    let outcome = run(&project);
    let report = outcome.report().unwrap();
    let written: Vec<_> = report.written().cloned().collect();
    assert_eq!(
        written,
        vec![project.path("target/pit-reports/index.html"), project.path("target/pit-reports/style.css")]
    );

    let index = project.read_file("target/pit-reports/index.html").unwrap();
    assert!(index.contains("core"));
    assert!(index.contains("web"));
    assert!(index.contains("<title>Mutation Coverage</title>"));
    assert!(index.contains("href=\"core/pit-reports/index.html\""));
    assert!(index.contains("style.css"));
    assert!(!project.read_file("target/pit-reports/style.css").unwrap().is_empty());
}

/// A single template file is rendered under its derived name
#[test]
fn test_single_template_file() {
    let project = builder()
        .with_setting("templates", "\"summary_html.st\"")
        .with_file("summary_html.st", "Done")
        .build()
        .unwrap();

    let outcome = run(&project);
    assert!(!outcome.report().unwrap().has_failures());
    assert_eq!(project.read_file("target/pit-reports/summary.html").unwrap(), "Done");
    assert!(!project.file_exists("target/pit-reports/index.html"));
}

/// Every entry of a template directory becomes one output file
#[test]
fn test_template_directory() {
    let project = builder()
        .with_setting("templates", "\"report-templates\"")
        .with_file(
            "report-templates/modules_txt.tera",
            "{% for m in modules %}{{ m.id }}\n{% endfor %}",
        )
        .with_file(
            "report-templates/web_module_html.tera",
            "<p>{{ index_by_modules.web.packaging }}</p>",
        )
        .with_file("report-templates/about_md.tera", "# {{ report.name }}\n{{ report.description }}")
        .build()
        .unwrap();

    let outcome = run(&project);
    let report = outcome.report().unwrap();
    assert_eq!(report.renders.len(), 3);
    assert!(!report.has_failures(), "{report:?}");

    assert_eq!(project.read_file("target/pit-reports/modules.txt").unwrap(), "core\nweb\n");
    assert_eq!(project.read_file("target/pit-reports/web_module.html").unwrap(), "<p>war</p>");
    assert_eq!(
        project.read_file("target/pit-reports/about.md").unwrap(),
        "# Aggregation Report\naggregations of multiple modules"
    );
}

/// A missing attribute renders empty and a broken sibling fails alone
#[test]
fn test_tolerant_rendering_and_isolated_failures() {
    let project = builder()
        .with_setting("templates", "\"report-templates\"")
        .with_file("report-templates/a_html.tera", "[{{ report.footer }}]{{ nowhere }}ok")
        .with_file("report-templates/b_html.tera", "{% for m in modules %}{{ m.id }}")
        .with_file("report-templates/c_css.tera", "body {}")
        .build()
        .unwrap();

    let outcome = run(&project);
    let report = outcome.report().unwrap();
    assert_eq!(report.renders.len(), 3);

    assert_eq!(project.read_file("target/pit-reports/a.html").unwrap(), "[]ok");
    assert!(!project.file_exists("target/pit-reports/b.html"));
    assert_eq!(project.read_file("target/pit-reports/c.css").unwrap(), "body {}");

    let failed: Vec<_> = report.renders.iter().filter(|r| r.is_failure()).collect();
    assert_eq!(failed.len(), 1);
    match failed[0] {
        RenderOutcome::Failed {
            template,
            error,
        } => {
            assert_eq!(template, "b_html");
            assert!(matches!(error.downcast_ref::<AggregatorError>(), Some(AggregatorError::Render { .. })));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

/// With built-in templates disabled and no custom ones, only files are copied
#[test]
fn test_no_templates() {
    let project = builder()
        .with_setting("default_templates", "false")
        .with_build_file("core", "pit-reports/index.html", "core")
        .build()
        .unwrap();

    let outcome = run(&project);
    let report = outcome.report().unwrap();
    assert!(report.renders.is_empty());
    assert!(project.file_exists("target/pit-reports/core/pit-reports/index.html"));
    assert!(!project.file_exists("target/pit-reports/index.html"));
}

/// Custom separators drive the output name
#[test]
fn test_custom_separators() {
    let project = builder()
        .with_setting("templates", "\"summary--html.st\"")
        .with_setting("name_separator", "\"--\"")
        .with_file("summary--html.st", "x")
        .build()
        .unwrap();

    run(&project);
    assert_eq!(project.read_file("target/pit-reports/summary.html").unwrap(), "x");
}
