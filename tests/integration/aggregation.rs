use report_aggregator::aggregate::{CopyOutcome, RunOutcome};
use report_aggregator::project::NothingToDo;
use report_aggregator::test_utils::TestProject;

use crate::run;

fn core_project() -> TestProject {
    TestProject::builder()
        .unwrap()
        .with_module("core", "jar")
        .with_setting("copy_pattern", "\"pit-reports\"")
        .with_build_file("core", "pit-reports/index.html", "<h1>core</h1>")
        .with_build_file("core", "pit-reports/com.example/Foo.java.html", "foo")
        .with_build_file("core", "classes/Foo.class", "bytecode")
        .build()
        .unwrap()
}

/// A parent with one leaf module gets that module's reports under `<root>/core/`
#[test]
fn test_parent_aggregates_core_reports() {
    let project = core_project();

    let outcome = run(&project);
    let report = outcome.report().expect("pipeline should run");
    assert!(!report.has_failures(), "{report:?}");

    assert_eq!(
        project.read_file("target/pit-reports/core/pit-reports/index.html").unwrap(),
        "<h1>core</h1>"
    );
    assert!(project.file_exists("target/pit-reports/core/pit-reports/com.example/Foo.java.html"));
    assert!(!project.file_exists("target/pit-reports/core/classes"));
    assert!(project.file_exists("target/pit-reports/index.html"));
    assert!(project.file_exists("target/pit-reports/style.css"));
}

/// Grouping units among the descendants get no directory of their own
#[test]
fn test_grouping_descendants_are_excluded() {
    let project = TestProject::builder()
        .unwrap()
        .with_module("core", "jar")
        .with_module("bom", "pom")
        .with_setting("copy_pattern", "\"pit-reports\"")
        .build()
        .unwrap();

    let outcome = run(&project);
    let report = outcome.report().unwrap();
    let modules: Vec<_> = report.copies.iter().map(CopyOutcome::module).collect();
    assert_eq!(modules, vec!["core"]);
    assert!(!project.file_exists("target/pit-reports/bom"));

    let index = project.read_file("target/pit-reports/index.html").unwrap();
    assert!(index.contains("module-core"));
    assert!(!index.contains("module-bom"));
}

/// A leaf root aggregates nothing and writes nothing
#[test]
fn test_leaf_root_has_nothing_to_do() {
    let project = TestProject::builder()
        .unwrap()
        .with_root("lib", "jar")
        .with_module("core", "jar")
        .with_setting("copy_pattern", "\"pit-reports\"")
        .build()
        .unwrap();

    assert!(matches!(run(&project), RunOutcome::NothingToDo(NothingToDo::NotAGroupingUnit)));
    assert!(!project.file_exists("target"));
}

/// A grouping root without modules aggregates nothing
#[test]
fn test_empty_parent_has_nothing_to_do() {
    let project = TestProject::builder()
        .unwrap()
        .with_setting("copy_pattern", "\"pit-reports\"")
        .build()
        .unwrap();

    assert!(matches!(run(&project), RunOutcome::NothingToDo(NothingToDo::NoModules)));
}

/// Running twice gives the same tree and keeps files added in between
#[test]
fn test_rerun_is_idempotent() {
    let project = core_project();

    run(&project);
    let first = project.read_file("target/pit-reports/index.html").unwrap();
    project.write_file("target/pit-reports/core/notes.txt", "kept").unwrap();

    let outcome = run(&project);
    assert!(!outcome.report().unwrap().has_failures());
    assert_eq!(project.read_file("target/pit-reports/index.html").unwrap(), first);
    assert_eq!(project.read_file("target/pit-reports/core/notes.txt").unwrap(), "kept");
    assert_eq!(
        project.read_file("target/pit-reports/core/pit-reports/index.html").unwrap(),
        "<h1>core</h1>"
    );
}

/// A module without build output is skipped; the others are still copied
#[test]
fn test_module_without_build_output_is_skipped() {
    let project = TestProject::builder()
        .unwrap()
        .with_module("api", "jar")
        .with_module("core", "jar")
        .with_setting("copy_pattern", "\"pit-reports\"")
        .with_build_file("core", "pit-reports/index.html", "core")
        .build()
        .unwrap();

    let outcome = run(&project);
    let report = outcome.report().unwrap();
    assert!(!report.has_failures());
    assert!(matches!(&report.copies[0], CopyOutcome::Skipped { module, .. } if module == "api"));
    assert!(matches!(&report.copies[1], CopyOutcome::Copied { module, .. } if module == "core"));
    assert!(project.file_exists("target/pit-reports/core/pit-reports/index.html"));
}

/// With copying disabled only the templates are rendered
#[test]
fn test_copy_modules_disabled() {
    let project = TestProject::builder()
        .unwrap()
        .with_module("core", "jar")
        .with_setting("copy_pattern", "\"pit-reports\"")
        .with_setting("copy_modules", "false")
        .with_build_file("core", "pit-reports/index.html", "core")
        .build()
        .unwrap();

    let outcome = run(&project);
    assert!(outcome.report().unwrap().copies.is_empty());
    assert!(!project.file_exists("target/pit-reports/core"));
    assert!(project.file_exists("target/pit-reports/index.html"));
}

/// The copy pattern is a regular expression over whole entry names
#[test]
fn test_regex_copy_pattern() {
    let project = TestProject::builder()
        .unwrap()
        .with_module("core", "jar")
        .with_setting("copy_pattern", r#"'mutations\.(xml|csv)'"#)
        .with_setting("reports_directory", "\"mutations\"")
        .with_build_file("core", "mutations.xml", "<mutations/>")
        .with_build_file("core", "mutations.csv", "a,b")
        .with_build_file("core", "mutations.xml.bak", "old")
        .build()
        .unwrap();

    let outcome = run(&project);
    assert!(!outcome.report().unwrap().has_failures());
    assert!(project.file_exists("target/mutations/core/mutations.xml"));
    assert!(project.file_exists("target/mutations/core/mutations.csv"));
    assert!(!project.file_exists("target/mutations/core/mutations.xml.bak"));
}

/// Only entries matching the pattern are copied, and the root itself gets no directory
#[test]
fn test_only_matching_report_is_copied_for_leaf_modules() {
    let project = TestProject::builder()
        .unwrap()
        .with_module("core", "jar")
        .with_setting("copy_pattern", r#"'report\.xml'"#)
        .with_setting("reports_directory", "\"report\"")
        .with_build_file("core", "report.xml", "<report/>")
        .with_build_file("core", "notes.txt", "notes")
        .build()
        .unwrap();

    let outcome = run(&project);
    let report = outcome.report().unwrap();
    assert!(!report.has_failures(), "{report:?}");

    let modules: Vec<_> = report.copies.iter().map(CopyOutcome::module).collect();
    assert_eq!(modules, vec!["core"]);
    assert_eq!(project.read_file("target/report/core/report.xml").unwrap(), "<report/>");
    assert!(!project.file_exists("target/report/core/notes.txt"));
    assert!(!project.file_exists("target/report/parent"));
}
