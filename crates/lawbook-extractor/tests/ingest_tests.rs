//! Integration tests for ingestion into a SQLite store

use chrono::NaiveDate;
use lawbook_domain::traits::{LegalStore, RecordFilter};
use lawbook_domain::{Collection, RawDocument};
use lawbook_extractor::{ExtractorConfig, IngestHint, Ingestor};
use lawbook_gatekeeper::GatekeeperConfig;
use lawbook_store::SqliteStore;
use std::fs;
use std::path::Path;

const CONTRACT_LAW: &str = "# 中华人民共和国合同法\n\n\
发布机关：全国人民代表大会\n\
施行日期：2000-10-01\n\n\
第一条 为了保护合同当事人的合法权益，维护社会经济秩序，制定本法。\n\
第二条 本法所称合同是平等主体的自然人、法人之间设立民事权利义务关系的协议。\n";

const LABOR_CASE: &str = "# 张三诉某公司劳动争议案\n\n\
<!-- source: import -->\n\
基本案情：原告张三于2019年5月入职被告某公司。张三向上海市浦东新区人民法院提起诉讼。\n\n\
争议焦点：是否存在劳动关系，以及被告是否应当支付未签订书面劳动合同的二倍工资差额。\n\n\
裁判结果：法院判决确认原告与被告之间存在劳动关系，被告支付原告二倍工资差额共计三万元。\n\n\
判决日期：2022年3月1日\n";

fn ingestor() -> Ingestor {
    Ingestor::new(ExtractorConfig::default(), &GatekeeperConfig::default()).unwrap()
}

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn test_statute_document_split_into_articles() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let document = RawDocument::from_markdown("contract", CONTRACT_LAW);

    let report = ingestor().ingest_document(&mut store, &document, &IngestHint::default());
    assert_eq!(report.articles_imported, 2);
    assert!(report.failures.is_empty());

    let articles = store.scan_articles(&RecordFilter::default()).unwrap();
    assert_eq!(articles[0].title, "中华人民共和国合同法");
    assert_eq!(articles[0].article_number.as_deref(), Some("第一条"));
    assert!(!articles[0].content.contains("第二条"));
    assert_eq!(articles[1].article_number.as_deref(), Some("第二条"));
    assert_eq!(articles[0].publish_org.as_deref(), Some("全国人民代表大会"));
    assert_eq!(articles[0].publish_date, NaiveDate::from_ymd_opt(2000, 10, 1));
}

#[test]
fn test_case_document_routed_and_extracted() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let document = RawDocument::from_markdown("case", LABOR_CASE);

    let report = ingestor().ingest_document(&mut store, &document, &IngestHint::default());
    assert_eq!(report.cases_imported, 1);
    assert_eq!(report.articles_imported, 0);

    let cases = store.scan_cases(&RecordFilter::default()).unwrap();
    let case = &cases[0];
    assert_eq!(case.court_name.as_deref(), Some("上海市浦东新区人民法院"));
    assert_eq!(case.judgment_date, NaiveDate::from_ymd_opt(2022, 3, 1));
    assert_eq!(case.law_domain, "劳动法");
    assert!(case.dispute_point.as_deref().unwrap().starts_with("是否存在劳动关系"));
    assert!(!case.content.contains("<!--"));
}

#[test]
fn test_hint_overrides_router_and_classifier() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let document = RawDocument::from_markdown("contract", CONTRACT_LAW);
    let hint = IngestHint::with_domain("民法").forced(Collection::Case);

    let report = ingestor().ingest_document(&mut store, &document, &hint);
    assert_eq!(report.cases_imported, 1);

    let cases = store.scan_cases(&RecordFilter::default()).unwrap();
    assert_eq!(cases[0].law_domain, "民法");
}

#[test]
fn test_reingest_skips_existing() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let ingestor = ingestor();
    let document = RawDocument::from_markdown("contract", CONTRACT_LAW);

    ingestor.ingest_document(&mut store, &document, &IngestHint::default());
    let second = ingestor.ingest_document(&mut store, &document, &IngestHint::default());

    assert_eq!(second.imported(), 0);
    assert_eq!(second.skipped, 2);
}

#[test]
fn test_statute_tree_import_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("民法商法/中华人民共和国合同法.md"), CONTRACT_LAW);
    write(&root.join("刑法/_index.md"), "# 刑法\n\n目录页，不应导入任何内容，这里的文字只是说明。");
    write(&root.join("scripts/tool.md"), CONTRACT_LAW.replace("合同法", "工具法").as_str());
    write(&root.join("README.txt"), "not markdown");

    let mut store = SqliteStore::new(":memory:").unwrap();
    let ingestor = ingestor();

    let first = ingestor.import_statute_tree(&mut store, root).unwrap();
    assert_eq!(first.documents, 1);
    assert_eq!(first.articles_imported, 2);

    let articles = store.scan_articles(&RecordFilter::default()).unwrap();
    assert!(articles.iter().all(|a| a.law_domain == "民法"));

    let second = ingestor.import_statute_tree(&mut store, root).unwrap();
    assert_eq!(second.imported(), 0);
    assert_eq!(second.skipped, 2);
}

#[test]
fn test_case_tree_forces_case_collection() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("劳动人事/某公司加班费.md"), "# 某公司加班费\n\n员工长期加班，公司未支付加班费，员工申请劳动仲裁后起诉。");

    let mut store = SqliteStore::new(":memory:").unwrap();
    let report = ingestor().import_case_tree(&mut store, root).unwrap();

    assert_eq!(report.cases_imported, 1);
    let cases = store.scan_cases(&RecordFilter::default()).unwrap();
    assert_eq!(cases[0].title, "某公司加班费");
    assert_eq!(cases[0].law_domain, "劳动法");
}

#[test]
fn test_missing_root_is_an_error() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let result = ingestor().import_statute_tree(&mut store, Path::new("/nonexistent/lawbook"));
    assert!(result.is_err());
}

#[test]
fn test_unreadable_file_recorded_as_failure() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let report = ingestor().ingest_file(
        &mut store,
        Path::new("/nonexistent/file.md"),
        &IngestHint::default(),
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.imported(), 0);
}
