// End-to-end ingestion runs against the in-memory backend

use crate::common::{memory_pipeline, offline_config, run_memory, words, TestRepo};
use corpus_ingest::core::indexer::planner;
use corpus_ingest::core::types::{FileRecord, FileStage, PlanTier};
use std::path::PathBuf;

#[tokio::test]
async fn test_small_and_large_documents() {
    let repo = TestRepo::with_files(&[
        ("guides/short.md", &words(300)),
        ("guides/long.md", &words(5000)),
    ]);

    let (summary, index) = run_memory(repo.path()).await;

    assert_eq!(summary.files_succeeded, 2);
    assert_eq!(summary.files_failed, 0);
    assert_eq!(summary.file("guides/short.md").unwrap().chunks_indexed(), 1);
    assert_eq!(summary.file("guides/long.md").unwrap().chunks_indexed(), 8);
    assert!(summary
        .warnings
        .iter()
        .any(|w| w.starts_with("guides/long.md") && w.contains("large file")));

    let long = index.documents_for("guides/long.md");
    assert_eq!(long.len(), 8);
    assert!(long.iter().all(|d| d.metadata.source == "guides/long.md"));
}

#[tokio::test]
async fn test_chunk_counts_match_plans() {
    let sizes = [120, 650, 651, 1500, 1501, 2500, 2501, 4000, 4001, 7000];
    let files: Vec<(String, String)> = sizes
        .iter()
        .map(|n| (format!("doc_{n:05}.md"), words(*n)))
        .collect();
    let specs: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    let repo = TestRepo::with_files(&specs);

    let (summary, _index) = run_memory(repo.path()).await;

    assert_eq!(summary.files_succeeded, sizes.len());
    for n in sizes {
        let report = summary.file(&format!("doc_{n:05}.md")).unwrap();
        assert_eq!(report.plan, planner::plan(n));
        assert_eq!(report.chunks_indexed(), planner::plan(n).chunk_count);
    }
    assert_eq!(
        summary.file("doc_04001.md").unwrap().plan.tier,
        PlanTier::FixedWindow
    );
    assert!(summary
        .file("doc_04001.md")
        .unwrap()
        .warnings
        .iter()
        .any(|w| w.contains("large file (4001 tokens) split into 6 fixed windows")));
    assert!(summary
        .file("doc_04000.md")
        .unwrap()
        .warnings
        .iter()
        .all(|w| !w.contains("large file")));
}

#[tokio::test]
async fn test_chunks_preserve_document_order() {
    let text = words(3000);
    let repo = TestRepo::with_files(&[("ordered.md", &text)]);

    let (_summary, index) = run_memory(repo.path()).await;

    let docs = index.documents_for("ordered.md");
    assert_eq!(docs.len(), 4);
    assert!(docs[0].text.starts_with("word0 "));
    assert!(docs[3].text.ends_with("word2999"));

    let positions: Vec<usize> = docs
        .iter()
        .map(|d| text.find(d.text.as_str()).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_identical_reruns() {
    let repo = TestRepo::with_files(&[
        ("a.md", &words(800)),
        ("b.md", &words(4200)),
        ("c.md", &words(50)),
    ]);

    let (first, _) = run_memory(repo.path()).await;
    let (second, _) = run_memory(repo.path()).await;

    let tokens = |s: &corpus_ingest::RunSummary| -> Vec<Vec<usize>> {
        s.files.iter().map(|f| f.chunk_tokens.clone()).collect()
    };
    assert_eq!(tokens(&first), tokens(&second));
    assert_eq!(first.chunks_indexed, second.chunks_indexed);
}

#[tokio::test]
async fn test_unreadable_file_does_not_stop_run() {
    let repo = TestRepo::with_files(&[("first.md", "alpha"), ("third.md", "gamma")]);
    let (pipeline, index) = memory_pipeline(offline_config());

    let record = |p: &str| FileRecord {
        path: PathBuf::from(p),
        token_count: 1,
        byte_len: 5,
        char_len: 5,
    };
    let records = vec![record("first.md"), record("second.md"), record("third.md")];

    let summary = pipeline.ingest_records(repo.path(), &records).await;

    assert_eq!(summary.files_succeeded, 2);
    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.failures[0].path, "second.md");
    assert_eq!(summary.failures[0].stage, FileStage::Read);
    assert_eq!(index.len(), 2);
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_file_found_by_scan_is_failed() {
    let repo = TestRepo::with_files(&[("first.md", "alpha"), ("third.md", "gamma")]);
    std::os::unix::fs::symlink(repo.path().join("deleted.md"), repo.path().join("second.md"))
        .unwrap();

    let (summary, index) = run_memory(repo.path()).await;

    assert_eq!(summary.files_seen, 3);
    assert_eq!(summary.files_succeeded, 2);
    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.failures[0].path, "second.md");
    assert_eq!(summary.failures[0].stage, FileStage::Read);
    assert_eq!(index.len(), 2);
}

#[tokio::test]
async fn test_invalid_utf8_is_indexed_not_dropped() {
    let repo = TestRepo::with_files(&[("a.md", "alpha"), ("c.md", "gamma")]);
    std::fs::write(repo.path().join("b.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let (summary, index) = run_memory(repo.path()).await;

    assert_eq!(summary.files_succeeded, 3);
    assert_eq!(summary.files_failed, 0);
    assert!(summary.warnings.iter().any(|w| w.contains("not valid UTF-8")));
    assert_eq!(index.documents_for("b.md").len(), 1);
}

#[tokio::test]
async fn test_parallel_run_matches_sequential() {
    let files: Vec<(String, String)> = (0..8)
        .map(|i| (format!("part{i}.md"), words(200 + i * 700)))
        .collect();
    let specs: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    let repo = TestRepo::with_files(&specs);

    let (sequential, _) = run_memory(repo.path()).await;

    let mut config = offline_config();
    config.limits.max_concurrent_files = 3;
    let (pipeline, index) = memory_pipeline(config);
    let parallel = pipeline.run(repo.path()).await.unwrap();

    assert_eq!(sequential.files, parallel.files);
    assert_eq!(index.len(), parallel.chunks_indexed);
}
