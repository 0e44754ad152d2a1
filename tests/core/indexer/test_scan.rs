// Scanning through the pipeline: ignore rules and extension filters

use crate::common::{memory_pipeline, offline_config, run_memory, TestRepo};

#[tokio::test]
async fn test_ignored_trees_never_reach_the_index() {
    let repo = TestRepo::docs();

    let (summary, index) = run_memory(repo.path()).await;

    let mut sources: Vec<String> = index
        .documents()
        .into_iter()
        .map(|d| d.metadata.source)
        .collect();
    sources.sort();
    assert_eq!(
        sources,
        vec![
            "README.md",
            "docs/api/reference.mdx",
            "docs/getting-started.md"
        ]
    );
    assert_eq!(summary.files_seen, 3);
}

#[tokio::test]
async fn test_project_ignore_file_is_honoured() {
    let repo = TestRepo::with_files(&[
        (".gitignore", "# local drafts\ndrafts/\n*.tmp.md\n"),
        ("guide.md", "guide"),
        ("drafts/idea.md", "idea"),
        ("scratch.tmp.md", "scratch"),
    ]);

    let (summary, index) = run_memory(repo.path()).await;

    assert_eq!(summary.files_seen, 1);
    assert_eq!(index.documents()[0].metadata.source, "guide.md");
}

#[tokio::test]
async fn test_extra_patterns_and_extensions_from_config() {
    let repo = TestRepo::with_files(&[
        ("a.md", "a"),
        ("b.txt", "b"),
        ("vendor/c.txt", "c"),
    ]);

    let mut config = offline_config();
    config.indexing.extensions = vec![".txt".to_string()];
    config.indexing.extra_ignore_patterns = vec!["vendor/".to_string()];
    let (pipeline, index) = memory_pipeline(config);

    let summary = pipeline.run(repo.path()).await.unwrap();

    assert_eq!(summary.files_seen, 1);
    assert_eq!(index.documents()[0].metadata.source, "b.txt");
}

#[tokio::test]
async fn test_no_matching_files_is_a_warning() {
    let repo = TestRepo::with_files(&[("notes.txt", "plain text")]);

    let (summary, index) = run_memory(repo.path()).await;

    assert_eq!(summary.files_seen, 0);
    assert!(index.is_empty());
    assert!(summary.warnings.iter().any(|w| w.contains("No files")));
}
