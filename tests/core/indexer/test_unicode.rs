// UTF-8 safety: multi-byte documents split and indexed without panics

use crate::common::{memory_pipeline, offline_config, TestRepo};

fn multilingual(paragraphs: usize) -> String {
    let lines = [
        "Rust 🦀 makes systems programming safe.",
        "中文文档 测试 分块 功能 正常",
        "Привет мир, это тестовый документ.",
        "こんにちは 世界 テスト",
        "مرحبا بالعالم هذا اختبار",
        "Celebrate 🎉🎊🥳 every release",
    ];
    (0..paragraphs)
        .map(|i| lines[i % lines.len()])
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[tokio::test]
async fn test_multibyte_document_splits_on_char_boundaries() {
    let text = multilingual(400);
    let repo = TestRepo::with_files(&[("i18n.md", &text)]);
    let (pipeline, index) = memory_pipeline(offline_config());

    let summary = pipeline.run(repo.path()).await.unwrap();

    assert_eq!(summary.files_failed, 0);
    let docs = index.documents_for("i18n.md");
    assert!(docs.len() > 1);
    for doc in &docs {
        assert!(text.contains(doc.text.as_str()));
    }
    let all: String = docs.iter().map(|d| d.text.as_str()).collect();
    assert!(all.contains("🦀"));
    assert!(all.contains("中文"));
}

#[tokio::test]
async fn test_single_emoji_file_is_stored_whole() {
    let repo = TestRepo::with_files(&[("emoji.md", "🚀 launch ✅ done")]);
    let (pipeline, index) = memory_pipeline(offline_config());

    let summary = pipeline.run(repo.path()).await.unwrap();

    assert_eq!(summary.files_succeeded, 1);
    assert_eq!(index.documents()[0].text, "🚀 launch ✅ done");
}
