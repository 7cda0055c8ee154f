// Composition tests: verifying that the pieces chain together correctly.
//
// These tests exercise the data flow between modules:
//   RowSource -> Worksheet -> PhraseCounts -> WordCloud
// without any network calls.

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chococloud::cloud::WordCloud;
use chococloud::config::TARGET_COL;
use chococloud::pipeline::phrase_counts::{count_worksheet, get_phrase_counts};
use chococloud::sheets::records::Worksheet;
use chococloud::sheets::traits::RowSource;

struct StaticSource(Vec<Vec<String>>);

#[async_trait]
impl RowSource for StaticSource {
    async fn fetch_worksheet(&self, _worksheet: &str) -> Result<Worksheet> {
        Ok(Worksheet::from_grid(self.0.clone()))
    }
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

// ============================================================
// Chain: Worksheet -> PhraseCounts
// ============================================================

#[tokio::test]
async fn drifted_header_still_counts_phrases() {
    let source = StaticSource(grid(&[
        &["타임스탬프", "\u{200B}의미정리함수\u{FEFF}"],
        &["t1", "가나,다라;마바\n사아"],
        &["t2", "가나, !!!, 가"],
    ]));
    let counts = get_phrase_counts(&source, "answerA", TARGET_COL).await.unwrap();

    assert_eq!(counts.matched_column.as_deref(), Some("의미정리함수"));
    assert_eq!(counts.columns, vec!["타임스탬프", "의미정리함수"]);
    assert_eq!(counts.counts.get("가나"), 2);
    assert_eq!(counts.counts.get("다라"), 1);
    assert_eq!(counts.counts.get("마바"), 1);
    assert_eq!(counts.counts.get("사아"), 1);
    assert_eq!(counts.counts.len(), 4);
}

#[tokio::test]
async fn missing_column_yields_empty_counts_not_error() {
    let source = StaticSource(grid(&[&["이름", "의견"], &["민수", "소통, 협력"]]));
    let counts = get_phrase_counts(&source, "answerB", TARGET_COL).await.unwrap();
    assert!(counts.counts.is_empty());
    assert!(counts.matched_column.is_none());
    assert_eq!(counts.columns, vec!["이름", "의견"]);
}

#[tokio::test]
async fn empty_sheet_yields_empty_counts() {
    let source = StaticSource(vec![]);
    let counts = get_phrase_counts(&source, "answerA", TARGET_COL).await.unwrap();
    assert!(counts.counts.is_empty());
    assert!(counts.columns.is_empty());
}

#[test]
fn empty_target_column_yields_empty_counts() {
    let sheet = Worksheet::from_grid(grid(&[&["의미 정리 함수", "기타"], &["", "x"], &["", "y"]]));
    let counts = count_worksheet(sheet, TARGET_COL);
    assert_eq!(counts.matched_column.as_deref(), Some(TARGET_COL));
    assert!(counts.counts.is_empty());
}

#[test]
fn row_order_does_not_change_counts() {
    let rows = grid(&[
        &["의미 정리 함수"],
        &["소통, 협력"],
        &["협력；신뢰"],
        &["소통\n배려, 소통"],
        &["AI; ai"],
    ]);
    let forward = count_worksheet(Worksheet::from_grid(rows.clone()), TARGET_COL);

    // Keep the header row first, reverse the records
    let mut shuffled = rows;
    shuffled[1..].reverse();
    let backward = count_worksheet(Worksheet::from_grid(shuffled), TARGET_COL);

    assert_eq!(forward.counts, backward.counts);
    assert_eq!(forward.counts.get("소통"), 3);
}

// ============================================================
// Chain: PhraseCounts -> WordCloud
// ============================================================

#[tokio::test]
async fn counts_feed_word_cloud() {
    let source = StaticSource(grid(&[
        &["의미 정리 함수"],
        &["소통, 협력, 신뢰"],
        &["소통, 배려"],
        &["소통"],
    ]));
    let counts = get_phrase_counts(&source, "answerA", TARGET_COL).await.unwrap();

    let cloud = WordCloud::default();
    let mut rng = StdRng::seed_from_u64(2026);
    let svg = cloud
        .generate_from_frequencies(&counts.counts, &mut rng)
        .unwrap();

    for phrase in ["소통", "협력", "신뢰", "배려"] {
        assert!(svg.contains(&format!(">{phrase}</text>")), "missing {phrase}");
    }
    assert!(svg.contains("<title>소통 (3)</title>"));
}
