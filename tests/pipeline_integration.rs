mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::{candidates_json, prefs, recommender, StubGenerator, StubImages, StubVideos};
use concierge::{ConciergeConfig, Recommender};

const GIFT: &str = "https://placehold.co/600x400?text=Gift";
const NO_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

#[tokio::test]
async fn out_of_band_candidates_are_dropped_and_placeholders_applied() {
    let generator = Arc::new(StubGenerator::replying(candidates_json(&[
        ("Scented Candle", 4200),
        ("Leather Card Case", 5800),
        ("Wool Scarf", 6200),
        ("Espresso Machine", 9000),
    ])));
    let recommender = recommender(
        generator.clone(),
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );

    let items = recommender.enrich(&prefs(5000, 3)).await.unwrap();

    let prices: Vec<u64> = items.iter().map(|i| i.price).collect();
    assert_eq!(prices, vec![4200, 5800]);
    for item in &items {
        assert_eq!(item.image_url, NO_IMAGE);
        assert!(item.youtube_ids.is_none());
        assert!(item.id.starts_with("ai-"));
    }
    assert_ne!(items[0].id, items[1].id);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn enrichment_results_land_on_their_own_items_in_order() {
    let generator = Arc::new(StubGenerator::replying(candidates_json(&[
        ("Sony WH-1000XM5", 49500),
        ("Bose QC45", 44000),
        ("Apple AirPods Max", 60000),
    ])));
    let videos: HashMap<&str, Vec<String>> = HashMap::from([
        ("Sony WH-1000XM5", vec!["s1".to_string(), "s2".to_string()]),
        (
            "Apple AirPods Max",
            vec!["a1", "", "a2", "a3", "a4"].into_iter().map(String::from).collect(),
        ),
    ]);
    let videos = Arc::new(StubVideos::new(move |q| {
        videos.get(q).cloned().unwrap_or_default()
    }));
    let images = Arc::new(StubImages::new(|q| {
        q.starts_with("Bose").then(|| "https://img.example/bose.jpg".to_string())
    }));
    let recommender = recommender(generator, videos.clone(), images.clone());

    let items = recommender.enrich(&prefs(50000, 3)).await.unwrap();

    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Sony WH-1000XM5", "Bose QC45", "Apple AirPods Max"]);

    assert_eq!(items[0].youtube_ids, Some(vec!["s1".into(), "s2".into()]));
    assert_eq!(items[0].image_url, NO_IMAGE);

    assert!(items[1].youtube_ids.is_none());
    assert_eq!(items[1].image_url, "https://img.example/bose.jpg");

    assert_eq!(
        items[2].youtube_ids,
        Some(vec!["a1".into(), "a2".into(), "a3".into()])
    );

    let mut image_queries = images.queries.lock().unwrap().clone();
    image_queries.sort();
    assert_eq!(
        image_queries,
        [
            "Apple AirPods Max 商品画像",
            "Bose QC45 商品画像",
            "Sony WH-1000XM5 商品画像"
        ]
    );
    assert_eq!(videos.queries.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn high_budget_keeps_everything_above_the_floor() {
    let generator = Arc::new(StubGenerator::replying(candidates_json(&[
        ("Watch", 90000),
        ("Bag", 35000),
        ("Pen", 20000),
    ])));
    let recommender = recommender(
        generator,
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );

    let report = recommender
        .recommend_with_report(&prefs(40000, 3))
        .await
        .unwrap();

    let prices: Vec<u64> = report.items.iter().map(|i| i.price).collect();
    assert_eq!(prices, vec![90000, 35000]);
    assert!(!report.budget_relaxed);
    assert_eq!(report.generated, 3);
}

#[tokio::test]
async fn nothing_in_band_serves_the_unfiltered_list() {
    let generator = Arc::new(StubGenerator::replying(candidates_json(&[
        ("Cheap Mug", 500),
        ("Luxury Watch", 80000),
    ])));
    let recommender = recommender(
        generator,
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );

    let report = recommender
        .recommend_with_report(&prefs(5000, 3))
        .await
        .unwrap();

    assert!(report.budget_relaxed);
    let prices: Vec<u64> = report.items.iter().map(|i| i.price).collect();
    assert_eq!(prices, vec![500, 80000]);
}

#[tokio::test]
async fn output_is_capped_at_the_requested_count() {
    let generator = Arc::new(StubGenerator::replying(candidates_json(&[
        ("A", 5000),
        ("B", 5100),
        ("C", 5200),
        ("D", 5300),
    ])));
    let videos = Arc::new(StubVideos::none());
    let recommender = recommender(generator, videos.clone(), Arc::new(StubImages::none()));

    let items = recommender.enrich(&prefs(5000, 2)).await.unwrap();

    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(videos.queries.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn fenced_model_output_is_accepted() {
    let body = format!("```json\n{}\n```", candidates_json(&[("Tea Set", 5000)]));
    let recommender = recommender(
        Arc::new(StubGenerator::replying(body)),
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );

    let items = recommender.enrich(&prefs(5000, 1)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Tea Set");
}

#[tokio::test]
async fn empty_candidate_list_is_an_empty_success() {
    let recommender = recommender(
        Arc::new(StubGenerator::replying("[]")),
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );

    let report = recommender
        .recommend_with_report(&prefs(5000, 3))
        .await
        .unwrap();
    assert!(report.items.is_empty());
    assert!(!report.budget_relaxed);
}

#[tokio::test]
async fn prompt_carries_the_preferences() {
    let generator = Arc::new(StubGenerator::replying("[]"));
    let recommender = recommender(
        generator.clone(),
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );

    recommender.enrich(&prefs(5000, 3)).await.unwrap();

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("5000"));
    assert!(prompts[0].contains("friend"));
    assert!(prompts[0].contains("stylish"));
}

#[tokio::test]
async fn configured_placeholder_urls_are_used() {
    let yaml = "enrichment:\n  missing_image_url: \"https://cdn.example/none.png\"\n";
    let config = ConciergeConfig::from_yaml(yaml).unwrap();
    let recommender = Recommender::new(
        config,
        Arc::new(StubGenerator::replying(candidates_json(&[("Pen", 5000)]))),
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );

    let items = recommender.enrich(&prefs(5000, 1)).await.unwrap();
    assert_eq!(items[0].image_url, "https://cdn.example/none.png");
    assert_ne!(items[0].image_url, GIFT);
}

#[tokio::test]
async fn status_reflects_collaborators() {
    let recommender = recommender(
        Arc::new(StubGenerator::unconfigured()),
        Arc::new(StubVideos::none()),
        Arc::new(StubImages::none()),
    );
    let status = recommender.status();
    assert!(!status.generation);
    assert!(status.video_lookup);
    assert!(status.image_lookup);
}
