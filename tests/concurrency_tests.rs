mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{
    candidates_json, prefs, recommender, Gauge, StubGenerator, StubImages, StubVideos,
};

const GIFT: &str = "https://placehold.co/600x400?text=Gift";

fn five_candidates() -> Arc<StubGenerator> {
    Arc::new(StubGenerator::replying(candidates_json(&[
        ("Item One", 5000),
        ("Item Two", 5000),
        ("Item Three", 5000),
        ("Item Four", 5000),
        ("Item Five", 5000),
    ])))
}

#[tokio::test(start_paused = true)]
async fn all_lookups_run_at_the_same_time() {
    let gauge = Arc::new(Gauge::default());
    let delay = Duration::from_millis(1500);
    let videos = Arc::new(
        StubVideos::new(|q| vec![format!("{}-video", q.len())]).with_delay(delay, gauge.clone()),
    );
    let images = Arc::new(
        StubImages::new(|q| Some(format!("https://img.example/{}.jpg", q.len())))
            .with_delay(delay, gauge.clone()),
    );
    let recommender = recommender(five_candidates(), videos, images);

    let started = tokio::time::Instant::now();
    let items = recommender.enrich(&prefs(5000, 5)).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(items.len(), 5);
    assert_eq!(gauge.peak(), 10);
    assert!(elapsed < delay * 2, "lookups ran sequentially: {elapsed:?}");
    assert!(items.iter().all(|i| i.youtube_ids.is_some()));
}

#[tokio::test]
async fn panicking_lookup_only_affects_its_item() {
    let videos = Arc::new(StubVideos::new(|q| {
        if q == "Item Three" {
            panic!("adapter blew up");
        }
        vec![q.replace(' ', "-")]
    }));
    let images = Arc::new(StubImages::new(|q| {
        Some(format!("https://img.example/{}.jpg", q.len()))
    }));
    let recommender = recommender(five_candidates(), videos, images);

    let items = recommender.enrich(&prefs(5000, 5)).await.unwrap();

    assert_eq!(items.len(), 5);
    assert_eq!(items[2].name, "Item Three");
    assert_eq!(items[2].image_url, GIFT);
    assert!(items[2].youtube_ids.is_none());

    for idx in [0, 1, 3, 4] {
        assert!(items[idx].youtube_ids.is_some(), "item {idx} lost its videos");
        assert!(items[idx].image_url.starts_with("https://img.example/"));
    }
    assert_eq!(items[0].youtube_ids, Some(vec!["Item-One".into()]));
}

#[tokio::test(start_paused = true)]
async fn slow_items_do_not_reorder_results() {
    const NAMES: [&str; 5] = ["Item One", "Item Two", "Item Three", "Item Four", "Item Five"];
    // Earlier candidates take longer, so lookups finish in reverse order.
    fn delay_for(query: &str) -> Duration {
        let rank = NAMES
            .iter()
            .position(|name| query.starts_with(name))
            .unwrap_or(0) as u64;
        Duration::from_millis(1000 - rank * 200)
    }

    let finished = Arc::new(Mutex::new(Vec::new()));
    let order = finished.clone();
    let videos = Arc::new(
        StubVideos::new(move |q| {
            order.lock().unwrap().push(q.to_string());
            vec![format!("{}-video", q.replace(' ', "-"))]
        })
        .with_delay_by(delay_for, Arc::new(Gauge::default())),
    );
    let images = Arc::new(
        StubImages::new(|q| Some(format!("https://img.example/{}.jpg", q.len())))
            .with_delay_by(delay_for, Arc::new(Gauge::default())),
    );
    let recommender = recommender(five_candidates(), videos, images);

    let items = recommender.enrich(&prefs(5000, 5)).await.unwrap();

    let mut reversed = NAMES.to_vec();
    reversed.reverse();
    assert_eq!(*finished.lock().unwrap(), reversed);

    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, NAMES);
    for (item, name) in items.iter().zip(NAMES) {
        assert_eq!(
            item.youtube_ids,
            Some(vec![format!("{}-video", name.replace(' ', "-"))])
        );
        let image_query = format!("{name} 商品画像");
        assert_eq!(
            item.image_url,
            format!("https://img.example/{}.jpg", image_query.len())
        );
    }
    let ids: std::collections::HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids.len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_share_one_recommender() {
    let recommender = recommender(
        five_candidates(),
        Arc::new(StubVideos::new(|q| vec![q.to_string()])),
        Arc::new(StubImages::none()),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let r = recommender.clone();
            tokio::spawn(async move { r.enrich(&prefs(5000, 3)).await })
        })
        .collect();

    for handle in handles {
        let items = handle.await.unwrap().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].youtube_ids, Some(vec!["Item Two".into()]));
    }
}
