use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::sync::Arc;

use ephemeral_core::mocks::{DeleteCall, MockPlatform};
use ephemeral_core::{format_platform_time, AllowList, PolicyDurations, Post, PostId};
use ephemeral_retention::{Decision, InvocationResponse, RetentionEngine, TIMELINE_WINDOW};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn policy() -> PolicyDurations {
    PolicyDurations::new(TimeDelta::hours(720), TimeDelta::hours(48))
}

fn post(id: i64, age_hours: i64) -> Post {
    Post::new(id, format_platform_time(now() - TimeDelta::hours(age_hours)), format!("post {}", id))
}

fn reply(id: i64, parent: i64, age_hours: i64) -> Post {
    post(id, age_hours).in_reply_to(parent)
}

fn engine(platform: &Arc<MockPlatform>, allow_list: &str) -> RetentionEngine {
    RetentionEngine::new(platform.clone(), policy(), AllowList::parse(allow_list))
}

#[tokio::test]
async fn test_scenario_allow_listed_post_is_kept() {
    let platform = Arc::new(MockPlatform::new().with_timeline(vec![post(42, 10_000)]));

    let report = engine(&platform, "42").run(now()).await;

    assert!(platform.deletes().is_empty());
    assert_eq!(report.allow_listed, 1);
    // Allow-listed posts never reach the reply search.
    assert!(platform.searches().is_empty());
}

#[tokio::test]
async fn test_scenario_young_post_is_kept() {
    let platform = Arc::new(MockPlatform::new().with_timeline(vec![post(7, 1)]));

    let report = engine(&platform, "").run(now()).await;

    assert!(platform.deletes().is_empty());
    assert_eq!(report.too_young, 1);
    assert_eq!(platform.identity_calls(), 0);
}

#[tokio::test]
async fn test_scenario_recent_reply_keeps_post() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_timeline(vec![post(9, 1000)])
            .with_mentions(vec![reply(30, 9, 2)]),
    );

    let report = engine(&platform, "").run(now()).await;

    assert!(platform.deletes().is_empty());
    assert_eq!(report.ongoing_interaction, 1);
}

#[tokio::test]
async fn test_scenario_stale_reply_allows_deletion() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_timeline(vec![post(11, 1000)])
            .with_mentions(vec![reply(30, 11, 500)]),
    );

    let report = engine(&platform, "").run(now()).await;

    assert_eq!(
        platform.deletes(),
        vec![DeleteCall { id: PostId(11), trim_user: true }]
    );
    assert_eq!(report.deleted, vec![PostId(11)]);
}

#[tokio::test]
async fn test_scenario_timeline_error_completes_without_deletions() {
    let platform = Arc::new(MockPlatform::new().with_timeline_error("network unreachable"));

    let report = engine(&platform, "").run(now()).await;

    assert!(platform.deletes().is_empty());
    assert!(report.timeline_unavailable);
    assert_eq!(report.scanned, 0);
    assert_eq!(InvocationResponse::from(&report), InvocationResponse::completed());
}

#[tokio::test]
async fn test_timeline_request_shape() {
    let platform = Arc::new(MockPlatform::new());
    engine(&platform, "").run(now()).await;
    assert_eq!(platform.timeline_calls(), vec![(TIMELINE_WINDOW, true)]);
    assert_eq!(TIMELINE_WINDOW, 200);
}

#[tokio::test]
async fn test_unparseable_old_post_is_never_deleted() {
    let broken = Post::new(5, "long, long ago", "ancient");
    let platform = Arc::new(MockPlatform::new().with_timeline(vec![broken]));

    let report = engine(&platform, "").run(now()).await;

    assert!(platform.deletes().is_empty());
    assert_eq!(report.unparseable, 1);
    assert_eq!(platform.identity_calls(), 0);
}

#[tokio::test]
async fn test_null_timestamp_post_does_not_hide_its_neighbours() {
    let timeline: Vec<Post> = serde_json::from_value(serde_json::json!([
        { "id": 200, "created_at": format_platform_time(now() - TimeDelta::hours(1000)), "text": "old" },
        { "id": 100, "created_at": null, "text": "no timestamp" }
    ]))
    .unwrap();
    let platform = Arc::new(MockPlatform::new().with_timeline(timeline));

    let report = engine(&platform, "").run(now()).await;

    assert!(!report.timeline_unavailable);
    assert_eq!(report.scanned, 2);
    assert_eq!(report.unparseable, 1);
    assert_eq!(platform.deleted_ids(), vec![PostId(200)]);
}

#[tokio::test]
async fn test_identity_failure_does_not_block_deletion() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_timeline(vec![post(9, 1000)])
            .with_identity_error("Could not authenticate you")
            .with_mentions(vec![reply(30, 9, 1)]),
    );

    engine(&platform, "").run(now()).await;

    assert_eq!(platform.deleted_ids(), vec![PostId(9)]);
}

#[tokio::test]
async fn test_search_failure_does_not_block_deletion() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_timeline(vec![post(9, 1000)])
            .with_search_error("timed out"),
    );

    engine(&platform, "").run(now()).await;

    assert_eq!(platform.deleted_ids(), vec![PostId(9)]);
}

#[tokio::test]
async fn test_delete_failure_does_not_halt_scan() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_timeline(vec![post(1, 900), post(2, 900), post(3, 900)])
            .with_failing_delete(2),
    );

    let report = engine(&platform, "").run(now()).await;

    assert_eq!(platform.deleted_ids(), vec![PostId(1), PostId(2), PostId(3)]);
    assert_eq!(report.deleted, vec![PostId(1), PostId(3)]);
    assert_eq!(report.delete_failures, 1);
}

#[tokio::test]
async fn test_mixed_timeline_deletes_each_eligible_post_once() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_timeline(vec![
                post(100, 1),
                post(90, 800),
                post(80, 900),
                post(70, 2000),
                Post::new(60, "???", "broken"),
                post(50, 3000),
            ])
            .with_mentions(vec![reply(101, 80, 3), reply(102, 70, 100), reply(103, 50, 4000)]),
    );

    let report = engine(&platform, "90").run(now()).await;

    assert_eq!(platform.deleted_ids(), vec![PostId(70), PostId(50)]);
    assert!(platform.deletes().iter().all(|call| call.trim_user));
    assert_eq!(report.scanned, 6);
    assert_eq!(report.too_young, 1);
    assert_eq!(report.allow_listed, 1);
    assert_eq!(report.ongoing_interaction, 1);
    assert_eq!(report.unparseable, 1);
    assert_eq!(report.deleted.len(), 2);
}

#[tokio::test]
async fn test_evaluate_reports_decision() {
    let platform = Arc::new(MockPlatform::new().with_mentions(vec![reply(30, 9, 2)]));
    let engine = engine(&platform, "42");

    assert_eq!(engine.evaluate(&post(7, 1), now()).await, Decision::TooYoung);
    assert_eq!(engine.evaluate(&post(42, 10_000), now()).await, Decision::AllowListed);
    assert_eq!(engine.evaluate(&post(9, 1000), now()).await, Decision::OngoingInteraction);
    assert_eq!(engine.evaluate(&post(11, 1000), now()).await, Decision::Delete);
    assert_eq!(
        engine.evaluate(&Post::new(5, "", ""), now()).await,
        Decision::UnparseableTimestamp
    );
    assert!(platform.deletes().is_empty());
}

#[tokio::test]
async fn test_runs_are_independent() {
    let platform = Arc::new(MockPlatform::new().with_timeline(vec![post(11, 1000)]));
    let engine = engine(&platform, "");

    engine.run(now()).await;
    engine.run(now()).await;

    // The mock keeps serving the post, so each run requests its deletion once.
    assert_eq!(platform.deleted_ids(), vec![PostId(11), PostId(11)]);
}
