//! End-to-end tiered routing scenarios driven through a TOML-loaded config

use axon_config::{Config, JsonSettings, TieredRoutingConfig};
use axon_routing::TieredRouter;
use serde_json::{Value, json};

fn user_msg(content: &str) -> Value {
    json!({"role": "user", "content": content})
}

fn default_router() -> TieredRouter {
    let config = Config::from_toml("").unwrap();
    TieredRouter::new(config.llm.tiered_routing)
}

#[test]
fn short_lookup_routes_to_simple_model() {
    let router = default_router();
    let (model, result) = router.route(&[user_msg("What is Python?")], None);

    assert_eq!(model, "gemma2:2b");
    assert!(result.is_simple());
    assert!(result.score < 3.0);
}

#[test]
fn loaded_technical_request_routes_to_complex_model() {
    let router = default_router();
    let content = "Explain how to design a scalable microservice architecture with async \
                   message queues, and compare trade-offs between Redis and Kafka for this \
                   use case, including code examples:\n```python\nasync def consumer(): ...\n```";
    let (model, result) = router.route(&[user_msg(content)], None);

    assert_eq!(model, "mistral:7b-instruct");
    assert!(result.is_complex());
    assert!(result.score >= 3.0);
    assert!(result.factors["technical"] >= 2.0);
    assert!(result.factors["code"] >= 1.0);
}

#[test]
fn metrics_track_both_tiers() {
    let router = default_router();
    router.route(&[user_msg("What is Python?")], None);
    router.route(
        &[user_msg(
            "Explain how to design a scalable microservice architecture with async \
             message queues, and compare trade-offs between Redis and Kafka",
        )],
        None,
    );

    let metrics = router.metrics();
    assert_eq!(metrics.simple_tier_requests, 1);
    assert_eq!(metrics.complex_tier_requests, 1);
    assert_eq!(metrics.total_requests, 2);
    assert!((metrics.simple_tier_percentage - 50.0).abs() < f64::EPSILON);
    assert!(metrics.avg_simple_score < metrics.avg_complex_score);
}

#[test]
fn disabled_routing_always_selects_complex() {
    let config = Config::from_toml("[llm.tiered_routing]\nenabled = false").unwrap();
    let router = TieredRouter::new(config.llm.tiered_routing);

    for content in ["What is Python?", "hi", "explain how compilers optimize loops"] {
        let (model, result) = router.route(&[user_msg(content)], None);
        assert_eq!(model, "mistral:7b-instruct");
        assert!(result.is_complex());
        assert!((result.score - 0.0).abs() < f64::EPSILON);
        assert_eq!(result.reasoning, "Tiered routing disabled");
    }

    assert_eq!(router.metrics().complex_tier_requests, 3);
}

#[test]
fn fallbacks_count_across_interleaved_routing() {
    let router = default_router();

    router.route(&[user_msg("hello")], None);
    router.record_fallback();
    router.route(&[user_msg("hello again")], None);
    router.record_fallback();
    router.record_fallback();

    assert_eq!(router.metrics().fallback_count, 3);
}

#[test]
fn reset_metrics_returns_all_zero_counters() {
    let router = default_router();
    for _ in 0..5 {
        router.route(&[user_msg("What is Python?")], None);
    }
    router.record_fallback();
    router.reset_metrics();

    let metrics = router.metrics();
    assert_eq!(metrics.simple_tier_requests, 0);
    assert_eq!(metrics.complex_tier_requests, 0);
    assert_eq!(metrics.total_requests, 0);
    assert_eq!(metrics.fallback_count, 0);
    assert!((metrics.avg_simple_score - 0.0).abs() < f64::EPSILON);
    assert!((metrics.simple_tier_percentage - 0.0).abs() < f64::EPSILON);
}

#[test]
fn custom_models_from_toml_flow_through() {
    let config = Config::from_toml(
        r#"
        [llm.tiered_routing]
        complexity_threshold = 3.0

        [llm.tiered_routing.models]
        simple = "phi3:mini"
        complex = "llama3:70b"
        "#,
    )
    .unwrap();
    let router = TieredRouter::new(config.llm.tiered_routing);

    let (model, _) = router.route(&[user_msg("What is Python?")], None);
    assert_eq!(model, "phi3:mini");
    assert_eq!(router.model_for_tier("complex").unwrap(), "llama3:70b");
}

#[test]
fn settings_source_snapshot_drives_router() {
    let source = JsonSettings::new(json!({
        "llm": {
            "tiered_routing": {
                "complexity_threshold": 0.0,
                "fallback_to_complex": false
            }
        }
    }));
    let router = TieredRouter::new(TieredRoutingConfig::from_source(&source));

    // Threshold 0.0: a zero score is not strictly below it
    let (model, result) = router.route(&[user_msg("hi")], None);
    assert_eq!(model, "mistral:7b-instruct");
    assert!(result.is_complex());
    assert!(!router.should_fallback("simple"));
}

#[test]
fn fallback_flow_end_to_end() {
    let router = default_router();
    let (model, result) = router.route(&[user_msg("What is Python?")], None);
    assert_eq!(model, "gemma2:2b");

    // Caller-side: the simple model call failed, so consult the policy and
    // retry on the complex model
    assert!(router.should_fallback(result.tier.as_str()));
    router.record_fallback();
    let retry_model = router.model_for_tier("complex").unwrap();
    assert_eq!(retry_model, "mistral:7b-instruct");
    assert_eq!(router.metrics().fallback_count, 1);
}

#[test]
fn scoring_is_deterministic_across_routers() {
    let messages = [user_msg("Explain how DNS resolution works and compare recursive resolvers")];

    let (model_a, result_a) = default_router().route(&messages, None);
    let (model_b, result_b) = default_router().route(&messages, None);

    assert_eq!(model_a, model_b);
    assert!((result_a.score - result_b.score).abs() < f64::EPSILON);
    assert_eq!(result_a.factors, result_b.factors);
    assert_eq!(result_a.reasoning, result_b.reasoning);
}
