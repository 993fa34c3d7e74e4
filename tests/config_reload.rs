//! Swapping the override document under a live resolver.

use model_router::{
    Credentials, ProviderName, ProviderResolver, ResolutionSource, SharedConfig,
    StaticCredentials,
};
use std::sync::Arc;

fn resolver(shared: Arc<SharedConfig>) -> ProviderResolver {
    ProviderResolver::builder()
        .config(shared)
        .credentials(Arc::new(StaticCredentials::new().with(
            ProviderName::OpenRouter,
            Credentials::new(Some("KEY".into()), None),
        )))
        .build()
}

#[test]
fn test_reload_changes_routing_but_keeps_clients() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("router.yaml");
    std::fs::write(&path, "models: {}\n").unwrap();

    let shared = Arc::new(SharedConfig::default());
    shared.reload_from(&path).unwrap();
    let resolver = resolver(Arc::clone(&shared));

    let before = resolver.resolve("fast").unwrap();
    assert_eq!(before.source, ResolutionSource::Fallback);
    assert_eq!(before.actual_model, "fast");

    std::fs::write(
        &path,
        "models:\n  fast:\n    provider: openrouter\n    model: vendor/fast-2\n",
    )
    .unwrap();
    assert_eq!(shared.reload_from(&path).unwrap(), 1);

    let after = resolver.resolve("fast").unwrap();
    assert_eq!(after.source, ResolutionSource::Override);
    assert_eq!(after.actual_model, "vendor/fast-2");
    // Same effective credentials, so the cached client is reused.
    assert!(Arc::ptr_eq(&before.client, &after.client));
    assert_eq!(resolver.cached_clients(), 1);
}

#[test]
fn test_invalid_reload_keeps_previous_routing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("router.json");
    std::fs::write(
        &path,
        r#"{"models": {"fast": {"provider": "openrouter", "model": "vendor/fast-1"}}}"#,
    )
    .unwrap();

    let shared = Arc::new(SharedConfig::default());
    shared.reload_from(&path).unwrap();
    let resolver = resolver(Arc::clone(&shared));

    std::fs::write(&path, r#"{"models": {"fast": {"provider": "nowhere"#).unwrap();
    assert!(shared.reload_from(&path).is_err());

    assert_eq!(resolver.resolve("fast").unwrap().actual_model, "vendor/fast-1");
}
