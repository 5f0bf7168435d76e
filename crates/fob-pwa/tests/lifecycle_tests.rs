//! End-to-end phase tests for a single build.

mod helpers;

use fob_pwa::{HostConfig, InjectRegister, Mode, PwaError, PwaOptions, Strategy};
use helpers::{EngineCall, INDEX_HTML, RecordingEngine, asset_names, configure, runtime_with_package};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn generate_sw_build_from_dist() {
    let engine = RecordingEngine::new();
    let options = PwaOptions::new()
        .mode(Mode::Production)
        .filename("sw.js")
        .strategies("generateSW");
    let host = HostConfig::new(".").base("/").out_dir("dist");
    let build = configure(options, host, runtime_with_package(".", "demo"), engine.clone()).await;

    assert_eq!(build.options().sw_dest, PathBuf::from("dist/sw.js"));

    let html = build.transform_html("index.html", INDEX_HTML).unwrap();
    assert!(html.contains("navigator.serviceWorker.register('/sw.js', { scope: '/' })"));
    assert!(html.contains(r#"<link rel="manifest" href="/manifest.webmanifest">"#));

    let assets = build.generate_bundle().unwrap();
    assert_eq!(asset_names(&assets), vec!["manifest.webmanifest", "registerSW.js"]);

    let result = build.close().await.unwrap().expect("non-SSR build runs the engine");
    assert_eq!(result.count, 3);

    let calls = engine.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        EngineCall::GenerateSw(config) => {
            assert_eq!(config.sw_dest, PathBuf::from("dist/sw.js"));
            assert_eq!(config.glob_directory, PathBuf::from("dist"));
            assert_eq!(config.mode, Mode::Production);
            assert_eq!(config.navigate_fallback.as_deref(), Some("index.html"));
        }
        other => panic!("expected generateSW call, got {:?}", other),
    }
}

#[tokio::test]
async fn inject_manifest_without_package_json() {
    let project = TempDir::new().unwrap();
    let engine = RecordingEngine::new();
    let runtime = Arc::new(fob_pwa::ProjectRuntime::new(project.path()));
    let host = HostConfig::new(project.path());
    let build = configure(
        PwaOptions::new().strategies(Strategy::InjectManifest),
        host,
        runtime,
        engine.clone(),
    )
    .await;

    let manifest = build.options().manifest.as_ref().unwrap();
    assert_eq!(manifest.name, None);
    assert_eq!(build.options().sw_src, project.path().join("public/sw.js"));

    let assets = build.generate_bundle().unwrap();
    let manifest_json: serde_json::Value = serde_json::from_str(&assets[0].source).unwrap();
    assert!(manifest_json.get("name").is_none());
    assert_eq!(manifest_json["display"], "standalone");

    build.close().await.unwrap();
    match engine.calls().as_slice() {
        [EngineCall::InjectManifest(config)] => {
            assert_eq!(config.sw_src, project.path().join("public/sw.js"));
            assert_eq!(config.sw_dest, project.path().join("dist/sw.js"));
            assert_eq!(config.injection_point, "self.__WB_MANIFEST");
        }
        other => panic!("expected one injectManifest call, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_strategy_aborts_before_any_phase() {
    let engine = RecordingEngine::new();
    let err = fob_pwa::PwaBuild::configure(
        &PwaOptions::new().strategies("generateSw"),
        HostConfig::new("."),
        runtime_with_package(".", "demo"),
        engine.clone(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PwaError::Config { .. }));
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn ssr_build_never_calls_engine() {
    let engine = RecordingEngine::new();
    let build = configure(
        PwaOptions::default(),
        HostConfig::new(".").ssr(true),
        runtime_with_package(".", "demo"),
        engine.clone(),
    )
    .await;

    build.generate_bundle().unwrap();
    assert!(build.close().await.unwrap().is_none());
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn engine_is_called_exactly_once() {
    let engine = RecordingEngine::new();
    let build = configure(
        PwaOptions::default(),
        HostConfig::new("."),
        runtime_with_package(".", "demo"),
        engine.clone(),
    )
    .await;

    assert!(build.close().await.unwrap().is_some());
    assert!(build.close().await.unwrap().is_none());
    assert_eq!(engine.calls().len(), 1);
}

#[tokio::test]
async fn engine_errors_pass_through_verbatim() {
    let engine = RecordingEngine::failing("Unable to find a place to inject the manifest");
    let build = configure(
        PwaOptions::new().strategies(Strategy::InjectManifest),
        HostConfig::new("."),
        runtime_with_package(".", "demo"),
        engine.clone(),
    )
    .await;

    let err = build.close().await.unwrap_err();
    assert_eq!(err.to_string(), "Unable to find a place to inject the manifest");
    match err {
        PwaError::Delegate(inner) => {
            assert!(inner.inner().downcast_ref::<helpers::EngineFailure>().is_some());
        }
        other => panic!("expected delegate error, got {:?}", other),
    }
}

#[tokio::test]
async fn repeated_phases_do_not_duplicate() {
    let build = configure(
        PwaOptions::default(),
        HostConfig::new("."),
        runtime_with_package(".", "demo"),
        RecordingEngine::new(),
    )
    .await;

    let first = build.transform_html("index.html", INDEX_HTML).unwrap();
    let second = build.transform_html("index.html", &first).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.matches("rel=\"manifest\"").count(), 1);

    // Another document of the same build is still transformed.
    let about = build.transform_html("about.html", INDEX_HTML).unwrap();
    assert_ne!(about, INDEX_HTML);

    assert_eq!(build.generate_bundle().unwrap().len(), 2);
    assert!(build.generate_bundle().unwrap().is_empty());
}

#[tokio::test]
async fn document_without_head_fails_loudly() {
    let build = configure(
        PwaOptions::default(),
        HostConfig::new("."),
        runtime_with_package(".", "demo"),
        RecordingEngine::new(),
    )
    .await;

    let err = build
        .transform_html("fragment.html", "<div>no head here</div>")
        .unwrap_err();
    assert!(matches!(err, PwaError::HtmlStructure { .. }));
}

#[tokio::test]
async fn manifest_rendering_follows_minify() {
    for (minify, pretty) in [(true, false), (false, true)] {
        let build = configure(
            PwaOptions::new().minify(minify).inject_register(InjectRegister::Null),
            HostConfig::new("."),
            runtime_with_package(".", "demo"),
            RecordingEngine::new(),
        )
        .await;

        let assets = build.generate_bundle().unwrap();
        assert_eq!(asset_names(&assets), vec!["manifest.webmanifest"]);
        assert_eq!(assets[0].source.contains('\n'), pretty);
        assert_eq!(assets[0].source.ends_with("}\n"), pretty);

        let manifest: serde_json::Value = serde_json::from_str(&assets[0].source).unwrap();
        assert_eq!(manifest["name"], "demo");
        assert_eq!(manifest["start_url"], "./");
    }
}

#[tokio::test]
async fn disabled_manifest_emits_no_manifest() {
    let build = configure(
        PwaOptions::new().disable_manifest(),
        HostConfig::new("."),
        runtime_with_package(".", "demo"),
        RecordingEngine::new(),
    )
    .await;

    let html = build.transform_html("index.html", INDEX_HTML).unwrap();
    assert!(!html.contains("rel=\"manifest\""));
    assert_eq!(asset_names(&build.generate_bundle().unwrap()), vec!["registerSW.js"]);
}

#[tokio::test]
async fn resolution_is_deterministic() {
    let make = || async {
        configure(
            PwaOptions::new()
                .base("sub/")
                .workbox_option("skipWaiting", true),
            HostConfig::new("/srv/app"),
            runtime_with_package("/srv/app", "demo"),
            RecordingEngine::new(),
        )
        .await
    };

    let a = make().await;
    let b = make().await;
    assert_eq!(a.options(), b.options());
    assert_eq!(a.options().base_path, "/sub/");
    assert_eq!(
        a.transform_html("index.html", INDEX_HTML).unwrap(),
        b.transform_html("index.html", INDEX_HTML).unwrap()
    );
}
