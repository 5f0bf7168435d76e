//! Concurrent builds keep their state apart.

mod helpers;

use fob_pwa::{HostConfig, InjectRegister, PwaOptions, VirtualModule};
use helpers::{RecordingEngine, asset_names, configure, runtime_with_package};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn virtual_usage_in_one_build_does_not_leak() {
    let engine = RecordingEngine::new();
    let runtime = runtime_with_package(".", "demo");

    let client = configure(
        PwaOptions::default(),
        HostConfig::new("."),
        runtime.clone(),
        engine.clone(),
    )
    .await;
    let other = configure(
        PwaOptions::default(),
        HostConfig::new("."),
        runtime.clone(),
        engine.clone(),
    )
    .await;

    let client_task = {
        let client = client.clone();
        tokio::spawn(async move {
            let modules = client.virtual_modules();
            modules.load(&VirtualModule::Register.resolved_id());
            client.generate_bundle()
        })
    };
    let other_task = {
        let other = other.clone();
        tokio::spawn(async move { other.generate_bundle() })
    };

    let client_assets = client_task.await.unwrap().unwrap();
    let other_assets = other_task.await.unwrap().unwrap();

    assert_eq!(client.inject_register(), InjectRegister::Null);
    assert_eq!(other.inject_register(), InjectRegister::Script);
    assert!(!asset_names(&client_assets).contains(&"registerSW.js"));
    assert!(asset_names(&other_assets).contains(&"registerSW.js"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn client_and_ssr_targets_close_independently() {
    let engine = RecordingEngine::new();
    let runtime = runtime_with_package(".", "demo");

    let client = configure(
        PwaOptions::default(),
        HostConfig::new("."),
        runtime.clone(),
        engine.clone(),
    )
    .await;
    let ssr = configure(
        PwaOptions::default(),
        HostConfig::new(".").ssr(true),
        runtime.clone(),
        engine.clone(),
    )
    .await;

    let (client_result, ssr_result) = tokio::join!(client.close(), ssr.close());

    assert!(client_result.unwrap().is_some());
    assert!(ssr_result.unwrap().is_none());
    assert_eq!(engine.calls().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_parallel_builds_each_call_engine_once() {
    let engine = RecordingEngine::new();
    let runtime = runtime_with_package(".", "demo");

    let mut handles = Vec::new();
    for i in 0..8 {
        let engine = engine.clone();
        let runtime = runtime.clone();
        handles.push(tokio::spawn(async move {
            let build = configure(
                PwaOptions::new().filename(format!("sw-{}.js", i)),
                HostConfig::new("."),
                runtime,
                engine,
            )
            .await;
            build.generate_bundle().unwrap();
            build.close().await.unwrap();
            build.close().await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(engine.calls().len(), 8);
}
