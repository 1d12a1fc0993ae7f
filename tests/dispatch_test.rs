//! End-to-end dispatch behavior through the public runtime API.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use hookbridge::events::{HookEvent, HookStage};
use hookbridge::types::{AppInfoHandle, LoaderHandle, ResourcesHandle, SYSTEM_FRAMEWORK};

#[test]
fn test_zygote_then_package_load_scenario() {
    let (runtime, recorder, _engine) = helpers::runtime("com.example");
    let invocations = Arc::new(AtomicUsize::new(0));
    let contexts = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&invocations);
    let captured = Arc::clone(&contexts);
    runtime.set_entry_callback(Box::new(move |ctx| {
        seen.fetch_add(1, Ordering::SeqCst);
        captured.lock().unwrap().push(ctx.clone());
        Ok(())
    }));

    // Zygote init: system-framework context is created, but the entry
    // callback never fires for it in an app-level process.
    runtime.on_event(HookEvent::zygote_init(None));
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    let zygote_ctx = runtime.context(SYSTEM_FRAMEWORK).unwrap();
    assert_eq!(zygote_ctx.package_name, SYSTEM_FRAMEWORK);
    assert_eq!(zygote_ctx.stage, HookStage::ZygoteInit);

    // Package load for the live identity: exactly one invocation.
    let event = HookEvent::package_load(
        "com.example",
        "com.example",
        Some(LoaderHandle::application(7)),
        Some(AppInfoHandle(1)),
    );
    runtime.on_event(event.clone());
    assert_eq!(invocations.load(Ordering::SeqCst), 1);

    let ctx = contexts.lock().unwrap().pop().unwrap();
    assert_eq!(ctx.package_name, "com.example");
    assert_eq!(ctx.class_loader, LoaderHandle::application(7));
    assert_eq!(ctx.app_info, Some(AppInfoHandle(1)));

    // Identical redelivery: zero further invocations, no duplicate
    // lifecycle registration.
    runtime.on_event(event);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.lifecycle_count(), 1);
}

#[test]
fn test_zygote_redelivery_in_framework_process_never_fires_callback() {
    // The module loaded into the system framework itself: the live process
    // identity equals the framework context's, but zygote dispatches are
    // exempt from dedup, so the entry callback must stay untouched.
    let (runtime, recorder, _engine) = helpers::runtime(SYSTEM_FRAMEWORK);
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&invocations);
    runtime.set_entry_callback(Box::new(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));

    runtime.on_event(HookEvent::zygote_init(Some(LoaderHandle::system(2))));
    runtime.on_event(HookEvent::zygote_init(Some(LoaderHandle::system(2))));

    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    assert!(runtime.context(SYSTEM_FRAMEWORK).is_some());
    assert_eq!(recorder.lifecycle_count(), 0);
}

#[test]
fn test_resources_load_refines_and_marks_support() {
    let (runtime, _recorder, _engine) = helpers::runtime("com.example");
    runtime.on_event(HookEvent::package_load(
        "com.example",
        "com.example",
        Some(LoaderHandle::application(7)),
        None,
    ));
    assert!(!runtime.is_resources_hook_supported());

    runtime.on_event(HookEvent::resources_load(
        "com.example",
        Some(ResourcesHandle(5)),
    ));
    assert!(runtime.is_resources_hook_supported());

    let ctx = runtime.context("com.example").unwrap();
    assert_eq!(ctx.stage, HookStage::ResourcesLoad);
    assert_eq!(ctx.resources, Some(ResourcesHandle(5)));
    // The existing loader survives the loaderless resources event.
    assert_eq!(ctx.class_loader, LoaderHandle::application(7));
}

#[test]
fn test_foreign_resources_report_produces_nothing() {
    let (runtime, recorder, _engine) = helpers::runtime("com.target.app");
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&invocations);
    runtime.set_entry_callback(Box::new(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));

    runtime.on_event(HookEvent::resources_load(
        "com.other.app",
        Some(ResourcesHandle(5)),
    ));

    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    assert_eq!(recorder.lifecycle_count(), 0);
    assert!(runtime.context("com.other.app").is_none());
    assert!(!runtime.is_resources_hook_supported());
}

#[test]
fn test_noise_identity_is_filtered() {
    let (runtime, recorder, _engine) = helpers::runtime("com.miui.contentcatcher");
    runtime.on_event(HookEvent::package_load(
        "com.miui.contentcatcher",
        "com.miui.contentcatcher",
        Some(LoaderHandle::application(1)),
        None,
    ));
    assert_eq!(recorder.lifecycle_count(), 0);
    assert!(runtime.context("com.miui.contentcatcher").is_none());
}

#[test]
fn test_self_identity_installs_status_hooks_once() {
    let (runtime, recorder, _engine) = helpers::runtime("com.example.module");
    runtime.begin_module_load("com.example.module", "/data/app/module.apk");

    let event = HookEvent::package_load(
        "com.example.module",
        "com.example.module",
        Some(LoaderHandle::application(3)),
        None,
    );
    runtime.on_event(event.clone());
    runtime.on_event(event);

    assert_eq!(recorder.status_hooks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_module_bootstrap_and_resource_refresh() {
    let (runtime, recorder, _engine) = helpers::runtime("com.example");
    recorder.fail_resources.store(true, Ordering::SeqCst);

    runtime.begin_module_load("com.example.module", "/data/app/module.apk");
    assert!(runtime.module_state().has_begun_loading());
    assert_eq!(runtime.module_state().resources(), None);

    recorder.fail_resources.store(false, Ordering::SeqCst);
    runtime.refresh_module_resources();
    assert_eq!(runtime.module_state().resources(), Some(ResourcesHandle(99)));

    runtime.finish_module_load();
    assert!(runtime.module_state().has_finished_loading());
}

#[test]
fn test_no_callback_after_finish_load() {
    let (runtime, _recorder, _engine) = helpers::runtime("com.example");
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&invocations);
    runtime.set_entry_callback(Box::new(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));
    runtime.finish_module_load();

    runtime.on_event(HookEvent::package_load(
        "com.example",
        "com.example",
        Some(LoaderHandle::application(7)),
        None,
    ));
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[test]
fn test_class_loader_watch_shares_one_interception() {
    let (runtime, _recorder, engine) = helpers::runtime("com.example");
    let loaded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&loaded);
    runtime.watch_class_loader(
        Some(&LoaderHandle::application(4)),
        Box::new(move |name| sink.lock().unwrap().push(name.to_string())),
    );
    runtime.watch_class_loader(Some(&LoaderHandle::application(5)), Box::new(|_| {}));
    assert_eq!(engine.hook_installs.load(Ordering::SeqCst), 1);

    runtime.notify_class_loaded(4, "com.example.Main");
    runtime.notify_class_loaded(5, "com.example.Other");
    assert_eq!(loaded.lock().unwrap().as_slice(), ["com.example.Main"]);
}
