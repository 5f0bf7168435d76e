//! Per-build state shared by the phase handlers.
//!
//! One `BuildContext` exists per build pass. Concurrent builds (client and
//! SSR targets, parallel configurations) each own theirs, so the
//! virtual-module flag of one build never influences another.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::delegate::ServiceWorkerEngine;
use crate::options::{HostConfig, InjectRegister, ResolvedOptions};
use crate::runtime::Runtime;

#[derive(Debug)]
pub(crate) struct BuildContext {
    options: ResolvedOptions,
    host: HostConfig,
    pub(crate) runtime: Arc<dyn Runtime>,
    pub(crate) engine: Arc<dyn ServiceWorkerEngine>,
    virtual_register_used: AtomicBool,
    inject_register: OnceLock<InjectRegister>,
    transformed_documents: Mutex<FxHashSet<String>>,
    bundle_generated: AtomicBool,
    closed: AtomicBool,
}

impl BuildContext {
    pub(crate) fn new(
        options: ResolvedOptions,
        host: HostConfig,
        runtime: Arc<dyn Runtime>,
        engine: Arc<dyn ServiceWorkerEngine>,
    ) -> Self {
        Self {
            options,
            host,
            runtime,
            engine,
            virtual_register_used: AtomicBool::new(false),
            inject_register: OnceLock::new(),
            transformed_documents: Mutex::new(FxHashSet::default()),
            bundle_generated: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub(crate) fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub(crate) fn host(&self) -> &HostConfig {
        &self.host
    }

    /// Record that application code loaded a virtual registration module.
    pub(crate) fn mark_virtual_register_used(&self) {
        let first = !self.virtual_register_used.swap(true, Ordering::AcqRel);
        if first {
            tracing::debug!("Virtual register module loaded");
        }
        if first && self.inject_register.get().is_some() {
            tracing::warn!(
                "Virtual register module loaded after registration injection was decided; \
                 the page may register the service worker twice"
            );
        }
    }

    pub(crate) fn virtual_register_used(&self) -> bool {
        self.virtual_register_used.load(Ordering::Acquire)
    }

    /// Concrete injection mode for this build, `Script` or `Null`.
    ///
    /// `Auto` settles on first call and stays fixed for the rest of the
    /// build.
    pub(crate) fn inject_register(&self) -> InjectRegister {
        *self.inject_register.get_or_init(|| {
            let settled = match self.options.inject_register {
                InjectRegister::Auto if self.virtual_register_used() => InjectRegister::Null,
                InjectRegister::Auto => InjectRegister::Script,
                explicit => explicit,
            };
            tracing::debug!(
                configured = ?self.options.inject_register,
                settled = ?settled,
                "Settled register injection"
            );
            settled
        })
    }

    /// `true` the first time `document` is seen in this build.
    pub(crate) fn begin_document(&self, document: &str) -> bool {
        self.transformed_documents.lock().insert(document.to_string())
    }

    /// `true` only for the first bundle-generation of this build.
    pub(crate) fn begin_bundle(&self) -> bool {
        !self.bundle_generated.swap(true, Ordering::AcqRel)
    }

    /// `true` only for the first close of this build.
    pub(crate) fn begin_close(&self) -> bool {
        !self.closed.swap(true, Ordering::AcqRel)
    }
}
