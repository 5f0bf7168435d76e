//! Virtual registration modules.
//!
//! A closed set of specifiers is served from generated source instead of
//! the filesystem. Resolution rewrites a specifier to a NUL-prefixed id so
//! no other resolver or loader claims it.

use std::sync::Arc;

use crate::constants::{VIRTUAL_ID_PREFIX, VIRTUAL_REGISTER, VIRTUAL_REGISTER_TYPE};
use crate::context::BuildContext;
use crate::options::Command;
use crate::register::{RegisterMode, TemplateKind, generate};

/// Known virtual module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualModule {
    /// `virtual:pwa-register`
    Register,
    /// `virtual:pwa-register/type`
    RegisterType,
}

impl VirtualModule {
    pub const ALL: [VirtualModule; 2] = [VirtualModule::Register, VirtualModule::RegisterType];

    pub fn specifier(&self) -> &'static str {
        match self {
            VirtualModule::Register => VIRTUAL_REGISTER,
            VirtualModule::RegisterType => VIRTUAL_REGISTER_TYPE,
        }
    }

    /// Match an import specifier exactly.
    pub fn from_specifier(specifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|module| module.specifier() == specifier)
    }

    /// Internal id the host carries between resolve and load.
    pub fn resolved_id(&self) -> String {
        format!("{}{}", VIRTUAL_ID_PREFIX, self.specifier())
    }

    pub fn from_resolved_id(id: &str) -> Option<Self> {
        id.strip_prefix(VIRTUAL_ID_PREFIX)
            .and_then(Self::from_specifier)
    }

    fn template(&self) -> TemplateKind {
        match self {
            VirtualModule::Register => TemplateKind::Register,
            VirtualModule::RegisterType => TemplateKind::RegisterType,
        }
    }
}

/// Resolve and load hooks for the virtual modules of one build.
#[derive(Debug, Clone)]
pub struct VirtualModuleProvider {
    ctx: Arc<BuildContext>,
}

impl VirtualModuleProvider {
    pub(crate) fn new(ctx: Arc<BuildContext>) -> Self {
        Self { ctx }
    }

    /// Internal id for a known specifier, `None` for anything else.
    pub fn resolve(&self, specifier: &str) -> Option<String> {
        VirtualModule::from_specifier(specifier).map(|module| module.resolved_id())
    }

    /// Source for a resolved virtual id, `None` for anything else.
    ///
    /// A successful load marks the build as using the virtual register
    /// module.
    pub fn load(&self, id: &str) -> Option<String> {
        let module = VirtualModule::from_resolved_id(id)?;
        self.ctx.mark_virtual_register_used();

        let mode = match self.ctx.host().command {
            Command::Serve => RegisterMode::Dev,
            Command::Build => RegisterMode::Build,
        };
        tracing::debug!(specifier = module.specifier(), ?mode, "Loading virtual module");

        Some(generate(self.ctx.options(), mode, module.template()))
    }
}
