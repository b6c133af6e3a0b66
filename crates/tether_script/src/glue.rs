//! Call table installation
//!
//! The engine installs its [`NativeCalls`] implementation on the script
//! thread before running any script code. Wrappers and entity handles hold
//! only ids, so every accessor reaches the engine through this slot.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use tether_core::ecs::{Component, RegistryError};

use crate::components::{
    CircleRendererComponent, Rigidbody2DComponent, TextComponent, TransformComponent,
};
use crate::ffi::NativeCalls;

thread_local! {
    static CALLS: RefCell<Option<Rc<dyn NativeCalls>>> = const { RefCell::new(None) };
}

/// Restores the previously installed call table when dropped.
#[must_use = "the call table is uninstalled as soon as the guard is dropped"]
pub struct GlueGuard {
    installed: Rc<dyn NativeCalls>,
    previous: Option<Rc<dyn NativeCalls>>,
    // Tied to the installing thread.
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for GlueGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CALLS.with(|slot| {
            let mut slot = slot.borrow_mut();
            debug_assert!(
                slot.as_ref().is_some_and(|current| same_table(current, &self.installed)),
                "call table guards dropped out of installation order"
            );
            *slot = previous;
        });
    }
}

/// Install `calls` as this thread's call table.
///
/// Installs nest: dropping the returned guard reinstates whatever table
/// was active before. Guards must be dropped in reverse order of
/// installation; dropping an outer guard first would reinstate a stale
/// table, and debug builds panic when that happens.
pub fn install(calls: Rc<dyn NativeCalls>) -> GlueGuard {
    let installed = calls.clone();
    let previous = CALLS.with(|slot| slot.borrow_mut().replace(calls));
    tracing::debug!(nested = previous.is_some(), "installed native call table");
    GlueGuard {
        installed,
        previous,
        _not_send: PhantomData,
    }
}

/// Whether a call table is installed on this thread.
pub fn is_installed() -> bool {
    CALLS.with(|slot| slot.borrow().is_some())
}

/// Register the descriptors of every built-in component wrapper.
pub fn register_components() -> Result<(), RegistryError> {
    TransformComponent::ensure_registered()?;
    CircleRendererComponent::ensure_registered()?;
    Rigidbody2DComponent::ensure_registered()?;
    TextComponent::ensure_registered()?;
    Ok(())
}

fn same_table(a: &Rc<dyn NativeCalls>, b: &Rc<dyn NativeCalls>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Run `f` against the installed call table.
///
/// # Panics
/// Panics if no table is installed on this thread. Script code running
/// outside an engine has nowhere to send its calls.
pub(crate) fn with_calls<R>(f: impl FnOnce(&dyn NativeCalls) -> R) -> R {
    // Clone out of the slot so the engine may reinstall tables re-entrantly.
    let calls = CALLS.with(|slot| slot.borrow().clone());
    match calls {
        Some(calls) => f(calls.as_ref()),
        None => panic!("no native call table installed on this thread"),
    }
}
