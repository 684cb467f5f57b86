//! Thread-local current assembly.
//!
//! For generators that do not thread an [`Emitter`] through their call
//! graph: [`begin`] installs an [`Assembly`] as the current one for this
//! thread, [`with`]/[`try_with`] emit into it, and [`finish`] takes it back.
//!
//! ```
//! use armasm::{current, Register::*};
//!
//! current::begin().unwrap();
//! current::with(|e| e.move_(R0, 1).emit());
//! let assembly = current::finish().unwrap();
//! assert_eq!(assembly.instructions().count(), 1);
//! ```

use std::cell::RefCell;

use crate::emitter::Emitter;
use crate::error::AsmError;
use crate::output::Assembly;

thread_local! {
    static CURRENT: RefCell<Option<Assembly>> = const { RefCell::new(None) };
}

/// Starts a new current assembly on this thread.
///
/// # Errors
///
/// [`AsmError::AssemblyAlreadyActive`] if one is already in progress.
pub fn begin() -> Result<(), AsmError> {
    CURRENT.with(|current| {
        let mut current = current.borrow_mut();
        if current.is_some() {
            return Err(AsmError::AssemblyAlreadyActive);
        }
        tracing::debug!("begin assembly");
        *current = Some(Assembly::new());
        Ok(())
    })
}

/// Ends the current assembly and returns it.
///
/// # Errors
///
/// [`AsmError::NoActiveAssembly`] if none was started.
pub fn finish() -> Result<Assembly, AsmError> {
    CURRENT.with(|current| {
        let assembly = current
            .borrow_mut()
            .take()
            .ok_or(AsmError::NoActiveAssembly)?;
        tracing::debug!(
            "finish assembly: {} items, {} data members",
            assembly.items().len(),
            assembly.data_members().len()
        );
        Ok(assembly)
    })
}

#[must_use]
pub fn is_active() -> bool {
    CURRENT.with(|current| current.borrow().is_some())
}

/// Runs `f` with an emitter over the current assembly.
///
/// # Errors
///
/// [`AsmError::NoActiveAssembly`] if none was started; `f` is not called.
///
/// # Panics
///
/// If `f` itself calls back into this module.
pub fn try_with<R>(f: impl FnOnce(&mut Emitter<'_>) -> R) -> Result<R, AsmError> {
    CURRENT.with(|current| {
        let mut current = current.borrow_mut();
        let assembly = current.as_mut().ok_or(AsmError::NoActiveAssembly)?;
        Ok(f(&mut Emitter::new(assembly)))
    })
}

/// Like [`try_with`], for callers that treat a missing assembly as a bug.
///
/// # Panics
///
/// If no assembly is active on this thread.
pub fn with<R>(f: impl FnOnce(&mut Emitter<'_>) -> R) -> R {
    match try_with(f) {
        Ok(result) => result,
        Err(e) => panic!("{e}"),
    }
}
