use std::any::Any;

use crate::SnapshotClone;

/// A compute-shaped cache.
///
/// Computes hold results produced by commands (network responses and the
/// like). The UI reads them with `StateCtx::cached` and never writes them
/// directly; new values arrive through an [`crate::Updater`] and are applied in
/// `StateCtx::sync_computes`.
pub trait Compute: Any + Send + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replace `target` with the boxed value if it holds the same type.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!(
            "assign_impl: type mismatch for {}",
            std::any::type_name::<T>()
        ),
    }
}
