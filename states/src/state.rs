use std::any::Any;

/// Types that can hand a clone of themselves to a command running off the UI thread.
///
/// The default opts out; a command that reads a type which opted out panics
/// when it asks the snapshot for it.
pub trait SnapshotClone {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Plain application state owned by [`crate::StateCtx`].
///
/// States are mutated from the UI thread via `StateCtx::update` / `state_mut`,
/// or from commands through an [`crate::UpdateBatch::update_state`] closure.
pub trait State: Any + Send + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replace `target` with the boxed value if it holds the same type.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!(
            "state_assign_impl: type mismatch for {}",
            std::any::type_name::<T>()
        ),
    }
}
