use teamspace_core::NavigationIntent;

/// Routing collaborator
///
/// Controllers state where the front end should go next; how it gets there
/// (a router, a terminal print, nothing at all) is up to the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn goto(&self, intent: NavigationIntent);
}
