use std::sync::Arc;

/// The live connection graph that bundles delegate port links to.
///
/// Implementations handle their own locking and report physical failures
/// through their own channels; bundles never see them.
pub trait RoutingEngine {
    /// Links `source` to `destination`. Both are qualified port names.
    fn connect(&self, source: &str, destination: &str);

    /// Removes the link between `source` and `destination`.
    fn disconnect(&self, source: &str, destination: &str);
}

impl<T: RoutingEngine + ?Sized> RoutingEngine for Arc<T> {
    fn connect(&self, source: &str, destination: &str) {
        (**self).connect(source, destination);
    }

    fn disconnect(&self, source: &str, destination: &str) {
        (**self).disconnect(source, destination);
    }
}

impl<T: RoutingEngine + ?Sized> RoutingEngine for Box<T> {
    fn connect(&self, source: &str, destination: &str) {
        (**self).connect(source, destination);
    }

    fn disconnect(&self, source: &str, destination: &str) {
        (**self).disconnect(source, destination);
    }
}
