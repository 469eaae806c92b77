use std::sync::Arc;

/// An optional callback that can be cloned cheaply and shared across threads.
///
/// Generic over the unsized function signature, e.g.
/// `SharedFn<dyn Fn(Progress) + Send + Sync>`.
pub struct SharedFn<F: ?Sized + Send + Sync + 'static>(Option<Arc<F>>);

impl<F: ?Sized + Send + Sync + 'static> SharedFn<F> {
    pub fn new(f: Arc<F>) -> Self {
        Self(Some(f))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_ref(&self) -> Option<&Arc<F>> {
        self.0.as_ref()
    }
}

impl<F: ?Sized + Send + Sync + 'static> Clone for SharedFn<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F: ?Sized + Send + Sync + 'static> Default for SharedFn<F> {
    fn default() -> Self {
        Self(None)
    }
}

impl<F: ?Sized + Send + Sync + 'static> std::fmt::Debug for SharedFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "SharedFn::None"),
            Some(_) => write!(f, "SharedFn::Some(...)"),
        }
    }
}

impl<F: ?Sized + Send + Sync + 'static> From<Arc<F>> for SharedFn<F> {
    fn from(f: Arc<F>) -> Self {
        Self::new(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Callback = SharedFn<dyn Fn(usize) + Send + Sync>;

    #[test]
    fn default_is_none() {
        let callback = Callback::default();
        assert!(callback.is_none());
        assert!(callback.as_ref().is_none());
    }

    #[test]
    fn clones_share_the_same_function() {
        let hits = Arc::new(AtomicUsize::new(0));
        let callback: Callback = SharedFn::new(Arc::new({
            let hits = hits.clone();
            move |n: usize| {
                hits.fetch_add(n, Ordering::SeqCst);
            }
        }));
        let cloned = callback.clone();

        (callback.as_ref().unwrap())(2);
        (cloned.as_ref().unwrap())(3);

        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn debug_does_not_expose_function() {
        let callback = Callback::none();
        assert_eq!(format!("{:?}", callback), "SharedFn::None");
    }
}
