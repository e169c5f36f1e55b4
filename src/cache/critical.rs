//! Critical Section Module
//!
//! Seam for hosts whose stored values may only be destroyed while holding a
//! host-wide lock (for example an interpreter lock guarding the objects the
//! values refer to). The engine runs every value destruction through it:
//! sweep erasures, `clear`, and the value displaced by an overwriting `set`.
//! The store lock is never held while the provider runs.

// == Critical Section ==
/// Runs value destruction inside whatever mutual-exclusion domain the host needs.
pub trait CriticalSection: Send + Sync {
    /// Acquires the host domain, calls `release` once, then leaves the domain.
    fn run(&self, release: &mut dyn FnMut());
}

/// Provider for hosts without an outer lock domain.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCriticalSection;

impl CriticalSection for NoCriticalSection {
    fn run(&self, release: &mut dyn FnMut()) {
        release()
    }
}

impl<F> CriticalSection for F
where
    F: Fn(&mut dyn FnMut()) + Send + Sync,
{
    fn run(&self, release: &mut dyn FnMut()) {
        self(release)
    }
}

// == Release ==
/// Drops `doomed` inside `section`.
pub(crate) fn release_in<T>(section: &dyn CriticalSection, doomed: T) {
    let mut doomed = Some(doomed);
    section.run(&mut || drop(doomed.take()));
}
