//! The two standard storage areas.

/// Which of the two origin-scoped storage areas a binding or notification
/// refers to.
///
/// Every execution environment offers at most one area of each kind:
/// `Persistent` survives across sessions, `Session` lives only as long as
/// the owning tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// Survives across sessions.
    Persistent,
    /// Scoped to the current tab's lifetime.
    Session,
}

impl std::fmt::Display for AreaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AreaKind::Persistent => write!(f, "persistent"),
            AreaKind::Session => write!(f, "session"),
        }
    }
}
