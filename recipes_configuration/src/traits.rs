/// Infallible conversion of an unresolved configuration section into its resolved form.
pub(crate) trait Resolve {
    type Resolved;

    fn resolve(self) -> Self::Resolved;
}

/// Fallible conversion of an unresolved configuration section into its resolved form.
pub(crate) trait TryResolve {
    type Resolved;
    type Error;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error>;
}
