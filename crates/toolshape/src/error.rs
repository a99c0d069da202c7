/// Errors that can occur while compiling a type descriptor into a schema.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A collection field's element shape could not be determined. The
    /// builder refuses to guess a permissive "any" schema in its place.
    #[error("cannot resolve the element type of collection field `{field}`")]
    UnresolvableElementType { field: String },

    /// The type graph nests deeper than the builder's recursion limit.
    /// Cycles are broken by the visitation ledger, so only pathologically
    /// deep non-cyclic nesting can trigger this.
    #[error("schema nesting exceeds {limit} levels")]
    DepthLimitExceeded { limit: usize },
}
