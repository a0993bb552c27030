//! Previously classified domains

/// A stored association between a domain and an urheber label
///
/// Records are owned by the external store. The label is kept as stored;
/// callers normalize it with [`Urheber::parse`](crate::Urheber::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// Stable record identifier (storage order)
    pub id: i64,

    /// Domain string as stored
    pub domain: String,

    /// Urheber label as stored
    pub urheber: String,
}
