/// Asset identifiers are allocated sequentially starting at 1.
///
/// Zero is never a valid identifier; lookups for it report `NotFound`.
pub type AssetId = u64;
