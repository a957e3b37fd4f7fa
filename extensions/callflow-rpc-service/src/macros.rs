use xxhash_rust::const_xxh3::xxh3_64 as const_xxh3_64;

/// Hashes a method name into the `u64` ID used to key registration tables.
pub const fn method_id_hash(name: &str) -> u64 {
    const_xxh3_64(name.as_bytes())
}

/// Compile-time RPC method ID generator using xxHash3.
///
/// Computes the same value as [`method_id_hash`], but in a `const` context,
/// so method definitions can embed their ID as an associated constant.
///
/// ## Example
///
/// ```rust
/// use callflow_rpc_service::{method_id_hash, rpc_method_id};
/// let id_1 = rpc_method_id!("route_guide.get_feature");
/// let id_2 = rpc_method_id!("route_guide.list_features");
/// assert_ne!(id_1, id_2);
/// assert_eq!(id_1, method_id_hash("route_guide.get_feature"));
/// ```
#[macro_export]
macro_rules! rpc_method_id {
    ($name:literal) => {{
        const ID: u64 = $crate::method_id_hash($name);
        ID
    }};
}
