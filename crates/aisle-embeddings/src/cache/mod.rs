//! Query embedding cache.

mod l1_memory;

pub use l1_memory::L1MemoryCache;

/// Cache key for a query embedding: blake3 of provider name and folded text.
///
/// The provider name is part of the key so that swapping providers never
/// serves a vector of the wrong dimension or space.
pub fn query_key(provider: &str, folded_query: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(provider.as_bytes());
    hasher.update(&[0]);
    hasher.update(folded_query.as_bytes());
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_depends_on_provider_and_text() {
        let a = query_key("hashed", "red shoes");
        assert_eq!(a, query_key("hashed", "red shoes"));
        assert_ne!(a, query_key("http", "red shoes"));
        assert_ne!(a, query_key("hashed", "blue shoes"));
        assert_eq!(a.len(), 64);
    }
}
