use serde::Serialize;

use crate::cache::{CacheError, Result};

/// Derive the cache key for one method call
///
/// The key is the JSON array `[namespace, method, args]`. String quoting keeps
/// the components apart, so `("ab", ())` and `("a", "b")` cannot collide, and
/// argument order and JSON type both feed into the key.
///
/// Arguments whose encoding is not stable (a `HashMap` iterates in random
/// order) produce unstable keys; prefer ordered collections.
pub fn cache_key<A: Serialize + ?Sized>(namespace: &str, method: &str, args: &A) -> Result<String> {
    serde_json::to_string(&(namespace, method, args)).map_err(CacheError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_key_is_deterministic() {
        let first = cache_key("Proxy", "get_name", &("a", 1)).unwrap();
        let second = cache_key("Proxy", "get_name", &("a", 1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_components_do_not_run_together() {
        let no_args = cache_key("Proxy", "ab", &()).unwrap();
        let one_arg = cache_key("Proxy", "a", &("b",)).unwrap();
        assert_ne!(no_args, one_arg);

        let split_namespace = cache_key("Prox", "yget", &()).unwrap();
        let whole_namespace = cache_key("Proxy", "get", &()).unwrap();
        assert_ne!(split_namespace, whole_namespace);
    }

    #[test]
    fn test_argument_order_matters() {
        assert_ne!(
            cache_key("Proxy", "sub", &(1, 2)).unwrap(),
            cache_key("Proxy", "sub", &(2, 1)).unwrap()
        );
    }

    #[test]
    fn test_argument_type_matters() {
        assert_ne!(
            cache_key("Proxy", "lookup", &(1,)).unwrap(),
            cache_key("Proxy", "lookup", &("1",)).unwrap()
        );
        assert_ne!(
            cache_key("Proxy", "lookup", &(Some(1),)).unwrap(),
            cache_key("Proxy", "lookup", &(vec![1],)).unwrap()
        );
    }

    #[test]
    fn test_ordered_map_arguments() {
        let mut left = BTreeMap::new();
        left.insert("x", 1);
        left.insert("y", 2);

        let mut right = BTreeMap::new();
        right.insert("y", 2);
        right.insert("x", 1);

        assert_eq!(
            cache_key("Proxy", "plot", &left).unwrap(),
            cache_key("Proxy", "plot", &right).unwrap()
        );
    }

    #[test]
    fn test_unencodable_arguments() {
        let mut args = HashMap::new();
        args.insert((1, 2), "tuple keys are not JSON object keys");

        let result = cache_key("Proxy", "plot", &args);
        assert!(matches!(result, Err(CacheError::KeyEncoding(_))));
    }
}
