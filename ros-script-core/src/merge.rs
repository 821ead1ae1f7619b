use crate::document::RouterConfig;

/// Merge documents section by section.
///
/// For every key found in any input, the output lines are the
/// concatenation of that key's lines in argument order. Keys appear in the
/// order they are first seen. Nothing is filtered or de-duplicated; run
/// [`command_shortener`](crate::command_shortener) afterwards for that.
pub fn merge_router_configs<'a, I>(docs: I) -> RouterConfig
where
    I: IntoIterator<Item = &'a RouterConfig>,
{
    let mut merged = RouterConfig::new();
    for doc in docs {
        for section in doc {
            merged
                .ensure_section(&section.key)
                .extend(section.lines.iter().cloned());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::merge_router_configs;
    use crate::document::RouterConfig;

    #[test]
    fn zero_documents_merge_to_empty() {
        let merged = merge_router_configs(std::iter::empty::<&RouterConfig>());
        assert!(merged.is_empty());
    }

    #[test]
    fn empty_sections_survive_merge() {
        let a = RouterConfig::from_sections([("/ppp secret", Vec::<String>::new())]);
        let merged = merge_router_configs([&a]);
        assert!(merged.contains("/ppp secret"));
    }
}
