//! Entity auto-naming for network lists.

use ros_script_core::{merge_router_configs, RouterConfig};
use tracing::debug;

use crate::model::NetworkDefinition;
use crate::networks::network_base_generator;

/// Sequential fallback name, `n` is 1-based.
pub fn auto_name(prefix: &str, n: usize) -> String {
    format!("{prefix}-{n}")
}

/// Generate one network, substituting `default_name` for an empty name.
///
/// An entity without a subnet produces an empty document.
pub fn add_network<F>(entity: &NetworkDefinition, default_name: &str, generator: F) -> RouterConfig
where
    F: FnOnce(&str, &str) -> RouterConfig,
{
    if entity.subnet.trim().is_empty() {
        debug!(name = %entity.name, "skipping network without subnet");
        return RouterConfig::new();
    }
    let name = if entity.name.trim().is_empty() {
        default_name
    } else {
        entity.name.as_str()
    };
    generator(name, &entity.subnet)
}

/// Generate every entity through the base network generator and merge.
pub fn add_networks(entities: &[NetworkDefinition], prefix: &str) -> RouterConfig {
    add_networks_with(entities, prefix, network_base_generator)
}

/// Like [`add_networks`] with a caller-chosen generator.
///
/// Unnamed entities become `{prefix}-{n}` where `n` is the entity's
/// 1-based position in `entities`; dropped entries still use up their
/// number.
pub fn add_networks_with<F>(entities: &[NetworkDefinition], prefix: &str, generator: F) -> RouterConfig
where
    F: Fn(&str, &str) -> RouterConfig,
{
    let docs: Vec<RouterConfig> = entities
        .iter()
        .enumerate()
        .map(|(idx, entity)| add_network(entity, &auto_name(prefix, idx + 1), &generator))
        .filter(|doc| !doc.is_empty())
        .collect();
    merge_router_configs(&docs)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ros_script_core::RouterConfig;

    use super::{add_network, add_networks_with, auto_name};
    use crate::model::NetworkDefinition;

    fn record(name: &str, subnet: &str) -> RouterConfig {
        RouterConfig::from_sections([("/test", [format!("{name} {subnet}")])])
    }

    #[test]
    fn empty_subnet_yields_empty_document() {
        let entity = NetworkDefinition::new("Named", "");
        assert!(add_network(&entity, "Foo", record).is_empty());
        let blank = NetworkDefinition::new("", "  ");
        assert!(add_network(&blank, "Foo", record).is_empty());
    }

    #[test]
    fn empty_name_uses_default() {
        let entity = NetworkDefinition::new("", "10.0.0.0/24");
        assert_eq!(
            add_network(&entity, "Foo", record),
            record("Foo", "10.0.0.0/24")
        );
    }

    #[test]
    fn explicit_name_is_kept() {
        let entity = NetworkDefinition::new("Office", "10.0.0.0/24");
        assert_eq!(
            add_network(&entity, "Foo", record),
            record("Office", "10.0.0.0/24")
        );
    }

    #[test]
    fn dropped_entries_consume_their_number() {
        let entities = [
            NetworkDefinition::new("", "10.0.1.0/24"),
            NetworkDefinition::new("", ""),
            NetworkDefinition::new("", "10.0.3.0/24"),
            NetworkDefinition::new("Lab", "10.0.4.0/24"),
        ];
        let doc = add_networks_with(&entities, "Auto", record);
        assert_eq!(
            doc.get("/test").expect("section"),
            [
                "Auto-1 10.0.1.0/24",
                "Auto-3 10.0.3.0/24",
                "Lab 10.0.4.0/24"
            ]
        );
        assert_eq!(auto_name("WG-Client", 2), "WG-Client-2");
    }

    #[test]
    fn all_dropped_yields_empty_document() {
        let entities = [NetworkDefinition::new("a", ""), NetworkDefinition::new("b", "")];
        assert!(add_networks_with(&entities, "Auto", record).is_empty());
    }
}
