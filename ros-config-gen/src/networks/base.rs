use ros_script_core::{merge_router_configs, RouterConfig};
use tracing::warn;

use crate::addressing::SubnetPlan;
use crate::builders::{address_list, ip_pool, Command};
use crate::section::{
    COMMENTS, DHCP_SERVER, DHCP_SERVER_NETWORK, DOMESTIC_ADDRESS_LIST, FIREWALL_ADDRESS_LIST,
    FIREWALL_MANGLE, INTERFACE_BRIDGE, INTERFACE_LIST_MEMBER, IP_ADDRESS, IP_POOL, IP_ROUTE,
    LAN_LIST, LOCAL_ADDRESS_LIST, ROUTING_TABLE,
};

/// Routing table used for destinations reached over the domestic uplink.
pub const DOMESTIC_ROUTING_TABLE: &str = "to-DOM";

pub fn bridge_name(name: &str) -> String {
    format!("LAN-Bridge-{name}")
}

pub fn routing_table_name(name: &str) -> String {
    format!("to-{name}")
}

/// Bridge, DHCP, addressing, routing table and address lists for one LAN.
///
/// A subnet that is not IPv4 CIDR yields a single skip comment.
pub fn network_base_generator(name: &str, subnet: &str) -> RouterConfig {
    let Some(plan) = SubnetPlan::parse(subnet) else {
        warn!(network = name, subnet, "invalid subnet, network skipped");
        return RouterConfig::from_sections([(
            COMMENTS,
            [format!("# Skipping network {name}: invalid subnet {subnet}")],
        )]);
    };

    let bridge = bridge_name(name);
    let pool = format!("DHCP-pool-{name}");
    let table = routing_table_name(name);
    let network = plan.net.to_string();

    let mut doc = RouterConfig::new();
    doc.push(
        INTERFACE_BRIDGE,
        Command::add()
            .text("name", &bridge)
            .comment(&format!("{name} LAN")),
    );
    doc.push(
        INTERFACE_LIST_MEMBER,
        Command::add()
            .param("list", LAN_LIST)
            .text("interface", &bridge),
    );
    doc.push(IP_POOL, ip_pool(&pool, &plan.pool_range()));
    doc.push(
        DHCP_SERVER,
        Command::add()
            .text("name", &format!("DHCP-{name}"))
            .text("interface", &bridge)
            .text("address-pool", &pool),
    );
    doc.push(
        DHCP_SERVER_NETWORK,
        Command::add()
            .param("address", &network)
            .param("gateway", plan.gateway)
            .param("dns-server", plan.gateway)
            .comment(&format!("{name} LAN")),
    );
    doc.push(
        IP_ADDRESS,
        Command::add()
            .param("address", plan.gateway_cidr())
            .text("interface", &bridge)
            .param("network", plan.network()),
    );
    doc.push(
        ROUTING_TABLE,
        Command::add().text("name", &table).arg("fib"),
    );
    doc.extend(
        FIREWALL_ADDRESS_LIST,
        [
            address_list(&format!("{name}-LAN"), &network, &format!("{name} LAN")),
            address_list(LOCAL_ADDRESS_LIST, &network, &format!("{name} LAN")),
        ],
    );
    doc.push(
        IP_ROUTE,
        Command::add()
            .param("dst-address", &network)
            .text("gateway", &bridge)
            .text("routing-table", &table)
            .comment(&format!("{name} LAN")),
    );
    doc
}

/// Base network categories that carry policy-routing mangle rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseCategory {
    Split,
    Domestic,
    Foreign,
    Vpn,
}

impl BaseCategory {
    pub fn default_name(self) -> &'static str {
        match self {
            BaseCategory::Split => "Split",
            BaseCategory::Domestic => "Domestic",
            BaseCategory::Foreign => "Foreign",
            BaseCategory::Vpn => "VPN",
        }
    }
}

/// Prerouting rules for traffic entering from the LAN bridge: local
/// destinations pass untouched, everything else gets the LAN's routing
/// mark. Split LANs first divert `DOMAddList` destinations to `to-DOM`.
pub fn mangle_rules(category: BaseCategory, name: &str) -> RouterConfig {
    let bridge = bridge_name(name);
    let mut doc = RouterConfig::new();
    doc.push(
        FIREWALL_MANGLE,
        Command::add()
            .param("chain", "prerouting")
            .text("in-interface", &bridge)
            .param("dst-address-list", LOCAL_ADDRESS_LIST)
            .param("action", "accept")
            .comment(&format!("{name}: local traffic")),
    );
    if category == BaseCategory::Split {
        doc.push(ROUTING_TABLE, Command::add().param("name", DOMESTIC_ROUTING_TABLE).arg("fib"));
        doc.push(
            FIREWALL_MANGLE,
            Command::add()
                .param("chain", "prerouting")
                .text("in-interface", &bridge)
                .param("dst-address-list", DOMESTIC_ADDRESS_LIST)
                .param("action", "mark-routing")
                .param("new-routing-mark", DOMESTIC_ROUTING_TABLE)
                .flag("passthrough", false)
                .comment(&format!("{name}: domestic destinations")),
        );
    }
    let table = routing_table_name(name);
    doc.push(
        FIREWALL_MANGLE,
        Command::add()
            .param("chain", "prerouting")
            .text("in-interface", &bridge)
            .param("action", "mark-routing")
            .text("new-routing-mark", &table)
            .flag("passthrough", false)
            .comment(&format!("{name}: route via {table}")),
    );
    doc
}

fn categorized(category: BaseCategory, name: &str, subnet: &str) -> RouterConfig {
    let base = network_base_generator(name, subnet);
    if !base.contains(INTERFACE_BRIDGE) {
        return base;
    }
    merge_router_configs([&base, &mangle_rules(category, name)])
}

pub fn split_base(name: &str, subnet: &str) -> RouterConfig {
    categorized(BaseCategory::Split, name, subnet)
}

pub fn domestic_base(name: &str, subnet: &str) -> RouterConfig {
    categorized(BaseCategory::Domestic, name, subnet)
}

pub fn foreign_base(name: &str, subnet: &str) -> RouterConfig {
    categorized(BaseCategory::Foreign, name, subnet)
}

pub fn vpn_base(name: &str, subnet: &str) -> RouterConfig {
    categorized(BaseCategory::Vpn, name, subnet)
}
