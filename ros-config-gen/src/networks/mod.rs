//! LAN network generation.
//!
//! The four base networks (Split, Domestic, Foreign, VPN) get the common
//! bridge/DHCP/routing block plus policy-routing mangle rules. Every other
//! network group goes through [`add_networks`] with a group-specific name
//! prefix and gets the plain block.

mod base;

use ros_script_core::{merge_router_configs, RouterConfig};

pub use base::{
    bridge_name, domestic_base, foreign_base, mangle_rules, network_base_generator,
    routing_table_name, split_base, vpn_base, BaseCategory, DOMESTIC_ROUTING_TABLE,
};

use crate::model::{NetworkDefinition, Subnets};
use crate::naming::{add_network, add_networks};

/// Generate every network in `subnets`, merged in a fixed order.
pub fn networks(subnets: &Subnets) -> RouterConfig {
    let mut docs = Vec::new();

    let bases = &subnets.base_networks;
    let categories: [(Option<&NetworkDefinition>, BaseCategory, fn(&str, &str) -> RouterConfig); 4] = [
        (bases.split.as_ref(), BaseCategory::Split, split_base),
        (bases.domestic.as_ref(), BaseCategory::Domestic, domestic_base),
        (bases.foreign.as_ref(), BaseCategory::Foreign, foreign_base),
        (bases.vpn.as_ref(), BaseCategory::Vpn, vpn_base),
    ];
    for (entity, category, generator) in categories {
        if let Some(entity) = entity {
            docs.push(add_network(entity, category.default_name(), generator));
        }
    }

    docs.push(add_networks(&subnets.foreign_networks, "Foreign"));
    docs.push(add_networks(&subnets.domestic_networks, "Domestic"));

    if let Some(clients) = &subnets.vpn_client_networks {
        docs.push(add_networks(&clients.wireguard, "WG-Client"));
        docs.push(add_networks(&clients.openvpn, "OVPN-Client"));
        docs.push(add_networks(&clients.pptp, "PPTP-Client"));
        docs.push(add_networks(&clients.l2tp, "L2TP-Client"));
        docs.push(add_networks(&clients.sstp, "SSTP-Client"));
        docs.push(add_networks(&clients.ikev2, "IKEv2-Client"));
    }

    if let Some(servers) = &subnets.vpn_server_networks {
        docs.push(add_networks(&servers.wireguard, "WG-Server"));
        docs.push(add_networks(&servers.openvpn, "OVPN-Server"));
        let singles = [
            (servers.pptp.as_ref(), "PPTP-Server"),
            (servers.l2tp.as_ref(), "L2TP-Server"),
            (servers.sstp.as_ref(), "SSTP-Server"),
            (servers.ikev2.as_ref(), "IKEv2-Server"),
        ];
        for (entity, default_name) in singles {
            if let Some(entity) = entity {
                docs.push(add_network(entity, default_name, network_base_generator));
            }
        }
    }

    if let Some(tunnels) = &subnets.tunnel_networks {
        docs.push(add_networks(&tunnels.ipip, "IPIP"));
        docs.push(add_networks(&tunnels.eoip, "EoIP"));
        docs.push(add_networks(&tunnels.gre, "GRE"));
        docs.push(add_networks(&tunnels.vxlan, "VXLAN"));
    }

    merge_router_configs(&docs)
}
