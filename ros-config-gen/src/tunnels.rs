//! Site-to-site tunnel interfaces.

use std::collections::HashMap;

use ros_script_core::{merge_router_configs, RouterConfig};
use tracing::debug;

use crate::builders::Command;
use crate::model::{EoipTunnel, PointToPointTunnel, Tunnel, TunnelKind, VxlanTunnel};
use crate::naming::auto_name;
use crate::section::{FIREWALL_FILTER, INTERFACE_VXLAN_VTEPS, IP_ADDRESS, WAN_LIST};

pub const DEFAULT_KEEPALIVE: &str = "10s,10";
pub const DEFAULT_VXLAN_PORT: u16 = 8472;

/// Generate one tunnel under `name`.
pub fn tunnel(tunnel: &Tunnel, name: &str) -> RouterConfig {
    let kind = tunnel.kind();
    let mut doc = RouterConfig::new();
    let (interface, address) = match tunnel {
        Tunnel::Ipip(link) | Tunnel::Gre(link) => (link_interface(kind, link, name), &link.address),
        Tunnel::Eoip(eoip) => (eoip_interface(eoip, name), &eoip.link.address),
        Tunnel::Vxlan(vxlan) => (vxlan_interface(vxlan, name), &vxlan.address),
    };
    doc.push(kind.section(), interface);

    if let Tunnel::Vxlan(vxlan) = tunnel {
        doc.push(
            INTERFACE_VXLAN_VTEPS,
            Command::add()
                .text("interface", name)
                .param("remote-ip", &vxlan.remote_address),
        );
    }
    if let Some(address) = address.as_deref().filter(|a| !a.trim().is_empty()) {
        doc.push(
            IP_ADDRESS,
            Command::add()
                .param("address", address)
                .text("interface", name),
        );
    }
    doc.push(FIREWALL_FILTER, peer_accept(tunnel, name));
    doc
}

fn link_interface(kind: TunnelKind, link: &PointToPointTunnel, name: &str) -> String {
    let command = Command::add()
        .text("name", name)
        .param_opt("local-address", link.local_address.as_deref())
        .param("remote-address", &link.remote_address)
        .param("mtu", link.mtu.unwrap_or(kind.default_mtu()))
        .param("keepalive", link.keepalive.as_deref().unwrap_or(DEFAULT_KEEPALIVE));
    with_ipsec_secret(command, link.ipsec_secret.as_deref()).build()
}

fn eoip_interface(eoip: &EoipTunnel, name: &str) -> String {
    let link = &eoip.link;
    let command = Command::add()
        .text("name", name)
        .param_opt("local-address", link.local_address.as_deref())
        .param("remote-address", &link.remote_address)
        .param("tunnel-id", eoip.tunnel_id)
        .param("mtu", link.mtu.unwrap_or(TunnelKind::Eoip.default_mtu()))
        .param("keepalive", link.keepalive.as_deref().unwrap_or(DEFAULT_KEEPALIVE));
    with_ipsec_secret(command, link.ipsec_secret.as_deref()).build()
}

fn vxlan_interface(vxlan: &VxlanTunnel, name: &str) -> String {
    Command::add()
        .text("name", name)
        .param("vni", vxlan.vni)
        .param("port", vxlan.port.unwrap_or(DEFAULT_VXLAN_PORT))
        .param_opt("local-address", vxlan.local_address.as_deref())
        .param("mtu", vxlan.mtu.unwrap_or(TunnelKind::Vxlan.default_mtu()))
        .build()
}

fn with_ipsec_secret(command: Command, secret: Option<&str>) -> Command {
    match secret.filter(|s| !s.trim().is_empty()) {
        Some(secret) => command.quoted("ipsec-secret", secret),
        None => command,
    }
}

/// Accept the encapsulated traffic from the remote endpoint.
fn peer_accept(tunnel: &Tunnel, name: &str) -> String {
    let command = Command::add()
        .param("chain", "input")
        .param("in-interface-list", WAN_LIST)
        .param("src-address", tunnel.remote_address());
    let command = match tunnel {
        Tunnel::Ipip(_) => command.param("protocol", "ipencap"),
        Tunnel::Eoip(_) | Tunnel::Gre(_) => command.param("protocol", "gre"),
        Tunnel::Vxlan(vxlan) => command
            .param("protocol", "udp")
            .param("dst-port", vxlan.port.unwrap_or(DEFAULT_VXLAN_PORT)),
    };
    command
        .param("action", "accept")
        .comment(&format!("{name} tunnel"))
        .build()
}

/// Generate every tunnel, naming unnamed ones `{KIND}-{n}` with `n`
/// counted per kind over the input order.
pub fn tunnels(list: &[Tunnel]) -> RouterConfig {
    let mut counters: HashMap<TunnelKind, usize> = HashMap::new();
    let mut docs = Vec::new();
    for item in list {
        let kind = item.kind();
        let counter = counters.entry(kind).or_insert(0);
        *counter += 1;
        if item.remote_address().trim().is_empty() {
            debug!(kind = kind.name_prefix(), "dropping tunnel without remote address");
            continue;
        }
        let name = if item.name().trim().is_empty() {
            auto_name(kind.name_prefix(), *counter)
        } else {
            item.name().to_string()
        };
        docs.push(tunnel(item, &name));
    }
    merge_router_configs(&docs)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{tunnel, tunnels};
    use crate::model::{EoipTunnel, PointToPointTunnel, Tunnel, VxlanTunnel};

    fn gre(name: &str, remote: &str) -> Tunnel {
        Tunnel::Gre(PointToPointTunnel {
            name: name.to_string(),
            remote_address: remote.to_string(),
            ..PointToPointTunnel::default()
        })
    }

    #[test]
    fn gre_tunnel_lines() {
        let item = Tunnel::Gre(PointToPointTunnel {
            remote_address: "203.0.113.7".to_string(),
            address: Some("10.255.0.1/30".to_string()),
            ipsec_secret: Some("psk".to_string()),
            ..PointToPointTunnel::default()
        });
        let doc = tunnel(&item, "GRE-1");
        assert_eq!(
            doc.get("/interface gre").expect("gre"),
            [r#"add name=GRE-1 remote-address=203.0.113.7 mtu=1476 keepalive=10s,10 ipsec-secret="psk""#]
        );
        assert_eq!(
            doc.get("/ip address").expect("address"),
            ["add address=10.255.0.1/30 interface=GRE-1"]
        );
        assert_eq!(
            doc.get("/ip firewall filter").expect("filter"),
            [r#"add chain=input in-interface-list=WAN src-address=203.0.113.7 protocol=gre action=accept comment="GRE-1 tunnel""#]
        );
    }

    #[test]
    fn vxlan_adds_vtep() {
        let item = Tunnel::Vxlan(VxlanTunnel {
            remote_address: "198.51.100.2".to_string(),
            vni: 100,
            ..VxlanTunnel::default()
        });
        let doc = tunnel(&item, "VXLAN-1");
        assert_eq!(
            doc.get("/interface vxlan").expect("vxlan"),
            ["add name=VXLAN-1 vni=100 port=8472 mtu=1450"]
        );
        assert_eq!(
            doc.get("/interface vxlan vteps").expect("vteps"),
            ["add interface=VXLAN-1 remote-ip=198.51.100.2"]
        );
        assert!(!doc.contains("/ip address"));
    }

    #[test]
    fn unnamed_tunnels_count_per_kind() {
        let list = [
            gre("", "203.0.113.1"),
            Tunnel::Eoip(EoipTunnel {
                link: PointToPointTunnel {
                    remote_address: "203.0.113.2".to_string(),
                    ..PointToPointTunnel::default()
                },
                tunnel_id: 7,
            }),
            gre("", ""),
            gre("Backbone", "203.0.113.3"),
            gre("", "203.0.113.4"),
        ];
        let doc = tunnels(&list);
        let names: Vec<&str> = doc
            .get("/interface gre")
            .expect("gre")
            .iter()
            .map(|l| l.split_whitespace().nth(1).unwrap_or_default())
            .collect();
        assert_eq!(names, ["name=GRE-1", "name=Backbone", "name=GRE-4"]);
        assert!(doc.get("/interface eoip").expect("eoip")[0].starts_with("add name=EoIP-1 "));
    }
}
