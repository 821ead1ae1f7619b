use ros_script_core::RouterConfig;

use crate::builders::Command;
use crate::model::{users_for, IpsecMode, VpnServer, VpnType};
use crate::section::{FIREWALL_MANGLE, INTERFACE_LIST, INTERFACE_LIST_MEMBER, VPN_IN_LIST, WAN_LIST};

/// Connection mark carried by every inbound VPN connection.
pub const VPN_INBOUND_MARK: &str = "vpn-inbound";

/// Static `<service>-server` interfaces for every PPP user so firewall
/// rules can match them through the `VPN-IN` interface list.
pub fn static_interface_binding(server: &VpnServer) -> RouterConfig {
    let mut doc = RouterConfig::new();
    for vpn_type in server.configured_protocols() {
        let Some(service) = vpn_type.ppp_service() else {
            continue;
        };
        let section = format!("/interface {service}-server");
        for user in users_for(&server.users, vpn_type) {
            let interface = format!("{service}-{}", user.username);
            doc.push(
                section.as_str(),
                Command::add()
                    .text("name", &interface)
                    .text("user", &user.username),
            );
            doc.push(
                INTERFACE_LIST_MEMBER,
                Command::add()
                    .param("list", VPN_IN_LIST)
                    .text("interface", &interface),
            );
        }
    }
    if !doc.is_empty() {
        doc.unshift(INTERFACE_LIST, [Command::add().param("name", VPN_IN_LIST).build()]);
    }
    doc
}

/// A port a configured server accepts connections on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub vpn_type: VpnType,
    pub protocol: &'static str,
    pub port: Option<String>,
}

impl Listener {
    fn new(vpn_type: VpnType, protocol: &'static str, port: Option<String>) -> Self {
        Self {
            vpn_type,
            protocol,
            port,
        }
    }
}

/// Listening endpoints of every configured server, in processing order.
pub fn listeners(server: &VpnServer) -> Vec<Listener> {
    let mut out = Vec::new();
    if let Some(config) = &server.wireguard {
        let port = config.resolve().listen_port.to_string();
        out.push(Listener::new(VpnType::Wireguard, "udp", Some(port)));
    }
    if let Some(config) = &server.openvpn {
        let settings = config.resolve();
        out.push(Listener::new(
            VpnType::OpenVpn,
            settings.protocol.as_str(),
            Some(settings.port.to_string()),
        ));
    }
    if server.pptp.is_some() {
        out.push(Listener::new(VpnType::Pptp, "tcp", Some("1723".into())));
        out.push(Listener::new(VpnType::Pptp, "gre", None));
    }
    if let Some(config) = &server.l2tp {
        out.push(Listener::new(VpnType::L2tp, "udp", Some("1701".into())));
        if config.resolve().use_ipsec != IpsecMode::No {
            out.push(Listener::new(VpnType::L2tp, "udp", Some("500,4500".into())));
        }
    }
    if let Some(config) = &server.sstp {
        let port = config.resolve().port.to_string();
        out.push(Listener::new(VpnType::Sstp, "tcp", Some(port)));
    }
    if server.ikev2.is_some() {
        out.push(Listener::new(VpnType::Ikev2, "udp", Some("500,4500".into())));
    }
    out
}

/// Mark new inbound VPN connections and route their replies through the
/// main table, bypassing policy routing of the LAN mangle rules.
pub fn inbound_marking(server: &VpnServer) -> RouterConfig {
    let mut doc = RouterConfig::new();
    for listener in listeners(server) {
        doc.push(
            FIREWALL_MANGLE,
            Command::add()
                .param("chain", "input")
                .param("in-interface-list", WAN_LIST)
                .param("protocol", listener.protocol)
                .param_opt("dst-port", listener.port.as_deref())
                .param("connection-state", "new")
                .param("action", "mark-connection")
                .param("new-connection-mark", VPN_INBOUND_MARK)
                .flag("passthrough", true)
                .comment(&format!("{} inbound", listener.vpn_type)),
        );
    }
    if !doc.is_empty() {
        doc.push(
            FIREWALL_MANGLE,
            Command::add()
                .param("chain", "output")
                .param("connection-mark", VPN_INBOUND_MARK)
                .param("action", "mark-routing")
                .param("new-routing-mark", "main")
                .flag("passthrough", false)
                .comment("VPN replies via main"),
        );
    }
    doc
}
