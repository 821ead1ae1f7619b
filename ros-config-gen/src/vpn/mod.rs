//! VPN server generation.
//!
//! Each protocol module exposes three entry points:
//!
//! - `*_server(config)`: server block, pool, profile, firewall accept rules
//!   and the `VPN-SERVER` address-list entry.
//! - `*_server_users(users)`: user entries for the credentials enabled for
//!   the protocol, or a single comment when none are.
//! - `*_server_wrapper(config, users)`: both of the above with a summary
//!   block unshifted into the comment section.
//!
//! [`vpn_server_wrapper`] runs certificate provisioning, static interface
//! binding and inbound marking before every configured protocol wrapper,
//! then frames the result with a header and a `# Summary` block.

mod certificates;
mod common;
mod ikev2;
mod inbound;
mod l2tp;
mod openvpn;
mod pptp;
mod sstp;
mod wireguard;

use ros_script_core::{merge_router_configs, RouterConfig};
use tracing::debug;

pub use certificates::{certificate_protocols, vpn_server_certificate, ASSIGN_SCRIPT};
pub use common::no_users_line;
pub use ikev2::{ikev2_server, ikev2_server_users, ikev2_server_wrapper};
pub use inbound::{inbound_marking, listeners, static_interface_binding, Listener, VPN_INBOUND_MARK};
pub use l2tp::{l2tp_server, l2tp_server_users, l2tp_server_wrapper};
pub use openvpn::{openvpn_server, openvpn_server_users, openvpn_server_wrapper};
pub use pptp::{pptp_server, pptp_server_users, pptp_server_wrapper};
pub use sstp::{sstp_server, sstp_server_users, sstp_server_wrapper};
pub use wireguard::{wireguard_server, wireguard_server_users, wireguard_server_wrapper};

use common::ppp_users;
use wireguard::wireguard_peers;

use crate::model::{users_for, VpnServer, VpnType};
use crate::section::{COMMENTS, SUMMARY, WAN_LIST};

pub const NO_USERS: &str = "# No VPN users configured";
pub const NO_PROTOCOLS: &str = "# No VPN protocols configured";

fn comment_only(line: &str) -> RouterConfig {
    RouterConfig::from_sections([(COMMENTS, [line])])
}

/// Early exit for inputs with nothing to generate.
fn preflight(server: Option<&VpnServer>) -> Result<&VpnServer, RouterConfig> {
    let Some(server) = server.filter(|s| !s.users.is_empty()) else {
        debug!("no vpn users, skipping vpn generation");
        return Err(comment_only(NO_USERS));
    };
    if server.configured_protocols().is_empty() {
        debug!(users = server.users.len(), "no vpn protocol configured");
        return Err(comment_only(NO_PROTOCOLS));
    }
    Ok(server)
}

/// Wrapper output of every configured protocol, in processing order.
fn protocol_wrappers(server: &VpnServer) -> Vec<RouterConfig> {
    let users = server.users.as_slice();
    let mut docs = Vec::new();
    if let Some(config) = &server.wireguard {
        docs.push(wireguard_server_wrapper(config, users));
    }
    if let Some(config) = &server.openvpn {
        docs.push(openvpn_server_wrapper(config, users));
    }
    if let Some(config) = &server.pptp {
        docs.push(pptp_server_wrapper(config, users));
    }
    if let Some(config) = &server.l2tp {
        docs.push(l2tp_server_wrapper(config, users));
    }
    if let Some(config) = &server.sstp {
        docs.push(sstp_server_wrapper(config, users));
    }
    if let Some(config) = &server.ikev2 {
        docs.push(ikev2_server_wrapper(config, users));
    }
    docs
}

/// Full VPN server configuration.
pub fn vpn_server_wrapper(server: Option<&VpnServer>) -> RouterConfig {
    let server = match preflight(server) {
        Ok(server) => server,
        Err(doc) => return doc,
    };

    let mut docs = vec![
        vpn_server_certificate(server),
        static_interface_binding(server),
        inbound_marking(server),
    ];
    docs.extend(protocol_wrappers(server));

    let mut doc = merge_router_configs(&docs);
    doc.unshift(COMMENTS, header(server));
    doc.extend(SUMMARY, next_steps(server));
    doc
}

/// User entries only, for every configured protocol.
///
/// Entries reference the same profiles and interfaces the full wrapper
/// creates for the configured servers.
pub fn vpn_server_users_wrapper(server: Option<&VpnServer>) -> RouterConfig {
    let server = match preflight(server) {
        Ok(server) => server,
        Err(doc) => return doc,
    };
    let users = server.users.as_slice();
    let mut docs = Vec::new();
    if let Some(config) = &server.wireguard {
        docs.push(wireguard_peers(users, &config.resolve()));
    }
    if let Some(config) = &server.openvpn {
        docs.push(ppp_users(users, VpnType::OpenVpn, &config.resolve().profile));
    }
    if let Some(config) = &server.pptp {
        docs.push(ppp_users(users, VpnType::Pptp, &config.resolve().profile));
    }
    if let Some(config) = &server.l2tp {
        docs.push(ppp_users(users, VpnType::L2tp, &config.resolve().profile));
    }
    if let Some(config) = &server.sstp {
        docs.push(ppp_users(users, VpnType::Sstp, &config.resolve().profile));
    }
    if server.ikev2.is_some() {
        docs.push(ikev2_server_users(users));
    }
    merge_router_configs(&docs)
}

fn header(server: &VpnServer) -> Vec<String> {
    let protocols = server.configured_protocols();
    let names: Vec<&str> = protocols.iter().map(|t| t.display_name()).collect();
    let mut lines = vec![
        "# VPN server configuration".to_string(),
        format!("# Total users: {}", server.users.len()),
        format!("# Protocols: {}", names.join(", ")),
        "# Users per protocol:".to_string(),
    ];
    for vpn_type in &protocols {
        lines.push(format!(
            "#   {vpn_type}: {}",
            users_for(&server.users, *vpn_type).len()
        ));
    }
    lines.push("# Subnets:".to_string());
    for vpn_type in &protocols {
        lines.push(format!("#   {vpn_type}: {}", vpn_type.server_subnet()));
    }
    lines
}

fn next_steps(server: &VpnServer) -> Vec<String> {
    let mut steps = vec![format!(
        "Add every WAN uplink to the interface list {WAN_LIST}"
    )];
    if !certificate_protocols(server).is_empty() {
        steps.push(format!(
            "Run /system script run {ASSIGN_SCRIPT} and import the exported CA on clients"
        ));
    }
    if server.wireguard.is_some() {
        steps.push("Export peer configs from /interface wireguard peers".to_string());
    }
    if server.pptp.is_some() {
        steps.push("PPTP is not secure, prefer another protocol for new clients".to_string());
    }
    steps.push("Hand out credentials to the users listed above".to_string());

    let mut lines = vec!["# Next steps:".to_string()];
    lines.extend(
        steps
            .iter()
            .enumerate()
            .map(|(idx, step)| format!("# {}. {step}", idx + 1)),
    );
    lines
}

#[cfg(test)]
mod tests;
