use ros_script_core::RouterConfig;
use tracing::warn;

use super::common::{no_users_line, protocol_summary, wrap_protocol};
use crate::addressing::{client_addresses, SubnetPlan};
use crate::builders::{address_list, firewall_accept, Command};
use crate::model::{users_for, Credentials, VpnType, WireguardInterfaceConfig};
use crate::section::{
    COMMENTS, FIREWALL_ADDRESS_LIST, FIREWALL_FILTER, INTERFACE_WIREGUARD,
    INTERFACE_WIREGUARD_PEERS, IP_ADDRESS, VPN_SERVER_ADDRESS_LIST,
};
use crate::settings::WireguardSettings;

pub fn wireguard_server(config: &WireguardInterfaceConfig) -> RouterConfig {
    let settings = config.resolve();
    let mut doc = RouterConfig::new();

    let mut interface = Command::add()
        .text("name", &settings.name)
        .param("listen-port", settings.listen_port)
        .param("mtu", settings.mtu);
    if let Some(key) = &settings.private_key {
        interface = interface.quoted("private-key", key);
    }
    doc.push(
        INTERFACE_WIREGUARD,
        interface.flag("disabled", !settings.enabled),
    );
    doc.push(
        IP_ADDRESS,
        Command::add()
            .param("address", &settings.address)
            .text("interface", &settings.name),
    );
    doc.push(
        FIREWALL_FILTER,
        firewall_accept(
            "udp",
            Some(settings.listen_port.to_string().as_str()),
            "WireGuard",
        ),
    );
    match SubnetPlan::parse(&settings.address) {
        Some(plan) => doc.push(
            FIREWALL_ADDRESS_LIST,
            address_list(
                VPN_SERVER_ADDRESS_LIST,
                &plan.net.to_string(),
                "WireGuard clients",
            ),
        ),
        None => {
            warn!(address = %settings.address, "wireguard interface address is not IPv4 CIDR");
            doc.push(
                COMMENTS,
                format!("# WireGuard: invalid interface address {}", settings.address),
            );
        }
    }
    doc
}

/// One peer per WireGuard user with sequential `/32` client addresses.
pub fn wireguard_server_users(users: &[Credentials]) -> RouterConfig {
    wireguard_peers(users, &WireguardInterfaceConfig::default().resolve())
}

pub(super) fn wireguard_peers(users: &[Credentials], settings: &WireguardSettings) -> RouterConfig {
    let matched = users_for(users, VpnType::Wireguard);
    if matched.is_empty() {
        return RouterConfig::from_sections([(
            INTERFACE_WIREGUARD_PEERS,
            [no_users_line(VpnType::Wireguard)],
        )]);
    }
    let Some(addresses) = client_addresses(&settings.address, matched.len()) else {
        warn!(
            address = %settings.address,
            peers = matched.len(),
            "not enough addresses for wireguard peers"
        );
        return RouterConfig::from_sections([(
            INTERFACE_WIREGUARD_PEERS,
            [format!(
                "# Not enough addresses in {} for {} WireGuard peers",
                settings.address,
                matched.len()
            )],
        )]);
    };
    let lines = matched.iter().zip(addresses).map(|(user, ip)| {
        let host = format!("{ip}/32");
        Command::add()
            .text("interface", &settings.name)
            .quoted("name", &user.username)
            .param("allowed-address", &host)
            .param("client-address", &host)
            .quoted("private-key", "auto")
            .comment(&user.username)
            .build()
    });
    RouterConfig::from_sections([(INTERFACE_WIREGUARD_PEERS, lines)])
}

pub fn wireguard_server_wrapper(
    config: &WireguardInterfaceConfig,
    users: &[Credentials],
) -> RouterConfig {
    let settings = config.resolve();
    let summary = protocol_summary(
        VpnType::Wireguard,
        settings.enabled,
        &settings.name,
        users_for(users, VpnType::Wireguard).len(),
    );
    wrap_protocol(
        wireguard_server(config),
        users,
        |users| wireguard_peers(users, &settings),
        summary,
    )
}
