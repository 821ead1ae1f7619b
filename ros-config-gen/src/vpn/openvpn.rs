use ros_script_core::{format_array_value, merge_router_configs, RouterConfig};

use super::common::{ppp_addressing, ppp_users, protocol_summary, wrap_protocol};
use crate::builders::{firewall_accept, Command};
use crate::model::{users_for, Credentials, OpenVpnServerConfig, VpnType};
use crate::section::{FIREWALL_FILTER, OVPN_SERVER};
use crate::settings::OpenVpnSettings;

pub fn openvpn_server(config: &OpenVpnServerConfig) -> RouterConfig {
    let settings = config.resolve();
    let mut doc = RouterConfig::new();
    doc.push(OVPN_SERVER, server_line(&settings));
    doc.push(
        FIREWALL_FILTER,
        firewall_accept(
            settings.protocol.as_str(),
            Some(settings.port.to_string().as_str()),
            "OpenVPN",
        ),
    );
    merge_router_configs([&doc, &ppp_addressing(VpnType::OpenVpn, &settings.profile)])
}

fn server_line(settings: &OpenVpnSettings) -> String {
    Command::set()
        .flag("enabled", settings.enabled)
        .param("port", settings.port)
        .param("protocol", settings.protocol)
        .param("mode", settings.mode)
        .param("netmask", settings.netmask)
        .text("certificate", &settings.certificate)
        .param("auth", format_array_value(&settings.auth))
        .param("cipher", format_array_value(&settings.cipher))
        .text("default-profile", &settings.profile)
        .flag("require-client-certificate", settings.require_client_certificate)
        .param("tls-version", settings.tls_version)
        .param("keepalive-timeout", settings.keepalive_timeout)
        .param("max-mtu", settings.max_mtu)
        .build()
}

/// `/ppp secret` entries for OpenVPN users, default profile.
pub fn openvpn_server_users(users: &[Credentials]) -> RouterConfig {
    let profile = OpenVpnServerConfig::default().resolve().profile;
    ppp_users(users, VpnType::OpenVpn, &profile)
}

pub fn openvpn_server_wrapper(config: &OpenVpnServerConfig, users: &[Credentials]) -> RouterConfig {
    let settings = config.resolve();
    let summary = protocol_summary(
        VpnType::OpenVpn,
        settings.enabled,
        &settings.profile,
        users_for(users, VpnType::OpenVpn).len(),
    );
    wrap_protocol(
        openvpn_server(config),
        users,
        |users| ppp_users(users, VpnType::OpenVpn, &settings.profile),
        summary,
    )
}
