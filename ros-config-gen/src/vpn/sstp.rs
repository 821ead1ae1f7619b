use ros_script_core::{format_array_value, merge_router_configs, RouterConfig};

use super::common::{ppp_addressing, ppp_users, protocol_summary, wrap_protocol};
use crate::builders::{firewall_accept, Command};
use crate::model::{users_for, Credentials, SstpServerConfig, VpnType};
use crate::section::{FIREWALL_FILTER, SSTP_SERVER};
use crate::settings::SstpSettings;

pub fn sstp_server(config: &SstpServerConfig) -> RouterConfig {
    let settings = config.resolve();
    let mut doc = RouterConfig::new();
    doc.push(SSTP_SERVER, server_line(&settings));
    doc.push(
        FIREWALL_FILTER,
        firewall_accept("tcp", Some(settings.port.to_string().as_str()), "SSTP"),
    );
    merge_router_configs([&doc, &ppp_addressing(VpnType::Sstp, &settings.profile)])
}

fn server_line(settings: &SstpSettings) -> String {
    Command::set()
        .flag("enabled", settings.enabled)
        .param("port", settings.port)
        .param("authentication", format_array_value(&settings.authentication))
        .text("certificate", &settings.certificate)
        .text("default-profile", &settings.profile)
        .param("tls-version", settings.tls_version)
        .flag("verify-client-certificate", settings.verify_client_certificate)
        .flag("pfs", settings.pfs)
        .param("ciphers", format_array_value(&settings.ciphers))
        .param("keepalive-timeout", settings.keepalive_timeout)
        .param("max-mtu", settings.max_mtu)
        .param("max-mru", settings.max_mru)
        .build()
}

/// `/ppp secret` entries for SSTP users, default profile.
pub fn sstp_server_users(users: &[Credentials]) -> RouterConfig {
    let profile = SstpServerConfig::default().resolve().profile;
    ppp_users(users, VpnType::Sstp, &profile)
}

pub fn sstp_server_wrapper(config: &SstpServerConfig, users: &[Credentials]) -> RouterConfig {
    let settings = config.resolve();
    let summary = protocol_summary(
        VpnType::Sstp,
        settings.enabled,
        &settings.profile,
        users_for(users, VpnType::Sstp).len(),
    );
    wrap_protocol(
        sstp_server(config),
        users,
        |users| ppp_users(users, VpnType::Sstp, &settings.profile),
        summary,
    )
}
