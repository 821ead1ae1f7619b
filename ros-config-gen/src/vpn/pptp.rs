use ros_script_core::{format_array_value, merge_router_configs, RouterConfig};

use super::common::{ppp_addressing, ppp_users, protocol_summary, wrap_protocol};
use crate::builders::{firewall_accept, Command};
use crate::model::{users_for, Credentials, PptpServerConfig, VpnType};
use crate::section::{FIREWALL_FILTER, PPTP_SERVER};
use crate::settings::PptpSettings;

pub fn pptp_server(config: &PptpServerConfig) -> RouterConfig {
    let settings = config.resolve();
    let mut doc = RouterConfig::new();
    doc.push(PPTP_SERVER, server_line(&settings));
    doc.extend(
        FIREWALL_FILTER,
        [
            firewall_accept("tcp", Some("1723"), "PPTP"),
            firewall_accept("gre", None, "PPTP GRE"),
        ],
    );
    merge_router_configs([&doc, &ppp_addressing(VpnType::Pptp, &settings.profile)])
}

fn server_line(settings: &PptpSettings) -> String {
    Command::set()
        .flag("enabled", settings.enabled)
        .param("authentication", format_array_value(&settings.authentication))
        .text("default-profile", &settings.profile)
        .param("keepalive-timeout", settings.keepalive_timeout)
        .param("max-mtu", settings.max_mtu)
        .param("max-mru", settings.max_mru)
        .param_opt("mrru", settings.mrru)
        .build()
}

/// `/ppp secret` entries for PPTP users, default profile.
pub fn pptp_server_users(users: &[Credentials]) -> RouterConfig {
    let profile = PptpServerConfig::default().resolve().profile;
    ppp_users(users, VpnType::Pptp, &profile)
}

pub fn pptp_server_wrapper(config: &PptpServerConfig, users: &[Credentials]) -> RouterConfig {
    let settings = config.resolve();
    let summary = protocol_summary(
        VpnType::Pptp,
        settings.enabled,
        &settings.profile,
        users_for(users, VpnType::Pptp).len(),
    );
    wrap_protocol(
        pptp_server(config),
        users,
        |users| ppp_users(users, VpnType::Pptp, &settings.profile),
        summary,
    )
}
