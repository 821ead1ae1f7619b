use ros_script_core::{format_array_value, merge_router_configs, RouterConfig};

use super::common::{ppp_addressing, ppp_users, protocol_summary, wrap_protocol};
use crate::builders::{firewall_accept, Command};
use crate::model::{users_for, Credentials, IpsecMode, L2tpServerConfig, VpnType};
use crate::section::{COMMENTS, FIREWALL_FILTER, L2TP_SERVER};
use crate::settings::L2tpSettings;

pub fn l2tp_server(config: &L2tpServerConfig) -> RouterConfig {
    let settings = config.resolve();
    let mut doc = RouterConfig::new();
    doc.push(L2TP_SERVER, server_line(&settings));
    doc.push(FIREWALL_FILTER, firewall_accept("udp", Some("1701"), "L2TP"));
    if settings.use_ipsec != IpsecMode::No {
        doc.extend(
            FIREWALL_FILTER,
            [
                firewall_accept("udp", Some("500,4500"), "L2TP IPsec IKE/NAT-T"),
                firewall_accept("ipsec-esp", None, "L2TP IPsec ESP"),
            ],
        );
        if settings.ipsec_secret.is_none() {
            doc.push(
                COMMENTS,
                "# L2TP: use-ipsec is on but no ipsec-secret was given",
            );
        }
    }
    merge_router_configs([&doc, &ppp_addressing(VpnType::L2tp, &settings.profile)])
}

fn server_line(settings: &L2tpSettings) -> String {
    let mut command = Command::set()
        .flag("enabled", settings.enabled)
        .param("authentication", format_array_value(&settings.authentication))
        .text("default-profile", &settings.profile)
        .param("use-ipsec", settings.use_ipsec);
    if let Some(secret) = &settings.ipsec_secret {
        command = command.quoted("ipsec-secret", secret);
    }
    command
        .param("keepalive-timeout", settings.keepalive_timeout)
        .param("max-mtu", settings.max_mtu)
        .param("max-mru", settings.max_mru)
        .flag("one-session-per-host", settings.one_session_per_host)
        .param(
            "max-sessions",
            settings
                .max_sessions
                .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
        )
        .flag("allow-fast-path", settings.allow_fast_path)
        .build()
}

/// `/ppp secret` entries for L2TP users, default profile.
pub fn l2tp_server_users(users: &[Credentials]) -> RouterConfig {
    let profile = L2tpServerConfig::default().resolve().profile;
    ppp_users(users, VpnType::L2tp, &profile)
}

pub fn l2tp_server_wrapper(config: &L2tpServerConfig, users: &[Credentials]) -> RouterConfig {
    let settings = config.resolve();
    let summary = protocol_summary(
        VpnType::L2tp,
        settings.enabled,
        &settings.profile,
        users_for(users, VpnType::L2tp).len(),
    );
    wrap_protocol(
        l2tp_server(config),
        users,
        |users| ppp_users(users, VpnType::L2tp, &settings.profile),
        summary,
    )
}
