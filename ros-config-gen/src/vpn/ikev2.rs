//! IKEv2 road-warrior server on top of RouterOS IPsec.
//!
//! Clients are addressed from `ike2-pool` through mode-config and match a
//! policy template; the peer is passive and authenticates either with the
//! server certificate or a pre-shared key.

use ros_script_core::{format_array_value, merge_router_configs, RouterConfig};

use super::common::{client_pool, no_users_line, protocol_summary};
use crate::builders::{firewall_accept, Command};
use crate::model::{users_for, Credentials, Ikev2AuthMethod, Ikev2ServerConfig, VpnType};
use crate::section::{
    COMMENTS, FIREWALL_FILTER, IPSEC_IDENTITY, IPSEC_MODE_CONFIG, IPSEC_PEER, IPSEC_POLICY,
    IPSEC_POLICY_GROUP, IPSEC_PROFILE, IPSEC_PROPOSAL,
};
use crate::settings::Ikev2Settings;

pub const IKEV2_POOL: &str = "ike2-pool";
pub const IKEV2_PROFILE: &str = "ike2-profile";
pub const IKEV2_PROPOSAL: &str = "ike2-proposal";
pub const IKEV2_MODE_CONFIG: &str = "ike2-modeconf";
pub const IKEV2_POLICY_GROUP: &str = "ike2-policies";
pub const IKEV2_PEER: &str = "ike2-peer";

pub fn ikev2_server(config: &Ikev2ServerConfig) -> RouterConfig {
    let settings = config.resolve();
    let (addressing, _) = client_pool(VpnType::Ikev2, IKEV2_POOL);

    let mut doc = RouterConfig::new();
    doc.push(
        IPSEC_PROFILE,
        Command::add()
            .param("name", IKEV2_PROFILE)
            .param("hash-algorithm", settings.hash_algorithm)
            .param("enc-algorithm", settings.enc_algorithm)
            .param("dh-group", settings.dh_group),
    );
    doc.push(
        IPSEC_PROPOSAL,
        Command::add()
            .param("name", IKEV2_PROPOSAL)
            .param("auth-algorithms", settings.hash_algorithm)
            .param("enc-algorithms", format_array_value(&settings.proposal_enc_algorithms))
            .param("pfs-group", settings.pfs_group)
            .text("lifetime", &settings.lifetime),
    );
    doc.push(
        IPSEC_MODE_CONFIG,
        Command::add()
            .param("name", IKEV2_MODE_CONFIG)
            .param("address-pool", IKEV2_POOL)
            .param("address-prefix-length", 32)
            .param("split-include", "0.0.0.0/0")
            .flag("system-dns", true),
    );
    doc.push(
        IPSEC_POLICY_GROUP,
        Command::add().param("name", IKEV2_POLICY_GROUP),
    );
    doc.push(
        IPSEC_POLICY,
        Command::add()
            .param("dst-address", VpnType::Ikev2.server_subnet())
            .param("group", IKEV2_POLICY_GROUP)
            .param("proposal", IKEV2_PROPOSAL)
            .param("src-address", "0.0.0.0/0")
            .flag("template", true),
    );
    doc.push(
        IPSEC_PEER,
        Command::add()
            .param("name", IKEV2_PEER)
            .param("exchange-mode", "ike2")
            .flag("passive", true)
            .param("profile", IKEV2_PROFILE)
            .flag("send-initial-contact", true)
            .flag("disabled", !settings.enabled),
    );
    doc.push(IPSEC_IDENTITY, identity_line(&settings));
    if settings.auth_method == Ikev2AuthMethod::PreSharedKey && settings.secret.is_none() {
        doc.push(COMMENTS, "# IKEv2: pre-shared-key auth selected but no secret was given");
    }
    doc.extend(
        FIREWALL_FILTER,
        [
            firewall_accept("udp", Some("500,4500"), "IKEv2"),
            firewall_accept("ipsec-esp", None, "IKEv2 ESP"),
        ],
    );
    merge_router_configs([&addressing, &doc])
}

fn identity_line(settings: &Ikev2Settings) -> String {
    let command = Command::add()
        .param("peer", IKEV2_PEER)
        .param("auth-method", settings.auth_method);
    let command = match (settings.auth_method, &settings.secret) {
        (Ikev2AuthMethod::DigitalSignature, _) => command.text("certificate", &settings.certificate),
        (Ikev2AuthMethod::PreSharedKey, Some(secret)) => command.quoted("secret", secret),
        (Ikev2AuthMethod::PreSharedKey, None) => command,
    };
    command
        .param("generate-policy", "port-strict")
        .param("mode-config", IKEV2_MODE_CONFIG)
        .param("policy-template-group", IKEV2_POLICY_GROUP)
        .build()
}

/// Informational block only; IKEv2 users live in IPsec identities.
pub fn ikev2_server_users(users: &[Credentials]) -> RouterConfig {
    let matched = users_for(users, VpnType::Ikev2);
    let lines = if matched.is_empty() {
        vec![no_users_line(VpnType::Ikev2)]
    } else {
        let mut lines = vec![
            "# IKEv2 users are managed through IPsec identities".to_string(),
            "# Issue each user a client certificate signed by the VPN CA:".to_string(),
        ];
        lines.extend(matched.iter().map(|u| format!("#   {}", u.username)));
        lines
    };
    RouterConfig::from_sections([(COMMENTS, lines)])
}

pub fn ikev2_server_wrapper(config: &Ikev2ServerConfig, users: &[Credentials]) -> RouterConfig {
    let settings = config.resolve();
    let server = ikev2_server(config);
    let mut doc = if users.is_empty() {
        server
    } else {
        merge_router_configs([&server, &ikev2_server_users(users)])
    };
    doc.unshift(
        COMMENTS,
        protocol_summary(
            VpnType::Ikev2,
            settings.enabled,
            IKEV2_PROFILE,
            users_for(users, VpnType::Ikev2).len(),
        ),
    );
    doc
}
