//! Certificate provisioning for OpenVPN, SSTP and IKEv2.
//!
//! The router first tries a Let's Encrypt certificate for its cloud DNS
//! name. A private CA with signed server and client certificates is always
//! generated as the fallback, and an assignment script points every
//! certificate-based server at whichever certificate is usable.

use ros_script_core::{merge_router_configs, RouterConfig};

use super::ikev2::IKEV2_PEER;
use crate::builders::{system_script, Command};
use crate::model::{Ikev2AuthMethod, VpnServer, VpnType};
use crate::section::{
    CERTIFICATE, COMMENTS, FIREWALL_FILTER, IP_CLOUD, SYSTEM_SCHEDULER, SYSTEM_SCRIPT, WAN_LIST,
};
use crate::settings::{CertificatePlan, CA_CERTIFICATE, CLIENT_CERTIFICATE, SERVER_CERTIFICATE};

pub const CGNAT_SCRIPT: &str = "check-cgnat";
pub const LETSENCRYPT_SCRIPT: &str = "renew-letsencrypt";
pub const ASSIGN_SCRIPT: &str = "assign-vpn-certificates";
const LETSENCRYPT_RULE_COMMENT: &str = "Let's Encrypt HTTP-01";

/// Certificate-based protocols configured on `server`, in processing order.
pub fn certificate_protocols(server: &VpnServer) -> Vec<VpnType> {
    server
        .configured_protocols()
        .into_iter()
        .filter(|t| t.requires_certificate())
        .collect()
}

pub fn vpn_server_certificate(server: &VpnServer) -> RouterConfig {
    let protocols = certificate_protocols(server);
    if protocols.is_empty() {
        return RouterConfig::from_sections([(
            COMMENTS,
            ["# No certificate-based VPN protocols configured"],
        )]);
    }
    let plan = server.certificate.resolve();
    let mut doc = merge_router_configs([
        &cgnat_check(),
        &letsencrypt_renewal(),
        &private_certificates(&plan),
        &client_certificate_export(&plan),
        &certificate_assignment(server, &protocols),
    ]);
    let names: Vec<&str> = protocols.iter().map(|t| t.display_name()).collect();
    doc.unshift(
        COMMENTS,
        [
            format!("# Certificates for: {}", names.join(", ")),
            "# Let's Encrypt is tried first, the private CA is the fallback".to_string(),
        ],
    );
    doc
}

/// Log whether the cloud public address is assigned locally. Behind CGNAT
/// inbound VPN connections cannot reach the router.
fn cgnat_check() -> RouterConfig {
    let source = [
        "/ip cloud force-update",
        ":delay 10s",
        ":local public [/ip cloud get public-address]",
        ":local direct false",
        ":foreach id in=[/ip address find] do={",
        ":local addr [/ip address get $id address]",
        ":if ([:pick $addr 0 [:find $addr \"/\"]] = $public) do={ :set direct true }",
        "}",
        ":if ($direct) do={ :log info \"VPN: public address $public is local\" } else={ :log warning \"VPN: router is behind NAT or CGNAT, inbound VPN may be unreachable\" }",
    ];
    let mut doc = RouterConfig::new();
    doc.push(
        IP_CLOUD,
        Command::set()
            .flag("ddns-enabled", true)
            .param("ddns-update-interval", "1m"),
    );
    doc.push(SYSTEM_SCRIPT, system_script(CGNAT_SCRIPT, &source));
    doc
}

fn letsencrypt_renewal() -> RouterConfig {
    let rule = format!("[find comment=\"{LETSENCRYPT_RULE_COMMENT}\"]");
    let enable = format!("/ip firewall filter enable {rule}");
    let disable = format!("/ip firewall filter disable {rule}");
    let assign = format!("/system script run {ASSIGN_SCRIPT}");
    let source = [
        ":local dns [/ip cloud get dns-name]",
        enable.as_str(),
        "/certificate enable-ssl-certificate dns-name=$dns",
        ":delay 60s",
        disable.as_str(),
        assign.as_str(),
    ];
    let mut doc = RouterConfig::new();
    doc.push(
        FIREWALL_FILTER,
        Command::add()
            .param("chain", "input")
            .param("in-interface-list", WAN_LIST)
            .param("protocol", "tcp")
            .param("dst-port", 80)
            .param("action", "accept")
            .flag("disabled", true)
            .comment(LETSENCRYPT_RULE_COMMENT),
    );
    doc.push(SYSTEM_SCRIPT, system_script(LETSENCRYPT_SCRIPT, &source));
    doc.push(
        SYSTEM_SCHEDULER,
        Command::add()
            .param("name", LETSENCRYPT_SCRIPT)
            .param("interval", "30d")
            .param("start-time", "startup")
            .param("on-event", LETSENCRYPT_SCRIPT),
    );
    doc
}

fn private_certificates(plan: &CertificatePlan) -> RouterConfig {
    let lines = [
        Command::add()
            .param("name", CA_CERTIFICATE)
            .text("common-name", &format!("{} CA", plan.common_name))
            .param("key-size", plan.key_size)
            .param("days-valid", plan.days_valid)
            .param("key-usage", "key-cert-sign,crl-sign")
            .build(),
        Command::add()
            .param("name", SERVER_CERTIFICATE)
            .text("common-name", &plan.common_name)
            .text("subject-alt-name", &format!("DNS:{}", plan.common_name))
            .param("key-size", plan.key_size)
            .param("days-valid", plan.days_valid)
            .param("key-usage", "tls-server")
            .build(),
        Command::add()
            .param("name", CLIENT_CERTIFICATE)
            .param("common-name", "vpn-client")
            .param("key-size", plan.key_size)
            .param("days-valid", plan.days_valid)
            .param("key-usage", "tls-client")
            .build(),
        Command::verb("sign").arg(CA_CERTIFICATE).build(),
        Command::verb("sign")
            .arg(SERVER_CERTIFICATE)
            .param("ca", CA_CERTIFICATE)
            .build(),
        Command::verb("sign")
            .arg(CLIENT_CERTIFICATE)
            .param("ca", CA_CERTIFICATE)
            .build(),
    ];
    RouterConfig::from_sections([(CERTIFICATE, lines)])
}

/// CA as PEM; the client certificate as PKCS#12 when a passphrase is set.
fn client_certificate_export(plan: &CertificatePlan) -> RouterConfig {
    let client = match &plan.export_passphrase {
        Some(passphrase) => Command::verb("export-certificate")
            .arg(CLIENT_CERTIFICATE)
            .param("type", "pkcs12")
            .quoted("export-passphrase", passphrase),
        None => Command::verb("export-certificate")
            .arg(CLIENT_CERTIFICATE)
            .param("type", "pem"),
    };
    let lines = [
        Command::verb("export-certificate")
            .arg(CA_CERTIFICATE)
            .param("type", "pem")
            .build(),
        client.build(),
    ];
    RouterConfig::from_sections([(CERTIFICATE, lines)])
}

/// Certificate a protocol was explicitly configured with, when it is not
/// the generated server certificate.
fn custom_certificate(server: &VpnServer, protocol: VpnType) -> Option<String> {
    let certificate = match protocol {
        VpnType::OpenVpn => server.openvpn.as_ref()?.resolve().certificate,
        VpnType::Sstp => server.sstp.as_ref()?.resolve().certificate,
        VpnType::Ikev2 => server.ikev2.as_ref()?.resolve().certificate,
        VpnType::Wireguard | VpnType::Pptp | VpnType::L2tp => return None,
    };
    (certificate != SERVER_CERTIFICATE).then_some(certificate)
}

fn uses_preshared_key(server: &VpnServer) -> bool {
    server
        .ikev2
        .as_ref()
        .is_some_and(|c| c.resolve().auth_method == Ikev2AuthMethod::PreSharedKey)
}

/// Prefer a valid Let's Encrypt certificate, else the private one.
/// Servers configured with their own certificate are left alone.
fn certificate_assignment(server: &VpnServer, protocols: &[VpnType]) -> RouterConfig {
    let mut source = vec![
        format!(":local cert \"{SERVER_CERTIFICATE}\""),
        ":local le [/certificate find where name~\"letsencrypt\" and expired=no]".to_string(),
        ":if ([:len $le] > 0) do={ :set cert [/certificate get ($le->0) name] }".to_string(),
    ];
    for protocol in protocols {
        if let Some(custom) = custom_certificate(server, *protocol) {
            source.push(format!(":log info \"VPN: {protocol} keeps certificate {custom}\""));
            continue;
        }
        match protocol {
            VpnType::OpenVpn => {
                source.push("/interface ovpn-server server set certificate=$cert".to_string())
            }
            VpnType::Sstp => {
                source.push("/interface sstp-server server set certificate=$cert".to_string())
            }
            VpnType::Ikev2 if uses_preshared_key(server) => {}
            VpnType::Ikev2 => source.push(format!(
                "/ip ipsec identity set [find peer={IKEV2_PEER}] certificate=$cert"
            )),
            VpnType::Wireguard | VpnType::Pptp | VpnType::L2tp => {}
        }
    }
    let source: Vec<&str> = source.iter().map(String::as_str).collect();
    RouterConfig::from_sections([(SYSTEM_SCRIPT, [system_script(ASSIGN_SCRIPT, &source)])])
}
