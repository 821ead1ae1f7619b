use pretty_assertions::assert_eq;
use ros_script_core::RouterConfig;

use super::*;
use crate::model::{
    Credentials, Ikev2ServerConfig, L2tpServerConfig, OpenVpnServerConfig, PptpServerConfig,
    SstpServerConfig, VpnServer, VpnType, WireguardInterfaceConfig,
};

fn users() -> Vec<Credentials> {
    vec![
        Credentials::new("alice", "a-pass", [VpnType::OpenVpn, VpnType::Wireguard]),
        Credentials::new("bob", "b-pass", [VpnType::Pptp]),
        Credentials::new("carol", "c-pass", [VpnType::OpenVpn, VpnType::Ikev2]),
    ]
}

fn lines<'a>(doc: &'a RouterConfig, key: &str) -> &'a [String] {
    doc.get(key).unwrap_or_else(|| panic!("missing section {key:?}"))
}

#[test]
fn wrapper_without_users_is_a_single_comment() {
    let expected = RouterConfig::from_sections([("", ["# No VPN users configured"])]);
    assert_eq!(vpn_server_wrapper(Some(&VpnServer::default())), expected);
    assert_eq!(vpn_server_wrapper(None), expected);
    assert_eq!(vpn_server_users_wrapper(None), expected);
}

#[test]
fn wrapper_without_protocols_is_a_single_comment() {
    let server = VpnServer {
        users: users(),
        ..VpnServer::default()
    };
    assert_eq!(
        vpn_server_wrapper(Some(&server)),
        RouterConfig::from_sections([("", ["# No VPN protocols configured"])])
    );
}

#[test]
fn openvpn_users_match_only_openvpn_credentials() {
    let doc = openvpn_server_users(&users());
    assert_eq!(
        lines(&doc, "/ppp secret"),
        [
            r#"add name="alice" password="a-pass" profile=ovpn-profile service=ovpn"#,
            r#"add name="carol" password="c-pass" profile=ovpn-profile service=ovpn"#,
        ]
    );

    let none = openvpn_server_users(&[Credentials::new("dave", "d", [VpnType::Sstp])]);
    assert_eq!(
        lines(&none, "/ppp secret"),
        ["# No users configured for OpenVPN"]
    );
}

#[test]
fn pptp_server_applies_defaults() {
    let doc = pptp_server(&PptpServerConfig::default());
    assert_eq!(
        lines(&doc, "/interface pptp-server server"),
        ["set enabled=yes authentication=mschap2,mschap1 default-profile=pptp-profile keepalive-timeout=30 max-mtu=1450 max-mru=1450"]
    );
    assert_eq!(
        lines(&doc, "/ip pool"),
        ["add name=pptp-pool ranges=192.168.70.2-192.168.70.254"]
    );
    assert_eq!(
        lines(&doc, "/ppp profile"),
        ["add name=pptp-profile local-address=192.168.70.1 remote-address=pptp-pool dns-server=192.168.70.1 use-encryption=yes"]
    );
    assert_eq!(lines(&doc, "/ip firewall filter").len(), 2);
    assert_eq!(
        lines(&doc, "/ip firewall address-list"),
        [r#"add list=VPN-SERVER address=192.168.70.0/24 comment="PPTP clients""#]
    );
}

#[test]
fn disabled_server_keeps_its_block() {
    let config = PptpServerConfig {
        enabled: Some(false),
        ..PptpServerConfig::default()
    };
    let doc = pptp_server(&config);
    assert!(lines(&doc, "/interface pptp-server server")[0].starts_with("set enabled=no "));
}

#[test]
fn protocol_wrapper_prepends_summary() {
    let doc = pptp_server_wrapper(&PptpServerConfig::default(), &users());
    assert_eq!(doc.keys().next(), Some(""));
    assert_eq!(
        lines(&doc, ""),
        [
            "# PPTP Server",
            "# Enabled: yes",
            "# Profile: pptp-profile",
            "# Users: 1",
        ]
    );
    assert_eq!(
        lines(&doc, "/ppp secret"),
        [r#"add name="bob" password="b-pass" profile=pptp-profile service=pptp"#]
    );
}

#[test]
fn protocol_wrapper_without_users_skips_secrets() {
    let doc = sstp_server_wrapper(&SstpServerConfig::default(), &[]);
    assert!(!doc.contains("/ppp secret"));
    assert_eq!(lines(&doc, "")[3], "# Users: 0");
}

#[test]
fn l2tp_ipsec_opens_ike_and_esp() {
    let plain = l2tp_server(&L2tpServerConfig::default());
    assert_eq!(lines(&plain, "/ip firewall filter").len(), 1);
    assert!(lines(&plain, "/interface l2tp-server server")[0]
        .contains("use-ipsec=no keepalive-timeout=30"));

    let secured = l2tp_server(&L2tpServerConfig {
        ipsec_secret: Some("s3cret".to_string()),
        ..L2tpServerConfig::default()
    });
    assert_eq!(lines(&secured, "/ip firewall filter").len(), 3);
    assert!(lines(&secured, "/interface l2tp-server server")[0]
        .contains(r#"use-ipsec=yes ipsec-secret="s3cret""#));
    assert!(lines(&secured, "/interface l2tp-server server")[0].contains("max-sessions=unlimited"));
}

#[test]
fn ikev2_users_only_touch_comments() {
    let doc = ikev2_server_users(&users());
    assert_eq!(doc.keys().collect::<Vec<_>>(), [""]);
    assert!(lines(&doc, "").iter().any(|l| l == "#   carol"));
    assert!(!lines(&doc, "").iter().any(|l| l.contains("alice")));

    let none = ikev2_server_users(&[]);
    assert_eq!(lines(&none, ""), ["# No users configured for IKEv2"]);
}

#[test]
fn ikev2_server_uses_certificate_identity() {
    let doc = ikev2_server(&Ikev2ServerConfig::default());
    assert_eq!(
        lines(&doc, "/ip ipsec identity"),
        ["add peer=ike2-peer auth-method=digital-signature certificate=vpn-server-cert generate-policy=port-strict mode-config=ike2-modeconf policy-template-group=ike2-policies"]
    );
    assert!(lines(&doc, "/ip ipsec peer")[0].contains("exchange-mode=ike2 passive=yes"));
    assert_eq!(
        lines(&doc, "/ip pool"),
        ["add name=ike2-pool ranges=192.168.77.2-192.168.77.254"]
    );
}

#[test]
fn wireguard_peers_get_sequential_addresses() {
    let doc = wireguard_server_users(&users());
    assert_eq!(
        lines(&doc, "/interface wireguard peers"),
        [r#"add interface=wireguard-server name="alice" allowed-address=192.168.170.2/32 client-address=192.168.170.2/32 private-key="auto" comment="alice""#]
    );
    let server = wireguard_server(&WireguardInterfaceConfig::default());
    assert_eq!(
        lines(&server, "/interface wireguard"),
        ["add name=wireguard-server listen-port=13231 mtu=1420 disabled=no"]
    );
}

#[test]
fn certificates_skip_when_no_protocol_needs_them() {
    let server = VpnServer {
        users: users(),
        pptp: Some(PptpServerConfig::default()),
        ..VpnServer::default()
    };
    assert_eq!(
        vpn_server_certificate(&server),
        RouterConfig::from_sections([("", ["# No certificate-based VPN protocols configured"])])
    );
}

#[test]
fn certificates_run_steps_in_order() {
    let server = VpnServer {
        users: users(),
        sstp: Some(SstpServerConfig::default()),
        openvpn: Some(OpenVpnServerConfig::default()),
        ..VpnServer::default()
    };
    let doc = vpn_server_certificate(&server);
    assert_eq!(lines(&doc, "")[0], "# Certificates for: OpenVPN, SSTP");
    let scripts = lines(&doc, "/system script");
    assert_eq!(scripts.len(), 3);
    assert!(scripts[0].starts_with("add name=check-cgnat "));
    assert!(scripts[1].starts_with("add name=renew-letsencrypt "));
    assert!(scripts[2].starts_with("add name=assign-vpn-certificates "));
    assert!(scripts[2].contains("ovpn-server"));
    assert!(!scripts[2].contains("ipsec identity"));

    let certs = lines(&doc, "/certificate");
    assert!(certs[0].starts_with("add name=vpn-ca "));
    assert_eq!(certs[3], "sign vpn-ca");
    assert_eq!(certs.last().map(String::as_str), Some("export-certificate vpn-client-cert type=pem"));
}

#[test]
fn assignment_leaves_custom_certificates_alone() {
    let server = VpnServer {
        users: users(),
        sstp: Some(SstpServerConfig {
            certificate: Some("my-cert".to_string()),
            ..SstpServerConfig::default()
        }),
        openvpn: Some(OpenVpnServerConfig::default()),
        ..VpnServer::default()
    };
    let doc = vpn_server_certificate(&server);
    let assign = &lines(&doc, "/system script")[2];
    assert!(assign.contains("/interface ovpn-server server set certificate="));
    assert!(!assign.contains("/interface sstp-server server set"));
    assert!(assign.contains("SSTP keeps certificate my-cert"));
}

#[test]
fn static_binding_covers_ppp_users() {
    let server = VpnServer {
        users: users(),
        pptp: Some(PptpServerConfig::default()),
        openvpn: Some(OpenVpnServerConfig::default()),
        ikev2: Some(Ikev2ServerConfig::default()),
        ..VpnServer::default()
    };
    let doc = static_interface_binding(&server);
    assert_eq!(doc.keys().next(), Some("/interface list"));
    assert_eq!(
        lines(&doc, "/interface ovpn-server"),
        ["add name=ovpn-alice user=alice", "add name=ovpn-carol user=carol"]
    );
    assert_eq!(lines(&doc, "/interface pptp-server"), ["add name=pptp-bob user=bob"]);
    assert_eq!(lines(&doc, "/interface list member").len(), 3);
}

#[test]
fn inbound_marking_covers_every_listener() {
    let server = VpnServer {
        users: users(),
        wireguard: Some(WireguardInterfaceConfig::default()),
        pptp: Some(PptpServerConfig::default()),
        ..VpnServer::default()
    };
    let mangle = lines(&inbound_marking(&server), "/ip firewall mangle").to_vec();
    assert_eq!(mangle.len(), 4);
    assert!(mangle[0].contains("protocol=udp dst-port=13231"));
    assert!(mangle[2].contains("protocol=gre connection-state=new"));
    assert!(mangle[3].contains("chain=output connection-mark=vpn-inbound"));
}

#[test]
fn full_wrapper_frames_output() {
    let server = VpnServer {
        users: users(),
        wireguard: Some(WireguardInterfaceConfig::default()),
        pptp: Some(PptpServerConfig::default()),
        ..VpnServer::default()
    };
    let doc = vpn_server_wrapper(Some(&server));
    let keys: Vec<&str> = doc.keys().collect();
    assert_eq!(keys.first(), Some(&""));
    assert_eq!(keys.last(), Some(&"# Summary"));

    let comments = lines(&doc, "");
    assert_eq!(
        &comments[..9],
        [
            "# VPN server configuration",
            "# Total users: 3",
            "# Protocols: WireGuard, PPTP",
            "# Users per protocol:",
            "#   WireGuard: 1",
            "#   PPTP: 1",
            "# Subnets:",
            "#   WireGuard: 192.168.170.0/24",
            "#   PPTP: 192.168.70.0/24",
        ]
    );
    assert_eq!(comments[9], "# No certificate-based VPN protocols configured");
    assert!(comments.iter().any(|l| l == "# WireGuard Server"));
    assert!(comments.iter().any(|l| l == "# PPTP Server"));
    assert_eq!(lines(&doc, "# Summary")[0], "# Next steps:");
}

#[test]
fn users_wrapper_merges_configured_protocols() {
    let server = VpnServer {
        users: users(),
        openvpn: Some(OpenVpnServerConfig::default()),
        l2tp: Some(L2tpServerConfig::default()),
        ..VpnServer::default()
    };
    let doc = vpn_server_users_wrapper(Some(&server));
    assert_eq!(
        lines(&doc, "/ppp secret"),
        [
            r#"add name="alice" password="a-pass" profile=ovpn-profile service=ovpn"#,
            r#"add name="carol" password="c-pass" profile=ovpn-profile service=ovpn"#,
            "# No users configured for L2TP",
        ]
    );
}

#[test]
fn users_wrapper_follows_server_settings() {
    let server = VpnServer {
        users: vec![Credentials::new("alice", "a-pass", [VpnType::Pptp, VpnType::Wireguard])],
        pptp: Some(PptpServerConfig {
            profile: Some("office".to_string()),
            ..PptpServerConfig::default()
        }),
        wireguard: Some(WireguardInterfaceConfig {
            name: Some("wg0".to_string()),
            address: Some("10.9.0.1/24".to_string()),
            ..WireguardInterfaceConfig::default()
        }),
        ..VpnServer::default()
    };
    let only_users = vpn_server_users_wrapper(Some(&server));
    let full = vpn_server_wrapper(Some(&server));

    assert_eq!(
        lines(&only_users, "/ppp secret"),
        [r#"add name="alice" password="a-pass" profile=office service=pptp"#]
    );
    assert_eq!(lines(&only_users, "/ppp secret"), lines(&full, "/ppp secret"));
    assert_eq!(
        lines(&only_users, "/interface wireguard peers"),
        lines(&full, "/interface wireguard peers")
    );
    assert!(lines(&only_users, "/interface wireguard peers")[0]
        .starts_with(r#"add interface=wg0 name="alice" allowed-address=10.9.0.2/32"#));
}
