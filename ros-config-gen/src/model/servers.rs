use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::credentials::{Credentials, VpnType};

/// Declare a closed set of RouterOS parameter tokens.
macro_rules! routeros_token {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            /// RouterOS spelling of the value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

routeros_token!(
    /// PPP authentication protocols.
    AuthMethod {
        Pap => "pap",
        Chap => "chap",
        Mschap1 => "mschap1",
        Mschap2 => "mschap2",
    }
);

routeros_token!(
    /// L2TP `use-ipsec` modes.
    IpsecMode {
        No => "no",
        Yes => "yes",
        Required => "required",
    }
);

routeros_token!(
    TlsVersion {
        Any => "any",
        Only12 => "only-1.2",
        Only13 => "only-1.3",
    }
);

routeros_token!(
    SstpCipher {
        Aes256Sha => "aes256-sha",
        Aes256GcmSha384 => "aes256-gcm-sha384",
    }
);

routeros_token!(
    OvpnProtocol {
        Tcp => "tcp",
        Udp => "udp",
    }
);

routeros_token!(
    OvpnMode {
        Ip => "ip",
        Ethernet => "ethernet",
    }
);

routeros_token!(
    OvpnAuth {
        Md5 => "md5",
        Sha1 => "sha1",
        Sha256 => "sha256",
        Sha512 => "sha512",
        Null => "null",
    }
);

routeros_token!(
    OvpnCipher {
        Blowfish128 => "blowfish128",
        Aes128Cbc => "aes128-cbc",
        Aes192Cbc => "aes192-cbc",
        Aes256Cbc => "aes256-cbc",
        Aes128Gcm => "aes128-gcm",
        Aes192Gcm => "aes192-gcm",
        Aes256Gcm => "aes256-gcm",
        Null => "null",
    }
);

routeros_token!(
    /// Phase 1 hash algorithms.
    IkeHash {
        Sha1 => "sha1",
        Sha256 => "sha256",
        Sha512 => "sha512",
    }
);

routeros_token!(
    /// Phase 1 encryption algorithms.
    IkeEncryption {
        Aes128 => "aes-128",
        Aes192 => "aes-192",
        Aes256 => "aes-256",
    }
);

routeros_token!(
    DhGroup {
        Modp1024 => "modp1024",
        Modp2048 => "modp2048",
        Modp3072 => "modp3072",
        Ecp256 => "ecp256",
        Ecp384 => "ecp384",
    }
);

routeros_token!(
    /// Phase 2 proposal encryption algorithms.
    ProposalEncryption {
        Aes128Cbc => "aes-128-cbc",
        Aes256Cbc => "aes-256-cbc",
        Aes128Gcm => "aes-128-gcm",
        Aes256Gcm => "aes-256-gcm",
    }
);

routeros_token!(
    PfsGroup {
        Disabled => "none",
        Modp1024 => "modp1024",
        Modp2048 => "modp2048",
        Ecp256 => "ecp256",
    }
);

routeros_token!(
    Ikev2AuthMethod {
        DigitalSignature => "digital-signature",
        PreSharedKey => "pre-shared-key",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PptpServerConfig {
    pub enabled: Option<bool>,
    pub profile: Option<String>,
    pub authentication: Option<Vec<AuthMethod>>,
    pub keepalive_timeout: Option<u32>,
    pub max_mtu: Option<u16>,
    pub max_mru: Option<u16>,
    pub mrru: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct L2tpServerConfig {
    pub enabled: Option<bool>,
    pub profile: Option<String>,
    pub authentication: Option<Vec<AuthMethod>>,
    pub use_ipsec: Option<IpsecMode>,
    pub ipsec_secret: Option<String>,
    pub keepalive_timeout: Option<u32>,
    pub max_mtu: Option<u16>,
    pub max_mru: Option<u16>,
    pub one_session_per_host: Option<bool>,
    pub max_sessions: Option<u32>,
    pub allow_fast_path: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SstpServerConfig {
    pub enabled: Option<bool>,
    pub profile: Option<String>,
    pub port: Option<u16>,
    pub authentication: Option<Vec<AuthMethod>>,
    pub certificate: Option<String>,
    pub tls_version: Option<TlsVersion>,
    pub verify_client_certificate: Option<bool>,
    pub pfs: Option<bool>,
    pub ciphers: Option<Vec<SstpCipher>>,
    pub keepalive_timeout: Option<u32>,
    pub max_mtu: Option<u16>,
    pub max_mru: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenVpnServerConfig {
    pub enabled: Option<bool>,
    pub profile: Option<String>,
    pub port: Option<u16>,
    pub protocol: Option<OvpnProtocol>,
    pub mode: Option<OvpnMode>,
    pub netmask: Option<u8>,
    pub certificate: Option<String>,
    pub auth: Option<Vec<OvpnAuth>>,
    pub cipher: Option<Vec<OvpnCipher>>,
    pub require_client_certificate: Option<bool>,
    pub tls_version: Option<TlsVersion>,
    pub keepalive_timeout: Option<u32>,
    pub max_mtu: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ikev2ServerConfig {
    pub enabled: Option<bool>,
    pub certificate: Option<String>,
    pub hash_algorithm: Option<IkeHash>,
    pub enc_algorithm: Option<IkeEncryption>,
    pub dh_group: Option<DhGroup>,
    pub proposal_enc_algorithms: Option<Vec<ProposalEncryption>>,
    pub pfs_group: Option<PfsGroup>,
    pub lifetime: Option<String>,
    pub auth_method: Option<Ikev2AuthMethod>,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireguardInterfaceConfig {
    pub enabled: Option<bool>,
    pub name: Option<String>,
    pub listen_port: Option<u16>,
    pub mtu: Option<u16>,
    pub private_key: Option<String>,
    /// Interface address in CIDR form, e.g. `192.168.170.1/24`.
    pub address: Option<String>,
}

/// Certificate material generated for certificate-based protocols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateSettings {
    pub common_name: Option<String>,
    pub key_size: Option<u16>,
    pub days_valid: Option<u32>,
    pub export_passphrase: Option<String>,
}

/// VPN server settings: users plus one optional block per protocol.
///
/// A protocol counts as configured when its block is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnServer {
    #[serde(alias = "Users")]
    pub users: Vec<Credentials>,
    #[serde(alias = "WireguardServer")]
    pub wireguard: Option<WireguardInterfaceConfig>,
    #[serde(alias = "OpenVpnServer")]
    pub openvpn: Option<OpenVpnServerConfig>,
    #[serde(alias = "PptpServer")]
    pub pptp: Option<PptpServerConfig>,
    #[serde(alias = "L2tpServer")]
    pub l2tp: Option<L2tpServerConfig>,
    #[serde(alias = "SstpServer")]
    pub sstp: Option<SstpServerConfig>,
    #[serde(alias = "Ikev2Server")]
    pub ikev2: Option<Ikev2ServerConfig>,
    pub certificate: CertificateSettings,
}

impl VpnServer {
    /// Configured protocols in processing order.
    pub fn configured_protocols(&self) -> Vec<VpnType> {
        VpnType::ALL
            .into_iter()
            .filter(|t| self.is_configured(*t))
            .collect()
    }

    pub fn is_configured(&self, vpn_type: VpnType) -> bool {
        match vpn_type {
            VpnType::Wireguard => self.wireguard.is_some(),
            VpnType::OpenVpn => self.openvpn.is_some(),
            VpnType::Pptp => self.pptp.is_some(),
            VpnType::L2tp => self.l2tp.is_some(),
            VpnType::Sstp => self.sstp.is_some(),
            VpnType::Ikev2 => self.ikev2.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthMethod, OvpnCipher, VpnServer};
    use crate::model::VpnType;

    #[test]
    fn tokens_round_trip_through_serde() {
        let parsed: Vec<AuthMethod> =
            serde_json::from_str(r#"["mschap2","pap"]"#).expect("auth methods");
        assert_eq!(parsed, [AuthMethod::Mschap2, AuthMethod::Pap]);
        assert_eq!(OvpnCipher::Aes256Gcm.to_string(), "aes256-gcm");
    }

    #[test]
    fn configured_protocols_follow_processing_order() {
        let server: VpnServer = toml::from_str(
            r#"
            [sstp]
            [wireguard]
            [pptp]
            "#,
        )
        .expect("server");
        assert_eq!(
            server.configured_protocols(),
            [VpnType::Wireguard, VpnType::Pptp, VpnType::Sstp]
        );
    }
}
