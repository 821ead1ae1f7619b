//! Defaulting pass for protocol configs.
//!
//! Each input config resolves once into a settings struct with every field
//! populated. Generators only ever see the resolved form.

use crate::model::{
    AuthMethod, CertificateSettings, DhGroup, IkeEncryption, IkeHash, Ikev2AuthMethod,
    Ikev2ServerConfig, IpsecMode, L2tpServerConfig, OpenVpnServerConfig, OvpnAuth, OvpnCipher,
    OvpnMode, OvpnProtocol, PfsGroup, PptpServerConfig, ProposalEncryption, SstpCipher,
    SstpServerConfig, TlsVersion, WireguardInterfaceConfig,
};

pub const DEFAULT_KEEPALIVE_TIMEOUT: u32 = 30;
pub const DEFAULT_PPP_MTU: u16 = 1450;
pub const SERVER_CERTIFICATE: &str = "vpn-server-cert";
pub const CA_CERTIFICATE: &str = "vpn-ca";
pub const CLIENT_CERTIFICATE: &str = "vpn-client-cert";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PptpSettings {
    pub enabled: bool,
    pub profile: String,
    pub authentication: Vec<AuthMethod>,
    pub keepalive_timeout: u32,
    pub max_mtu: u16,
    pub max_mru: u16,
    pub mrru: Option<u16>,
}

impl PptpServerConfig {
    pub fn resolve(&self) -> PptpSettings {
        PptpSettings {
            enabled: self.enabled.unwrap_or(true),
            profile: text_or(&self.profile, "pptp-profile"),
            authentication: list_or(
                &self.authentication,
                &[AuthMethod::Mschap2, AuthMethod::Mschap1],
            ),
            keepalive_timeout: self.keepalive_timeout.unwrap_or(DEFAULT_KEEPALIVE_TIMEOUT),
            max_mtu: self.max_mtu.unwrap_or(DEFAULT_PPP_MTU),
            max_mru: self.max_mru.unwrap_or(DEFAULT_PPP_MTU),
            mrru: self.mrru,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2tpSettings {
    pub enabled: bool,
    pub profile: String,
    pub authentication: Vec<AuthMethod>,
    pub use_ipsec: IpsecMode,
    pub ipsec_secret: Option<String>,
    pub keepalive_timeout: u32,
    pub max_mtu: u16,
    pub max_mru: u16,
    pub one_session_per_host: bool,
    /// `None` renders as `unlimited`.
    pub max_sessions: Option<u32>,
    pub allow_fast_path: bool,
}

impl L2tpServerConfig {
    pub fn resolve(&self) -> L2tpSettings {
        let ipsec_secret = non_empty(&self.ipsec_secret);
        let use_ipsec = self.use_ipsec.unwrap_or(if ipsec_secret.is_some() {
            IpsecMode::Yes
        } else {
            IpsecMode::No
        });
        L2tpSettings {
            enabled: self.enabled.unwrap_or(true),
            profile: text_or(&self.profile, "l2tp-profile"),
            authentication: list_or(&self.authentication, &[AuthMethod::Mschap2]),
            use_ipsec,
            ipsec_secret,
            keepalive_timeout: self.keepalive_timeout.unwrap_or(DEFAULT_KEEPALIVE_TIMEOUT),
            max_mtu: self.max_mtu.unwrap_or(DEFAULT_PPP_MTU),
            max_mru: self.max_mru.unwrap_or(DEFAULT_PPP_MTU),
            one_session_per_host: self.one_session_per_host.unwrap_or(false),
            max_sessions: self.max_sessions,
            allow_fast_path: self.allow_fast_path.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SstpSettings {
    pub enabled: bool,
    pub profile: String,
    pub port: u16,
    pub authentication: Vec<AuthMethod>,
    pub certificate: String,
    pub tls_version: TlsVersion,
    pub verify_client_certificate: bool,
    pub pfs: bool,
    pub ciphers: Vec<SstpCipher>,
    pub keepalive_timeout: u32,
    pub max_mtu: u16,
    pub max_mru: u16,
}

impl SstpServerConfig {
    pub fn resolve(&self) -> SstpSettings {
        SstpSettings {
            enabled: self.enabled.unwrap_or(true),
            profile: text_or(&self.profile, "sstp-profile"),
            port: self.port.unwrap_or(443),
            authentication: list_or(&self.authentication, &[AuthMethod::Mschap2]),
            certificate: text_or(&self.certificate, SERVER_CERTIFICATE),
            tls_version: self.tls_version.unwrap_or(TlsVersion::Only12),
            verify_client_certificate: self.verify_client_certificate.unwrap_or(false),
            pfs: self.pfs.unwrap_or(false),
            ciphers: list_or(
                &self.ciphers,
                &[SstpCipher::Aes256GcmSha384, SstpCipher::Aes256Sha],
            ),
            keepalive_timeout: self.keepalive_timeout.unwrap_or(DEFAULT_KEEPALIVE_TIMEOUT),
            max_mtu: self.max_mtu.unwrap_or(DEFAULT_PPP_MTU),
            max_mru: self.max_mru.unwrap_or(DEFAULT_PPP_MTU),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenVpnSettings {
    pub enabled: bool,
    pub profile: String,
    pub port: u16,
    pub protocol: OvpnProtocol,
    pub mode: OvpnMode,
    pub netmask: u8,
    pub certificate: String,
    pub auth: Vec<OvpnAuth>,
    pub cipher: Vec<OvpnCipher>,
    pub require_client_certificate: bool,
    pub tls_version: TlsVersion,
    pub keepalive_timeout: u32,
    pub max_mtu: u16,
}

impl OpenVpnServerConfig {
    pub fn resolve(&self) -> OpenVpnSettings {
        OpenVpnSettings {
            enabled: self.enabled.unwrap_or(true),
            profile: text_or(&self.profile, "ovpn-profile"),
            port: self.port.unwrap_or(1194),
            protocol: self.protocol.unwrap_or(OvpnProtocol::Udp),
            mode: self.mode.unwrap_or(OvpnMode::Ip),
            netmask: self.netmask.unwrap_or(24),
            certificate: text_or(&self.certificate, SERVER_CERTIFICATE),
            auth: list_or(&self.auth, &[OvpnAuth::Sha256]),
            cipher: list_or(&self.cipher, &[OvpnCipher::Aes256Gcm]),
            require_client_certificate: self.require_client_certificate.unwrap_or(false),
            tls_version: self.tls_version.unwrap_or(TlsVersion::Only12),
            keepalive_timeout: self.keepalive_timeout.unwrap_or(DEFAULT_KEEPALIVE_TIMEOUT),
            max_mtu: self.max_mtu.unwrap_or(DEFAULT_PPP_MTU),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ikev2Settings {
    pub enabled: bool,
    pub certificate: String,
    pub hash_algorithm: IkeHash,
    pub enc_algorithm: IkeEncryption,
    pub dh_group: DhGroup,
    pub proposal_enc_algorithms: Vec<ProposalEncryption>,
    pub pfs_group: PfsGroup,
    pub lifetime: String,
    pub auth_method: Ikev2AuthMethod,
    pub secret: Option<String>,
}

impl Ikev2ServerConfig {
    pub fn resolve(&self) -> Ikev2Settings {
        Ikev2Settings {
            enabled: self.enabled.unwrap_or(true),
            certificate: text_or(&self.certificate, SERVER_CERTIFICATE),
            hash_algorithm: self.hash_algorithm.unwrap_or(IkeHash::Sha256),
            enc_algorithm: self.enc_algorithm.unwrap_or(IkeEncryption::Aes256),
            dh_group: self.dh_group.unwrap_or(DhGroup::Modp2048),
            proposal_enc_algorithms: list_or(
                &self.proposal_enc_algorithms,
                &[ProposalEncryption::Aes256Cbc],
            ),
            pfs_group: self.pfs_group.unwrap_or(PfsGroup::Disabled),
            lifetime: text_or(&self.lifetime, "8h"),
            auth_method: self
                .auth_method
                .unwrap_or(Ikev2AuthMethod::DigitalSignature),
            secret: non_empty(&self.secret),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireguardSettings {
    pub enabled: bool,
    pub name: String,
    pub listen_port: u16,
    pub mtu: u16,
    pub private_key: Option<String>,
    pub address: String,
}

impl WireguardInterfaceConfig {
    pub fn resolve(&self) -> WireguardSettings {
        WireguardSettings {
            enabled: self.enabled.unwrap_or(true),
            name: text_or(&self.name, "wireguard-server"),
            listen_port: self.listen_port.unwrap_or(13231),
            mtu: self.mtu.unwrap_or(1420),
            private_key: non_empty(&self.private_key),
            address: text_or(&self.address, "192.168.170.1/24"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificatePlan {
    pub common_name: String,
    pub key_size: u16,
    pub days_valid: u32,
    pub export_passphrase: Option<String>,
}

impl CertificateSettings {
    pub fn resolve(&self) -> CertificatePlan {
        CertificatePlan {
            common_name: text_or(&self.common_name, "vpn-server"),
            key_size: self.key_size.unwrap_or(2048),
            days_valid: self.days_valid.unwrap_or(3650),
            export_passphrase: non_empty(&self.export_passphrase),
        }
    }
}

/// Blank secrets count as absent; anything else is kept byte for byte.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

/// Names and identifiers are trimmed before falling back.
fn text_or(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| fallback.to_string(), ToOwned::to_owned)
}

fn list_or<T: Copy>(value: &Option<Vec<T>>, fallback: &[T]) -> Vec<T> {
    match value {
        Some(items) if !items.is_empty() => items.clone(),
        _ => fallback.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        AuthMethod, IpsecMode, L2tpServerConfig, PptpServerConfig, WireguardInterfaceConfig,
    };

    #[test]
    fn pptp_defaults() {
        let settings = PptpServerConfig::default().resolve();
        assert!(settings.enabled);
        assert_eq!(settings.profile, "pptp-profile");
        assert_eq!(settings.keepalive_timeout, 30);
        assert_eq!(settings.max_mtu, 1450);
        assert_eq!(
            settings.authentication,
            [AuthMethod::Mschap2, AuthMethod::Mschap1]
        );
    }

    #[test]
    fn l2tp_ipsec_follows_secret() {
        let plain = L2tpServerConfig::default().resolve();
        assert_eq!(plain.use_ipsec, IpsecMode::No);

        let with_secret = L2tpServerConfig {
            ipsec_secret: Some("s3cret".to_string()),
            ..L2tpServerConfig::default()
        }
        .resolve();
        assert_eq!(with_secret.use_ipsec, IpsecMode::Yes);
    }

    #[test]
    fn blank_strings_fall_back_to_defaults() {
        let settings = WireguardInterfaceConfig {
            name: Some("  ".to_string()),
            private_key: Some(String::new()),
            ..WireguardInterfaceConfig::default()
        }
        .resolve();
        assert_eq!(settings.name, "wireguard-server");
        assert_eq!(settings.private_key, None);
    }

    #[test]
    fn secrets_keep_surrounding_whitespace() {
        let l2tp = L2tpServerConfig {
            ipsec_secret: Some(" pad ded ".to_string()),
            ..L2tpServerConfig::default()
        }
        .resolve();
        assert_eq!(l2tp.ipsec_secret.as_deref(), Some(" pad ded "));

        let wg = WireguardInterfaceConfig {
            name: Some(" wg0 ".to_string()),
            private_key: Some("key= ".to_string()),
            ..WireguardInterfaceConfig::default()
        }
        .resolve();
        assert_eq!(wg.private_key.as_deref(), Some("key= "));
        assert_eq!(wg.name, "wg0");
    }

    #[test]
    fn resolve_does_not_touch_input() {
        let input = PptpServerConfig {
            max_mtu: Some(1400),
            ..PptpServerConfig::default()
        };
        let before = input.clone();
        let _ = input.resolve();
        assert_eq!(input, before);
    }
}
