use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Subnets, Tunnel, VpnServer};

/// Everything a generation run reads from one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationInput {
    #[serde(alias = "VPNServer")]
    pub vpn_server: Option<VpnServer>,
    #[serde(alias = "Subnets")]
    pub subnets: Option<Subnets>,
    #[serde(alias = "Tunnels")]
    pub tunnels: Vec<Tunnel>,
}

/// Errors returned when loading input files.
#[derive(Debug, Error)]
pub enum InputLoadError {
    #[error("failed to read input file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse TOML input {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to parse JSON input {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("unsupported input format for {path}: expected .toml or .json")]
    UnknownFormat { path: String },
}

/// Input file syntax, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(InputFormat::Toml),
            "json" => Some(InputFormat::Json),
            _ => None,
        }
    }
}

/// Load a generation input from a `.toml` or `.json` file.
pub fn load_input(path: &Path) -> Result<GenerationInput, InputLoadError> {
    let display = path.display().to_string();
    let format = InputFormat::from_path(path).ok_or_else(|| InputLoadError::UnknownFormat {
        path: display.clone(),
    })?;
    let raw = fs::read_to_string(path).map_err(|source| InputLoadError::Io {
        path: display.clone(),
        source,
    })?;
    parse_input(&raw, format, display)
}

pub fn parse_input(
    raw: &str,
    format: InputFormat,
    path: String,
) -> Result<GenerationInput, InputLoadError> {
    match format {
        InputFormat::Toml => {
            toml::from_str(raw).map_err(|source| InputLoadError::Toml { path, source })
        }
        InputFormat::Json => {
            serde_json::from_str(raw).map_err(|source| InputLoadError::Json { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{load_input, parse_input, InputFormat, InputLoadError};
    use crate::model::{Tunnel, VpnType};

    #[test]
    fn parses_toml_input() {
        let raw = r#"
            [vpn_server]
            [[vpn_server.users]]
            username = "alice"
            password = "pw"
            vpn_types = ["PPTP", "Wireguard"]

            [vpn_server.pptp]
            max_mtu = 1400

            [subnets.base_networks.split]
            name = "Split"
            subnet = "192.168.10.0/24"

            [[tunnels]]
            type = "gre"
            remote_address = "203.0.113.7"
        "#;
        let input = parse_input(raw, InputFormat::Toml, "inline".to_string()).expect("parse");
        let server = input.vpn_server.expect("server");
        assert!(server.users[0].allows(VpnType::Wireguard));
        assert_eq!(server.pptp.and_then(|p| p.max_mtu), Some(1400));
        assert!(input.subnets.expect("subnets").base_networks.split.is_some());
        assert!(matches!(input.tunnels[0], Tunnel::Gre(_)));
    }

    #[test]
    fn parses_json_with_original_field_names() {
        let raw = r#"{
            "VPNServer": {
                "Users": [{"Username": "bob", "Password": "pw", "VPNType": ["SSTP"]}],
                "sstp": {}
            },
            "Subnets": {"BaseNetworks": {"VPN": {"name": "", "subnet": "10.8.0.0/24"}}}
        }"#;
        let input = parse_input(raw, InputFormat::Json, "inline".to_string()).expect("parse");
        let server = input.vpn_server.expect("server");
        assert_eq!(server.users[0].username, "bob");
        assert!(server.sstp.is_some());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_input(Path::new("router.yaml")).expect_err("unknown format");
        assert!(matches!(err, InputLoadError::UnknownFormat { .. }));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[vpn_server\n").expect("write");
        let err = load_input(&path).expect_err("parse error");
        assert!(matches!(err, InputLoadError::Toml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
