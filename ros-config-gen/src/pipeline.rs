use ros_script_core::{command_shortener, merge_router_configs, RouterConfig};
use tracing::debug;

use crate::input::GenerationInput;
use crate::networks::networks;
use crate::tunnels::tunnels;
use crate::vpn::{vpn_server_users_wrapper, vpn_server_wrapper};

/// Which parts of the input to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Vpn,
    Users,
    Networks,
    Tunnels,
}

/// Generate the requested parts of `input` and merge them in a fixed
/// order: networks, tunnels, VPN. The shortener runs once at the end.
pub fn generate(input: &GenerationInput, scope: Scope, shorten: bool) -> RouterConfig {
    let mut docs = Vec::new();

    if matches!(scope, Scope::All | Scope::Networks) {
        if let Some(subnets) = &input.subnets {
            docs.push(networks(subnets));
        }
    }
    if matches!(scope, Scope::All | Scope::Tunnels) && !input.tunnels.is_empty() {
        docs.push(tunnels(&input.tunnels));
    }
    match scope {
        Scope::All if input.vpn_server.is_some() => {
            docs.push(vpn_server_wrapper(input.vpn_server.as_ref()))
        }
        Scope::Vpn => docs.push(vpn_server_wrapper(input.vpn_server.as_ref())),
        Scope::Users => docs.push(vpn_server_users_wrapper(input.vpn_server.as_ref())),
        _ => {}
    }

    let merged = merge_router_configs(&docs);
    debug!(
        sections = merged.len(),
        lines = merged.line_count(),
        "generation merged"
    );
    if shorten {
        command_shortener(&merged)
    } else {
        merged
    }
}
