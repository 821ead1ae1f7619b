use ros_script_core::{format_boolean_value, merge_router_configs, RouterConfig};
use tracing::warn;

use crate::addressing::SubnetPlan;
use crate::builders::{address_list, ip_pool, ppp_profile, ppp_secret};
use crate::model::{users_for, Credentials, VpnType};
use crate::section::{
    COMMENTS, FIREWALL_ADDRESS_LIST, IP_POOL, PPP_PROFILE, PPP_SECRET, VPN_SERVER_ADDRESS_LIST,
};

pub fn no_users_line(vpn_type: VpnType) -> String {
    format!("# No users configured for {vpn_type}")
}

/// Plan of the fixed client subnet for `vpn_type`.
pub(super) fn server_plan(vpn_type: VpnType) -> Option<SubnetPlan> {
    let plan = SubnetPlan::parse(vpn_type.server_subnet());
    if plan.is_none() {
        warn!(protocol = %vpn_type, "server subnet has no room for a pool");
    }
    plan
}

/// Pool covering the protocol subnet plus the `VPN-SERVER` address-list
/// entry. Returns the plan for callers that need the gateway.
pub(super) fn client_pool(vpn_type: VpnType, pool: &str) -> (RouterConfig, Option<SubnetPlan>) {
    let mut doc = RouterConfig::new();
    let plan = server_plan(vpn_type);
    if let Some(plan) = &plan {
        doc.push(IP_POOL, ip_pool(pool, &plan.pool_range()));
        doc.push(
            FIREWALL_ADDRESS_LIST,
            address_list(
                VPN_SERVER_ADDRESS_LIST,
                &plan.net.to_string(),
                &format!("{vpn_type} clients"),
            ),
        );
    }
    (doc, plan)
}

/// Pool, PPP profile and address-list entry shared by PPP servers.
pub(super) fn ppp_addressing(vpn_type: VpnType, profile: &str) -> RouterConfig {
    let service = vpn_type.ppp_service().unwrap_or("ppp");
    let pool = format!("{service}-pool");
    let (mut doc, plan) = client_pool(vpn_type, &pool);
    if let Some(plan) = plan {
        doc.push(
            PPP_PROFILE,
            ppp_profile(profile, &plan.gateway.to_string(), &pool),
        );
    }
    doc
}

/// `/ppp secret` entries for the credentials allowed on `vpn_type`.
pub(super) fn ppp_users(users: &[Credentials], vpn_type: VpnType, profile: &str) -> RouterConfig {
    let service = vpn_type.ppp_service().unwrap_or("any");
    let matched = users_for(users, vpn_type);
    let lines: Vec<String> = if matched.is_empty() {
        vec![no_users_line(vpn_type)]
    } else {
        matched
            .iter()
            .map(|u| ppp_secret(&u.username, &u.password, profile, service))
            .collect()
    };
    RouterConfig::from_sections([(PPP_SECRET, lines)])
}

pub(super) fn protocol_summary(
    vpn_type: VpnType,
    enabled: bool,
    profile: &str,
    matched_users: usize,
) -> Vec<String> {
    vec![
        format!("# {vpn_type} Server"),
        format!("# Enabled: {}", format_boolean_value(enabled)),
        format!("# Profile: {profile}"),
        format!("# Users: {matched_users}"),
    ]
}

/// Server block plus users (when any were given) with the summary
/// unshifted into the comment section.
pub(super) fn wrap_protocol(
    server: RouterConfig,
    users: &[Credentials],
    users_doc: impl FnOnce(&[Credentials]) -> RouterConfig,
    summary: Vec<String>,
) -> RouterConfig {
    let mut doc = if users.is_empty() {
        server
    } else {
        merge_router_configs([&server, &users_doc(users)])
    };
    doc.unshift(COMMENTS, summary);
    doc
}
