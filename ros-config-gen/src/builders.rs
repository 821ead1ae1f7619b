//! Command-line builders.
//!
//! Every generator goes through these helpers so quoting and parameter
//! layout stay identical across sections.

use std::fmt::Display;

use ros_script_core::format_boolean_value;

use crate::section::WAN_LIST;

/// One RouterOS command line: a verb followed by `key=value` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    parts: Vec<String>,
}

impl Command {
    pub fn verb(verb: &str) -> Self {
        Self {
            parts: vec![verb.to_string()],
        }
    }

    pub fn add() -> Self {
        Self::verb("add")
    }

    pub fn set() -> Self {
        Self::verb("set")
    }

    /// Append a bare argument, e.g. a `[ find ... ]` selector.
    pub fn arg(mut self, arg: impl Display) -> Self {
        self.parts.push(arg.to_string());
        self
    }

    /// `key=value`, unquoted.
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.parts.push(format!("{key}={value}"));
        self
    }

    pub fn param_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn flag(self, key: &str, value: bool) -> Self {
        self.param(key, format_boolean_value(value))
    }

    /// `key="value"` with RouterOS escaping.
    pub fn quoted(mut self, key: &str, value: &str) -> Self {
        self.parts.push(format!("{key}={}", quote(value)));
        self
    }

    /// `key=value`, quoted only when the value needs it.
    pub fn text(mut self, key: &str, value: &str) -> Self {
        self.parts.push(format!("{key}={}", quote_if_needed(value)));
        self
    }

    pub fn comment(self, text: &str) -> Self {
        self.quoted("comment", text)
    }

    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.build()
    }
}

/// Double-quote a value, escaping `\`, `"`, `$` and line breaks.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Leave plain tokens bare and quote anything with spaces or specials.
pub fn quote_if_needed(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '/' | ','));
    if plain {
        value.to_string()
    } else {
        quote(value)
    }
}

/// `/ip pool add name=<name> ranges=<ranges>`
pub fn ip_pool(name: &str, ranges: &str) -> String {
    Command::add()
        .text("name", name)
        .param("ranges", ranges)
        .build()
}

/// Accept rule on the input chain for traffic arriving from WAN.
pub fn firewall_accept(protocol: &str, dst_port: Option<&str>, comment: &str) -> String {
    Command::add()
        .param("chain", "input")
        .param("in-interface-list", WAN_LIST)
        .param("protocol", protocol)
        .param_opt("dst-port", dst_port)
        .param("action", "accept")
        .comment(comment)
        .build()
}

pub fn address_list(list: &str, address: &str, comment: &str) -> String {
    Command::add()
        .text("list", list)
        .param("address", address)
        .comment(comment)
        .build()
}

/// PPP profile handing out addresses from `pool`, gateway as DNS.
pub fn ppp_profile(name: &str, local_address: &str, pool: &str) -> String {
    Command::add()
        .text("name", name)
        .param("local-address", local_address)
        .text("remote-address", pool)
        .param("dns-server", local_address)
        .flag("use-encryption", true)
        .build()
}

pub fn ppp_secret(username: &str, password: &str, profile: &str, service: &str) -> String {
    Command::add()
        .quoted("name", username)
        .quoted("password", password)
        .text("profile", profile)
        .param("service", service)
        .build()
}

/// `/system script` entry; source lines are joined with CRLF.
pub fn system_script(name: &str, source: &[&str]) -> String {
    Command::add()
        .text("name", name)
        .param("policy", "read,write,policy,test")
        .quoted("source", &source.join("\r\n"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::{firewall_accept, ppp_secret, quote, quote_if_needed, system_script, Command};

    #[test]
    fn command_joins_parts_in_order() {
        let line = Command::set()
            .flag("enabled", false)
            .param("port", 443)
            .param_opt::<u16>("mrru", None)
            .build();
        assert_eq!(line, "set enabled=no port=443");
    }

    #[test]
    fn quote_escapes_routeros_specials() {
        assert_eq!(quote(r#"a "b" $c \d"#), r#""a \"b\" \$c \\d""#);
        assert_eq!(quote("x\ny"), r#""x\ny""#);
    }

    #[test]
    fn plain_values_stay_bare() {
        assert_eq!(quote_if_needed("LAN-Bridge-Split"), "LAN-Bridge-Split");
        assert_eq!(quote_if_needed("Home Office"), r#""Home Office""#);
        assert_eq!(quote_if_needed(""), r#""""#);
    }

    #[test]
    fn ppp_secret_quotes_credentials() {
        assert_eq!(
            ppp_secret("al ice", "p\"w", "pptp-profile", "pptp"),
            r#"add name="al ice" password="p\"w" profile=pptp-profile service=pptp"#
        );
    }

    #[test]
    fn firewall_accept_omits_missing_port() {
        assert_eq!(
            firewall_accept("gre", None, "PPTP GRE"),
            r#"add chain=input in-interface-list=WAN protocol=gre action=accept comment="PPTP GRE""#
        );
    }

    #[test]
    fn system_script_encodes_line_breaks() {
        let line = system_script("s", &[":log info a", ":log info b"]);
        assert!(line.ends_with(r#"source=":log info a\r\n:log info b""#));
    }
}
