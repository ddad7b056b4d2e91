use secrecy::SecretString;
use std::str::FromStr;

/// Backend the `/auth` route checks credentials against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Vault,
    Ldap,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vault" => Ok(Self::Vault),
            "ldap" => Ok(Self::Ldap),
            _ => Err(format!("unknown backend: {s}")),
        }
    }
}

/// Process configuration, read once at startup and immutable thereafter.
/// Handlers receive it through an extension layer; there is no global state.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub backend: Backend,
    pub vault_addr: String,
    pub vault_token: SecretString,
    pub ldap_host: String,
    pub ldap_admin: String,
    pub ldap_password: SecretString,
    pub ldap_base_dn: String,
    pub localhost_only: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            vault_addr: String::new(),
            vault_token: SecretString::default(),
            ldap_host: String::new(),
            ldap_admin: String::new(),
            ldap_password: SecretString::default(),
            ldap_base_dn: String::new(),
            localhost_only: false,
        }
    }
}
