use crate::cli::{
    actions::Action,
    globals::{Backend, GlobalArgs},
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let backend = matches
        .get_one::<String>("backend")
        .map_or("vault", String::as_str)
        .parse::<Backend>()
        .map_err(|e| anyhow!(e))?;

    // Absent values become empty strings and fail at the backend, the
    // listener itself never refuses to start over configuration.
    let string_arg = |name: &str| -> String {
        matches
            .get_one::<String>(name)
            .cloned()
            .unwrap_or_default()
    };

    let globals = GlobalArgs {
        backend,
        vault_addr: string_arg("vault-addr"),
        vault_token: SecretString::from(string_arg("vault-token")),
        ldap_host: string_arg("ldap-host"),
        ldap_admin: string_arg("ldap-admin"),
        ldap_password: SecretString::from(string_arg("ldap-password")),
        ldap_base_dn: string_arg("ldap-base-dn"),
        localhost_only: matches.get_flag("localhost-only"),
    };

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        globals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults_to_vault_backend() {
        temp_env::with_vars(
            [
                ("VAULT_ADDR", Some("https://vault.tld:8200")),
                ("VAULT_TOKEN", Some("hvs.test")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["vouchd"]);
                let action = handler(&matches).unwrap();

                let Action::Server { port, globals } = action;
                assert_eq!(port, 8080);
                assert_eq!(globals.backend, Backend::Vault);
                assert_eq!(globals.vault_addr, "https://vault.tld:8200");
                assert_eq!(globals.vault_token.expose_secret(), "hvs.test");
            },
        );
    }

    #[test]
    fn test_ldap_backend_arguments() {
        temp_env::with_vars(
            [
                ("LDAP_HOST", Some("ldap.tld")),
                ("LDAP_ADMIN", Some("cn=admin,dc=example,dc=com")),
                ("LDAP_PASSWORD", Some("admin-secret")),
                ("LDAP_BASE_DN", Some("dc=corp,dc=example,dc=com")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "vouchd",
                    "--backend",
                    "ldap",
                    "--port",
                    "9000",
                ]);
                let action = handler(&matches).unwrap();

                let Action::Server { port, globals } = action;
                assert_eq!(port, 9000);
                assert_eq!(globals.backend, Backend::Ldap);
                assert_eq!(globals.ldap_host, "ldap.tld");
                assert_eq!(globals.ldap_admin, "cn=admin,dc=example,dc=com");
                assert_eq!(globals.ldap_password.expose_secret(), "admin-secret");
                assert_eq!(globals.ldap_base_dn, "dc=corp,dc=example,dc=com");
            },
        );
    }

    #[test]
    fn test_missing_configuration_degrades_to_empty() {
        temp_env::with_vars(
            [
                ("VAULT_ADDR", None::<&str>),
                ("VAULT_TOKEN", None),
                ("LDAP_HOST", None),
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["vouchd"]);
                let action = handler(&matches).unwrap();

                let Action::Server { globals, .. } = action;
                assert_eq!(globals.vault_addr, "");
                assert_eq!(globals.ldap_host, "");
            },
        );
    }
}
