use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        FalseyValueParser, ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("vouchd")
        .about("Credential verification service")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("backend")
                .short('b')
                .long("backend")
                .help("Backend used to verify credentials")
                .default_value("vault")
                .value_parser(["vault", "ldap"]),
        )
        .arg(
            Arg::new("vault-addr")
                .long("vault-addr")
                .help("Vault base URL, example: https://vault.tld:8200")
                .env("VAULT_ADDR"),
        )
        .arg(
            Arg::new("vault-token")
                .long("vault-token")
                .help("Vault access token")
                .env("VAULT_TOKEN"),
        )
        .arg(
            Arg::new("ldap-host")
                .long("ldap-host")
                .help("Directory host, reached on port 389")
                .env("LDAP_HOST"),
        )
        .arg(
            Arg::new("ldap-admin")
                .long("ldap-admin")
                .help("Administrative bind DN")
                .env("LDAP_ADMIN"),
        )
        .arg(
            Arg::new("ldap-password")
                .long("ldap-password")
                .help("Administrative bind password")
                .env("LDAP_PASSWORD"),
        )
        .arg(
            Arg::new("ldap-base-dn")
                .long("ldap-base-dn")
                .help("Base DN for the user search")
                .default_value("dc=example,dc=com")
                .env("LDAP_BASE_DN"),
        )
        .arg(
            Arg::new("localhost-only")
                .long("localhost-only")
                .help("Bind the listener to loopback instead of all interfaces")
                .env("LOCALHOST_ONLY")
                .action(ArgAction::SetTrue)
                .value_parser(FalseyValueParser::new()),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("VOUCHD_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
