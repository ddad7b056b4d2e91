use ldap3::{
    ldap_escape, DerefAliases, Ldap, LdapConnAsync, LdapError, LdapResult, Scope, SearchEntry,
    SearchOptions,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

/// Standard directory port, the host is configurable but the port is not.
const LDAP_PORT: u16 = 389;

/// Entry located for a submitted username.
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub dn: String,
    pub uid: String,
    pub employee_number: String,
}

/// Outcome of a password verification. `RestoreFailed` means the submitted
/// password was correct but the connection could not be re-bound to the
/// administrative identity afterwards.
#[derive(Debug)]
pub enum PasswordCheck {
    Verified,
    Rejected(LdapError),
    RestoreFailed(LdapError),
}

/// One authentication exchange over a single directory connection.
///
/// The session owns the administrative credentials so that
/// [`verify_password`](Self::verify_password) can re-bind as the admin in the
/// same operation that checks the user's password; callers cannot verify a
/// password and leave the connection bound as the user.
pub struct DirectorySession {
    ldap: Ldap,
    admin_dn: String,
    admin_password: SecretString,
}

impl DirectorySession {
    /// Open a connection to the directory host.
    #[instrument(skip(admin_dn, admin_password))]
    pub async fn connect(
        host: &str,
        admin_dn: String,
        admin_password: SecretString,
    ) -> Result<Self, LdapError> {
        let url = format!("ldap://{host}:{LDAP_PORT}");

        let (conn, ldap) = LdapConnAsync::new(&url).await?;
        ldap3::drive!(conn);

        Ok(Self {
            ldap,
            admin_dn,
            admin_password,
        })
    }

    /// Bind with the administrative credentials.
    #[instrument(skip(self))]
    pub async fn bind_admin(&mut self) -> Result<(), LdapError> {
        self.ldap
            .simple_bind(&self.admin_dn, self.admin_password.expose_secret())
            .await?
            .success()?;

        Ok(())
    }

    /// Search the subtree for the person entry matching `username`.
    ///
    /// Returns `Ok(None)` when the search matched zero or multiple entries;
    /// an ambiguous or missing identity is an authentication failure, not an
    /// error, so that callers cannot learn whether an entry exists.
    #[instrument(skip(self, base_dn))]
    pub async fn find_user(
        &mut self,
        base_dn: &str,
        username: &str,
    ) -> Result<Option<DirectoryUser>, LdapError> {
        let filter = person_filter(username);

        let (entries, _res) = self
            .ldap
            .with_search_options(SearchOptions::new().deref(DerefAliases::Never))
            .search(
                base_dn,
                Scope::Subtree,
                &filter,
                vec!["dn", "uid", "employeeNumber"],
            )
            .await?
            .success()?;

        if entries.len() != 1 {
            debug!("search matched {} entries", entries.len());
            return Ok(None);
        }

        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };
        let entry = SearchEntry::construct(entry);

        let uid = first_attr(&entry, "uid");
        let employee_number = first_attr(&entry, "employeeNumber");

        Ok(Some(DirectoryUser {
            dn: entry.dn,
            uid,
            employee_number,
        }))
    }

    /// Check the submitted password by re-binding as the user's entry, then
    /// restore the administrative bind. The restore is always attempted once
    /// the user bind succeeds.
    #[instrument(skip(self, user, password))]
    pub async fn verify_password(&mut self, user: &DirectoryUser, password: &str) -> PasswordCheck {
        if let Err(err) = self
            .ldap
            .simple_bind(&user.dn, password)
            .await
            .and_then(LdapResult::success)
        {
            return PasswordCheck::Rejected(err);
        }

        match self
            .ldap
            .simple_bind(&self.admin_dn, self.admin_password.expose_secret())
            .await
            .and_then(LdapResult::success)
        {
            Ok(_) => PasswordCheck::Verified,
            Err(err) => PasswordCheck::RestoreFailed(err),
        }
    }

    /// Release the connection. Called on every verdict branch once a
    /// connection was opened.
    pub async fn close(mut self) {
        let _ = self.ldap.unbind().await;
    }
}

fn first_attr(entry: &SearchEntry, name: &str) -> String {
    entry
        .attrs
        .get(name)
        .and_then(|values| values.first())
        .cloned()
        .unwrap_or_default()
}

/// Subtree filter for a person entry, with LDAP filter metacharacters in the
/// username escaped.
pub fn person_filter(username: &str) -> String {
    format!("(&(objectClass=inetOrgPerson)(uid={}))", ldap_escape(username))
}
