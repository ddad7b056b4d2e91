use crate::{
    cli::globals::{Backend, GlobalArgs},
    directory::{DirectorySession, PasswordCheck},
    vault,
    vouchd::handlers::{Credentials, Verdict},
};
use axum::{extract::Extension, Form};
use tracing::{debug, error, instrument};

/// axum handler for the single `/auth` route. A body that is missing,
/// unparseable, or short of either field degrades to empty credentials, so
/// every request ends in a verdict.
#[instrument(skip(globals, payload))]
pub async fn auth(
    Extension(globals): Extension<GlobalArgs>,
    payload: Option<Form<Credentials>>,
) -> Verdict {
    let creds = payload.map_or_else(Credentials::default, |Form(creds)| creds);

    debug!("authenticating {:?}", creds.username);

    match globals.backend {
        Backend::Vault => vault_verdict(&globals, &creds.username, &creds.password).await,
        Backend::Ldap => directory_verdict(&globals, &creds.username, &creds.password).await,
    }
}

/// Check the submitted pair against the Vault credential record.
async fn vault_verdict(globals: &GlobalArgs, username: &str, password: &str) -> Verdict {
    let client = match vault::client() {
        Ok(client) => client,
        Err(err) => {
            error!("Error creating Vault client: {:?}", err);

            return Verdict::denied("Couldn't connect to Vault", Some(err.to_string()));
        }
    };

    // Not-found, permission and transport failures all fold into one branch,
    // the caller only learns that the lookup failed
    let stored = match vault::read_user_creds(&client, globals, username).await {
        Ok(stored) => stored,
        Err(err) => {
            error!("Error reading secret: {:?}", err);

            return Verdict::denied("Vault secret path not found", Some(err.to_string()));
        }
    };

    if stored.password == password {
        Verdict::granted(stored.username, stored.customerno, "Authentication Successful")
    } else {
        Verdict::denied("Bad password", None)
    }
}

/// Check the submitted pair against the directory: bind as admin, locate the
/// entry by uid, re-bind as the entry with the submitted password.
async fn directory_verdict(globals: &GlobalArgs, username: &str, password: &str) -> Verdict {
    let session = DirectorySession::connect(
        &globals.ldap_host,
        globals.ldap_admin.clone(),
        globals.ldap_password.clone(),
    )
    .await;

    let mut session = match session {
        Ok(session) => session,
        Err(err) => {
            error!("Error connecting to directory: {:?}", err);

            return Verdict::denied("Couldn't connect to OpenLDAP", Some(err.to_string()));
        }
    };

    let verdict = directory_steps(&mut session, globals, username, password).await;

    // released whichever branch produced the verdict
    session.close().await;

    verdict
}

async fn directory_steps(
    session: &mut DirectorySession,
    globals: &GlobalArgs,
    username: &str,
    password: &str,
) -> Verdict {
    if let Err(err) = session.bind_admin().await {
        error!("Error binding administrative identity: {:?}", err);

        return Verdict::denied("Bad bind credentials", Some(err.to_string()));
    }

    let user = match session.find_user(&globals.ldap_base_dn, username).await {
        Ok(Some(user)) => user,
        // zero or multiple matches reads the same as a wrong password, entry
        // existence must not leak
        Ok(None) => return Verdict::denied("Bad username/password", None),
        Err(err) => {
            error!("Error searching the directory: {:?}", err);

            return Verdict::denied(
                "There was an error searching the directory",
                Some(err.to_string()),
            );
        }
    };

    match session.verify_password(&user, password).await {
        PasswordCheck::Verified => Verdict::granted(
            user.uid,
            user.employee_number,
            "User successfully authenticated",
        ),
        PasswordCheck::Rejected(err) => Verdict {
            username: user.uid,
            customerno: user.employee_number,
            message: "Bad username/password".to_string(),
            success: false,
            error: Some(err.to_string()),
        },
        PasswordCheck::RestoreFailed(err) => {
            error!("Error restoring administrative bind: {:?}", err);

            Verdict {
                username: user.uid,
                customerno: user.employee_number,
                message: "Error completing process".to_string(),
                success: false,
                error: Some(err.to_string()),
            }
        }
    }
}
