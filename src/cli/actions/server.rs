use crate::cli::actions::Action;
use crate::vouchd::new;
use anyhow::Result;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, globals } => {
            new(port, &globals).await?;
        }
    }

    Ok(())
}
