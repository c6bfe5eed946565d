use awty_core::views::{AuthForm, AuthMode, AuthOutcome};

use crate::auth::session_for_profile;
use crate::cli::AuthCommands;
use crate::commands::common::open_client;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Signup { username, password } => {
            authenticate(AuthMode::Signup, username, password, global_profile).await
        }
        AuthCommands::Login { username, password } => {
            authenticate(AuthMode::Login, username, password, global_profile).await
        }
        AuthCommands::Status => {
            let config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = config.resolve_profile_name(global_profile);
            let session = session_for_profile(&profile_name);
            if session.token()?.is_some() {
                println!("Profile '{profile_name}' is signed in.");
            } else {
                println!("Profile '{profile_name}' is not signed in.");
            }
            Ok(())
        }
        AuthCommands::Logout => {
            let config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = config.resolve_profile_name(global_profile);
            session_for_profile(&profile_name).clear()?;
            println!("Signed out profile '{profile_name}'");
            Ok(())
        }
    }
}

async fn authenticate(
    mode: AuthMode,
    username: String,
    password: String,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let (profile_name, client) = open_client(global_profile)?;
    let mut form = AuthForm::new(mode);
    form.username = username;
    form.password = password;

    match form.submit(&client).await {
        AuthOutcome::Redirect(_) => {
            println!("Signed in profile '{profile_name}' as {}", form.username.trim());
            Ok(())
        }
        AuthOutcome::Failed | AuthOutcome::Rejected => Err(CliError::Auth(
            form.error()
                .unwrap_or("An error occurred. Please try again.")
                .to_string(),
        )),
    }
}
