use awty_core::config::normalize_base_url;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::config_profiles::{normalize_text_option, CliProfilesConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ResolvedProfile<'a> {
    profile: &'a str,
    api_base_url: &'a str,
    request_timeout_secs: Option<u64>,
    config_path: String,
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_url,
            timeout_secs,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            api_url,
            timeout_secs,
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run_config_init(
    profile_name: Option<&str>,
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let api_url = resolve_api_url(api_url)?;

    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(url) = api_url {
        profile.api_base_url = Some(url);
    }
    if let Some(secs) = timeout_secs {
        profile.request_timeout_secs = Some(secs).filter(|secs| *secs > 0);
    }

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    if config
        .profile(&profile_name)
        .and_then(|profile| profile.api_base_url())
        .is_none()
    {
        println!(
            "Profile '{profile_name}' has no api_base_url; AWTY_API_URL or the built-in default will be used."
        );
    }
    println!("Run `awty auth login --username <name> --password <password>` to sign in.");

    Ok(())
}

/// Validate and normalize an explicit `--api-url`.
pub fn resolve_api_url(api_url: Option<String>) -> Result<Option<String>, CliError> {
    normalize_text_option(api_url)
        .map(|url| normalize_base_url(&url).map_err(|error| CliError::Config(error.to_string())))
        .transpose()
}

fn run_config_show(global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let client_config = config.client_config(&profile_name)?;
    let resolved = ResolvedProfile {
        profile: &profile_name,
        api_base_url: &client_config.api_base_url,
        request_timeout_secs: client_config.request_timeout_secs,
        config_path: crate::config_profiles::default_config_path()
            .map_or_else(|error| error, |path| path.display().to_string()),
    };
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
