//! Auth command handlers.

use std::io::{self, IsTerminal, Write};

use anyhow::{Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use lifeguide_core::config::Config;
use lifeguide_core::session::{self, AuthStatus, mask_token};

use super::api_client;

pub async fn login(config: &Config, session_id: Option<&str>, url: Option<&str>) -> Result<()> {
    let api = api_client(config)?;

    let result = match (session_id, url) {
        (Some(id), _) => session::exchange_session_id(&api, id).await,
        (None, Some(url)) => session::login_from_redirect(&api, url, config.extract_delay()).await,
        (None, None) => {
            let input = read_redirect_url().await?;
            session::login_from_redirect(&api, &input, config.extract_delay()).await
        }
    };

    let Some(result) = result else {
        bail!("Login failed: the session could not be established");
    };

    println!("✓ Logged in as {} <{}>", result.user.name, result.user.email);
    println!("  Session token: {}", mask_token(&result.session_token));
    Ok(())
}

async fn read_redirect_url() -> Result<String> {
    if io::stdin().is_terminal() {
        print!("Paste the redirect URL: ");
        io::stdout().flush()?;
    }
    let mut input = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut input)
        .await?;
    Ok(input.trim().to_string())
}

pub async fn logout(config: &Config) -> Result<()> {
    let api = api_client(config)?;
    let had_session = api.current_token().is_some();

    session::logout(&api).await;

    if had_session {
        println!("✓ Logged out");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let api = api_client(config)?;
    match session::check_auth(&api).await {
        AuthStatus::SignedIn(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("  User ID: {}", user.user_id);
            Ok(())
        }
        AuthStatus::SignedOut => bail!("Not logged in."),
        AuthStatus::Offline => bail!("Server unreachable at {}; session kept.", api.base_url()),
    }
}
