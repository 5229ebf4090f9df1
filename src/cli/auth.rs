//! OAuth token commands

use clap::{Args, Subcommand};

use super::{output, CliError, Context};

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Exchange an authorization code for tokens
    TokenCreate(TokenCreateArgs),
    /// Refresh the access token using --refresh-token or ALIBABA_REFRESH_TOKEN
    TokenRefresh,
    /// Show which credentials are configured
    Status,
    /// Print the URL that authorizes this app
    Url(UrlArgs),
}

/// Arguments for token-create
#[derive(Args)]
pub struct TokenCreateArgs {
    /// OAuth authorization code
    #[arg(long)]
    pub code: String,
}

/// Arguments for url
#[derive(Args)]
pub struct UrlArgs {
    /// Callback URL registered for the app
    #[arg(long)]
    pub redirect_uri: String,
}

/// Execute auth commands
pub async fn execute(ctx: &Context, cmd: AuthCommands) -> Result<(), CliError> {
    match cmd {
        AuthCommands::TokenCreate(args) => execute_token_create(ctx, args).await,
        AuthCommands::TokenRefresh => execute_token_refresh(ctx).await,
        AuthCommands::Status => execute_status(ctx),
        AuthCommands::Url(args) => execute_url(ctx, &args),
    }
}

async fn execute_token_create(ctx: &Context, args: TokenCreateArgs) -> Result<(), CliError> {
    let client = ctx.client()?;
    let tokens = client.auth().create_token(&args.code).await?;
    client.close();

    ctx.print(&tokens)?;
    let hints = export_hints(
        tokens.access_token.as_deref(),
        tokens.refresh_token.as_deref(),
    );
    output::echo_hints("Next steps:", &hints);
    Ok(())
}

async fn execute_token_refresh(ctx: &Context) -> Result<(), CliError> {
    let client = ctx.client()?;
    let tokens = client.auth().refresh_token(None).await?;
    client.close();

    ctx.print(&tokens)?;
    let hints = export_hints(
        tokens.access_token.as_deref(),
        tokens.refresh_token.as_deref(),
    );
    output::echo_hints("Updated tokens:", &hints);
    Ok(())
}

fn execute_status(ctx: &Context) -> Result<(), CliError> {
    let client = ctx.client()?;
    let status = client.auth().status();

    if status.has_access_token {
        output::echo_success("Authentication configured");
    } else {
        output::echo_warning("No access token - run 'auth token-create' first");
    }
    ctx.print(&status)
}

fn execute_url(ctx: &Context, args: &UrlArgs) -> Result<(), CliError> {
    let client = ctx.client()?;
    let url = client.auth().authorization_url(&args.redirect_uri);

    output::echo_info(
        "Open this URL in a browser, approve access, then run \
         'auth token-create --code <code>':",
    );
    println!("{url}");
    Ok(())
}

fn export_hints(access_token: Option<&str>, refresh_token: Option<&str>) -> Vec<String> {
    vec![
        format!("export ALIBABA_ACCESS_TOKEN='{}'", access_token.unwrap_or_default()),
        format!("export ALIBABA_REFRESH_TOKEN='{}'", refresh_token.unwrap_or_default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_hints() {
        let hints = export_hints(Some("at"), None);
        assert_eq!(hints[0], "export ALIBABA_ACCESS_TOKEN='at'");
        assert_eq!(hints[1], "export ALIBABA_REFRESH_TOKEN=''");
    }
}
