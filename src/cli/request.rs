//! Raw signed request command

use alibaba_api::signing::RESERVED_PARAMS;
use alibaba_api::{BusinessParams, HttpMethod};
use clap::{Args, ValueEnum};

use super::{CliError, Context};

/// HTTP method accepted on the command line
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Method {
    /// Parameters in the query string
    #[default]
    Get,
    /// Parameters in a form body
    Post,
}

impl From<Method> for HttpMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::Get,
            Method::Post => Self::Post,
        }
    }
}

/// Arguments for request command
#[derive(Args)]
pub struct RequestArgs {
    /// API path, e.g. /alibaba/order/get
    pub path: String,

    /// Business parameter as key=value (repeatable)
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,

    /// HTTP method
    #[arg(long, value_enum, default_value_t = Method::Get)]
    pub method: Method,
}

/// Execute request command
pub async fn execute(ctx: &Context, args: RequestArgs) -> Result<(), CliError> {
    let params = parse_params(&args.params)?;
    let client = ctx.client()?;
    let response = client
        .execute(&args.path, &params, args.method.into(), None)
        .await?;
    ctx.print(&response)
}

/// Parses `key=value` pairs. The value may itself contain `=`.
///
/// Keys filled in by the signer (`app_key`, `timestamp`, `sign`, ...) are
/// rejected.
fn parse_params(raw: &[String]) -> Result<BusinessParams, CliError> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() && !RESERVED_PARAMS.contains(&key) => {
                Ok((key.to_string(), value.to_string()))
            }
            _ => Err(CliError::InvalidParam(pair.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_splits_on_first_equals() {
        let params = parse_params(&["q=a=b".to_string(), "page=1".to_string()]).unwrap();
        assert_eq!(params.get("q").map(String::as_str), Some("a=b"));
        assert_eq!(params.get("page").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_parse_params_rejects_missing_key() {
        assert!(matches!(
            parse_params(&["novalue".to_string()]),
            Err(CliError::InvalidParam(p)) if p == "novalue"
        ));
        assert!(parse_params(&["=1".to_string()]).is_err());
    }

    #[test]
    fn test_parse_params_rejects_system_parameter_names() {
        for pair in ["sign=x", "timestamp=0", "app_key=k", "access_token=t"] {
            let err = parse_params(&[pair.to_string()]).unwrap_err();
            assert!(matches!(&err, CliError::InvalidParam(p) if p == pair));
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[tokio::test]
    async fn test_reserved_param_is_usage_error_before_signing() {
        let ctx = Context::new(&crate::cli::GlobalArgs::default());
        let args = RequestArgs {
            path: "/x".to_string(),
            params: vec!["timestamp=0".to_string()],
            method: Method::Get,
        };

        let err = execute(&ctx, args).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidParam(_)));
    }

    #[test]
    fn test_method_maps_to_http_method() {
        assert_eq!(HttpMethod::from(Method::Post), HttpMethod::Post);
        assert_eq!(HttpMethod::from(Method::default()), HttpMethod::Get);
    }
}
