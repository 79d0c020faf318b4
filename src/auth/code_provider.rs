use std::io::{BufRead, Write};

use error_stack::{report, ResultExt};
use reqwest::Url;

use super::AuthError;

/// Supplies the authorization code the operator obtains from the consent page.
pub trait AuthorizationCodeProvider: Send + Sync {
    fn authorization_code(&self, authorization_url: &Url)
        -> error_stack::Result<String, AuthError>;
}

/// Prints the consent url on stdout and reads the code from stdin.
#[derive(Debug, Default)]
pub struct TerminalCodeProvider;

impl AuthorizationCodeProvider for TerminalCodeProvider {
    fn authorization_code(
        &self,
        authorization_url: &Url,
    ) -> error_stack::Result<String, AuthError> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        prompt_for_code(authorization_url, &mut stdin.lock(), &mut stdout)
    }
}

fn prompt_for_code(
    authorization_url: &Url,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> error_stack::Result<String, AuthError> {
    write!(
        output,
        "Open the following link in your browser:\n{}\nEnter verification code: ",
        authorization_url
    )
    .and_then(|_| output.flush())
    .change_context(AuthError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).change_context(AuthError::Prompt)?;

    extract_code(&line).ok_or_else(|| report!(AuthError::MissingCode))
}

/// Accepts the bare code or the whole redirect url it was delivered on.
fn extract_code(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match Url::parse(input) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, code)| code.into_owned())
            .filter(|code| !code.is_empty()),
        Err(_) => Some(input.to_string()),
    }
}
