//! Interactive terminal front end
//!
//! Sign in with a phone number, then view and edit the profile. All state
//! lives in the `AppKernel`; this module only prompts and renders.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::domains::profile::{ProfileError, ProfileRecord};
use crate::domains::session::{PendingChallenge, SessionError, VerificationToken};
use crate::kernel::{AppKernel, BaseVerificationGate};

pub const PHONE_FORMAT_HINT: &str = "valid format example(+46760000000)";
pub const INVALID_INPUT_HINT: &str = "input is not valid";

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

// =============================================================================
// Prompt Verification Gate
// =============================================================================

/// Asks the user to paste a verification token solved in a browser.
///
/// Resolved only when the user asks for a code.
pub struct PromptVerificationGate;

#[async_trait]
impl BaseVerificationGate for PromptVerificationGate {
    async fn resolve(&self) -> Result<VerificationToken> {
        let token = tokio::task::spawn_blocking(|| -> Result<String> {
            eprintln!(
                "{}",
                style("Solve the verification challenge in your browser and paste the token.")
                    .dim()
            );
            let token: String = Input::with_theme(&theme())
                .with_prompt("Verification token")
                .allow_empty(true)
                .interact_text()?;
            Ok(token)
        })
        .await??;

        let token = token.trim();
        if token.is_empty() {
            return Err(anyhow!("no verification token entered"));
        }
        Ok(VerificationToken::new(token))
    }
}

// =============================================================================
// Rendering helpers
// =============================================================================

/// Short user-facing notice for a failed sign-in step.
pub fn session_notice(err: &SessionError) -> String {
    match err {
        SessionError::InvalidPhoneFormat => PHONE_FORMAT_HINT.to_string(),
        SessionError::InvalidCode => "Wrong code, try again".to_string(),
        SessionError::ChallengeExpired => "The code expired, request a new one".to_string(),
        SessionError::HumanVerificationFailed(_) => "Verification was not completed".to_string(),
        SessionError::ChallengeIssueFailure(_) => "Could not send a code right now".to_string(),
        SessionError::ConfirmFailure(_) => "Could not check the code right now".to_string(),
        SessionError::AlreadyAuthenticated | SessionError::NoPendingChallenge => err.to_string(),
    }
}

/// Short user-facing notice for a failed profile step.
pub fn profile_notice(err: &ProfileError) -> String {
    match err {
        ProfileError::InvalidEmailFormat => INVALID_INPUT_HINT.to_string(),
        ProfileError::ProfileNotLoaded => "Profile is not available".to_string(),
        ProfileError::ProfileFetchFailure(_) => "Could not load your profile".to_string(),
        ProfileError::ProfileUpdateFailure(_) => {
            "Could not save, your changes are kept".to_string()
        }
    }
}

/// One line per field, blanks shown as `-`.
pub fn render_profile(record: &ProfileRecord) -> String {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    format!(
        "Phone: {}\nName:  {}\nEmail: {}",
        record.phone,
        show(&record.name),
        show(&record.email)
    )
}

fn print_session_error(err: &SessionError) {
    let notice = session_notice(err);
    if err.is_client_side() {
        eprintln!("{}", style(notice).yellow());
    } else {
        eprintln!("{}", style(notice).red());
    }
}

fn print_profile_error(err: &ProfileError) {
    let notice = profile_notice(err);
    if err.is_client_side() {
        eprintln!("{}", style(notice).yellow());
    } else {
        eprintln!("{}", style(notice).red());
    }
}

fn prompt_text(prompt: &str, initial: Option<&str>) -> Result<String> {
    let value: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .with_initial_text(initial.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

// =============================================================================
// Flow
// =============================================================================

/// Run the sign-in flow and then the profile menu until the user quits.
pub async fn run(kernel: &mut AppKernel, phone_prefill: Option<String>) -> Result<()> {
    sign_in(kernel, phone_prefill).await?;
    profile_menu(kernel).await
}

async fn sign_in(kernel: &mut AppKernel, phone_prefill: Option<String>) -> Result<()> {
    let mut prefill = phone_prefill;

    loop {
        let phone = prompt_text("Phone number", prefill.as_deref())?;
        prefill = Some(phone.clone());

        let challenge = match kernel.request_code(&phone).await {
            Ok(challenge) => challenge,
            Err(e) => {
                print_session_error(&e);
                continue;
            }
        };
        println!("{}", style("A code has been sent by SMS.").green());

        if enter_code(kernel, &challenge).await? {
            return Ok(());
        }
    }
}

/// Returns `true` once signed in, `false` when a new code is needed.
async fn enter_code(kernel: &mut AppKernel, challenge: &PendingChallenge) -> Result<bool> {
    loop {
        let code = prompt_text("Code", None)?;
        match kernel.confirm_code(challenge, &code).await {
            Ok(subject) => {
                println!("{} {}", style("Signed in as").green(), subject.phone_number);
                return Ok(true);
            }
            Err(SessionError::InvalidCode) => print_session_error(&SessionError::InvalidCode),
            Err(e) => {
                print_session_error(&e);
                return Ok(false);
            }
        }
    }
}

async fn profile_menu(kernel: &mut AppKernel) -> Result<()> {
    let items = ["Edit name", "Edit email", "Save", "Quit"];

    loop {
        let Some(record) = kernel.profile().record().cloned() else {
            // Fetch failed after sign-in; nothing to edit.
            print_profile_error(&ProfileError::ProfileFetchFailure(String::new()));
            return Ok(());
        };

        println!();
        println!("{}", render_profile(&record));
        if kernel.profile().state().is_dirty() {
            println!("{}", style("(unsaved changes)").dim());
        }

        let choice = Select::with_theme(&theme())
            .with_prompt("Profile")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let name = prompt_text("Name", record.name.as_deref())?;
                kernel.edit_name(&name);
            }
            1 => {
                let email = prompt_text("Email", record.email.as_deref())?;
                if !kernel.edit_email(&email) {
                    eprintln!("{}", style(INVALID_INPUT_HINT).yellow());
                }
            }
            2 => match kernel.save_profile().await {
                Ok(_) => println!("{}", style("Saved").green()),
                Err(e) => print_profile_error(&e),
            },
            _ => break,
        }
    }

    Ok(())
}
