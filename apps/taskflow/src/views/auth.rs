//! Login, registration and logout.

use anyhow::Result;

use taskflow_core::Route;
use taskflow_core::domain::{LoginForm, RegisterForm};

use crate::prompt::Prompter;
use crate::state::AppState;
use crate::views::failure;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Fill in a missing field from the terminal.
async fn field(value: Option<String>, prompt: &str, prompter: &Prompter) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(prompter.read_line(prompt).await?.unwrap_or_default()),
    }
}

pub async fn login(
    app: &AppState,
    prompter: &Prompter,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let form = LoginForm::new(
        field(email, "Email: ", prompter).await?,
        field(password, "Password: ", prompter).await?,
    );

    app.auth
        .login(&form)
        .await
        .map_err(|e| failure(e, LOGIN_FAILED))?;

    println!("Signed in as {}.", form.email.trim());
    Ok(())
}

pub async fn register(
    app: &AppState,
    prompter: &Prompter,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let form = RegisterForm::new(
        field(email, "Email: ", prompter).await?,
        field(password, "Password: ", prompter).await?,
    );

    let user = app
        .auth
        .register(&form)
        .await
        .map_err(|e| failure(e, REGISTRATION_FAILED))?;

    println!(
        "Account created for {}. Continue at {}: run `taskflow login`.",
        user.email,
        Route::Login
    );
    Ok(())
}

pub async fn logout(app: &AppState) -> Result<()> {
    app.auth
        .logout()
        .await
        .map_err(|e| failure(e, "Logout failed"))?;
    println!("Signed out.");
    Ok(())
}

pub fn status(app: &AppState) {
    let session = app.session.session();
    if session.is_authenticated() {
        println!("Signed in.");
    } else {
        println!("Signed out.");
    }
}
