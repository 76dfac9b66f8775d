use axum::{
    body::Bytes,
    extract::{
        State,
        multipart::{Multipart, MultipartRejection},
    },
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, info};

use eventsphere_storage::StoreError;
use eventsphere_types::models::NewAccount;

use crate::error::ApiError;
use crate::events::{non_blank, required};
use crate::password::hash_password;
use crate::{AppState, pages, run_blocking, uploads};

const REGISTRATION_FAILED: &str = "An error occurred during registration. Please try again.";

/// Raw fields of the sign-up form, as submitted.
#[derive(Debug, Default)]
struct AccountForm {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    account_type: Option<String>,
    event_type: Option<String>,
    decorations: Vec<String>,
    age: Option<String>,
    referrer: Option<String>,
    suggestion: Option<String>,
    picture: Option<Upload>,
}

#[derive(Debug)]
struct Upload {
    file_name: String,
    data: Bytes,
}

impl AccountForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Body(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "file" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| ApiError::Body(e.to_string()))?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() && !data.is_empty() {
                    form.picture = Some(Upload { file_name, data });
                }
                continue;
            }

            let value = field.text().await.map_err(|e| ApiError::Body(e.to_string()))?;
            match name.as_str() {
                "first-name" => form.first_name = Some(value),
                "last-name" => form.last_name = Some(value),
                "email" => form.email = Some(value),
                "new-password" => form.password = Some(value),
                "account-type" => form.account_type = Some(value),
                "event-type" => form.event_type = Some(value),
                "decoration" => form.decorations.push(value),
                "age" => form.age = Some(value),
                "referrer" => form.referrer = Some(value),
                "suggestion" => form.suggestion = Some(value),
                _ => debug!("Ignoring form field '{}'", name),
            }
        }

        Ok(form)
    }

    /// Check required fields and normalise the rest. The password is still
    /// plaintext here.
    fn validate(self) -> Result<(NewAccount, Option<Upload>), ApiError> {
        let age = match non_blank(self.age) {
            Some(age) => Some(
                age.parse::<u32>()
                    .map_err(|_| ApiError::validation("Age must be a whole number."))?,
            ),
            None => None,
        };

        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::validation("Password is required."))?;

        let decorations = self
            .decorations
            .into_iter()
            .filter_map(|d| non_blank(Some(d)))
            .collect::<Vec<_>>()
            .join(", ");

        let account = NewAccount {
            first_name: required(self.first_name, "First name is required.")?,
            last_name: required(self.last_name, "Last name is required.")?,
            email: required(self.email, "Email is required.")?,
            password,
            account_type: non_blank(self.account_type),
            event_type: non_blank(self.event_type),
            decorations,
            profile_picture: None,
            age,
            referrer: non_blank(self.referrer),
            suggestion: non_blank(self.suggestion),
        };

        Ok((account, self.picture))
    }
}

/// POST /register: create an account from the multipart sign-up form and
/// redirect to the thank-you page.
pub async fn register_account(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match create_account(&state, multipart).await {
        Ok(_) => Redirect::to("/thank-you").into_response(),
        Err(e) => {
            e.log("Account registration");
            pages::registration_failed(e.status(), &e.user_message(REGISTRATION_FAILED))
        }
    }
}

async fn create_account(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<i64, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::Body(e.body_text()))?;
    let (mut account, picture) = AccountForm::read(multipart).await?.validate()?;

    let email = account.email.clone();
    if run_blocking(state, move |store| store.email_exists(&email)).await? {
        return Err(StoreError::EmailTaken(account.email).into());
    }

    let stored = match picture {
        Some(upload) => {
            Some(uploads::save(&state.upload_dir, &upload.file_name, &upload.data).await?)
        }
        None => None,
    };
    account.profile_picture = stored.clone();

    match persist(state, account).await {
        Ok(id) => Ok(id),
        Err(e) => {
            if let Some(name) = stored {
                uploads::discard(&state.upload_dir, &name).await;
            }
            Err(e)
        }
    }
}

async fn persist(state: &AppState, mut account: NewAccount) -> Result<i64, ApiError> {
    let plaintext = std::mem::take(&mut account.password);
    account.password = tokio::task::spawn_blocking(move || hash_password(&plaintext)).await??;

    // A concurrent sign-up can still win the race; the relational backend
    // then reports EmailTaken from the UNIQUE constraint.
    let email = account.email.clone();
    let id = run_blocking(state, move |store| store.insert_account(account)).await?;

    info!("User registered: {} (id {})", email, id);
    Ok(id)
}
