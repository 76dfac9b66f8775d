use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use crate::AppState;

const THANK_YOU: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Thank You - EventSphere</title>
    <style>
        body { font-family: Arial, sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); margin: 0; display: flex; justify-content: center; align-items: center; min-height: 100vh; }
        .thank-you-container { background: white; padding: 40px; border-radius: 15px; box-shadow: 0 15px 35px rgba(0,0,0,0.1); text-align: center; max-width: 500px; width: 90%; }
        h1 { color: #667eea; font-size: 2.5em; }
        .checkmark { color: #28a745; font-size: 4em; }
        p { color: #666; font-size: 1.1em; line-height: 1.6; }
        .home-button { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 12px 30px; border-radius: 25px; text-decoration: none; display: inline-block; }
    </style>
</head>
<body>
    <div class="thank-you-container">
        <div class="checkmark">&#10003;</div>
        <h1>Thank You!</h1>
        <p>Your registration has been successfully submitted. We're excited to help you create an amazing event experience!</p>
        <p>Our team will contact you soon with more details about your event planning.</p>
        <a href="/" class="home-button">Return to Home</a>
    </div>
</body>
</html>
"#;

/// GET /thank-you
pub async fn thank_you() -> Html<&'static str> {
    Html(THANK_YOU)
}

/// GET /register: the sign-up form from the static directory.
pub async fn register_page(State(state): State<AppState>) -> Response {
    let path = state.static_dir.join("register.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Failure page for the account form. `message` is one of our own strings.
pub fn registration_failed(status: StatusCode, message: &str) -> Response {
    let html = format!(
        r#"<html>
  <head><title>Registration Error</title></head>
  <body style="font-family: Arial; text-align: center; padding: 50px;">
    <h2>Registration Failed</h2>
    <p>{}</p>
    <a href="/register" style="color: blue; text-decoration: underline;">Go back to registration</a>
  </body>
</html>
"#,
        escape(message)
    );
    (status, Html(html)).into_response()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
