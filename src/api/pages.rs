//! Server-rendered HTML shells.
//!
//! Presentation is deliberately minimal: a shared layout, a flash banner,
//! and one body per page. User-provided strings are HTML-escaped before
//! interpolation.

use crate::api::flash::Flash;
use axum::response::Html;

/// Escape text for interpolation into HTML bodies and attributes.
#[must_use]
pub(crate) fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn flash_banner(flash: Option<&Flash>) -> String {
    flash.map_or_else(String::new, |flash| {
        format!(
            r#"<div class="flash {}">{}</div>"#,
            flash.level.as_str(),
            escape_html(&flash.message)
        )
    })
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Gatehouse</title>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/profile">Profile</a>
<a href="/contact">Contact</a>
<a href="/login">Login</a>
<a href="/signup">Sign Up</a>
<a href="/logout">Logout</a>
</nav>
{banner}
{body}
</body>
</html>
"#,
        title = escape_html(title),
        banner = flash_banner(flash),
        body = body,
    ))
}

#[must_use]
pub fn home() -> Html<String> {
    layout(
        "Home",
        None,
        "<h1>Welcome to Gatehouse</h1>\n<p>Sign up or log in to see your profile.</p>",
    )
}

#[must_use]
pub fn public() -> Html<String> {
    layout(
        "Public",
        None,
        "<h1>Public page</h1>\n<p>Anyone can read this.</p>",
    )
}

#[must_use]
pub fn denied() -> Html<String> {
    layout(
        "Access denied",
        None,
        "<h1>Access denied</h1>\n<p>You do not have clearance for this page.</p>",
    )
}

#[must_use]
pub fn encrypted() -> Html<String> {
    layout(
        "Encrypted",
        None,
        "<h1>Encrypted</h1>\n<p>Cleared eyes only.</p>",
    )
}

#[must_use]
pub fn signup_form(flash: Option<&Flash>) -> Html<String> {
    layout(
        "Sign Up",
        flash,
        r#"<h1>Sign Up</h1>
<form method="post" action="/signup">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign Up</button>
</form>"#,
    )
}

#[must_use]
pub fn login_form(flash: Option<&Flash>) -> Html<String> {
    layout(
        "Login",
        flash,
        r#"<h1>Login</h1>
<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>"#,
    )
}

#[must_use]
pub fn profile(email: &str, flash: Option<&Flash>) -> Html<String> {
    let body = format!(
        "<h1>Profile</h1>\n<p>Logged in as {}.</p>",
        escape_html(email)
    );
    layout("Profile", flash, &body)
}

#[must_use]
pub fn contact_form(flash: Option<&Flash>) -> Html<String> {
    layout(
        "Contact",
        flash,
        r#"<h1>Contact</h1>
<form method="post" action="/contact">
<label>Name <input type="text" name="name" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Message <textarea name="message" required></textarea></label>
<button type="submit">Send</button>
</form>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::flash::Level;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a&b'c"), "a&amp;b&#39;c");
    }

    #[test]
    fn profile_escapes_email() {
        let Html(page) = profile("<bob>@example.com", None);
        assert!(page.contains("&lt;bob&gt;@example.com"));
        assert!(!page.contains("<bob>"));
    }

    #[test]
    fn flash_banner_renders_level_and_message() {
        let flash = Flash {
            level: Level::Danger,
            message: "Please check your login details and try again.".to_string(),
        };
        let Html(page) = login_form(Some(&flash));
        assert!(page.contains(r#"class="flash danger""#));
        assert!(page.contains("Please check your login details and try again."));
    }

    #[test]
    fn pages_without_flash_skip_banner() {
        let Html(page) = home();
        assert!(!page.contains("class=\"flash"));
    }

    #[test]
    fn forms_post_to_their_own_route() {
        let Html(signup) = signup_form(None);
        assert!(signup.contains(r#"action="/signup""#));
        let Html(login) = login_form(None);
        assert!(login.contains(r#"action="/login""#));
        let Html(contact) = contact_form(None);
        assert!(contact.contains(r#"action="/contact""#));
        assert!(contact.contains(r#"name="message""#));
    }

    #[test]
    fn denied_and_encrypted_are_distinct() {
        let Html(denied) = denied();
        let Html(encrypted) = encrypted();
        assert!(denied.contains("Access denied"));
        assert!(encrypted.contains("Cleared eyes only"));
        assert_ne!(denied, encrypted);
    }
}
