//! HTML views.

use axum::response::Html;
use sso_identity_core::{DirectoryGroup, DirectoryUser, to_pretty_json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type RenderResult = Result<Html<String>, RenderError>;

/// Escape text for use inside HTML element content and attribute values
pub fn escape_html(unsafe_str: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_str.len());
    for c in unsafe_str.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        pre {{ background: #f0f0f0; padding: 20px; overflow-x: auto; }}
        table {{ border-collapse: collapse; margin: 20px 0; }}
        th, td {{ border: 1px solid #ccc; padding: 6px 12px; text-align: left; }}
        .button {{ background: #6363f1; color: white; padding: 10px 20px; border: none; border-radius: 4px; text-decoration: none; cursor: pointer; margin-right: 8px; }}
        .error {{ color: #b00020; }}
    </style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    ))
}

/// Login form offering SAML and the two social providers.
pub fn render_login() -> Html<String> {
    page(
        "Login",
        r#"    <h1>Sign in</h1>
    <form method="post" action="/auth">
        <button class="button" type="submit" name="login_method" value="saml">Enterprise SAML</button>
        <button class="button" type="submit" name="login_method" value="GoogleOAuth">Google OAuth</button>
        <button class="button" type="submit" name="login_method" value="MicrosoftOAuth">Microsoft OAuth</button>
    </form>"#,
    )
}

/// Authenticated view showing the greeting and the stored profile document.
pub fn render_login_successful(first_name: &str, raw_profile: &serde_json::Value) -> RenderResult {
    let profile_json = to_pretty_json(raw_profile)?;

    let body = format!(
        r#"    <h1>Welcome, {first_name}!</h1>
    <p>You are signed in. Raw profile returned by the identity provider:</p>
    <pre>{profile}</pre>
    <p>
        <a class="button" href="/users">Directory users</a>
        <a class="button" href="/groups">Directory groups</a>
        <a class="button" href="/logout">Log out</a>
    </p>"#,
        first_name = escape_html(first_name),
        profile = escape_html(&profile_json),
    );

    Ok(page("Login successful", &body))
}

pub fn render_users(users: &[DirectoryUser], directory_id: &str) -> RenderResult {
    let mut rows = String::new();
    for user in users {
        let name = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        rows.push_str(&format!(
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&user.id),
            escape_html(&name),
            escape_html(user.primary_email().unwrap_or("")),
            escape_html(user.state.as_deref().unwrap_or("")),
        ));
    }

    let body = format!(
        r#"    <h1>Directory users</h1>
    <p>Directory: <code>{directory}</code> ({count} shown)</p>
    <table>
        <tr><th>ID</th><th>Name</th><th>Email</th><th>State</th></tr>
{rows}    </table>
    <h2>Raw records</h2>
    <pre>{raw}</pre>
    <a class="button" href="/">Back</a>"#,
        directory = escape_html(directory_id),
        count = users.len(),
        rows = rows,
        raw = escape_html(&to_pretty_json(users)?),
    );

    Ok(page("Directory users", &body))
}

pub fn render_groups(groups: &[DirectoryGroup], directory_id: &str) -> RenderResult {
    let mut rows = String::new();
    for group in groups {
        rows.push_str(&format!(
            "        <tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&group.id),
            escape_html(group.name.as_deref().unwrap_or("")),
        ));
    }

    let body = format!(
        r#"    <h1>Directory groups</h1>
    <p>Directory: <code>{directory}</code> ({count} shown)</p>
    <table>
        <tr><th>ID</th><th>Name</th></tr>
{rows}    </table>
    <h2>Raw records</h2>
    <pre>{raw}</pre>
    <a class="button" href="/">Back</a>"#,
        directory = escape_html(directory_id),
        count = groups.len(),
        rows = rows,
        raw = escape_html(&to_pretty_json(groups)?),
    );

    Ok(page("Directory groups", &body))
}

pub fn render_dsync_error(message: &str) -> Html<String> {
    let body = format!(
        r#"    <h1 class="error">Directory Sync Error</h1>
    <p class="error">{}</p>
    <a class="button" href="/">Back</a>"#,
        escape_html(message)
    );
    page("Directory Sync Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        let escaped = escape_html(r#"<script>alert("x") & 'y'</script>"#);
        assert!(!escaped.contains("<script>"));
        assert_eq!(
            escaped,
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_login_page_offers_all_methods() {
        let Html(html) = render_login();
        assert!(html.contains(r#"action="/auth""#));
        assert!(html.contains(r#"value="saml""#));
        assert!(html.contains(r#"value="GoogleOAuth""#));
        assert!(html.contains(r#"value="MicrosoftOAuth""#));
    }

    #[test]
    fn test_login_successful_escapes_profile() {
        let Html(html) = render_login_successful(
            "<Ann>",
            &json!({"id": "prof_1", "first_name": "<Ann>"}),
        )
        .unwrap();

        assert!(html.contains("Welcome, &lt;Ann&gt;!"));
        assert!(html.contains("&quot;id&quot;: &quot;prof_1&quot;"));
        assert!(!html.contains("<Ann>"));
    }

    #[test]
    fn test_users_table() {
        let users: Vec<DirectoryUser> = serde_json::from_value(json!([
            {"id": "directory_user_1", "first_name": "Ann", "last_name": "Lee",
             "emails": [{"primary": true, "value": "ann@example.com"}], "state": "active"}
        ]))
        .unwrap();

        let Html(html) = render_users(&users, "directory_1").unwrap();
        assert!(html.contains("<td>directory_user_1</td><td>Ann Lee</td><td>ann@example.com</td><td>active</td>"));
        assert!(html.contains("<code>directory_1</code> (1 shown)"));
    }

    #[test]
    fn test_groups_table() {
        let groups: Vec<DirectoryGroup> =
            serde_json::from_value(json!([{"id": "directory_group_1", "name": "Eng"}])).unwrap();

        let Html(html) = render_groups(&groups, "directory_1").unwrap();
        assert!(html.contains("<td>directory_group_1</td><td>Eng</td>"));
    }

    #[test]
    fn test_dsync_error_message() {
        let Html(html) = render_dsync_error("CUSTOMER_DIRECTORY_ID is not configured.");
        assert!(html.contains("CUSTOMER_DIRECTORY_ID is not configured."));
    }
}
