//! Data models for reviews, projects and contact messages.

use serde::{Deserialize, Serialize};

/// Substring identifying URLs hosted on a source-code platform.
pub const SOURCE_HOST_MARKER: &str = "github.com";

/// A review left by a client or colleague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Company the reviewer works for.
    pub company: String,
    /// Reviewer's name.
    pub name: String,
    /// Free-text review body.
    pub review: String,
}

/// A review that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub company: String,
    pub name: String,
    pub review: String,
}

impl NewReview {
    /// Creates a new review.
    pub fn new(
        company: impl Into<String>,
        name: impl Into<String>,
        review: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            name: name.into(),
            review: review.into(),
        }
    }
}

/// Call to action shown next to a project, derived from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectAction {
    /// The URL points at a source repository.
    #[serde(rename = "Show Code")]
    ShowCode,
    /// The URL points at a deployed website.
    #[serde(rename = "Show Website")]
    ShowWebsite,
}

impl ProjectAction {
    /// Derives the action from a project URL.
    pub fn from_url(url: &str) -> Self {
        if url.contains(SOURCE_HOST_MARKER) {
            ProjectAction::ShowCode
        } else {
            ProjectAction::ShowWebsite
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectAction::ShowCode => "Show Code",
            ProjectAction::ShowWebsite => "Show Website",
        }
    }
}

impl std::fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A portfolio project as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Computed at read time, never stored.
    pub action_label: ProjectAction,
}

impl Project {
    /// Builds a project from its stored columns, deriving the action label.
    pub fn new(id: i64, title: String, description: String, url: String) -> Self {
        let action_label = ProjectAction::from_url(&url);
        Self {
            id,
            title,
            description,
            url,
            action_label,
        }
    }
}

/// A contact-form submission. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Subject line used for contact notifications.
    pub const SUBJECT: &'static str = "New Contact Form Submission";

    /// Plain-text rendering of the message.
    pub fn plain_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nMessage: {}",
            self.name, self.email, self.message
        )
    }

    /// HTML rendering of the message with user input escaped.
    pub fn html_body(&self) -> String {
        format!(
            "<p>Name: {}</p><p>Email: {}</p><p>Message: {}</p>",
            escape_html(&self.name),
            escape_html(&self.email),
            escape_html(&self.message).replace('\n', "<br>")
        )
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
