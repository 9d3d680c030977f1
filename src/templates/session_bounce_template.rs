use askama::Template;

/// Re-issues a request whose session token expired: App Bridge hands the page a
/// fresh token and the original method, path and fields are submitted again.
#[derive(Template)]
#[template(path = "session_bounce.html")]
pub struct SessionBounceTemplate {
    pub shop: String,
    pub api_key: String,

    pub method: String,
    pub action: String,
    pub fields: Vec<(String, String)>,
}

crate::impl_base_template!(SessionBounceTemplate);
