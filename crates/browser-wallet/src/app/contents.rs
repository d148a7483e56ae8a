const INDEX_HTML: &str = include_str!("assets/index.html");

const SESSION_TOKEN_PLACEHOLDER: &str = "__SESSION_TOKEN__";

/// Install page of the Diam wallet extension.
pub const DIAM_EXTENSION_URL: &str =
    "https://chromewebstore.google.com/detail/diam-wallet/oakkognifoojdbfjaccegangippipdmn?hl=en";

const DIAM_EXTENSION_PLACEHOLDER: &str = "__DIAM_EXTENSION_URL__";

/// The bridge page, bound to `session_token`.
pub(crate) fn index_html(session_token: &str) -> String {
    INDEX_HTML
        .replace(SESSION_TOKEN_PLACEHOLDER, session_token)
        .replace(DIAM_EXTENSION_PLACEHOLDER, DIAM_EXTENSION_URL)
}
