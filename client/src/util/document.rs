//! Document-level side effects routed through the interop bridge.
//!
//! All of these are fire-and-forget: outcomes are dropped, so a page without
//! `interop.js` simply keeps its default title and styles.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use crate::interop::Interop;

pub const SITE_STYLESHEET: &str = "/site.css";
pub const SITE_NAME: &str = "Identity Interop";
pub const LAST_EMAIL_COOKIE: &str = "last_email";
pub const LAST_EMAIL_DAYS: i32 = 30;

#[must_use]
pub fn page_title(page: &str) -> String {
    format!("{page} - {SITE_NAME}")
}

/// Set the document title for the current page.
pub fn set_page_title(interop: &Interop, page: &str) {
    #[cfg(feature = "csr")]
    {
        let interop = interop.clone();
        let title = page_title(page);
        leptos::task::spawn_local(async move {
            let _ = interop.update_title(&title).await;
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (interop, page);
    }
}

/// Inject the site stylesheet and description meta tag once per load.
pub fn install_head(interop: &Interop) {
    #[cfg(feature = "csr")]
    {
        let interop = interop.clone();
        leptos::task::spawn_local(async move {
            let _ = interop.include_css("site-css", SITE_STYLESHEET).await;
            let _ = interop
                .include_meta("site-description", "name", "description", "Account sign-in")
                .await;
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = interop;
    }
}
