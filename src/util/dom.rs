//! Reads values the server rendered into the host page.

/// Username the server rendered into the page, if any.
///
/// Looks at `<body data-username>` first, then the text of an existing
/// `#username` element. Blank values count as absent.
pub fn page_username() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let document = web_sys::window()?.document()?;
        let from_body = document
            .body()
            .and_then(|b| b.get_attribute("data-username"));
        let from_element = || {
            document
                .get_element_by_id("username")
                .and_then(|el| el.text_content())
        };
        from_body
            .or_else(from_element)
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
