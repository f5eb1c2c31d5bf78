use crate::error::SessionError;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Domain every gateway host lives under.
pub const PROXY_DOMAIN: &str = "iitd.ac.in";

/// Port the proxies themselves listen on (not the login gateway).
pub const PROXY_PORT: u16 = 3128;

/// Static mapping from proxy category to the numeric gateway identifier.
/// Several categories share a gateway; the table mirrors the one published
/// by the institute.
static CATEGORIES: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    HashMap::from([
        ("btech", 22),
        ("dual", 62),
        ("diit", 21),
        ("faculty", 82),
        ("integrated", 21),
        ("mtech", 62),
        ("phd", 61),
        ("retfaculty", 82),
        ("staff", 21),
        ("irdstaff", 21),
        ("mba", 21),
        ("mdes", 21),
        ("msc", 21),
        ("msr", 21),
        ("pgdip", 21),
        ("visitor", 21),
        ("student", 21),
        ("guest", 82),
    ])
});

/// Looks up the numeric gateway code for a category.
pub fn category_code(category: &str) -> Result<u8, SessionError> {
    CATEGORIES
        .get(category)
        .copied()
        .ok_or_else(|| SessionError::UnknownCategory(category.to_owned()))
}

/// Hostname of the proxy for a category, e.g. `proxy22.iitd.ac.in`.
pub fn proxy_host(category: &str) -> Result<String, SessionError> {
    Ok(format!("proxy{}.{}", category_code(category)?, PROXY_DOMAIN))
}

/// Login gateway URL for a category.
pub fn gateway_url(category: &str) -> Result<String, SessionError> {
    Ok(format!(
        "https://{}/cgi-bin/proxy.cgi",
        proxy_host(category)?
    ))
}

/// Renders shell `export` statements pointing the usual proxy environment
/// variables at the category's proxy. Pure text, no network interaction.
pub fn envvar_snippet(category: &str) -> Result<String, SessionError> {
    let host = proxy_host(category)?;
    let mut out = String::new();
    for var in ["http_proxy", "https_proxy", "ftp_proxy"] {
        out.push_str(&format!(
            "export {}=\"http://{}:{}/\"\n",
            var, host, PROXY_PORT
        ));
    }
    Ok(out)
}
