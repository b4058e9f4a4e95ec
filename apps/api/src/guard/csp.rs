//! Content-Security-Policy header value.

const BASE_POLICY: &[(&str, &[&str])] = &[
    ("default-src", &["'self'"]),
    (
        "script-src",
        &[
            "'self'",
            "'unsafe-inline'",
            "https://js.stripe.com",
            "https://www.googletagmanager.com",
            "https://pagead2.googlesyndication.com",
        ],
    ),
    (
        "style-src",
        &["'self'", "'unsafe-inline'", "https://fonts.googleapis.com"],
    ),
    ("font-src", &["'self'", "data:", "https://fonts.gstatic.com"]),
    ("img-src", &["'self'", "data:", "blob:", "https:"]),
    ("media-src", &["'self'", "blob:", "https:"]),
    (
        "connect-src",
        &[
            "'self'",
            "https://*.supabase.co",
            "wss://*.supabase.co",
            "https://api.stripe.com",
            "https://www.google-analytics.com",
        ],
    ),
    (
        "frame-src",
        &["'self'", "https://js.stripe.com", "https://hooks.stripe.com"],
    ),
    ("object-src", &["'none'"]),
    ("base-uri", &["'self'"]),
    ("form-action", &["'self'"]),
];

const DEV_SCRIPT_SOURCES: &[&str] = &["'unsafe-eval'"];

const DEV_CONNECT_SOURCES: &[&str] = &[
    "http://localhost:*",
    "ws://localhost:*",
    "http://127.0.0.1:*",
    "ws://127.0.0.1:*",
];

/// Builds the policy string. `development` adds `'unsafe-eval'` to
/// `script-src` and opens `connect-src` to local dev-server transports.
///
/// Development sources extend the existing directives in place; each
/// directive appears exactly once (browsers honour only the first occurrence).
pub fn csp_header(development: bool) -> String {
    BASE_POLICY
        .iter()
        .map(|(directive, sources)| {
            let mut parts: Vec<&str> = Vec::with_capacity(sources.len() + 5);
            parts.push(*directive);
            parts.extend_from_slice(sources);
            if development {
                match *directive {
                    "script-src" => parts.extend_from_slice(DEV_SCRIPT_SOURCES),
                    "connect-src" => parts.extend_from_slice(DEV_CONNECT_SOURCES),
                    _ => {}
                }
            }
            parts.join(" ")
        })
        .collect::<Vec<_>>()
        .join("; ")
}
