use regex::Regex;

/// Redacts credentials that may appear in URLs, headers, or panic text.
///
/// Covers bearer tokens, cookie headers, and the values of well-known
/// secret query parameters (`token`, `access_token`, `code`, `password`, ...).
pub fn sanitize_secrets(input: &str) -> String {
    // (pattern, replacement); specific patterns first.
    let patterns: &[(&str, &str)] = &[
        (r"Bearer [a-zA-Z0-9._\-]+", "Bearer [REDACTED]"),
        (r"(?i)(cookie:\s*)[^\r\n]+", "${1}[REDACTED]"),
        (
            r"(?i)([?&](?:access_token|id_token|refresh_token|token|code|key|secret|password|session)=)[^&#\s]+",
            "${1}[REDACTED]",
        ),
    ];

    let mut result = input.to_string();
    for (pattern, replacement) in patterns {
        // Static patterns; a failure here is a programming error caught by the tests.
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}
