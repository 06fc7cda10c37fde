use reqwest::Url;

/// Query parameter carrying the booking token on the page address.
pub const TOKEN_PARAM: &str = "token";

/// Extract the booking token from a full page address.
///
/// The value is opaque and returned as decoded, whitespace included.
/// Returns `None` when the address does not parse, has no `token`
/// parameter, or the parameter is empty.
pub fn token_from_url(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}
