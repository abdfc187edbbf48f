//! Double submit cookie protection for the contact form.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const CSRF_COOKIE: &str = "csrftoken";

const TOKEN_BYTES: usize = 32;

/// Return the token stored in the jar, issuing a new one if there is none.
pub fn ensure_token(jar: CookieJar) -> (CookieJar, String) {
    let existing = jar
        .get(CSRF_COOKIE)
        .map(|x| x.value().to_owned())
        .filter(|x| is_well_formed(x));
    if let Some(token) = existing {
        return (jar, token);
    }

    let token = hex::encode(rand::random::<[u8; TOKEN_BYTES]>());
    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .path("/")
        .same_site(SameSite::Lax);
    (jar.add(cookie), token)
}

/// Check that the submitted token matches the one in the cookie.
pub fn verify(jar: &CookieJar, submitted: Option<&str>) -> bool {
    let (Some(cookie), Some(submitted)) = (jar.get(CSRF_COOKIE), submitted) else {
        return false;
    };
    is_well_formed(submitted) && constant_time_eq(cookie.value().as_bytes(), submitted.as_bytes())
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_BYTES * 2 && token.bytes().all(|b| b.is_ascii_hexdigit())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}
