//! One-shot notifications carried to the next rendered page in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use forge_models::notification::Notification;

pub const FLASH_COOKIE: &str = "flash";

/// Remove the pending notification from the jar and return it.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notification>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let notification = Notification::from_code(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, notification)
}

/// Store a notification to be shown on the next rendered page.
pub fn set(jar: CookieJar, notification: Notification) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, notification.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap};

    use super::*;

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, cookie.parse().unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn take_pending() {
        let jar = jar_with("flash=contact_message_sent");
        let (jar, notification) = take(jar);
        assert_eq!(notification, Some(Notification::ContactMessageSent));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn take_unknown() {
        let (jar, notification) = take(jar_with("flash=garbage"));
        assert_eq!(notification, None);
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn take_nothing() {
        let (_, notification) = take(CookieJar::new());
        assert_eq!(notification, None);
    }

    #[test]
    fn set_then_take() {
        let jar = set(CookieJar::new(), Notification::ContactMessageFailed);
        assert_eq!(
            jar.get(FLASH_COOKIE).map(|x| x.value().to_owned()).as_deref(),
            Some("contact_message_failed")
        );
        let (_, notification) = take(jar);
        assert_eq!(notification, Some(Notification::ContactMessageFailed));
    }
}
