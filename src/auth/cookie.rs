use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::auth::token::SESSION_TTL_SECS;

pub const TOKEN_COOKIE: &str = "token";

/// Builds and clears the session cookie.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookies {
    /// Adds the `Secure` attribute. Set in production only so local HTTP works.
    pub secure: bool,
}

impl SessionCookies {
    pub fn issue(&self, jar: CookieJar, token: String) -> CookieJar {
        let cookie = Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .max_age(time::Duration::seconds(SESSION_TTL_SECS));

        jar.add(cookie)
    }

    /// Logout is purely client side: tell the browser to drop the cookie.
    /// Always sends the expired cookie, whether or not the request carried one.
    pub fn revoke(&self, jar: CookieJar) -> CookieJar {
        let cookie = Cookie::build((TOKEN_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .max_age(time::Duration::ZERO);

        jar.add(cookie)
    }

    pub fn token(jar: &CookieJar) -> Option<&str> {
        jar.get(TOKEN_COOKIE)
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header::SET_COOKIE, response::IntoResponse};

    fn set_cookie_header(jar: CookieJar) -> String {
        let response = (jar, "").into_response();
        response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn issued_cookie_is_locked_down() {
        let jar = SessionCookies { secure: false }.issue(CookieJar::new(), "abc".into());
        let header = set_cookie_header(jar);
        assert!(header.starts_with("token=abc"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Strict"));
        assert!(header.contains("Max-Age=3600"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn production_cookie_is_secure() {
        let jar = SessionCookies { secure: true }.issue(CookieJar::new(), "abc".into());
        assert!(set_cookie_header(jar).contains("Secure"));
    }

    #[test]
    fn revoked_cookie_expires_immediately() {
        let jar = SessionCookies { secure: false }.revoke(CookieJar::new());
        let header = set_cookie_header(jar);
        assert!(header.starts_with("token="));
        assert!(header.contains("Max-Age=0"));
    }

    #[test]
    fn revoke_replaces_a_held_token() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, "abc"));
        let jar = SessionCookies { secure: false }.revoke(jar);
        assert_eq!(SessionCookies::token(&jar), None);
        assert!(set_cookie_header(jar).contains("Max-Age=0"));
    }
}
