// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Page routing table.

use std::fmt;

/// Pages reachable from the navigation bar, plus a catch-all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Post,
    /// Unknown path, kept for display.
    NotFound(String),
}

impl Route {
    /// Routes shown in the navigation bar.
    pub const NAV: [Route; 2] = [Route::Home, Route::Post];

    /// Resolve a path such as `/post?draft=1#top`.
    ///
    /// Query strings, fragments and one trailing slash are ignored; matching
    /// is exact otherwise.
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let normalized = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        match normalized {
            "" | "/" => Self::Home,
            "/post" => Self::Post,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::Post => "/post",
            Self::NotFound(path) => path,
        }
    }

    /// Translation key of the navigation label.
    pub fn nav_key(&self) -> &'static str {
        match self {
            Self::Home => "nav.home",
            Self::Post => "nav.post",
            Self::NotFound(_) => "notFound.title",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/post"), Route::Post);
        assert_eq!(Route::resolve("/post/"), Route::Post);
        assert_eq!(Route::resolve("/post?draft=1#top"), Route::Post);
        assert_eq!(Route::resolve("/?lang=ja"), Route::Home);
    }

    #[test]
    fn unknown_paths_fall_through() {
        assert_eq!(Route::resolve("/posts"), Route::NotFound("/posts".into()));
        assert_eq!(Route::resolve("/post/42"), Route::NotFound("/post/42".into()));
        assert_eq!(Route::resolve("/POST").path(), "/POST");
    }

    #[test]
    fn paths_round_trip_for_nav_routes() {
        for route in Route::NAV {
            assert_eq!(Route::resolve(route.path()), route);
        }
    }
}
