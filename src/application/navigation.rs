//! Routes, the login guard and the sidebar link sets.

use std::fmt;

/// A screen address. Paths mirror the web console's routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Logout,
    PatientList,
    PatientDetail(String),
    Survey(String),
    Profile,
    About,
}

impl Route {
    /// Parse a path. Unknown paths return `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Some(Self::Root),
            ["login"] => Some(Self::Login),
            ["logout"] => Some(Self::Logout),
            ["digital-twin"] => Some(Self::PatientList),
            ["digital-twin", id] if !id.is_empty() => Some(Self::PatientDetail((*id).to_string())),
            ["digital-twin", id, "survey"] if !id.is_empty() => Some(Self::Survey((*id).to_string())),
            ["profile"] => Some(Self::Profile),
            ["about"] => Some(Self::About),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Logout => "/logout".to_string(),
            Self::PatientList => "/digital-twin".to_string(),
            Self::PatientDetail(id) => format!("/digital-twin/{id}"),
            Self::Survey(id) => format!("/digital-twin/{id}/survey"),
            Self::Profile => "/profile".to_string(),
            Self::About => "/about".to_string(),
        }
    }

    /// Whether the route needs a session.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Root | Self::Login | Self::Logout)
    }

    /// Patient id for routes under `/digital-twin/<id>`.
    #[must_use]
    pub fn patient_id(&self) -> Option<&str> {
        match self {
            Self::PatientDetail(id) | Self::Survey(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a navigation attempt should actually land.
///
/// Protected routes redirect to login without a session. Root goes to the
/// list when logged in, else login. Logout always lands on login; the caller
/// clears the token.
#[must_use]
pub fn resolve(target: Route, authenticated: bool) -> Route {
    match target {
        Route::Root if authenticated => Route::PatientList,
        Route::Root | Route::Logout => Route::Login,
        route if route.requires_auth() && !authenticated => Route::Login,
        route => route,
    }
}

/// A sidebar entry. `target` is `None` for sections without a screen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: Option<Route>,
}

impl NavLink {
    fn to(label: &'static str, target: Route) -> Self {
        Self {
            label,
            target: Some(target),
        }
    }

    fn placeholder(label: &'static str) -> Self {
        Self { label, target: None }
    }
}

/// Sidebar links for the current route, or `None` when the sidebar is hidden.
///
/// Hidden when logged out or on the login/root route. Under
/// `/digital-twin/<id>` the patient's section links show; elsewhere the
/// general links. Logout is always last.
#[must_use]
pub fn sidebar_links(route: &Route, authenticated: bool) -> Option<Vec<NavLink>> {
    if !authenticated || matches!(route, Route::Login | Route::Root) {
        return None;
    }

    let mut links = if route.patient_id().is_some() {
        vec![
            NavLink::to("대쉬보드 홈", Route::PatientList),
            NavLink::placeholder("질환"),
            NavLink::placeholder("약물"),
            NavLink::placeholder("웰니스"),
            NavLink::placeholder("유전자 변이"),
        ]
    } else {
        vec![
            NavLink::to("대시보드 홈", Route::PatientList),
            NavLink::to("내 프로필", Route::Profile),
            NavLink::to("소개", Route::About),
        ]
    };
    links.push(NavLink::to("로그아웃", Route::Logout));
    Some(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(links: &[NavLink]) -> Vec<&'static str> {
        links.iter().map(|l| l.label).collect()
    }

    #[test]
    fn test_parse_and_path() {
        for path in [
            "/",
            "/login",
            "/logout",
            "/digital-twin",
            "/digital-twin/patient-1",
            "/digital-twin/patient-1/survey",
            "/profile",
            "/about",
        ] {
            let route = Route::parse(path).expect("Known path");
            assert_eq!(route.path(), path);
        }
        assert_eq!(Route::parse("/digital-twin/"), Some(Route::PatientList));
        assert_eq!(Route::parse("/patients"), None);
        assert_eq!(Route::parse("/digital-twin/x/y"), None);
    }

    #[test]
    fn test_guard() {
        assert_eq!(resolve(Route::PatientList, false), Route::Login);
        assert_eq!(resolve(Route::Survey("p".into()), false), Route::Login);
        assert_eq!(resolve(Route::About, true), Route::About);
        assert_eq!(resolve(Route::Root, true), Route::PatientList);
        assert_eq!(resolve(Route::Root, false), Route::Login);
        assert_eq!(resolve(Route::Logout, true), Route::Login);
        assert_eq!(resolve(Route::Login, false), Route::Login);
    }

    #[test]
    fn test_sidebar_hidden() {
        assert!(sidebar_links(&Route::PatientList, false).is_none());
        assert!(sidebar_links(&Route::Login, true).is_none());
        assert!(sidebar_links(&Route::Root, true).is_none());
    }

    #[test]
    fn test_sidebar_link_sets() {
        let detail = sidebar_links(&Route::PatientDetail("patient-1".into()), true).expect("Visible");
        assert_eq!(
            labels(&detail),
            vec!["대쉬보드 홈", "질환", "약물", "웰니스", "유전자 변이", "로그아웃"]
        );

        let survey = sidebar_links(&Route::Survey("patient-1".into()), true).expect("Visible");
        assert_eq!(labels(&survey), labels(&detail));

        for route in [Route::PatientList, Route::Profile, Route::About] {
            let list = sidebar_links(&route, true).expect("Visible");
            assert_eq!(labels(&list), vec!["대시보드 홈", "내 프로필", "소개", "로그아웃"]);
            assert_eq!(list.last().and_then(|l| l.target.clone()), Some(Route::Logout));
        }
    }
}
