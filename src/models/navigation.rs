use crate::models::role::UserRole;
use rocket::serde::Serialize;
use schemars::JsonSchema;

pub const SIDEBAR_TITLE: &str = "PKG";
pub const LOGOUT_LABEL: &str = "Sair";

/// Feature areas reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationArea {
    Dashboard,
    Apontamento,
    Cadastros,
}

impl NavigationArea {
    pub const ALL: [NavigationArea; 3] = [NavigationArea::Dashboard, NavigationArea::Apontamento, NavigationArea::Cadastros];

    pub fn label(&self) -> &'static str {
        match self {
            NavigationArea::Dashboard => "Dashboard",
            NavigationArea::Apontamento => "Apontamento",
            NavigationArea::Cadastros => "Cadastros",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            NavigationArea::Dashboard => "/dashboard",
            NavigationArea::Apontamento => "/apontamento",
            NavigationArea::Cadastros => "/cadastros",
        }
    }

    pub fn visible_to(&self, role: UserRole) -> bool {
        match self {
            NavigationArea::Dashboard | NavigationArea::Apontamento => true,
            NavigationArea::Cadastros => matches!(role, UserRole::Diretor | UserRole::Gerente),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct NavigationItem {
    pub label: String,
    pub href: String,
}

impl From<NavigationArea> for NavigationItem {
    fn from(area: NavigationArea) -> Self {
        Self {
            label: area.label().to_string(),
            href: area.href().to_string(),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct NavigationResponse {
    pub title: String,
    pub items: Vec<NavigationItem>,
    pub logout_label: String,
}

impl NavigationResponse {
    pub fn for_role(role: UserRole) -> Self {
        let items = NavigationArea::ALL
            .into_iter()
            .filter(|area| area.visible_to(role))
            .map(NavigationItem::from)
            .collect();

        Self {
            title: SIDEBAR_TITLE.to_string(),
            items,
            logout_label: LOGOUT_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(response: &NavigationResponse) -> Vec<&str> {
        response.items.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn diretor_sees_every_area() {
        let response = NavigationResponse::for_role(UserRole::Diretor);
        assert_eq!(labels(&response), vec!["Dashboard", "Apontamento", "Cadastros"]);
        assert_eq!(response.title, "PKG");
        assert_eq!(response.logout_label, "Sair");
    }

    #[test]
    fn analista_does_not_see_cadastros() {
        let response = NavigationResponse::for_role(UserRole::Analista);
        assert_eq!(labels(&response), vec!["Dashboard", "Apontamento"]);
    }

    #[test]
    fn every_role_keeps_dashboard_first() {
        for role in UserRole::ALL {
            let response = NavigationResponse::for_role(role);
            assert_eq!(response.items[0].href, "/dashboard");
        }
    }
}
