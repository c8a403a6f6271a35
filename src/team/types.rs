use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub roles: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, roles: impl Into<String>) -> Self {
        Self { name: name.into(), roles: roles.into(), url: None }
    }
}

#[derive(Serialize)]
pub struct TeamSource {
    pub source: String,
    pub members: Vec<TeamMember>,
}

#[derive(Serialize)]
pub struct TeamResult {
    pub sources: Vec<TeamSource>,
}
