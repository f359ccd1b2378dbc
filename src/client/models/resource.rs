//! Portfolio content sections

use std::fmt;

/// Opaque portfolio entity (About, Skill, Project, ...)
///
/// The client passes these through untouched; their shape belongs to the backend.
pub type Entity = serde_json::Value;

/// Content section managed by the admin console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Resource {
    About,
    Skills,
    Projects,
    Experiences,
    Education,
    Languages,
    Interests,
}

impl Resource {
    /// Path segment under `/v1` and `/v1/admin`
    pub fn segment(&self) -> &'static str {
        match self {
            Resource::About => "about",
            Resource::Skills => "skills",
            Resource::Projects => "projects",
            Resource::Experiences => "experiences",
            Resource::Education => "education",
            Resource::Languages => "languages",
            Resource::Interests => "interests",
        }
    }

    /// About is a single record edited in place, without an id
    pub fn is_singleton(&self) -> bool {
        matches!(self, Resource::About)
    }

    /// Admin console path guarding this section
    pub fn admin_view(&self) -> String {
        format!("/admin/{}", self.segment())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}
