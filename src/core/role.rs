use serde::Deserialize;

/// The structural position an asymmetric-unit chain occupies in the capsid.
///
/// Every replica of a chain carries the role of that chain. The numeric codes are written into
/// the temperature factor column of the output, so downstream tools can select on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Chains around the five-fold axes.
    Pentamer,
    /// Chains on the icosahedral faces (three-fold axes).
    Face,
    /// Chains along the edges (two-fold axes). Also the catch-all.
    Edge,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Pentamer, Role::Face, Role::Edge];

    /// The numeric code stored in the temperature factor slot.
    pub fn code(&self) -> f64 {
        match self {
            Role::Pentamer => 10.0,
            Role::Face => 50.0,
            Role::Edge => 90.0,
        }
    }

    /// Recover a role from a code read back from a written assembly.
    ///
    /// Only the first two codes are matched exactly; any other value maps to [`Role::Edge`].
    pub fn from_code(code: f64) -> Role {
        if code == Role::Pentamer.code() {
            Role::Pentamer
        } else if code == Role::Face.code() {
            Role::Face
        } else {
            Role::Edge
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Pentamer => "pentamer",
            Role::Face => "face",
            Role::Edge => "edge",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

fn pentamer_default() -> String {
    "A".to_string()
}

fn face_default() -> String {
    "C".to_string()
}

/// The substrings that identify the first two roles in an asymmetric-unit chain label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleMarkers {
    #[serde(default = "pentamer_default")]
    pub pentamer: String,
    #[serde(default = "face_default")]
    pub face: String,
}

impl Default for RoleMarkers {
    fn default() -> Self {
        Self {
            pentamer: pentamer_default(),
            face: face_default(),
        }
    }
}

impl RoleMarkers {
    /// Classify a chain by its original label.
    ///
    /// The pentamer marker is checked first, then the face marker. Labels that contain neither
    /// are edges, including chain kinds that are not known here.
    pub fn classify(&self, label: &str) -> Role {
        if label.contains(self.pentamer.as_str()) {
            Role::Pentamer
        } else if label.contains(self.face.as_str()) {
            Role::Face
        } else {
            Role::Edge
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers() {
        let markers = RoleMarkers::default();
        assert_eq!(markers.classify("A"), Role::Pentamer);
        assert_eq!(markers.classify("C"), Role::Face);
        assert_eq!(markers.classify("E"), Role::Edge);
        assert_eq!(markers.classify("Q"), Role::Edge);
        assert_eq!(markers.classify(""), Role::Edge);
    }

    #[test]
    fn pentamer_marker_takes_priority() {
        let markers = RoleMarkers::default();
        assert_eq!(markers.classify("AC"), Role::Pentamer);
        assert_eq!(markers.classify("CA"), Role::Pentamer);
        assert_eq!(markers.classify("xC"), Role::Face);
    }

    #[test]
    fn custom_markers() {
        let markers = RoleMarkers {
            pentamer: "P".to_string(),
            face: "F".to_string(),
        };
        assert_eq!(markers.classify("P1"), Role::Pentamer);
        assert_eq!(markers.classify("F2"), Role::Face);
        assert_eq!(markers.classify("A"), Role::Edge);
    }

    #[test]
    fn codes_round_trip_and_unknown_codes_are_edges() {
        for role in Role::ALL {
            assert_eq!(Role::from_code(role.code()), role);
        }
        assert_eq!(Role::from_code(0.0), Role::Edge);
        assert_eq!(Role::from_code(49.99), Role::Edge);
    }
}
