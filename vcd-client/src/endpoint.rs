//! OpenAPI endpoint catalog, URL building, and API version negotiation
//!
//! Every OpenAPI call targets an endpoint from the catalog below and carries
//! a negotiated API version in its `Accept` header. Each endpoint pins the
//! minimum version it appeared in; some additionally list elevated versions
//! that unlock newer server behavior when the session supports them.

use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// A Cloud Director API version, e.g. "37.2"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ClientError::InvalidConfig(format!("invalid API version '{s}'"));
        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

/// API versions this client speaks, ascending
pub const DEFAULT_API_VERSIONS: [ApiVersion; 8] = [
    ApiVersion::new(36, 0),
    ApiVersion::new(36, 3),
    ApiVersion::new(37, 0),
    ApiVersion::new(37, 2),
    ApiVersion::new(38, 0),
    ApiVersion::new(38, 1),
    ApiVersion::new(39, 0),
    ApiVersion::new(40, 0),
];

/// OpenAPI endpoints used by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Interfaces,
    EntityTypes,
    Entities,
    EntityResolve,
    VirtualCenters,
    ContentLibraries,
    Tasks,
}

impl Endpoint {
    /// Path under the OpenAPI root; `{}` placeholders consume path parameters
    /// left to right
    pub(crate) fn path(&self) -> &'static str {
        match self {
            Endpoint::Interfaces => "1.0.0/interfaces/",
            Endpoint::EntityTypes => "1.0.0/entityTypes/",
            Endpoint::Entities => "1.0.0/entities/",
            Endpoint::EntityResolve => "1.0.0/entities/{}/resolve",
            Endpoint::VirtualCenters => "1.0.0/virtualCenters/",
            Endpoint::ContentLibraries => "vcf/contentLibraries/",
            Endpoint::Tasks => "1.0.0/tasks/",
        }
    }

    /// Lowest API version the endpoint exists in
    pub(crate) fn min_version(&self) -> ApiVersion {
        match self {
            Endpoint::Interfaces
            | Endpoint::EntityTypes
            | Endpoint::Entities
            | Endpoint::EntityResolve
            | Endpoint::Tasks => ApiVersion::new(36, 0),
            Endpoint::VirtualCenters => ApiVersion::new(38, 0),
            Endpoint::ContentLibraries => ApiVersion::new(40, 0),
        }
    }

    /// Versions above the minimum that change server behavior, ascending
    pub(crate) fn elevated_versions(&self) -> &'static [ApiVersion] {
        const ENTITY_ELEVATED: [ApiVersion; 2] =
            [ApiVersion::new(37, 0), ApiVersion::new(39, 0)];
        const VIRTUAL_CENTER_ELEVATED: [ApiVersion; 1] = [ApiVersion::new(38, 1)];
        match self {
            Endpoint::EntityTypes | Endpoint::Entities | Endpoint::EntityResolve => {
                &ENTITY_ELEVATED
            }
            Endpoint::VirtualCenters => &VIRTUAL_CENTER_ELEVATED,
            _ => &[],
        }
    }
}

/// Pick the highest session-supported version for an endpoint
///
/// The session must speak the endpoint's minimum version. Among the
/// endpoint's elevated versions, the highest one the session also supports
/// wins; with no usable elevation the minimum itself is returned.
pub(crate) fn highest_elevated_version(
    supported: &[ApiVersion],
    endpoint: Endpoint,
) -> Result<ApiVersion> {
    let min = endpoint.min_version();
    if !supported.contains(&min) {
        return Err(ClientError::UnsupportedVersion(format!(
            "{} (requires at least {min})",
            endpoint.path()
        )));
    }

    let elevated = endpoint
        .elevated_versions()
        .iter()
        .filter(|v| supported.contains(v))
        .max();

    Ok(elevated.copied().unwrap_or(min))
}

/// Join the OpenAPI root, the endpoint path, and its parameters
///
/// Placeholders in the path template are filled first; remaining parameters
/// are appended as trailing segments. Empty parameters are rejected so a
/// wrapper with a zeroed record cannot address the collection by accident.
pub(crate) fn build_endpoint(base_url: &str, endpoint: Endpoint, params: &[&str]) -> Result<String> {
    let mut params = params.iter();
    let template = endpoint.path();
    let mut path = String::with_capacity(template.len());

    let mut pieces = template.split("{}").peekable();
    while let Some(piece) = pieces.next() {
        path.push_str(piece);
        if pieces.peek().is_some() {
            let param = params.next().ok_or_else(|| {
                ClientError::InvalidRequest(format!("missing path parameter for {template}"))
            })?;
            push_param(&mut path, param, template)?;
        }
    }

    for param in params {
        if !path.ends_with('/') {
            path.push('/');
        }
        push_param(&mut path, param, template)?;
    }

    Ok(format!("{base_url}/cloudapi/{path}"))
}

fn push_param(path: &mut String, param: &str, template: &str) -> Result<()> {
    if param.is_empty() {
        return Err(ClientError::InvalidRequest(format!(
            "empty path parameter for {template}"
        )));
    }
    path.push_str(param);
    Ok(())
}

/// Extract the UUID portion of a URN like `urn:vcloud:vimserver:<uuid>`
pub(crate) fn extract_uuid(id: &str) -> Result<String> {
    let candidate = id.rsplit(':').next().unwrap_or_default();
    uuid::Uuid::parse_str(candidate)
        .map(|_| candidate.to_string())
        .map_err(|_| ClientError::InvalidRequest(format!("no UUID found in id '{id}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parse_and_display() {
        let v: ApiVersion = "37.2".parse().unwrap();
        assert_eq!(v, ApiVersion::new(37, 2));
        assert_eq!(v.to_string(), "37.2");
        assert!("banana".parse::<ApiVersion>().is_err());
        assert!("37".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn version_ordering_is_numeric() {
        assert!(ApiVersion::new(38, 0) > ApiVersion::new(37, 2));
        assert!(ApiVersion::new(37, 10) > ApiVersion::new(37, 2));
    }

    #[test]
    fn negotiation_picks_highest_supported_elevation() {
        let supported = [
            ApiVersion::new(36, 0),
            ApiVersion::new(37, 0),
            ApiVersion::new(39, 0),
        ];
        let version = highest_elevated_version(&supported, Endpoint::EntityTypes).unwrap();
        assert_eq!(version, ApiVersion::new(39, 0));
    }

    #[test]
    fn negotiation_falls_back_to_minimum() {
        let supported = [ApiVersion::new(36, 0), ApiVersion::new(36, 3)];
        let version = highest_elevated_version(&supported, Endpoint::EntityTypes).unwrap();
        assert_eq!(version, ApiVersion::new(36, 0));
    }

    #[test]
    fn negotiation_rejects_sessions_below_minimum() {
        let supported = [ApiVersion::new(36, 0)];
        let err = highest_elevated_version(&supported, Endpoint::ContentLibraries).unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedVersion(_)));
    }

    #[test]
    fn build_appends_trailing_parameters() {
        let url = build_endpoint(
            "https://vcd.example.com",
            Endpoint::EntityTypes,
            &["urn:vcloud:type:acme.k8s:1.0.0"],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://vcd.example.com/cloudapi/1.0.0/entityTypes/urn:vcloud:type:acme.k8s:1.0.0"
        );
    }

    #[test]
    fn build_fills_placeholders() {
        let url = build_endpoint("https://vcd.example.com", Endpoint::EntityResolve, &["abc"])
            .unwrap();
        assert_eq!(
            url,
            "https://vcd.example.com/cloudapi/1.0.0/entities/abc/resolve"
        );
    }

    #[test]
    fn build_rejects_empty_and_missing_parameters() {
        let err = build_endpoint("https://x", Endpoint::EntityTypes, &[""]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));

        let err = build_endpoint("https://x", Endpoint::EntityResolve, &[]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn uuid_extraction() {
        let id = "urn:vcloud:vimserver:9e09f3c4-5bd2-4c29-8d33-5b89b7e97b93";
        assert_eq!(
            extract_uuid(id).unwrap(),
            "9e09f3c4-5bd2-4c29-8d33-5b89b7e97b93"
        );
        assert!(extract_uuid("urn:vcloud:vimserver:not-a-uuid").is_err());
    }
}
