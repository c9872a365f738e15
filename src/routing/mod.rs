mod internal_uri;

pub use internal_uri::InternalUri;

use std::collections::HashMap;

use thiserror::Error;
use url::{Position, Url};

use crate::controller::destination::{Destination, Parameters};

/// Parameter key carrying a route name through a parameter mapping.
pub const ROUTE_KEY: &str = "_route";

const DEFAULT_PATTERN: &str = "/:module/:action";

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("an internal URI must contain a module and an action (module/action) (\"{0}\" given)")]
    MissingModuleAndAction(String),
    #[error("unable to parse query string \"{0}\"")]
    MalformedQuery(String),
    #[error("the route \"{0}\" does not exist")]
    UnknownRoute(String),
    #[error("the \"{route}\" route has a required parameter \"{param}\"")]
    MissingParameter { route: String, param: String },
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

/// Turns destinations into URLs and internal URIs into parameters.
pub trait UrlBuilder: Send + Sync {
    fn generate(&self, destination: &Destination, absolute: bool) -> Result<String, UrlError>;

    fn parse(&self, uri: &str) -> Result<Parameters, UrlError>;
}

/// URL builder backed by a table of named route patterns such as
/// `/item/:id`, with `/:module/:action` as the fallback rule.
#[derive(Debug, Clone)]
pub struct RouteUrlBuilder {
    base: Url,
    routes: HashMap<String, String>,
}

impl RouteUrlBuilder {
    pub fn new(base_url: &str) -> Result<Self, UrlError> {
        let base = Url::parse(base_url).map_err(|e| UrlError::InvalidBaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(UrlError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base,
            routes: HashMap::new(),
        })
    }

    pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes.insert(name.into(), pattern.into());
        self
    }

    fn render(&self, route: Option<&str>, mut params: Parameters) -> Result<Url, UrlError> {
        let (name, pattern) = match route.filter(|r| !r.is_empty()) {
            Some(name) => match self.routes.get(name) {
                Some(pattern) => (name, pattern.as_str()),
                None => return Err(UrlError::UnknownRoute(name.to_string())),
            },
            None if params.is_empty() => ("default", "/"),
            None => ("default", DEFAULT_PATTERN),
        };

        let mut segments = Vec::new();
        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix(':') {
                Some(param) => match params.remove(param) {
                    Some(value) => segments.push(value),
                    None => {
                        return Err(UrlError::MissingParameter {
                            route: name.to_string(),
                            param: param.to_string(),
                        })
                    }
                },
                None => segments.push(segment.to_string()),
            }
        }

        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| UrlError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(&segments);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(url)
    }
}

impl UrlBuilder for RouteUrlBuilder {
    fn generate(&self, destination: &Destination, absolute: bool) -> Result<String, UrlError> {
        let (route, params, fragment) = match destination {
            Destination::Uri(uri) => {
                if is_passthrough(uri) {
                    return Ok(uri.clone());
                }

                let (uri, fragment) = match uri.split_once('#') {
                    Some((uri, fragment)) => (uri, Some(fragment)),
                    None => (uri.as_str(), None),
                };
                let parsed = InternalUri::parse(uri)?;
                (parsed.route, parsed.params, fragment)
            }
            Destination::Params(params) => {
                let mut params = params.clone();
                let route = params.remove(ROUTE_KEY);
                (route, params, None)
            }
        };

        let mut url = self.render(route.as_deref(), params)?;
        url.set_fragment(fragment.filter(|f| !f.is_empty()));

        if absolute {
            Ok(url.to_string())
        } else {
            Ok(url[Position::BeforePath..].to_string())
        }
    }

    fn parse(&self, uri: &str) -> Result<Parameters, UrlError> {
        Ok(InternalUri::parse(uri)?.into_parameters())
    }
}

/// Absolute URLs, root-relative paths and a lone `#` are used as given.
pub fn is_passthrough(uri: &str) -> bool {
    if uri == "#" || uri.starts_with('/') {
        return true;
    }

    match uri.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().map_or(false, |c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        }
        None => false,
    }
}
