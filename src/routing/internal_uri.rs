use url::form_urlencoded;

use crate::controller::destination::Parameters;
use crate::routing::{UrlError, ROUTE_KEY};

/// A parsed internal URI: `@route_name?key=value` or `module/action?key=value`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternalUri {
    pub route: Option<String>,
    pub params: Parameters,
}

impl InternalUri {
    pub fn parse(uri: &str) -> Result<Self, UrlError> {
        let given = uri;
        let uri = if uri.is_empty() { "/" } else { uri };

        // a leading `?` does not start a query string
        let (path, query) = match uri.find('?') {
            Some(pos) if pos > 0 => (&uri[..pos], &uri[pos + 1..]),
            _ => (uri, ""),
        };
        let path = path.strip_prefix('/').unwrap_or(path);

        let mut parsed = InternalUri::default();

        if let Some(name) = path.strip_prefix('@') {
            parsed.route = Some(name.to_string());
        } else if path.contains('/') {
            let mut segments = path.split('/');
            let module = segments.next().unwrap_or_default();
            let action = segments.next().unwrap_or_default();
            parsed.params.insert("module".to_string(), module.to_string());
            parsed.params.insert("action".to_string(), action.to_string());
        } else if query.is_empty() {
            parsed.route = Some(given.to_string());
        } else {
            return Err(UrlError::MissingModuleAndAction(given.to_string()));
        }

        if !query.is_empty() {
            let pairs = split_query(query);
            if pairs.is_empty() {
                return Err(UrlError::MalformedQuery(query.to_string()));
            }
            parsed.params.extend(pairs);
        }

        Ok(parsed)
    }

    /// Flattens the route name into the parameters under [`ROUTE_KEY`].
    pub fn into_parameters(self) -> Parameters {
        let mut params = self.params;
        if let Some(route) = self.route.filter(|r| !r.is_empty()) {
            params.insert(ROUTE_KEY.to_string(), route);
        }
        params
    }
}

/// Splits `key=value` pairs. A pair only ends at an `&` that is followed by
/// another `key=`, so values may contain bare `&` and `=` characters.
/// Keys are percent-decoded, values are kept as written.
fn split_query(query: &str) -> Vec<(String, String)> {
    let bytes = query.as_bytes();
    let mut bounds = vec![0];
    bounds.extend((0..bytes.len()).filter(|&i| bytes[i] == b'&' && starts_key(&bytes[i + 1..])));
    bounds.push(bytes.len());
    bounds.dedup();

    bounds
        .windows(2)
        .filter_map(|w| split_pair(&query[w[0]..w[1]]))
        .collect()
}

/// True when `rest` begins with `[^&=]+=`.
fn starts_key(rest: &[u8]) -> bool {
    let run = rest.iter().take_while(|b| **b != b'&' && **b != b'=').count();
    run > 0 && rest.get(run) == Some(&b'=')
}

fn split_pair(segment: &str) -> Option<(String, String)> {
    let bytes = segment.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if bytes[start] == b'&' || bytes[start] == b'=' {
            start += 1;
            continue;
        }
        let run = bytes[start..]
            .iter()
            .take_while(|b| **b != b'&' && **b != b'=')
            .count();
        let eq = start + run;
        if bytes.get(eq) == Some(&b'=') {
            let key = decode_key(&segment[start..eq]);
            return Some((key, segment[eq + 1..].to_string()));
        }
        start = eq;
    }
    None
}

fn decode_key(raw: &str) -> String {
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}
