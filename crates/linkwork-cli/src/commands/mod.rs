//! CLI command implementations

pub mod completions;
pub mod config;
pub mod demo;
pub mod graph;
pub mod table;
pub mod tree;

/// Parse `key=value` into a string key and integer value
pub fn parse_pair(s: &str) -> Result<(String, i64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value in '{}': {}", s, e))?;
    Ok((key.trim().to_string(), value))
}

/// Parse `from:to` into two vertex names
pub fn parse_vertex_pair(s: &str) -> Result<(String, String), String> {
    match s.split(':').collect::<Vec<_>>().as_slice() {
        [from, to] if !from.is_empty() && !to.is_empty() => Ok((from.to_string(), to.to_string())),
        _ => Err(format!("expected from:to, got '{}'", s)),
    }
}

/// Parse `from:to[:weight]`; the weight defaults to 1
pub fn parse_edge(s: &str) -> Result<(String, String, u64), String> {
    match s.split(':').collect::<Vec<_>>().as_slice() {
        [from, to] if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string(), linkwork_core::graph::DEFAULT_WEIGHT))
        }
        [from, to, weight] if !from.is_empty() && !to.is_empty() => {
            let weight = weight
                .parse()
                .map_err(|e| format!("invalid weight in '{}': {}", s, e))?;
            Ok((from.to_string(), to.to_string(), weight))
        }
        _ => Err(format!("expected from:to[:weight], got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("apple=10"), Ok(("apple".to_string(), 10)));
        assert_eq!(parse_pair("neg=-3"), Ok(("neg".to_string(), -3)));
        assert!(parse_pair("apple").is_err());
        assert!(parse_pair("apple=ten").is_err());
    }

    #[test]
    fn test_parse_edge() {
        assert_eq!(parse_edge("A:B:4"), Ok(("A".to_string(), "B".to_string(), 4)));
        assert_eq!(parse_edge("A:B"), Ok(("A".to_string(), "B".to_string(), 1)));
        assert!(parse_edge("A:B:-1").is_err());
        assert!(parse_edge("A").is_err());
        assert!(parse_edge(":B").is_err());
    }

    #[test]
    fn test_parse_vertex_pair() {
        assert_eq!(parse_vertex_pair("A:E"), Ok(("A".to_string(), "E".to_string())));
        assert!(parse_vertex_pair("A:B:C").is_err());
    }
}
