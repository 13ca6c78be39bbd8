use std::net::Ipv4Addr;

/// Parses a strict dotted-quad IPv4 address (no leading zeros, no ports,
/// no surrounding whitespace).
pub fn parse_ipv4(input: &str) -> Result<Ipv4Addr, String> {
    input
        .parse::<Ipv4Addr>()
        .map_err(|_| format!("'{input}' is not a valid IPv4 address"))
}

pub fn validate_domain_name(domain: &str) -> Result<(), String> {
    if domain.is_empty() {
        return Err("Domain cannot be empty".to_string());
    }
    if domain.len() > 253 {
        return Err("Domain cannot exceed 253 characters".to_string());
    }
    for label in domain.trim_end_matches('.').split('.') {
        if label.is_empty() {
            return Err(format!("Domain '{domain}' contains an empty label"));
        }
        if label.len() > 63 {
            return Err(format!("Label '{label}' exceeds 63 characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(format!("Label '{label}' cannot start or end with a hyphen"));
        }
        let valid = label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(format!(
                "Domain '{domain}' contains invalid characters (only alphanumeric, hyphens and underscores are allowed)"
            ));
        }
    }
    Ok(())
}

/// Lowercases and trims a feed line; returns `None` for blank lines.
pub fn normalize_domain_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}
