//! Address normalization

/// Address split into a dot-free username and its domain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedAddress {
    pub username: String,
    pub domain: String,
}

impl NormalizedAddress {
    /// An empty username means the input was not a usable address
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty()
    }

    /// Username length in characters
    pub fn len(&self) -> usize {
        self.username.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty()
    }
}

/// Split `address` on '@' and strip every '.' from the local-part.
///
/// Anything other than exactly two non-empty parts yields a blank
/// [`NormalizedAddress`] instead of an error.
pub fn normalize(address: &str) -> NormalizedAddress {
    let mut parts = address.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
            (local, domain)
        }
        _ => return NormalizedAddress::default(),
    };

    NormalizedAddress {
        username: local.replace('.', ""),
        domain: domain.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_dots_from_local_part_only() {
        let normalized = normalize("j.o.h.n@googlemail.com");
        assert_eq!(normalized.username, "john");
        assert_eq!(normalized.domain, "googlemail.com");
        assert!(normalized.is_valid());
    }

    #[test]
    fn test_malformed_addresses() {
        for input in ["not-an-address", "a@b@c", "@gmail.com", "john@", ""] {
            assert_eq!(normalize(input), NormalizedAddress::default(), "{}", input);
        }
    }

    #[test]
    fn test_all_dots_local_part() {
        let normalized = normalize("...@gmail.com");
        assert!(normalized.is_empty());
        assert_eq!(normalized.domain, "gmail.com");
    }

    #[test]
    fn test_length_counts_chars() {
        assert_eq!(normalize("zoë@gmail.com").len(), 3);
    }
}
