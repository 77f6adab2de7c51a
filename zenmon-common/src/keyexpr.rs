/// Default key expression prefix for all Zenmon instruments.
pub const KEY_PREFIX: &str = "zenmon/vpmic";

/// Builder for constructing instrument attribute key expressions.
///
/// Key expressions follow the pattern:
/// `<prefix>/<instrument>/<attribute>`
#[derive(Debug, Clone)]
pub struct AttrKeyBuilder {
    prefix: String,
    instrument: String,
}

impl AttrKeyBuilder {
    /// Create a new key builder for an instrument, using the default prefix.
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            prefix: KEY_PREFIX.to_string(),
            instrument: instrument.into(),
        }
    }

    /// Create a builder with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>, instrument: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            instrument: instrument.into(),
        }
    }

    /// Get the prefix this builder was created with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Get the instrument name this builder was created with.
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Build the key expression for a named attribute.
    ///
    /// # Example
    /// ```
    /// use zenmon_common::keyexpr::AttrKeyBuilder;
    ///
    /// let keys = AttrKeyBuilder::new("vpmic0");
    /// assert_eq!(keys.attr("in0_input"), "zenmon/vpmic/vpmic0/in0_input");
    /// ```
    pub fn attr(&self, attribute: &str) -> String {
        format!("{}/{}/{}", self.prefix, self.instrument, attribute)
    }

    /// Build a wildcard key expression matching every attribute of the
    /// instrument.
    ///
    /// # Example
    /// ```
    /// use zenmon_common::keyexpr::AttrKeyBuilder;
    ///
    /// let keys = AttrKeyBuilder::new("vpmic0");
    /// assert_eq!(keys.instrument_wildcard(), "zenmon/vpmic/vpmic0/*");
    /// ```
    pub fn instrument_wildcard(&self) -> String {
        format!("{}/{}/*", self.prefix, self.instrument)
    }

    /// Build the key expression for instrument status.
    ///
    /// The `@` segment marks an administrative channel, keeping status
    /// out of the attribute wildcard.
    ///
    /// # Example
    /// ```
    /// use zenmon_common::keyexpr::AttrKeyBuilder;
    ///
    /// let keys = AttrKeyBuilder::new("vpmic0");
    /// assert_eq!(keys.status_key(), "zenmon/vpmic/vpmic0/@/status");
    /// ```
    pub fn status_key(&self) -> String {
        format!("{}/{}/@/status", self.prefix, self.instrument)
    }
}

/// Parsed components of an instrument attribute key expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttrKey<'a> {
    pub instrument: &'a str,
    pub attribute: &'a str,
}

/// Parse a concrete attribute key expression against a prefix.
///
/// Returns `None` if the key does not match `<prefix>/<instrument>/<attribute>`
/// exactly, or if it addresses the administrative (`@`) channel.
pub fn parse_attr_key<'a>(prefix: &str, key: &'a str) -> Option<ParsedAttrKey<'a>> {
    let rest = key.strip_prefix(prefix)?.strip_prefix('/')?;

    let mut parts = rest.split('/');
    let instrument = parts.next()?;
    let attribute = parts.next()?;
    if parts.next().is_some() || instrument.is_empty() || attribute.is_empty() {
        return None;
    }
    if instrument.starts_with('@') || attribute.starts_with('@') {
        return None;
    }

    Some(ParsedAttrKey {
        instrument,
        attribute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builder() {
        let keys = AttrKeyBuilder::new("vpmic0");

        assert_eq!(keys.attr("in0_input"), "zenmon/vpmic/vpmic0/in0_input");
        assert_eq!(keys.attr("temp1_label"), "zenmon/vpmic/vpmic0/temp1_label");
        assert_eq!(keys.instrument_wildcard(), "zenmon/vpmic/vpmic0/*");
        assert_eq!(keys.status_key(), "zenmon/vpmic/vpmic0/@/status");
    }

    #[test]
    fn test_custom_prefix() {
        let keys = AttrKeyBuilder::with_prefix("lab/bench", "rig1");
        assert_eq!(keys.attr("curr1_max"), "lab/bench/rig1/curr1_max");
        assert_eq!(keys.prefix(), "lab/bench");
        assert_eq!(keys.instrument(), "rig1");
    }

    #[test]
    fn test_parse_attr_key() {
        let parsed = parse_attr_key("zenmon/vpmic", "zenmon/vpmic/vpmic0/in0_input").unwrap();

        assert_eq!(parsed.instrument, "vpmic0");
        assert_eq!(parsed.attribute, "in0_input");
    }

    #[test]
    fn test_parse_roundtrip() {
        let keys = AttrKeyBuilder::with_prefix("lab/bench", "rig1");
        let key = keys.attr("temp1_min");

        let parsed = parse_attr_key("lab/bench", &key).unwrap();
        assert_eq!(parsed.instrument, "rig1");
        assert_eq!(parsed.attribute, "temp1_min");
    }

    #[test]
    fn test_parse_invalid_key() {
        assert!(parse_attr_key("zenmon/vpmic", "other/vpmic/dev/attr").is_none());
        assert!(parse_attr_key("zenmon/vpmic", "zenmon/vpmic/dev").is_none());
        assert!(parse_attr_key("zenmon/vpmic", "zenmon/vpmic/dev/a/b").is_none());
        assert!(parse_attr_key("zenmon/vpmic", "zenmon/vpmic//attr").is_none());
    }

    #[test]
    fn test_parse_rejects_admin_channel() {
        assert!(parse_attr_key("zenmon/vpmic", "zenmon/vpmic/vpmic0/@/status").is_none());
        assert!(parse_attr_key("zenmon/vpmic", "zenmon/vpmic/@/status").is_none());
    }
}
