// Parser configuration

/// Knobs for a single parse call. The defaults follow the ID3v2.3 layout
/// strictly and trust declared frame sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Re-derive JPEG artwork bounds from the SOI/EOI markers in the tag
    /// instead of trusting the APIC frame length.
    pub recover_jpeg_span: bool,
    /// Reject every header version other than 2.3. When off, 2.4 headers are
    /// walked with the 2.3 frame layout. 2.2 is always rejected.
    pub strict_versions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recover_jpeg_span: false,
            strict_versions: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jpeg_recovery(mut self, enabled: bool) -> Self {
        self.recover_jpeg_span = enabled;
        self
    }

    pub fn with_strict_versions(mut self, strict: bool) -> Self {
        self.strict_versions = strict;
        self
    }

    /// Whether a header announcing `2.<major>` may be parsed.
    pub fn accepts_version(&self, major: u8) -> bool {
        match major {
            3 => true,
            4 => !self.strict_versions,
            _ => false,
        }
    }
}
