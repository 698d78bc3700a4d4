//! Parser configuration.

/// Configuration for the parser.
///
/// Use the builder pattern to create a configuration:
///
/// ```
/// use filterbrr_parser::config::ParserConfig;
///
/// let config = ParserConfig::builder()
///     .min_year(1950)
///     .detect_music(false)
///     .build();
/// assert!(!config.accepts_year(1949));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Smallest 4-digit number accepted as a year.
    /// Default: 1900
    pub min_year: i32,

    /// Largest 4-digit number accepted as a year.
    /// Default: 2099
    pub max_year: i32,

    /// Whether "Artist - Album" names are split into artists and title.
    /// Default: true
    pub detect_music: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_year: 1900,
            max_year: 2099,
            detect_music: true,
        }
    }
}

impl ParserConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Whether `year` falls inside the configured window.
    pub fn accepts_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

/// Builder for `ParserConfig`.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    min_year: Option<i32>,
    max_year: Option<i32>,
    detect_music: Option<bool>,
}

impl ParserConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smallest accepted year.
    pub fn min_year(mut self, year: i32) -> Self {
        self.min_year = Some(year);
        self
    }

    /// Set the largest accepted year.
    pub fn max_year(mut self, year: i32) -> Self {
        self.max_year = Some(year);
        self
    }

    /// Set whether music names are split into artists and title.
    ///
    /// Default: true
    pub fn detect_music(mut self, enabled: bool) -> Self {
        self.detect_music = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ParserConfig {
        let defaults = ParserConfig::default();
        ParserConfig {
            min_year: self.min_year.unwrap_or(defaults.min_year),
            max_year: self.max_year.unwrap_or(defaults.max_year),
            detect_music: self.detect_music.unwrap_or(defaults.detect_music),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.min_year, 1900);
        assert_eq!(config.max_year, 2099);
        assert!(config.detect_music);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ParserConfig::builder()
            .min_year(1950)
            .max_year(2030)
            .detect_music(false)
            .build();

        assert_eq!(config.min_year, 1950);
        assert_eq!(config.max_year, 2030);
        assert!(!config.detect_music);
    }

    #[test]
    fn test_builder_partial() {
        let config = ParserConfig::builder().max_year(2025).build();

        assert_eq!(config.min_year, 1900); // default
        assert_eq!(config.max_year, 2025);
        assert!(config.detect_music); // default
    }

    #[test]
    fn test_accepts_year() {
        let config = ParserConfig::default();
        assert!(config.accepts_year(1900));
        assert!(config.accepts_year(2099));
        assert!(!config.accepts_year(1899));
        assert!(!config.accepts_year(2100));
    }
}
