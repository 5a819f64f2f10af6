//! Field tag metadata.
//!
//! A tag is a string of the form `name` or `name,option,...`. The recognized
//! options are `required` and `group`; others are ignored. A bare `required`
//! or `group` is an option with an empty name.

/// A parsed field tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tag<'t> {
    name: &'t str,
    options: Options<'t>,
}

/// The comma-separated options of a tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options<'t>(&'t str);

impl<'t> Tag<'t> {
    pub fn parse(tag: &'t str) -> Self {
        match tag.split_once(',') {
            Some((name, options)) => Self {
                name,
                options: Options(options),
            },
            None if matches!(tag, "required" | "group") => Self {
                name: "",
                options: Options(tag),
            },
            None => Self {
                name: tag,
                options: Options(""),
            },
        }
    }

    /// The segment name or field index, empty if the tag only carries
    /// options.
    pub fn name(&self) -> &'t str {
        self.name
    }

    pub fn options(&self) -> Options<'t> {
        self.options
    }

    /// The name read as an explicit field index.
    pub fn index(&self) -> Option<usize> {
        self.name.parse().ok()
    }
}

impl Options<'_> {
    pub fn contains(&self, option: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|o| o == option)
    }

    /// Whether the field anchors its group.
    pub fn required(&self) -> bool {
        self.contains("required")
    }

    /// Whether the field is a group of segments.
    pub fn group(&self) -> bool {
        self.contains("group")
    }
}
