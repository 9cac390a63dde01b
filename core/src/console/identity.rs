use crossterm::style::{style, Color, Stylize};

/// Builds the literal tag for a plugin name: `"[<name> Plugin] : "`.
pub fn plugin_tag(name: &str) -> String {
    format!("[{name} Plugin] : ")
}

/// Who a writer speaks for.
///
/// The tag is rendered once at construction. With a color assigned, the tag
/// text is wrapped in that color's escape sequences; the visible characters
/// stay the same.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginIdentity {
    name: String,
    color: Option<Color>,
    tag: String,
}

impl PluginIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let tag = plugin_tag(&name);
        Self {
            name,
            color: None,
            tag,
        }
    }

    /// Assigns a display color to the tag.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.tag = style(plugin_tag(&self.name)).with(color).to_string();
        self.color = Some(color);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The prefix written in front of every line, escape sequences included.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_tag_from_name() {
        let id = PluginIdentity::new("html-report");
        assert_eq!(id.name(), "html-report");
        assert_eq!(id.tag(), "[html-report Plugin] : ");
        assert_eq!(id.color(), None);
    }

    #[test]
    fn colored_tag_keeps_visible_text() {
        let id = PluginIdentity::new("xml-report").with_color(Color::Cyan);
        assert_eq!(id.color(), Some(Color::Cyan));
        assert!(id.tag().contains("[xml-report Plugin] : "));
        assert_eq!(
            id.tag(),
            style("[xml-report Plugin] : ").with(Color::Cyan).to_string()
        );
    }
}
