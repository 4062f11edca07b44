// Tue Jan 13 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    subtitle: Option<String>,
    version: Option<String>,
    use_color: bool,
    width: usize,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            version: None,
            use_color: true,
            width: 60,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        let rule = "=".repeat(self.width);

        let title = match &self.version {
            Some(version) => format!("{} v{}", self.title, version),
            None => self.title.clone(),
        };

        if self.use_color {
            lines.push(title.cyan().bold().to_string());
        } else {
            lines.push(title);
        }

        if let Some(subtitle) = &self.subtitle {
            if self.use_color {
                lines.push(subtitle.dimmed().to_string());
            } else {
                lines.push(subtitle.clone());
            }
        }

        if self.use_color {
            lines.push(rule.cyan().to_string());
        } else {
            lines.push(rule);
        }

        lines.join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new("ABI Layout Probe")
            .with_subtitle(&format!("std::basic_string and nested aggregates, {}", crate::string::AbiFamily::ACTIVE))
            .with_version(env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render() {
        let text = Banner::new("Probe").with_version("1.0.0").with_color(false).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Probe v1.0.0");
        assert_eq!(lines[1].len(), 60);
    }
}
