//! The numbered conversion menu.
//!
//! Detected renderers come first, in preference order, followed by the two
//! fallbacks that are always offered: manual printing from the browser and
//! the LaTeX template.

use crate::error::ChoiceError;
use crate::probe::Availability;
use renderer_probe::Renderer;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A way of getting from the HTML guide to something printable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Wkhtmltopdf,
    WeasyPrint,
    Browser,
    LatexTemplate,
}

impl Method {
    /// Menu text.
    pub fn description(self) -> &'static str {
        match self {
            Method::Wkhtmltopdf => "Convert using wkhtmltopdf (recommended)",
            Method::WeasyPrint => "Convert using WeasyPrint",
            Method::Browser => "Open in browser (manual PDF printing)",
            Method::LatexTemplate => "Create LaTeX template",
        }
    }

    /// The external renderer this method needs, if any.
    pub fn renderer(self) -> Option<Renderer> {
        match self {
            Method::Wkhtmltopdf => Some(Renderer::Wkhtmltopdf),
            Method::WeasyPrint => Some(Renderer::WeasyPrint),
            Method::Browser | Method::LatexTemplate => None,
        }
    }
}

impl From<Renderer> for Method {
    fn from(r: Renderer) -> Self {
        match r {
            Renderer::Wkhtmltopdf => Method::Wkhtmltopdf,
            Renderer::WeasyPrint => Method::WeasyPrint,
        }
    }
}

/// The options presented to the user, 1-indexed on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    options: Vec<Method>,
}

impl Menu {
    /// Build the menu for the renderers that were detected.
    pub fn from_availability(availability: &Availability) -> Self {
        let mut options: Vec<Method> = availability
            .available_renderers()
            .into_iter()
            .map(Method::from)
            .collect();
        options.push(Method::Browser);
        options.push(Method::LatexTemplate);
        Self { options }
    }

    pub fn options(&self) -> &[Method] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// One line per option: `1. Convert using wkhtmltopdf (recommended)`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, method) in self.options.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, method.description());
        }
        out
    }

    /// The question shown after the list.
    pub fn prompt(&self) -> String {
        format!("\nChoose an option (1-{}): ", self.options.len())
    }

    /// Interpret the user's answer.
    ///
    /// Surrounding whitespace and a leading sign are accepted; anything that
    /// is not an integer is [`ChoiceError::NotANumber`], an integer outside
    /// the menu is [`ChoiceError::OutOfRange`]. Integers too large for `i64`
    /// are still integers and saturate.
    pub fn select(&self, input: &str) -> Result<Method, ChoiceError> {
        let trimmed = input.trim();
        let choice = parse_integer(trimmed).ok_or_else(|| ChoiceError::NotANumber {
            input: trimmed.to_string(),
        })?;

        let max = self.options.len();
        usize::try_from(choice)
            .ok()
            .filter(|&c| (1..=max).contains(&c))
            .map(|c| self.options[c - 1])
            .ok_or(ChoiceError::OutOfRange { choice, max })
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ToolStatus;

    fn availability(wk: bool, weasy: bool) -> Availability {
        let status = |renderer: Renderer, available| ToolStatus {
            renderer,
            program: renderer.default_program(),
            available,
            installed: available,
            version: None,
            detail: None,
        };
        Availability {
            tools: vec![
                status(Renderer::Wkhtmltopdf, wk),
                status(Renderer::WeasyPrint, weasy),
            ],
        }
    }

    #[test]
    fn full_menu_order() {
        let menu = Menu::from_availability(&availability(true, true));
        assert_eq!(
            menu.options(),
            &[
                Method::Wkhtmltopdf,
                Method::WeasyPrint,
                Method::Browser,
                Method::LatexTemplate
            ]
        );
        assert_eq!(
            menu.render(),
            "1. Convert using wkhtmltopdf (recommended)\n\
             2. Convert using WeasyPrint\n\
             3. Open in browser (manual PDF printing)\n\
             4. Create LaTeX template\n"
        );
        assert_eq!(menu.prompt(), "\nChoose an option (1-4): ");
    }

    #[test]
    fn fallbacks_always_present() {
        let menu = Menu::from_availability(&availability(false, true));
        assert_eq!(
            menu.options(),
            &[Method::WeasyPrint, Method::Browser, Method::LatexTemplate]
        );
        let menu = Menu::from_availability(&availability(false, false));
        assert_eq!(menu.options(), &[Method::Browser, Method::LatexTemplate]);
    }

    #[test]
    fn select_valid() {
        let menu = Menu::from_availability(&availability(true, false));
        assert_eq!(menu.select("1"), Ok(Method::Wkhtmltopdf));
        assert_eq!(menu.select(" 3 \n"), Ok(Method::LatexTemplate));
        assert_eq!(menu.select("+2"), Ok(Method::Browser));
    }

    #[test]
    fn select_out_of_range() {
        let menu = Menu::from_availability(&availability(true, false));
        assert_eq!(
            menu.select("0"),
            Err(ChoiceError::OutOfRange { choice: 0, max: 3 })
        );
        assert_eq!(
            menu.select("4"),
            Err(ChoiceError::OutOfRange { choice: 4, max: 3 })
        );
        assert!(matches!(menu.select("-1"), Err(ChoiceError::OutOfRange { .. })));
    }

    #[test]
    fn select_not_a_number() {
        let menu = Menu::from_availability(&availability(true, true));
        for bad in ["", "two", "1.5", "1 2", "-", "+", "１"] {
            assert!(
                matches!(menu.select(bad), Err(ChoiceError::NotANumber { .. })),
                "{bad:?} should be rejected as non-numeric"
            );
        }
    }

    #[test]
    fn select_huge_number_is_out_of_range() {
        let menu = Menu::from_availability(&availability(true, true));
        let err = menu.select("99999999999999999999").unwrap_err();
        assert_eq!(err, ChoiceError::OutOfRange { choice: i64::MAX, max: 4 });
        assert_eq!(err.to_string(), "Invalid choice!");
        assert_eq!(
            menu.select(" -99999999999999999999\n"),
            Err(ChoiceError::OutOfRange { choice: i64::MIN, max: 4 })
        );
    }

    #[test]
    fn method_renderer_mapping() {
        assert_eq!(Method::Wkhtmltopdf.renderer(), Some(Renderer::Wkhtmltopdf));
        assert_eq!(Method::Browser.renderer(), None);
        assert_eq!(Method::from(Renderer::WeasyPrint), Method::WeasyPrint);
    }
}
