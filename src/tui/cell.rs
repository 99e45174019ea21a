//! # Row Cells
//!
//! A `ListConfig<A>` tells a list how to turn one `A` into one row:
//! a render function fills a `Row` surface, and a `CellStyle` decides how
//! that surface is laid out on screen.
//!
//! ```text
//! Default   │ title
//! Value1    │ title                              detail
//! Value2    │        title  detail
//! Subtitle  │ title
//!           │ detail
//! ```
//!
//! The three two-field styles share one combinator (`two_text_cell`)
//! parametrized by the style token.

use std::rc::Rc;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::ListItem;
use unicode_width::UnicodeWidthStr;

/// Width of the label column in `CellStyle::Value2`.
const VALUE2_LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellStyle {
    /// Single line of text.
    #[default]
    Default,
    /// Title on the left, detail right-aligned.
    Value1,
    /// Right-aligned label column followed by the detail.
    Value2,
    /// Title with the detail on a second, dimmed line.
    Subtitle,
}

impl CellStyle {
    /// Terminal lines one row occupies.
    pub fn height(self) -> usize {
        match self {
            CellStyle::Subtitle => 2,
            _ => 1,
        }
    }
}

/// The surface a render function writes into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub title: String,
    pub detail: Option<String>,
}

pub type RenderFn<A> = Rc<dyn Fn(&mut Row, &A)>;

/// How to render each `A`, and with which layout.
pub struct ListConfig<A> {
    pub render: RenderFn<A>,
    pub style: CellStyle,
}

impl<A> Clone for ListConfig<A> {
    fn clone(&self) -> Self {
        Self {
            render: Rc::clone(&self.render),
            style: self.style,
        }
    }
}

impl<A: 'static> Default for ListConfig<A> {
    fn default() -> Self {
        Self {
            render: Rc::new(|_: &mut Row, _: &A| ()),
            style: CellStyle::Default,
        }
    }
}

/// One line of text per item.
pub fn standard_cell<A: 'static>(f: impl Fn(&A) -> String + 'static) -> ListConfig<A> {
    ListConfig {
        render: Rc::new(move |row: &mut Row, item: &A| row.title = f(item)),
        style: CellStyle::Default,
    }
}

fn two_text_cell<A: 'static>(style: CellStyle, f: impl Fn(&A) -> (String, String) + 'static) -> ListConfig<A> {
    ListConfig {
        render: Rc::new(move |row: &mut Row, item: &A| {
            let (title, subtitle) = f(item);
            row.title = title;
            row.detail = Some(subtitle);
        }),
        style,
    }
}

pub fn value1_cell<A: 'static>(f: impl Fn(&A) -> (String, String) + 'static) -> ListConfig<A> {
    two_text_cell(CellStyle::Value1, f)
}

pub fn subtitle_cell<A: 'static>(f: impl Fn(&A) -> (String, String) + 'static) -> ListConfig<A> {
    two_text_cell(CellStyle::Subtitle, f)
}

pub fn value2_cell<A: 'static>(f: impl Fn(&A) -> (String, String) + 'static) -> ListConfig<A> {
    two_text_cell(CellStyle::Value2, f)
}

impl Row {
    /// Lays the row out for a list that is `width` columns wide.
    pub fn to_list_item(&self, style: CellStyle, width: u16) -> ListItem<'static> {
        let width = width as usize;
        let detail = self.detail.clone().unwrap_or_default();
        let dim = Style::default().fg(Color::DarkGray);

        let text = match style {
            CellStyle::Default => Text::from(truncate_str(&self.title, width)),
            CellStyle::Value1 => {
                let detail = truncate_str(&detail, width / 2);
                let title_width = width.saturating_sub(detail.width() + 1);
                let title = truncate_str(&self.title, title_width);
                let gap = width.saturating_sub(title.width() + detail.width());
                Text::from(Line::from(vec![
                    Span::raw(title),
                    Span::raw(" ".repeat(gap)),
                    Span::styled(detail, dim),
                ]))
            }
            CellStyle::Value2 => {
                let label = truncate_str(&self.title, VALUE2_LABEL_WIDTH);
                let pad = VALUE2_LABEL_WIDTH.saturating_sub(label.width());
                let rest = width.saturating_sub(VALUE2_LABEL_WIDTH + 2);
                Text::from(Line::from(vec![
                    Span::raw(" ".repeat(pad)),
                    Span::styled(label, Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::raw(truncate_str(&detail, rest)),
                ]))
            }
            CellStyle::Subtitle => Text::from(vec![
                Line::from(Span::styled(
                    truncate_str(&self.title, width),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(truncate_str(&detail, width), dim)),
            ]),
        };
        ListItem::new(text)
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_text(item: ListItem<'static>, width: u16) -> Vec<String> {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;
        use ratatui::widgets::List;

        let height = item.height() as u16;
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| f.render_widget(List::new(vec![item]), f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn render<A>(config: &ListConfig<A>, item: &A) -> Row {
        let mut row = Row::default();
        (config.render)(&mut row, item);
        row
    }

    #[test]
    fn test_standard_cell_fills_title_only() {
        let config = standard_cell(|n: &u32| format!("#{n}"));
        assert_eq!(config.style, CellStyle::Default);
        assert_eq!(
            render(&config, &7),
            Row {
                title: "#7".to_string(),
                detail: None
            }
        );
    }

    #[test]
    fn test_two_text_cells_share_render_and_differ_by_style() {
        let f = |n: &u32| (format!("n{n}"), (n * 2).to_string());
        let cells = [
            (value1_cell(f), CellStyle::Value1),
            (subtitle_cell(f), CellStyle::Subtitle),
            (value2_cell(f), CellStyle::Value2),
        ];
        for (config, style) in cells {
            assert_eq!(config.style, style);
            let row = render(&config, &21);
            assert_eq!(row.title, "n21");
            assert_eq!(row.detail.as_deref(), Some("42"));
        }
    }

    #[test]
    fn test_default_config_renders_nothing() {
        let config: ListConfig<u8> = ListConfig::default();
        assert_eq!(render(&config, &1), Row::default());
    }

    #[test]
    fn test_value1_right_aligns_detail() {
        let row = Row {
            title: "state".to_string(),
            detail: Some("open".to_string()),
        };
        let lines = item_text(row.to_list_item(CellStyle::Value1, 20), 20);
        assert_eq!(lines, vec!["state           open".to_string()]);
    }

    #[test]
    fn test_value2_uses_label_column() {
        let row = Row {
            title: "state".to_string(),
            detail: Some("open".to_string()),
        };
        let lines = item_text(row.to_list_item(CellStyle::Value2, 24), 24);
        assert_eq!(lines, vec!["       state  open      ".to_string()]);
    }

    #[test]
    fn test_subtitle_uses_two_lines() {
        let row = Row {
            title: "hello-world".to_string(),
            detail: Some("My first repo".to_string()),
        };
        let item = row.to_list_item(CellStyle::Subtitle, 20);
        assert_eq!(item.height(), CellStyle::Subtitle.height());
        let lines = item_text(item, 20);
        assert!(lines[0].starts_with("hello-world"));
        assert!(lines[1].starts_with("My first repo"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a long title", 8), "a lon...");
        assert_eq!(truncate_str("abcdef", 2), "..");
        assert_eq!(truncate_str("日本語のタイトル", 7), "日本...");
    }
}
