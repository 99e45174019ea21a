use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;
use crate::tui::components::TitleBar;
use crate::tui::navigation::NavigationStack;

const HELP_TEXT: &str = "↑/↓ move  Enter open  Esc back  q quit";

pub fn draw_ui(frame: &mut Frame, stack: &mut NavigationStack) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let top = stack.top();
    let status = if top.is_loading() {
        String::new()
    } else {
        item_count(top.len())
    };
    let mut title_bar = TitleBar::new(stack.breadcrumb(), status, top.is_loading());
    title_bar.render(frame, title_area);

    stack.top_mut().render(frame, main_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn item_count(count: usize) -> String {
    match count {
        1 => "1 item".to_string(),
        n => format!("{n} items"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::cell::standard_cell;
    use crate::tui::screen::table_screen;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(stack: &mut NavigationStack) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| draw_ui(f, stack)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_item_count() {
        assert_eq!(item_count(0), "0 items");
        assert_eq!(item_count(1), "1 item");
        assert_eq!(item_count(12), "12 items");
    }

    #[test]
    fn test_draw_ui_shows_breadcrumb_rows_and_help() {
        let mut root = table_screen(standard_cell(|s: &String| s.clone()))
            .present(vec!["hello".to_string(), "world".to_string()], |_| ());
        root.set_title("octocat › Repositories");
        let mut stack = NavigationStack::new(root);

        let text = screen_text(&mut stack);
        assert!(text.contains("GitHub Issues | octocat › Repositories | 2 items"));
        assert!(text.contains("hello"));
        assert!(text.contains("world"));
        assert!(text.contains("Esc back"));
    }
}
