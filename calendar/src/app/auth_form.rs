use calendar_core::form::{AuthForm, Field};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// The auth form as shown on screen: the form state plus which field has the
/// cursor.
#[derive(Debug)]
pub struct AuthScreen {
    /// What's been typed, the mode, and any error
    form: AuthForm,

    /// Which field we're editing
    active: Field,

    /// Cursor and scroll state for the active field. Its value is always the
    /// same as the active field's value in `form`.
    input: Input,
}

impl AuthScreen {
    /// The underlying form.
    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    /// The underlying form, for submitting and settling.
    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    /// Switch between signing up and logging in, starting over at the top.
    pub fn toggle_mode(&mut self) {
        self.form.toggle_mode();
        self.focus(Field::PhoneNumber);
    }

    /// Move the cursor to a field.
    fn focus(&mut self, field: Field) {
        self.active = field;
        self.input = Input::new(self.form.data().get(field).to_string());
    }

    /// Draw the form as a popup in the middle of the body.
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, body_area: Rect, frame: &mut Frame<'_>) {
        let fields = self.form.visible_fields();

        // subheading, fields, error, submit, toggle
        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
        constraints.extend([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ]);

        let height = 2 + 2 + 3 * fields.len() as u16 + 2 + 1 + 1; // +2 for the border

        let popup_vert = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(self.form.heading())
            .border_style(Style::default().fg(Color::Yellow));
        let inner = outer.inner(popup_area);
        frame.render_widget(outer, popup_area);

        let areas = Layout::vertical(constraints).split(inner);

        frame.render_widget(
            Paragraph::new(self.form.subheading()).fg(Color::Gray),
            areas[0],
        );

        let width = inner.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor

        for (field, area) in fields.iter().zip(areas[1..].iter()) {
            self.render_field(*field, *area, width, frame);
        }

        let [error_area, submit_area, toggle_area] = [
            areas[1 + fields.len()],
            areas[2 + fields.len()],
            areas[3 + fields.len()],
        ];

        if let Some(error) = self.form.error() {
            frame.render_widget(Paragraph::new(error).fg(Color::Red), error_area);
        }

        let submit_style = if self.form.is_loading() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(format!("[ {} ]", self.form.submit_label()))
                .centered()
                .style(submit_style),
            submit_area,
        );

        frame.render_widget(
            Paragraph::new(format!("ctrl-t: {}", self.form.toggle_label()))
                .centered()
                .fg(Color::DarkGray),
            toggle_area,
        );
    }

    /// Draw one field, with the cursor if it's the active one.
    #[expect(clippy::cast_possible_truncation)]
    fn render_field(&self, field: Field, area: Rect, width: u16, frame: &mut Frame<'_>) {
        let is_active = self.active == field;
        let value = self.form.data().get(field);

        let scroll = if is_active {
            self.input.visual_scroll(width as usize)
        } else {
            0
        };

        let text = if value.is_empty() && !is_active {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else if field.is_secret() {
            Span::raw("*".repeat(value.chars().count()))
        } else {
            Span::raw(value)
        };

        let border_style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        frame.render_widget(
            Paragraph::new(text).scroll((0, scroll as u16)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(field.label())
                    .border_style(border_style),
            ),
            area,
        );

        if is_active {
            frame.set_cursor_position((
                area.x
                    + (self.input.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                    + 1, // just past the end of the text
                area.y + 1, // +1 row for the border/title
            ));
        }
    }

    /// Move between fields with tab / shift-tab, or type into the active one.
    pub fn handle_event(&mut self, key: KeyEvent) {
        let visible = self.form.visible_fields();

        match key.code {
            KeyCode::Tab => self.focus(self.active.next(visible)),
            KeyCode::BackTab => self.focus(self.active.prev(visible)),
            _ => {
                if let Some(changed) = self.input.handle_event(&Event::Key(key)) {
                    if changed.value {
                        self.form.set_field(self.active, self.input.value());
                    }
                }
            }
        }
    }
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self {
            form: AuthForm::default(),
            active: Field::PhoneNumber,
            input: Input::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use calendar_core::form::Mode;
    use crossterm::event::KeyModifiers;

    fn type_str(screen: &mut AuthScreen, text: &str) {
        for c in text.chars() {
            screen.handle_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn tab(screen: &mut AuthScreen) {
        screen.handle_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    }

    #[test]
    fn typing_fills_the_active_field() {
        let mut screen = AuthScreen::default();

        type_str(&mut screen, "5550100");
        tab(&mut screen);
        type_str(&mut screen, "a@example.com");
        tab(&mut screen);
        type_str(&mut screen, "hunter2");

        let data = screen.form().data();
        assert_eq!(data.phone_number, "5550100");
        assert_eq!(data.email, "a@example.com");
        assert_eq!(data.password, "hunter2");
    }

    #[test]
    fn tab_skips_email_when_logging_in() {
        let mut screen = AuthScreen::default();
        screen.toggle_mode();
        assert_eq!(screen.form().mode(), Mode::Login);

        tab(&mut screen);
        type_str(&mut screen, "hunter2");

        assert_eq!(screen.form().data().password, "hunter2");
        assert_eq!(screen.form().data().email, "");
    }

    #[test]
    fn toggling_starts_over() {
        let mut screen = AuthScreen::default();
        type_str(&mut screen, "5550100");

        screen.toggle_mode();
        type_str(&mut screen, "1");

        assert_eq!(screen.form().data().phone_number, "1");
    }

    #[test]
    fn backspace_edits_the_form() {
        let mut screen = AuthScreen::default();
        type_str(&mut screen, "55501000");
        screen.handle_event(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));

        assert_eq!(screen.form().data().phone_number, "5550100");
    }
}
