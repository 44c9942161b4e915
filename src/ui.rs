use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::{io, time::Duration};
use textwrap::{core::display_width, wrap};
use tokio::sync::mpsc::UnboundedReceiver;
use tui_input::{backend::crossterm::EventHandler, Input};

use neonchat::{
    mock, AutoResponder, Contact, ConversationStore, DeliveryStatus, Message, Palette, ThemeName, View,
    ViewController,
};

pub use ratatui::backend::CrosstermBackend;
pub use ratatui::Terminal;

/// What the main loop has to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    None,
    Quit,
    ThemeChanged(ThemeName),
}

pub struct ChatUI {
    view: ViewController,
    store: ConversationStore,
    responder: AutoResponder,
    replies: UnboundedReceiver<Message>,
    contacts: Vec<Contact>,
    contact_index: usize,
    input: Input,
    theme: ThemeName,
    help_dialog: Option<HelpDialog>,
    theme_picker: Option<ThemePicker>,
}

struct HelpDialog {
    // No additional state needed for the help dialog
}

struct ThemePicker {
    cursor: usize,
}

impl ChatUI {
    pub fn new(theme: ThemeName, reply_delay: Duration) -> Self {
        let (responder, replies) = AutoResponder::new(reply_delay);
        ChatUI {
            view: ViewController::new(),
            store: ConversationStore::new(),
            responder,
            replies,
            contacts: mock::contacts(),
            contact_index: 0,
            input: Input::default(),
            theme,
            help_dialog: None,
            theme_picker: None,
        }
    }

    /// Moves queued auto-replies into the conversation. Replies land in
    /// whatever conversation is loaded when they arrive.
    pub fn deliver_replies(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(reply) = self.replies.try_recv() {
            self.store.receive(reply);
            delivered += 1;
        }
        delivered
    }

    pub fn poll_input(&mut self) -> Result<UiAction> {
        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(UiAction::None)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> UiAction {
        if key.kind != KeyEventKind::Press {
            return UiAction::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // Ctrl+C quits even with a popup open
        if ctrl && key.code == KeyCode::Char('c') {
            return UiAction::Quit;
        }

        // Any other key press closes the help dialog
        if self.help_dialog.is_some() {
            self.help_dialog = None;
            return UiAction::None;
        }

        if self.theme_picker.is_some() {
            return self.handle_theme_picker_key(key);
        }

        match key.code {
            KeyCode::Char('h') | KeyCode::Char('H') if ctrl => {
                self.help_dialog = Some(HelpDialog {});
                return UiAction::None;
            }
            KeyCode::Char('t') if ctrl => return self.apply_theme(self.theme.next()),
            KeyCode::Char('p') if ctrl => {
                self.theme_picker = Some(ThemePicker { cursor: self.theme.index() });
                return UiAction::None;
            }
            _ => {}
        }

        match self.view.current_view() {
            View::Chats => self.handle_chats_key(key),
            View::Conversation => self.handle_conversation_key(key),
        }
    }

    fn handle_chats_key(&mut self, key: KeyEvent) -> UiAction {
        let count = self.contacts.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return UiAction::Quit,
            KeyCode::Char('?') => self.help_dialog = Some(HelpDialog {}),
            KeyCode::Up if count > 0 => {
                self.contact_index = (self.contact_index + count - 1) % count;
            }
            KeyCode::Down if count > 0 => {
                self.contact_index = (self.contact_index + 1) % count;
            }
            KeyCode::Enter => self.open_selected_chat(),
            _ => {}
        }
        UiAction::None
    }

    fn handle_conversation_key(&mut self, key: KeyEvent) -> UiAction {
        match key.code {
            KeyCode::Esc => self.view.back_to_chats(),
            KeyCode::Enter => self.send_current_input(),
            _ => {
                self.input.handle_event(&Event::Key(key));
            }
        }
        UiAction::None
    }

    fn handle_theme_picker_key(&mut self, key: KeyEvent) -> UiAction {
        let count = ThemeName::ALL.len();
        let Some(picker) = self.theme_picker.as_mut() else {
            return UiAction::None;
        };

        match key.code {
            KeyCode::Up => picker.cursor = (picker.cursor + count - 1) % count,
            KeyCode::Down => picker.cursor = (picker.cursor + 1) % count,
            KeyCode::Enter => {
                let theme = ThemeName::ALL[picker.cursor];
                self.theme_picker = None;
                return self.apply_theme(theme);
            }
            KeyCode::Esc => self.theme_picker = None,
            _ => {}
        }
        UiAction::None
    }

    fn open_selected_chat(&mut self) {
        let Some(contact) = self.contacts.get(self.contact_index).cloned() else {
            return;
        };
        info!("UI: Opening conversation with {}", contact.name);
        self.view.open_chat(contact);
        self.store.reset(Local::now());
        self.input = Input::default();
    }

    fn send_current_input(&mut self) {
        if self.store.send_message(self.input.value(), Local::now()).is_some() {
            self.input = Input::default();
            debug!("UI: Scheduling auto-reply in {:?}", self.responder.delay());
            self.responder.schedule();
        }
    }

    fn apply_theme(&mut self, theme: ThemeName) -> UiAction {
        if theme == self.theme {
            return UiAction::None;
        }
        info!("UI: Switching theme from {} to {}", self.theme, theme);
        self.theme = theme;
        UiAction::ThemeChanged(theme)
    }

    pub fn draw<B: Backend>(&self, frame: &mut Frame<B>) {
        let size = frame.size();
        let palette = self.theme.palette();

        match (self.view.current_view(), self.view.selected_contact()) {
            (View::Conversation, Some(contact)) => self.draw_conversation(frame, size, contact, &palette),
            _ => self.draw_chats(frame, size, &palette),
        }

        if self.help_dialog.is_some() {
            draw_help_dialog(frame, size, &palette);
        }

        if let Some(picker) = &self.theme_picker {
            draw_theme_picker(frame, picker, self.theme, size, &palette);
        }
    }

    fn draw_chats<B: Backend>(&self, frame: &mut Frame<B>, area: Rect, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(4),    // Contact list
                Constraint::Length(1), // Help line
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled("❤️K&V❤️", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
            Span::styled(format!("   theme: {}", self.theme), Style::default().fg(palette.muted)),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.secondary)));
        frame.render_widget(header, chunks[0]);

        let muted = Style::default().fg(palette.muted);
        let contacts: Vec<ListItem> = self
            .contacts
            .iter()
            .map(|c| {
                let online_dot = if c.online {
                    Span::styled("● ", Style::default().fg(palette.highlight))
                } else {
                    Span::raw("  ")
                };
                let unread_badge = if c.has_unread() {
                    Span::styled(
                        format!("  ({})", c.unread_count),
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("")
                };

                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", c.initials()), Style::default().fg(palette.secondary)),
                        online_dot,
                        Span::styled(c.name.clone(), Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
                        Span::styled(format!("  {}", c.last_timestamp_label), muted),
                    ]),
                    Line::from(vec![
                        Span::raw("       "),
                        Span::styled(c.last_message_preview.clone(), muted),
                        unread_badge,
                    ]),
                ])
            })
            .collect();

        let mut list_state = ListState::default();
        if !contacts.is_empty() {
            list_state.select(Some(self.contact_index));
        }

        let contacts_list = List::new(contacts)
            .block(Block::default().title("Chats").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(contacts_list, chunks[1], &mut list_state);

        let help = Paragraph::new(Span::styled(
            "↑/↓ select | Enter open | Ctrl+T next theme | Ctrl+P themes | Ctrl+H help | Esc quit",
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(help, chunks[2]);
    }

    fn draw_conversation<B: Backend>(&self, frame: &mut Frame<B>, area: Rect, contact: &Contact, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Contact header
                Constraint::Min(5),    // Messages area
                Constraint::Length(3), // Input box
                Constraint::Length(1), // Help line
            ])
            .split(area);

        let presence_style = if contact.online {
            Style::default().fg(palette.highlight)
        } else {
            Style::default().fg(palette.muted)
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("← ", Style::default().fg(palette.secondary)),
            Span::styled(format!("[{}] ", contact.initials()), Style::default().fg(palette.secondary)),
            Span::styled(contact.name.clone(), Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(contact.presence_label(), presence_style),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.secondary)));
        frame.render_widget(header, chunks[0]);

        draw_messages(frame, self.store.messages(), chunks[1], palette);

        let input_block = Block::default()
            .title("Message")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent));
        // Two columns of border plus one for the cursor
        let input_width = chunks[2].width.max(3) as usize - 3;
        let (scroll, cursor_column) = input_viewport(&self.input, input_width);
        let input_widget = if self.input.value().is_empty() {
            Paragraph::new(Span::styled("Type a message...", Style::default().fg(palette.muted)))
        } else {
            Paragraph::new(self.input.value()).scroll((0, scroll))
        }
        .block(input_block);
        frame.render_widget(input_widget, chunks[2]);

        let help = Paragraph::new(Span::styled(
            "Enter send | Esc back | Ctrl+T next theme | Ctrl+P themes | Ctrl+H help",
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(help, chunks[3]);

        if self.help_dialog.is_none() && self.theme_picker.is_none() {
            frame.set_cursor(chunks[2].x + cursor_column + 1, chunks[2].y + 1);
        }
    }
}

/// Horizontal scroll offset and cursor column, both in display columns, for
/// an input box that shows `width` columns of text.
fn input_viewport(input: &Input, width: usize) -> (u16, u16) {
    let scroll = input.visual_scroll(width);
    let column = input.visual_cursor().saturating_sub(scroll);
    (scroll as u16, column as u16)
}

fn draw_messages<B: Backend>(f: &mut Frame<B>, messages: &[Message], area: Rect, palette: &Palette) {
    let inner_width = area.width.saturating_sub(2) as usize; // Account for borders
    let bubble_width = (inner_width * 3 / 4).max(1);

    let items: Vec<ListItem> = messages
        .iter()
        .flat_map(|m| message_lines(m, inner_width, bubble_width, palette))
        .collect();

    // Keep the newest message in view
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(items.len() - 1));
    }

    let messages_list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default()); // Selection only drives scrolling
    f.render_stateful_widget(messages_list, area, &mut list_state);
}

/// Wrapped text lines plus a time/receipt line for one message. Own messages
/// are pushed to the right edge, peer messages stay on the left.
fn message_lines(m: &Message, inner_width: usize, bubble_width: usize, palette: &Palette) -> Vec<ListItem<'static>> {
    let mine = m.is_mine();
    let indent = |text_width: usize| -> String {
        if mine {
            " ".repeat(inner_width.saturating_sub(text_width))
        } else {
            String::new()
        }
    };

    let text_style = if mine {
        Style::default().fg(palette.self_bubble)
    } else {
        Style::default().fg(palette.peer_bubble)
    };

    let mut lines: Vec<ListItem<'static>> = wrap(&m.text, bubble_width)
        .into_iter()
        .map(|l| {
            let line = l.into_owned();
            let padding = indent(display_width(&line));
            ListItem::new(Line::from(vec![Span::raw(padding), Span::styled(line, text_style)]))
        })
        .collect();

    let time = m.time_label();
    let mut meta = vec![Span::styled(time.clone(), Style::default().fg(palette.muted))];
    let mut meta_width = display_width(&time);
    if mine {
        // Receipts are only shown on our own messages
        let glyph = m.delivery_status.glyph();
        let glyph_style = match m.delivery_status {
            DeliveryStatus::Read => Style::default().fg(palette.highlight),
            DeliveryStatus::Delivered | DeliveryStatus::Sent => Style::default().fg(palette.muted),
        };
        meta.push(Span::raw(" "));
        meta.push(Span::styled(glyph, glyph_style));
        meta_width += 1 + display_width(glyph);
    }
    meta.insert(0, Span::raw(indent(meta_width)));

    lines.push(ListItem::new(Line::from(meta)));
    lines.push(ListItem::new(""));
    lines
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = area.x + (area.width - popup_width) / 2;
    let popup_y = area.y + (area.height - popup_height) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

fn draw_help_dialog<B: Backend>(f: &mut Frame<B>, area: Rect, palette: &Palette) {
    let popup_area = popup_area(area, 60, 18);

    let popup_block = Block::default()
        .title("Keyboard Shortcuts")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.secondary));

    f.render_widget(Clear, popup_area); // Clear the area first
    f.render_widget(popup_block, popup_area);

    let inner_area = popup_area.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });

    let shortcuts = [
        ("Chats", ""),
        ("↑/↓", "Move through contacts"),
        ("Enter", "Open the highlighted chat"),
        ("Esc / q", "Quit"),
        ("", ""),
        ("Conversation", ""),
        ("Enter", "Send message"),
        ("Esc", "Back to chats"),
        ("", ""),
        ("Anywhere", ""),
        ("Ctrl+T", "Next theme"),
        ("Ctrl+P", "Choose a theme"),
        ("Ctrl+H", "This help"),
        ("Ctrl+C", "Quit"),
    ];

    let items: Vec<ListItem> = shortcuts
        .iter()
        .map(|(key, description)| {
            if description.is_empty() {
                ListItem::new(Span::styled(*key, Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)))
            } else {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("  {:<10}", key), Style::default().fg(palette.highlight)),
                    Span::raw(*description),
                ]))
            }
        })
        .collect();

    f.render_widget(List::new(items), inner_area);
}

fn draw_theme_picker<B: Backend>(f: &mut Frame<B>, picker: &ThemePicker, current: ThemeName, area: Rect, palette: &Palette) {
    let popup_area = popup_area(area, 30, ThemeName::ALL.len() as u16 + 2);

    f.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = ThemeName::ALL
        .iter()
        .map(|theme| {
            let marker = if *theme == current { "  ✓" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(theme.display_name(), Style::default().fg(theme.palette().accent)),
                Span::raw(marker),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(picker.cursor));

    let list = List::new(items)
        .block(
            Block::default()
                .title("Choose Theme")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, popup_area, &mut list_state);
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
