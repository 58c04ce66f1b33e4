use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::{current_preferences, OutputPreferences};
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::test_mode::{self, MenuTestEvent};
use crate::errors::CliError;

#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub context: Option<String>,
    pub items: Vec<MenuUIItem>,
    pub initial_index: Option<usize>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            context: None,
            items,
            initial_index: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        if !context.trim().is_empty() {
            self.context = Some(context);
        }
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }

    /// Highlights the item with `key`, if present.
    pub fn with_initial_key(self, key: &str) -> Self {
        match self.items.iter().position(|item| item.key == key) {
            Some(index) => self.with_initial_index(index),
            None => self,
        }
    }

    fn label_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl MenuUIItem {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub enum MenuRenderError {
    Interrupted,
    EndOfInput,
    Io(io::Error),
}

impl From<io::Error> for MenuRenderError {
    fn from(err: io::Error) -> Self {
        MenuRenderError::Io(err)
    }
}

impl From<MenuRenderError> for CliError {
    fn from(err: MenuRenderError) -> Self {
        match err {
            MenuRenderError::Interrupted => CliError::Input("interrupted".into()),
            MenuRenderError::EndOfInput => CliError::Input("end of input".into()),
            MenuRenderError::Io(err) => CliError::Terminal(err),
        }
    }
}

/// Highlight position shared by the live and scripted renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MenuCursor {
    index: usize,
    len: usize,
}

impl MenuCursor {
    fn new(menu: &MenuUI) -> Self {
        let len = menu.items.len();
        let index = menu.initial_index.unwrap_or(0).min(len.saturating_sub(1));
        Self { index, len }
    }

    fn apply(&mut self, event: MenuTestEvent) {
        let last = self.len.saturating_sub(1);
        self.index = match event {
            MenuTestEvent::Up => self.index.checked_sub(1).unwrap_or(last),
            MenuTestEvent::Down => (self.index + 1) % self.len.max(1),
            MenuTestEvent::Home => 0,
            MenuTestEvent::End => last,
            MenuTestEvent::PageUp => self.index.saturating_sub(3),
            MenuTestEvent::PageDown => (self.index + 3).min(last),
            MenuTestEvent::Enter | MenuTestEvent::Esc => self.index,
        };
    }
}

fn key_to_event(code: KeyCode) -> Option<MenuTestEvent> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(MenuTestEvent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(MenuTestEvent::Down),
        KeyCode::Home => Some(MenuTestEvent::Home),
        KeyCode::End => Some(MenuTestEvent::End),
        KeyCode::PageUp => Some(MenuTestEvent::PageUp),
        KeyCode::PageDown => Some(MenuTestEvent::PageDown),
        KeyCode::Enter => Some(MenuTestEvent::Enter),
        KeyCode::Esc => Some(MenuTestEvent::Esc),
        _ => None,
    }
}

pub struct MenuRenderer {
    prefs: OutputPreferences,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    /// Returns the chosen item key, or `None` when the user pressed ESC.
    pub fn show(&self, menu: &MenuUI) -> Result<Option<String>, MenuRenderError> {
        if menu.items.is_empty() {
            return Ok(None);
        }

        if let Some(events) = test_mode::next_menu_events(&menu.title) {
            return Ok(self.show_with_script(menu, events));
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(cursor::Hide)?;

        let mut cursor = MenuCursor::new(menu);
        let result = loop {
            self.render(&mut stdout, menu, cursor.index)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        break Err(MenuRenderError::Interrupted)
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        break Err(MenuRenderError::EndOfInput)
                    }
                    _ => continue,
                }
            }
            match key_to_event(key.code) {
                Some(MenuTestEvent::Enter) => break Ok(Some(menu.items[cursor.index].key.clone())),
                Some(MenuTestEvent::Esc) => break Ok(None),
                Some(movement) => cursor.apply(movement),
                None => {}
            }
        };

        let clear_status = self.clear_screen(&mut stdout);
        stdout.execute(cursor::Show).ok();
        terminal::disable_raw_mode().ok();
        clear_status?;

        result
    }

    fn show_with_script(&self, menu: &MenuUI, events: Vec<MenuTestEvent>) -> Option<String> {
        let mut cursor = MenuCursor::new(menu);
        for event in events {
            match event {
                MenuTestEvent::Enter => {
                    self.print_snapshot(menu, cursor.index);
                    return Some(menu.items[cursor.index].key.clone());
                }
                MenuTestEvent::Esc => {
                    self.print_snapshot(menu, cursor.index);
                    return None;
                }
                movement => cursor.apply(movement),
            }
        }
        // A segment without ENTER or ESC selects the highlighted item.
        self.print_snapshot(menu, cursor.index);
        Some(menu.items[cursor.index].key.clone())
    }

    fn pointer(&self, selected: bool) -> &'static str {
        match (selected, self.prefs.plain_mode) {
            (false, _) => " ",
            (true, true) => ">",
            (true, false) => "▸",
        }
    }

    fn print_snapshot(&self, menu: &MenuUI, selected_index: usize) {
        let formatter = Formatter::new();
        println!("{}", formatter.header_text(&menu.title));
        if let Some(context) = &menu.context {
            println!("{}", formatter.detail_text(context));
        }
        println!();
        let width = menu.label_width();
        for (index, item) in menu.items.iter().enumerate() {
            let row = formatter.format_two_column_row(&item.label, &item.description, width);
            println!(" {} {}", self.pointer(index == selected_index), row);
        }
        println!();
    }

    fn render(
        &self,
        stdout: &mut Stdout,
        menu: &MenuUI,
        selected_index: usize,
    ) -> Result<(), io::Error> {
        self.clear_screen(stdout)?;
        let formatter = Formatter::new();
        // Raw mode needs explicit carriage returns.
        write!(stdout, "{}\r\n", formatter.header_text(&menu.title))?;
        if let Some(context) = &menu.context {
            for line in context.lines() {
                write!(stdout, "{}\r\n", formatter.detail_text(line))?;
            }
        }
        write!(stdout, "\r\n")?;

        let width = menu.label_width();
        for (index, item) in menu.items.iter().enumerate() {
            let is_selected = index == selected_index;
            let row = formatter.format_two_column_row(&item.label, &item.description, width);
            if is_selected {
                stdout.execute(SetAttribute(Attribute::Reverse))?;
            }
            write!(stdout, " {} {}", self.pointer(is_selected), row)?;
            stdout.execute(SetAttribute(Attribute::Reset))?;
            write!(stdout, "\r\n")?;
        }

        write!(stdout, "\r\n{}\r\n", formatter.detail_text(formatter.navigation_hint()))?;
        stdout.flush()?;
        Ok(())
    }

    fn clear_screen(&self, stdout: &mut Stdout) -> Result<(), io::Error> {
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.execute(cursor::MoveTo(0, 0))?;
        Ok(())
    }
}

/// Clears the terminal between live views. Scripted runs keep their history.
pub fn clear_terminal() -> io::Result<()> {
    if test_mode::is_enabled() {
        return Ok(());
    }
    let mut stdout = io::stdout();
    stdout.execute(terminal::Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    Ok(())
}
