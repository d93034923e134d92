use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    DefaultTerminal, Frame,
};

use crate::fmt;
use crate::models::Dataset;
use crate::tui::{
    self, CURRENT_PAGE_STYLE, FOCUSED_INPUT_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE,
    UNAVAILABLE_STYLE,
};
use crate::view::{derive_page, ClientDetail, ListState, PageView, Screen, NO_CLIENTS};

enum BrowseMode {
    Normal,
    EditName,
    EditTaxId,
    GotoPage(String),
}

pub enum BrowseAction {
    Continue,
    Close,
}

pub struct ClientBrowser {
    data: Dataset,
    screen: Screen,
    list: ListState,
    selected: usize,
    mode: BrowseMode,
    status_message: Option<String>,
    table_state: TableState,
    detail_scroll: u16,
}

impl ClientBrowser {
    pub fn new(data: Dataset, list: ListState) -> Self {
        Self {
            data,
            screen: Screen::List,
            list,
            selected: 0,
            mode: BrowseMode::Normal,
            status_message: None,
            table_state: TableState::default(),
            detail_scroll: 0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        tui::install_panic_hook();
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn page(&self) -> PageView<'_> {
        derive_page(&self.data.clients, &self.list)
    }

    /// Draw the current screen into the given frame.
    pub fn draw_frame(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::List => self.draw_list(frame),
            Screen::Detail(_) => self.draw_detail(frame),
        }
    }

    fn draw_list(&mut self, frame: &mut Frame) {
        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(2), // filters
            Constraint::Fill(1),   // table
            Constraint::Length(1), // pages
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(frame.area());

        frame.render_widget(
            Paragraph::new("Lista de Clientes").style(HEADER_STYLE),
            areas[0],
        );

        let filter = self.list.filter();
        let cursor = "\u{2588}";
        let (name_style, name_cursor) = match self.mode {
            BrowseMode::EditName => (FOCUSED_INPUT_STYLE, cursor),
            _ => (Style::default(), ""),
        };
        let (tax_style, tax_cursor) = match self.mode {
            BrowseMode::EditTaxId => (FOCUSED_INPUT_STYLE, cursor),
            _ => (Style::default(), ""),
        };
        let filter_lines = vec![
            Line::from(vec![
                Span::raw("Nome:     "),
                Span::styled(format!("{}{name_cursor}", filter.name), name_style),
            ]),
            Line::from(vec![
                Span::raw("CPF/CNPJ: "),
                Span::styled(format!("{}{tax_cursor}", filter.tax_id), tax_style),
            ]),
        ];
        frame.render_widget(Paragraph::new(filter_lines), areas[1]);

        let page = self.page();
        let (page_no, page_count, total, row_count) =
            (page.page, page.page_count, page.total, page.rows.len());
        if page.is_empty() {
            frame.render_widget(Paragraph::new(NO_CLIENTS), areas[2]);
        } else {
            let rows: Vec<Row> = page
                .rows
                .iter()
                .map(|c| {
                    Row::new(vec![
                        Cell::from(c.id.clone()),
                        Cell::from(c.name.clone()),
                        Cell::from(fmt::tax_id(&c.tax_id)),
                        Cell::from(c.email.clone()),
                        Cell::from(tui::money_span(c.annual_income)),
                        Cell::from(fmt::code(c.branch_code)),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Length(6),
                Constraint::Fill(1),
                Constraint::Length(18),
                Constraint::Fill(1),
                Constraint::Length(18),
                Constraint::Length(8),
            ];
            let header = ["ID", "Nome", "CPF/CNPJ", "Email", "Renda Anual", "Agência"];
            self.table_state.select(Some(self.selected.min(row_count - 1)));
            let table = Table::new(rows, widths)
                .header(Row::new(header).style(HEADER_STYLE).bottom_margin(1))
                .column_spacing(1)
                .row_highlight_style(SELECTED_STYLE);
            frame.render_stateful_widget(table, areas[2], &mut self.table_state);
        }

        frame.render_widget(Paragraph::new(self.page_bar(page_count)), areas[3]);

        let status = match self.status_message {
            Some(ref msg) => format!("Página {page_no} de {page_count} | {total} clientes | {msg}"),
            None => format!("Página {page_no} de {page_count} | {total} clientes"),
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), areas[4]);

        let keys = match &self.mode {
            BrowseMode::Normal => Paragraph::new(
                "\u{2191}/\u{2193}:select  Enter:details  \u{2190}/\u{2192}:page  g:go to page  Tab:name  c:cpf/cnpj  q:quit",
            )
            .style(FOOTER_STYLE),
            BrowseMode::EditName | BrowseMode::EditTaxId => {
                Paragraph::new("Type to filter, Tab=next filter, Enter/Esc=done").style(FOOTER_STYLE)
            }
            BrowseMode::GotoPage(input) => Paragraph::new(format!("Go to page: {input}{cursor}")),
        };
        frame.render_widget(keys, areas[5]);
    }

    fn page_bar(&self, page_count: usize) -> Line<'static> {
        let enabled = |on: bool| if on { Style::default() } else { FOOTER_STYLE };
        let mut spans = vec![Span::styled("\u{2039} Anterior ", enabled(self.list.can_prev()))];
        for n in 1..=page_count {
            let style = if n == self.list.page() {
                CURRENT_PAGE_STYLE
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {n} "), style));
        }
        spans.push(Span::styled(
            " Pr\u{f3}ximo \u{203a}",
            enabled(self.list.can_next(page_count)),
        ));
        Line::from(spans)
    }

    fn draw_detail(&mut self, frame: &mut Frame) {
        let Screen::Detail(ref client) = self.screen else {
            return;
        };
        let areas = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

        frame.render_widget(
            Paragraph::new("Detalhes do Cliente").style(HEADER_STYLE),
            areas[0],
        );

        let lines = detail_lines(&ClientDetail::build(client, &self.data), areas[1]);
        let max_scroll = (lines.len() as u16).saturating_sub(areas[1].height);
        self.detail_scroll = self.detail_scroll.min(max_scroll);
        frame.render_widget(Paragraph::new(lines).scroll((self.detail_scroll, 0)), areas[1]);

        frame.render_widget(
            Paragraph::new("\u{2191}/\u{2193}:scroll  b/Esc:voltar para a lista  q:quit")
                .style(FOOTER_STYLE),
            areas[2],
        );
    }

    /// Handle a key event. Returns a BrowseAction indicating what the caller should do.
    pub fn handle_key_event(&mut self, code: KeyCode) -> BrowseAction {
        self.status_message = None;
        match self.screen {
            Screen::List => self.handle_list_key(code),
            Screen::Detail(_) => self.handle_detail_key(code),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) -> BrowseAction {
        match &self.mode {
            BrowseMode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Esc => return BrowseAction::Close,
                KeyCode::Down => {
                    let rows = self.page().rows.len();
                    if self.selected + 1 < rows {
                        self.selected += 1;
                    }
                }
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                    let pages = self.page().page_count;
                    self.list.next_page(pages);
                    self.selected = 0;
                }
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                    self.list.prev_page();
                    self.selected = 0;
                }
                KeyCode::Home => {
                    let pages = self.page().page_count;
                    self.list.goto_page(1, pages);
                    self.selected = 0;
                }
                KeyCode::End => {
                    let pages = self.page().page_count;
                    self.list.goto_page(pages, pages);
                    self.selected = 0;
                }
                KeyCode::Char('g') => self.mode = BrowseMode::GotoPage(String::new()),
                KeyCode::Tab | KeyCode::Char('/') => self.mode = BrowseMode::EditName,
                KeyCode::Char('c') => self.mode = BrowseMode::EditTaxId,
                KeyCode::Enter => self.open_selected(),
                _ => {}
            },
            BrowseMode::EditName | BrowseMode::EditTaxId => match code {
                KeyCode::Enter | KeyCode::Esc => self.mode = BrowseMode::Normal,
                KeyCode::Tab => {
                    self.mode = match self.mode {
                        BrowseMode::EditName => BrowseMode::EditTaxId,
                        _ => BrowseMode::EditName,
                    };
                }
                KeyCode::Backspace => self.edit_filter(|s| {
                    s.pop();
                }),
                KeyCode::Char(c) => self.edit_filter(|s| s.push(c)),
                _ => {}
            },
            BrowseMode::GotoPage(_) => match code {
                KeyCode::Esc => self.mode = BrowseMode::Normal,
                KeyCode::Enter => self.submit_goto(),
                KeyCode::Backspace => {
                    if let BrowseMode::GotoPage(s) = &mut self.mode {
                        s.pop();
                    }
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let BrowseMode::GotoPage(s) = &mut self.mode {
                        s.push(c);
                    }
                }
                _ => {}
            },
        }
        BrowseAction::Continue
    }

    fn handle_detail_key(&mut self, code: KeyCode) -> BrowseAction {
        match code {
            KeyCode::Char('q') => return BrowseAction::Close,
            KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                self.screen.back();
                self.detail_scroll = 0;
            }
            KeyCode::Down => self.detail_scroll = self.detail_scroll.saturating_add(1),
            KeyCode::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            _ => {}
        }
        BrowseAction::Continue
    }

    /// Apply an edit to the focused filter. Any filter change returns to page 1.
    fn edit_filter(&mut self, edit: impl FnOnce(&mut String)) {
        let filter = self.list.filter();
        match self.mode {
            BrowseMode::EditName => {
                let mut value = filter.name.clone();
                edit(&mut value);
                self.list.set_name_filter(value);
            }
            BrowseMode::EditTaxId => {
                let mut value = filter.tax_id.clone();
                edit(&mut value);
                self.list.set_tax_id_filter(value);
            }
            _ => return,
        }
        self.selected = 0;
    }

    fn submit_goto(&mut self) {
        let mode = std::mem::replace(&mut self.mode, BrowseMode::Normal);
        if let BrowseMode::GotoPage(input) = mode {
            let pages = self.page().page_count;
            match input.trim().parse::<usize>() {
                Ok(n) if self.list.goto_page(n, pages) => self.selected = 0,
                _ => self.status_message = Some(format!("Página inválida: {input}")),
            }
        }
    }

    fn open_selected(&mut self) {
        let page = derive_page(&self.data.clients, &self.list);
        if let Some(client) = page.rows.get(self.selected) {
            self.screen.select(client);
            self.detail_scroll = 0;
        }
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw_frame(frame))?;

            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            {
                if kind != KeyEventKind::Press {
                    continue;
                }
                if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                    break;
                }
                match self.handle_key_event(code) {
                    BrowseAction::Close => break,
                    BrowseAction::Continue => {}
                }
            }
        }
        Ok(())
    }
}

const LABEL_WIDTH: usize = 22;

fn detail_lines(detail: &ClientDetail, area: Rect) -> Vec<Line<'static>> {
    let value_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 2).max(10);
    let mut lines = Vec::new();
    for section in detail.sections() {
        lines.push(Line::from(Span::styled(section.title, HEADER_STYLE)));
        if let Some(note) = section.note {
            lines.push(Line::from(format!("  {note}")));
        }
        for field in section.fields {
            let style = if field.value == fmt::UNAVAILABLE {
                UNAVAILABLE_STYLE
            } else {
                Style::default()
            };
            let (wrapped, _) = tui::wrap_text(&field.value, value_width);
            for (i, part) in wrapped.lines().enumerate() {
                let label = if i == 0 {
                    format!("  {:<width$}", field.label, width = LABEL_WIDTH)
                } else {
                    " ".repeat(LABEL_WIDTH + 2)
                };
                lines.push(Line::from(vec![
                    Span::raw(label),
                    Span::styled(part.to_string(), style),
                ]));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}
