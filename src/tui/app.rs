//! Application state and event loop

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::services::{Aggregator, DashboardTables, SalesClient};
use crate::types::Filters;

use super::theme::Theme;
use super::widgets::{
    help::HelpPopup,
    revenue::RevenueView,
    sales::SalesView,
    seller_select::{SellerSelect, SellerSelectPopup},
    sellers::SellersView,
    spinner::{LoadingStage, Spinner},
    tabs::Tab,
};

/// Application state
pub enum AppState {
    /// Loading data with spinner animation
    Loading {
        spinner_frame: usize,
        stage: LoadingStage,
    },
    /// Ready with loaded data
    Ready { data: Box<AppData> },
    /// Error state
    Error { message: String },
}

/// Loaded application data. `records` is kept around so seller and top-N
/// changes re-aggregate locally instead of going back to the API.
pub struct AppData {
    pub records: Vec<crate::types::SaleRecord>,
    pub seller_names: Vec<String>,
    pub tables: DashboardTables,
}

/// Message sent from the background loader thread
pub enum FetchMessage {
    Stage(LoadingStage),
    Done(Result<Box<AppData>, String>),
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    filters: Filters,
    show_help: bool,
    seller_select: Option<SellerSelect>,
    refetch_requested: bool,
    theme: Theme,
}

impl App {
    /// Create a new app in loading state
    pub fn new(theme: Theme) -> Self {
        Self {
            state: AppState::Loading {
                spinner_frame: 0,
                stage: LoadingStage::Fetching,
            },
            should_quit: false,
            current_tab: Tab::default(),
            filters: Filters::default(),
            show_help: false,
            seller_select: None,
            refetch_requested: false,
            theme,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                if self.seller_select.is_some() {
                    self.handle_seller_select_key(key.code);
                    return;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        self.should_quit = true;
                    }
                    KeyCode::Esc => {
                        if self.show_help {
                            self.show_help = false;
                        } else {
                            self.should_quit = true;
                        }
                    }
                    KeyCode::Tab => {
                        self.current_tab = self.current_tab.next();
                    }
                    KeyCode::BackTab => {
                        self.current_tab = self.current_tab.prev();
                    }
                    KeyCode::Char(c @ '1'..='3') => {
                        if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                            self.current_tab = tab;
                        }
                    }
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                    }
                    KeyCode::Char('r') => {
                        self.filters.region = self.filters.region.next();
                        self.request_refetch();
                    }
                    KeyCode::Char('R') => {
                        self.filters.region = self.filters.region.prev();
                        self.request_refetch();
                    }
                    KeyCode::Char('a') => {
                        self.filters.year = self.filters.year.toggled();
                        self.request_refetch();
                    }
                    KeyCode::Right => {
                        let stepped = self.filters.year.step_up();
                        if stepped != self.filters.year {
                            self.filters.year = stepped;
                            self.request_refetch();
                        }
                    }
                    KeyCode::Left => {
                        let stepped = self.filters.year.step_down();
                        if stepped != self.filters.year {
                            self.filters.year = stepped;
                            self.request_refetch();
                        }
                    }
                    KeyCode::Char('v') => {
                        if let AppState::Ready { data } = &self.state {
                            self.seller_select = Some(SellerSelect::new(
                                data.seller_names.clone(),
                                &self.filters.sellers,
                            ));
                        }
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        self.filters.set_top_sellers(self.filters.top_sellers + 1);
                    }
                    KeyCode::Char('-') => {
                        self.filters
                            .set_top_sellers(self.filters.top_sellers.saturating_sub(1));
                    }
                    KeyCode::Char('f') => {
                        self.request_refetch();
                    }
                    _ => {}
                }
            }
        }
    }

    /// Keyboard handling while the seller popup is open
    fn handle_seller_select_key(&mut self, code: KeyCode) {
        let Some(select) = self.seller_select.as_mut() else {
            return;
        };
        match code {
            KeyCode::Up | KeyCode::Char('k') => select.move_up(),
            KeyCode::Down | KeyCode::Char('j') => select.move_down(),
            KeyCode::Char(' ') => select.toggle(),
            KeyCode::Char('a') => select.toggle_all(),
            KeyCode::Enter => {
                self.filters.sellers = select.apply();
                self.seller_select = None;
                self.reaggregate();
            }
            KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => {
                self.seller_select = None;
            }
            _ => {}
        }
    }

    /// Drop current data and go back to loading; the event loop spawns the
    /// actual fetch.
    fn request_refetch(&mut self) {
        self.refetch_requested = true;
        self.seller_select = None;
        self.state = AppState::Loading {
            spinner_frame: 0,
            stage: LoadingStage::Fetching,
        };
    }

    /// Take and clear the refetch request flag
    pub fn take_refetch_request(&mut self) -> bool {
        std::mem::take(&mut self.refetch_requested)
    }

    /// Rebuild the aggregation tables from the records already in memory
    fn reaggregate(&mut self) {
        if let AppState::Ready { data } = &mut self.state {
            data.tables = DashboardTables::from_records(&data.records, &self.filters);
        }
    }

    /// Apply a loader message to the app state
    pub fn apply_fetch_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Stage(stage) => {
                if let AppState::Loading { spinner_frame, .. } = self.state {
                    self.state = AppState::Loading {
                        spinner_frame,
                        stage,
                    };
                }
            }
            FetchMessage::Done(Ok(mut data)) => {
                // Selected sellers may not exist in the newly fetched region/year
                self.filters.retain_known_sellers(&data.seller_names);
                data.tables = DashboardTables::from_records(&data.records, &self.filters);
                self.state = AppState::Ready { data };
            }
            FetchMessage::Done(Err(message)) => {
                self.state = AppState::Error { message };
            }
        }
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading {
            spinner_frame,
            stage,
        } = &self.state
        {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
                stage: *stage,
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading {
                spinner_frame,
                stage,
            } => {
                Spinner::new(*spinner_frame, *stage).render(area, buf);
            }
            AppState::Ready { data } => {
                let seller_total = data.seller_names.len();
                match self.current_tab {
                    Tab::Receita => {
                        RevenueView::new(&data.tables, &self.filters, seller_total, self.theme)
                            .render(area, buf);
                    }
                    Tab::Vendas => {
                        SalesView::new(&data.tables, &self.filters, seller_total, self.theme)
                            .render(area, buf);
                    }
                    Tab::Vendedores => {
                        SellersView::new(&data.tables, &self.filters, seller_total, self.theme)
                            .render(area, buf);
                    }
                }

                if let Some(select) = &self.seller_select {
                    let popup = SellerSelectPopup::new(select, self.theme);
                    let popup_area = popup.centered_area(area);
                    popup.render(popup_area, buf);
                }

                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme).render(popup_area, buf);
                }
            }
            AppState::Error { message } => {
                let y = area.y + area.height / 2;
                let text = format!("Erro: {}", message);
                let x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
                buf.set_string(x, y, &text, Style::default().fg(self.theme.error()));

                let hint = "Pressione f para tentar novamente, q para sair";
                let hint_x =
                    area.x + (area.width.saturating_sub(hint.chars().count() as u16)) / 2;
                if y + 2 < area.y + area.height {
                    buf.set_string(
                        hint_x,
                        y + 2,
                        hint,
                        Style::default().fg(self.theme.muted()),
                    );
                }
            }
        }
    }
}

/// Run the TUI application
pub fn run() -> anyhow::Result<()> {
    // Query the terminal background before ratatui takes over the screen
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, theme);
    ratatui::restore();
    result
}

/// Fetch and aggregate synchronously (extracted for background thread)
fn load_data_sync(filters: &Filters, tx: &mpsc::Sender<FetchMessage>) {
    let client = SalesClient::new();
    let records = match client.fetch(filters.region, filters.year) {
        Ok(records) => records,
        Err(e) => {
            let _ = tx.send(FetchMessage::Done(Err(e.to_string())));
            return;
        }
    };

    let _ = tx.send(FetchMessage::Stage(LoadingStage::Aggregating));

    let seller_names = Aggregator::distinct_sellers(&records);
    let tables = DashboardTables::from_records(&records, filters);
    let _ = tx.send(FetchMessage::Done(Ok(Box::new(AppData {
        records,
        seller_names,
        tables,
    }))));
}

/// Spawn a fetch for the current filters, returning the message channel
fn spawn_fetch(filters: &Filters) -> mpsc::Receiver<FetchMessage> {
    let (tx, rx) = mpsc::channel();
    let filters = filters.clone();
    thread::spawn(move || load_data_sync(&filters, &tx));
    rx
}

fn run_app(terminal: &mut DefaultTerminal, theme: Theme) -> anyhow::Result<()> {
    let mut app = App::new(theme);
    let mut data_rx = spawn_fetch(&app.filters);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // A filter change replaces the channel; late results from the old
        // fetch are dropped with it
        if app.take_refetch_request() {
            data_rx = spawn_fetch(&app.filters);
        }

        // Check for loader progress (non-blocking)
        if matches!(app.state, AppState::Loading { .. }) {
            while let Ok(message) = data_rx.try_recv() {
                app.apply_fetch_message(message);
            }
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Region, SaleRecord, YearFilter, BR_DATE_FORMAT};
    use chrono::NaiveDate;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn record(seller: &str, price: f64) -> SaleRecord {
        SaleRecord {
            category: "livros".to_string(),
            price,
            purchase_date: NaiveDate::parse_from_str("01/01/2022", BR_DATE_FORMAT).unwrap(),
            place: "SP".to_string(),
            lat: -22.19,
            lon: -48.79,
            seller: seller.to_string(),
        }
    }

    /// Helper to create a ready app with minimal data for testing
    fn make_ready_app() -> App {
        let mut app = App::new(Theme::Dark);
        let records = vec![record("Ana", 100.0), record("Beto", 50.0)];
        let seller_names = Aggregator::distinct_sellers(&records);
        let tables = DashboardTables::from_records(&records, &app.filters);
        app.state = AppState::Ready {
            data: Box::new(AppData {
                records,
                seller_names,
                tables,
            }),
        };
        app
    }

    #[test]
    fn test_app_initial_state() {
        let app = App::new(Theme::Dark);
        assert!(matches!(
            app.state,
            AppState::Loading {
                spinner_frame: 0,
                stage: LoadingStage::Fetching
            }
        ));
        assert!(!app.should_quit());
        assert_eq!(app.filters, Filters::default());
    }

    #[test]
    fn test_app_quit_on_q() {
        let mut app = App::new(Theme::Dark);
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_esc_closes_help_before_quitting() {
        let mut app = App::new(Theme::Dark);
        app.show_help = true;
        app.handle_event(key(KeyCode::Esc));
        assert!(!app.should_quit());
        assert!(!app.show_help);

        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_app_tick_updates_spinner() {
        let mut app = App::new(Theme::Dark);
        app.tick();
        assert!(matches!(
            app.state,
            AppState::Loading {
                spinner_frame: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_app_tab_navigation() {
        let mut app = App::new(Theme::Dark);
        assert_eq!(app.current_tab, Tab::Receita);

        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Vendas);

        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Vendedores);

        // Wrap around
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Receita);

        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::BackTab,
            KeyModifiers::SHIFT,
        )));
        assert_eq!(app.current_tab, Tab::Vendedores);
    }

    #[test]
    fn test_app_number_key_navigation() {
        let mut app = App::new(Theme::Dark);
        app.handle_event(key(KeyCode::Char('3')));
        assert_eq!(app.current_tab, Tab::Vendedores);
        app.handle_event(key(KeyCode::Char('1')));
        assert_eq!(app.current_tab, Tab::Receita);
    }

    #[test]
    fn test_region_cycle_requests_refetch() {
        let mut app = make_ready_app();
        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.filters.region, Region::CentroOeste);
        assert!(matches!(app.state, AppState::Loading { .. }));
        assert!(app.take_refetch_request());
        // Flag is cleared after take
        assert!(!app.take_refetch_request());
    }

    #[test]
    fn test_year_toggle_and_step() {
        let mut app = make_ready_app();
        assert_eq!(app.filters.year, YearFilter::All);

        // Arrows do nothing in All mode, no refetch
        app.handle_event(key(KeyCode::Right));
        assert_eq!(app.filters.year, YearFilter::All);
        assert!(!app.take_refetch_request());

        app.handle_event(key(KeyCode::Char('a')));
        assert_eq!(app.filters.year, YearFilter::Year(2020));
        assert!(app.take_refetch_request());

        app.handle_event(key(KeyCode::Right));
        assert_eq!(app.filters.year, YearFilter::Year(2021));
        assert!(app.take_refetch_request());

        app.handle_event(key(KeyCode::Left));
        assert_eq!(app.filters.year, YearFilter::Year(2020));

        // Clamped at the lower bound, so no state change and no refetch
        app.take_refetch_request();
        app.handle_event(key(KeyCode::Left));
        assert_eq!(app.filters.year, YearFilter::Year(2020));
        assert!(!app.take_refetch_request());
    }

    #[test]
    fn test_top_sellers_adjustment_clamped() {
        let mut app = make_ready_app();
        assert_eq!(app.filters.top_sellers, 5);

        for _ in 0..10 {
            app.handle_event(key(KeyCode::Char('+')));
        }
        assert_eq!(app.filters.top_sellers, 10);

        for _ in 0..15 {
            app.handle_event(key(KeyCode::Char('-')));
        }
        assert_eq!(app.filters.top_sellers, 2);

        // Top-N is a presentation knob, never a refetch
        assert!(!app.take_refetch_request());
    }

    #[test]
    fn test_seller_popup_open_apply() {
        let mut app = make_ready_app();
        app.handle_event(key(KeyCode::Char('v')));
        assert!(app.seller_select.is_some());

        // Uncheck the first seller (Ana) and apply
        app.handle_event(key(KeyCode::Char(' ')));
        app.handle_event(key(KeyCode::Enter));
        assert!(app.seller_select.is_none());
        assert!(app.filters.sellers.contains("Beto"));
        assert!(!app.filters.sellers.contains("Ana"));

        // Tables were re-aggregated from the held records
        if let AppState::Ready { data } = &app.state {
            assert_eq!(data.tables.sale_count, 1);
            assert!((data.tables.total_revenue - 50.0).abs() < f64::EPSILON);
        } else {
            panic!("expected ready state");
        }
    }

    #[test]
    fn test_seller_popup_escape_cancels() {
        let mut app = make_ready_app();
        app.handle_event(key(KeyCode::Char('v')));
        app.handle_event(key(KeyCode::Char(' ')));
        app.handle_event(key(KeyCode::Esc));
        assert!(app.seller_select.is_none());
        assert!(app.filters.sellers.is_empty());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_seller_popup_not_opened_while_loading() {
        let mut app = App::new(Theme::Dark);
        app.handle_event(key(KeyCode::Char('v')));
        assert!(app.seller_select.is_none());
    }

    #[test]
    fn test_fetch_done_prunes_unknown_sellers() {
        let mut app = App::new(Theme::Dark);
        app.filters.sellers.insert("Fantasma".to_string());
        app.filters.sellers.insert("Ana".to_string());

        let records = vec![record("Ana", 100.0)];
        let seller_names = Aggregator::distinct_sellers(&records);
        let tables = DashboardTables::from_records(&records, &Filters::default());
        app.apply_fetch_message(FetchMessage::Done(Ok(Box::new(AppData {
            records,
            seller_names,
            tables,
        }))));

        assert!(matches!(app.state, AppState::Ready { .. }));
        assert!(app.filters.sellers.contains("Ana"));
        assert!(!app.filters.sellers.contains("Fantasma"));
    }

    #[test]
    fn test_fetch_error_sets_error_state() {
        let mut app = App::new(Theme::Dark);
        app.apply_fetch_message(FetchMessage::Done(Err("conexão recusada".to_string())));
        assert!(matches!(app.state, AppState::Error { .. }));
    }

    #[test]
    fn test_stage_message_keeps_spinner_frame() {
        let mut app = App::new(Theme::Dark);
        app.tick();
        app.tick();
        app.apply_fetch_message(FetchMessage::Stage(LoadingStage::Aggregating));
        assert!(matches!(
            app.state,
            AppState::Loading {
                spinner_frame: 2,
                stage: LoadingStage::Aggregating
            }
        ));
    }

    #[test]
    fn test_refresh_key_from_error_state() {
        let mut app = App::new(Theme::Dark);
        app.state = AppState::Error {
            message: "timeout".to_string(),
        };
        app.handle_event(key(KeyCode::Char('f')));
        assert!(matches!(app.state, AppState::Loading { .. }));
        assert!(app.take_refetch_request());
    }

    #[test]
    fn test_render_ready_does_not_panic() {
        let app = make_ready_app();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);
    }

    #[test]
    fn test_render_error_does_not_panic() {
        let mut app = App::new(Theme::Light);
        app.state = AppState::Error {
            message: "falha".to_string(),
        };
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);
    }
}
