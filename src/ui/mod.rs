mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::analysis::listing_length;
use crate::app::{App, Popup};
use crate::state::Page;
use crate::theme::Theme;
use components::{button, centered_rect, heading, panel};

const PLACEHOLDER: &str = "Paste your Etsy listing here...";

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Info line
            Constraint::Min(8), // Page body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_header(f, app, chunks[0]);
    draw_info_line(f, app, chunks[1]);

    // Body gets a little horizontal padding like the page container
    let body = chunks[2].inner(ratatui::layout::Margin { horizontal: 2, vertical: 0 });
    match app.state.page {
        Page::Optimizer => draw_optimizer(f, app, body),
        Page::Competitor => draw_competitor(f, app, body),
        Page::Pricing => draw_pricing(f, app, body),
    }

    draw_footer(f, app, chunks[3]);

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, &app.theme),
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(t.inactive));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(20)])
        .split(inner);

    let brand = Paragraph::new(Line::from(vec![
        Span::styled(" 󰄨 ", Style::default().fg(t.accent)),
        Span::styled("NicheLens", Style::default().fg(t.text).add_modifier(Modifier::BOLD)),
    ]));
    f.render_widget(brand, halves[0]);

    let mut nav: Vec<Span> = Vec::new();
    for page in Page::ALL {
        let icon = match page {
            Page::Optimizer => "󰔵",
            Page::Competitor => "󰍉",
            Page::Pricing => "󰇁",
        };
        let style = if page == app.state.page {
            Style::default().fg(t.accent).bg(t.bg_selected).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.text_dim)
        };
        nav.push(Span::styled(format!(" {} {} ", icon, page.title()), style));
        nav.push(Span::raw("  "));
    }
    nav.push(Span::styled(
        format!(" {} ", app.config.plan_label.to_uppercase()),
        Style::default().fg(t.text).bg(t.inactive),
    ));
    nav.push(Span::styled("  󰀄 ", Style::default().fg(t.text)));

    let nav = Paragraph::new(Line::from(nav)).alignment(Alignment::Right);
    f.render_widget(nav, halves[1]);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    // Priority: status message > loading > ready
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(t.warning)))
    } else if app.state.is_loading() {
        let running: Vec<&str> = [
            (app.state.advice.is_pending(), "TAI"),
            (app.state.health.is_pending(), "LHS"),
        ]
        .iter()
        .filter(|(pending, _)| *pending)
        .map(|(_, label)| *label)
        .collect();
        Line::from(vec![
            Span::styled(
                components::spinner(app.spinner_frame),
                Style::default().fg(t.accent),
            ),
            Span::styled(
                format!(" Running {}...", running.join(" + ")),
                Style::default().fg(t.text_dim),
            ),
        ])
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(t.text_dim)))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_optimizer(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(10), // Listing editor
            Constraint::Length(3), // Buttons
            Constraint::Min(0), // Results
        ])
        .split(area);

    f.render_widget(heading("Etsy Listing Optimizer", t), chunks[0]);
    draw_listing_editor(f, app, chunks[1]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Length(2),
            Constraint::Length(16),
            Constraint::Min(0),
        ])
        .split(chunks[2]);

    // Both buttons share the loading flag
    let loading = app.state.is_loading().then_some(app.spinner_frame);
    f.render_widget(button("Run TAI", "Ctrl+T", t.accent, t, loading), buttons[0]);
    f.render_widget(button("Run LHS", "Ctrl+L", t.secondary, t, loading), buttons[2]);

    draw_results(f, app, chunks[3]);
}

fn draw_listing_editor(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let text = &app.state.listing_text;
    let block = panel(format!("Listing ({} chars)", listing_length(text)), t.accent, t);

    if text.is_empty() {
        let placeholder = Paragraph::new(Line::from(vec![
            Span::styled("█", Style::default().fg(t.accent)),
            Span::styled(PLACEHOLDER, Style::default().fg(t.text_dim)),
        ]))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let mut lines: Vec<Line> = text
        .split('\n')
        .map(|line| Line::from(Span::styled(line, Style::default().fg(t.text))))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("█", Style::default().fg(t.accent)));
    }

    // Keep the cursor line visible
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let editor = Paragraph::new(lines)
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(editor, area);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let advice = app.state.advice();
    let health = app.state.health();

    let mut constraints = Vec::new();
    if advice.is_some() {
        constraints.push(Constraint::Length(6));
    }
    if let Some(report) = health {
        constraints.push(Constraint::Length(report.suggestions.len() as u16 + 5));
    }
    if constraints.is_empty() {
        return;
    }
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut slot = 0;

    if let Some(advice) = advice {
        let tai = Paragraph::new(Span::styled(advice.text.as_str(), Style::default().fg(t.text)))
            .block(panel("TAI Result", t.success, t))
            .wrap(Wrap { trim: true });
        f.render_widget(tai, chunks[slot]);
        slot += 1;
    }

    if let Some(report) = health {
        let mut lines = vec![
            Line::from(Span::styled(report.summary.as_str(), Style::default().fg(t.text))),
            Line::from(""),
        ];
        lines.extend(report.suggestions.iter().map(|s| {
            Line::from(vec![
                Span::styled("  • ", Style::default().fg(t.accent)),
                Span::styled(s.as_str(), Style::default().fg(t.text)),
            ])
        }));

        let lhs = Paragraph::new(lines)
            .block(panel(format!("Listing Health Score: {}", report.score), t.success, t))
            .wrap(Wrap { trim: false });
        f.render_widget(lhs, chunks[slot]);
    }
}

fn draw_competitor(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Button
            Constraint::Length(1),
            Constraint::Min(0), // Snapshot card
        ])
        .split(area);

    f.render_widget(heading("Competitor Snapshot", t), chunks[0]);

    let button_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[1])[0];
    f.render_widget(button("Generate Snapshot", "Enter / g", t.accent, t, None), button_area);

    let Some(snapshot) = app.state.snapshot.as_ref() else {
        return;
    };

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(t.text_dim)),
            Span::styled(value, Style::default().fg(t.text)),
        ])
    };

    let keywords: Vec<Span> = snapshot
        .top_keywords
        .iter()
        .flat_map(|k| {
            vec![
                Span::styled(format!(" {} ", k), Style::default().fg(t.text).bg(t.bg_selected)),
                Span::raw(" "),
            ]
        })
        .collect();

    let lines = vec![
        field("Listings: ", snapshot.listing_count.to_string()),
        field("Monthly Sales: ", snapshot.monthly_sales.to_string()),
        field("Revenue: ", format!("${}", snapshot.estimated_revenue)),
        Line::from(""),
        Line::from(Span::styled(snapshot.niche_focus.as_str(), Style::default().fg(t.text))),
        Line::from(""),
        Line::from(keywords),
    ];

    let card_height = (lines.len() as u16 + 2).min(chunks[3].height);
    let card_area = Rect { height: card_height, ..chunks[3] };
    let card = Paragraph::new(lines)
        .block(panel(snapshot.shop_name.as_str(), t.success, t))
        .wrap(Wrap { trim: false });
    f.render_widget(card, card_area);
}

fn draw_pricing(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    f.render_widget(heading("Pricing (Demo)", t), chunks[0]);
    let body = Paragraph::new(Span::styled(
        "This demo showcases UI, logic, and architecture only.",
        Style::default().fg(t.text),
    ))
    .wrap(Wrap { trim: true });
    f.render_widget(body, chunks[1]);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let hints: Vec<(&str, &str)> = match app.state.page {
        Page::Optimizer => vec![
            ("Ctrl+T", "TAI"),
            ("Ctrl+L", "LHS"),
            ("Ctrl+U", "Clear"),
            ("Tab", "Next"),
            ("F1", "Help"),
            ("Ctrl+Q", "Quit"),
        ],
        Page::Competitor => vec![
            ("Enter", "Generate"),
            ("c", "Clear"),
            ("Tab", "Next"),
            ("F1", "Help"),
            ("q", "Quit"),
        ],
        Page::Pricing => vec![
            ("Tab", "Next"),
            ("Home", "Optimizer"),
            ("F1", "Help"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 3 } else if area.width < 80 { 4 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(t.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(t.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, t: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            format!("═══ {} ═══", title),
            Style::default().fg(t.header).add_modifier(Modifier::BOLD),
        ))
    };
    let binding = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(t.accent)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("Navigation"),
        binding("Tab", "Next page (Optimizer → Competitor → Pricing)"),
        binding("Shift+Tab", "Previous page"),
        binding("Home", "Back to the optimizer"),
        Line::from(""),
        section("Optimizer"),
        binding("typing", "Edit the listing (Enter adds a line, paste works)"),
        binding("Ctrl+T", "Run TAI: listing advice"),
        binding("Ctrl+L", "Run LHS: listing health score"),
        binding("Ctrl+U", "Clear the listing"),
        Line::from(""),
        section("Competitor"),
        binding("Enter/g", "Generate snapshot"),
        binding("c", "Clear snapshot"),
        Line::from(""),
        section("Quit"),
        binding("Ctrl+C", "Anywhere"),
        binding("Ctrl+Q", "On the optimizer"),
        binding("q", "On other pages"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(t.text_dim)),
            Span::styled("F1", Style::default().fg(t.accent)),
            Span::styled("/", Style::default().fg(t.text_dim)),
            Span::styled("Esc", Style::default().fg(t.accent)),
            Span::styled(" to close", Style::default().fg(t.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 NicheLens Help ", Style::default().fg(t.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}
