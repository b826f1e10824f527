use crate::application::{AddField, App, AppMode, Focus, SplitField, TextField};
use crate::domain::{Payer, Standing};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let sidebar = if app.state().add_form_open {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(columns[0])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0)])
            .split(columns[0])
    };

    render_header(f, app, rows[0]);
    render_friends(f, app, sidebar[0]);
    if app.state().add_form_open {
        render_add_form(f, app, sidebar[1]);
    }
    render_split_form(f, app, columns[1]);
    render_status_bar(f, app, rows[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "evenup - split bills with friends | {} friends",
        app.contacts().len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn standing_style(standing: Standing) -> Style {
    match standing {
        Standing::YouOwe(_) => Style::default().fg(Color::Red),
        Standing::Even => Style::default(),
        Standing::OwesYou(_) => Style::default().fg(Color::Green),
    }
}

fn render_friends(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .contacts()
        .iter()
        .map(|contact| {
            let selected = app.state().selection.is_selected(&contact.id);
            let standing = contact.standing();
            let button = if selected { "[Close]" } else { "[Select]" };
            let name_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(contact.name.clone(), name_style),
                    Span::raw("  "),
                    Span::styled(button, Style::default().fg(Color::Cyan)),
                ]),
                Line::from(Span::styled(
                    standing.describe(&contact.name, &app.currency),
                    standing_style(standing),
                )),
                Line::from(Span::styled(
                    contact.avatar_ref.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let border_style = if app.focus == Focus::List {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let add_button = if app.state().add_form_open { "a: Close" } else { "a: Add Friend" };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Friends ({})", add_button))
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.contacts().is_empty() {
        state.select(Some(app.cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn field_line<'a>(label: &'a str, field: &TextField, focused: bool) -> Line<'a> {
    let value_style = if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };
    let mut value = field.value.clone();
    if focused {
        value.insert(field.byte_index(field.cursor), '|');
    }
    Line::from(vec![
        Span::raw(label),
        Span::styled(value, value_style),
    ])
}

fn render_add_form(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::AddForm;
    let form = &app.add_form;
    let lines = vec![
        field_line("Friend name  ", &form.name, focused && form.focus == AddField::Name),
        field_line("Image URL    ", &form.avatar, focused && form.focus == AddField::Avatar),
        Line::from(Span::styled(
            "Enter: Add | Tab: next field | Esc: close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Add friend")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(widget, area);
}

fn format_amount(amount: Option<f64>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}

fn render_split_form(f: &mut Frame, app: &App, area: Rect) {
    let Some(friend) = app.selected_contact() else {
        let hint = Paragraph::new("Select a friend to split a bill with.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Split a bill"));
        f.render_widget(hint, area);
        return;
    };

    let focused = app.focus == Focus::SplitForm;
    let form = &app.split_form;
    let payer_name = match form.payer {
        Payer::User => "You",
        Payer::Friend => friend.name.as_str(),
    };
    let payer_style = if focused && form.focus == SplitField::Payer {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };

    let lines = vec![
        field_line("Bill value        ", &form.bill, focused && form.focus == SplitField::Bill),
        field_line(
            "Your expense      ",
            &form.own_expense,
            focused && form.focus == SplitField::OwnExpense,
        ),
        Line::from(vec![
            Span::raw(format!("{}'s expense ", friend.name)),
            Span::styled(
                format_amount(form.friend_expense()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw("Who is paying     "),
            Span::styled(format!("< {} >", payer_name), payer_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Split bill | Tab: next field | Esc: back to list",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Split a bill with {}", friend.name))
            .border_style(border_style),
    );
    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| match app.focus {
            Focus::List => "↑↓/jk: move | Enter: select | a: add friend | Ctrl+E: export | ?: help | q: quit"
                .to_string(),
            Focus::AddForm => "Adding a friend (Enter to add, Esc to close)".to_string(),
            Focus::SplitForm => "Splitting a bill (Enter to split, Esc to go back)".to_string(),
        }),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportReport => format!(
            "Export balances as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
    };

    let style = match app.mode {
        AppMode::Normal => Style::default(),
        AppMode::Help => Style::default().fg(Color::Cyan),
        AppMode::ExportReport => Style::default().fg(Color::Magenta),
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;
    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let help_widget = Paragraph::new(help_lines[start_line..end_line].join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("evenup Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"EVENUP KEY REFERENCE

=== BALANCES ===
Red      You owe this friend
Green    This friend owes you
Plain    You are even

=== FRIEND LIST ===
↑↓ or j/k       Move between friends
Enter/Space     Select the highlighted friend (again to close)
Tab             Jump to the split form of the selected friend
a               Open or close the add-friend form
Ctrl+E          Export balances to a CSV report
?/F1            Show this help
q               Quit

=== ADD FRIEND ===
Tab/↑↓          Switch between name and image URL
Enter           Add the friend (both fields are required)
Alt+↑↓          Move between friends in the list
Alt+Enter       Select the highlighted friend and close the form
Esc             Close the form

=== SPLIT A BILL ===
Tab/↓           Next field
←→              Change who is paying (on the payer field)
Enter           Split the bill and close the form
Esc             Back to the friend list, keeping the selection

Your expense can never be more than the bill.
If you paid, your friend's share is added to what they owe you.
If your friend paid, your share is added to what you owe them."#;
