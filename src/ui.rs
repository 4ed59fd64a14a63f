use crate::models::{Board, Card, CardState};

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str, script: &str) -> String {
    PAGE_SHELL
        .replace("{{TITLE}}", title)
        .replace("{{BODY}}", body)
        .replace("{{SCRIPT}}", script)
}

pub fn empty_column_text(state: CardState) -> &'static str {
    match state {
        CardState::Red => "No problem cards yet",
        CardState::Green => "No solution cards yet",
    }
}

fn render_card(card: &Card) -> String {
    let details = card
        .details
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| format!("<p class=\"card-details\">{}</p>\n    ", escape_html(d)))
        .unwrap_or_default();
    format!(
        r#"<article class="card {class}" data-card-id="{id}" data-board-id="{board_id}">
    <h3>{title}</h3>
    {details}<div class="card-meta">
      <span>resets at {reset}</span>
      <span>
        <a class="edit-link" href="/boards/{board_id}/cards/{id}/edit">Edit</a>
        <button class="audit-link" type="button">History</button>
      </span>
    </div>
  </article>"#,
        class = card.state.css_class(),
        id = card.id,
        board_id = card.board_id,
        title = escape_html(&card.title),
        details = details,
        reset = card.reset_time.format("%H:%M"),
    )
}

fn render_column(state: CardState, cards: &[&Card]) -> String {
    let (heading, header_class, list_id) = match state {
        CardState::Red => ("Problems", "column-header-red", "red-list"),
        CardState::Green => ("Solutions", "column-header-green", "green-list"),
    };
    let in_column: Vec<&&Card> = cards.iter().filter(|c| c.state == state).collect();
    let list = if in_column.is_empty() {
        format!(
            "<div class=\"empty-state\">{}</div>",
            empty_column_text(state)
        )
    } else {
        in_column
            .iter()
            .map(|c| render_card(c))
            .collect::<Vec<_>>()
            .join("\n  ")
    };
    format!(
        r#"<section class="column">
  <header class="column-header {header_class}"><h2>{heading}</h2></header>
  <div class="card-list" id="{list_id}">
  {list}
  </div>
</section>"#
    )
}

pub fn render_board_view(board: &Board, cards: &[&Card]) -> String {
    let description = board
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| format!("<p class=\"subtitle\">{}</p>", escape_html(d)))
        .unwrap_or_default();
    let body = format!(
        r#"<header class="page-header">
  <div>
    <h1>{name}</h1>
    {description}
  </div>
  <a class="button" href="/boards/{id}/cards/new">Add card</a>
</header>
<div class="status" id="status"></div>
<div class="columns">
{red}
{green}
</div>
<dialog id="audit-dialog">
  <h2>State history</h2>
  <div id="audit-content"></div>
  <button id="audit-close" type="button">Close</button>
</dialog>"#,
        name = escape_html(&board.name),
        description = description,
        id = board.id,
        red = render_column(CardState::Red, cards),
        green = render_column(CardState::Green, cards),
    );
    page(&escape_html(&board.name), &body, BOARD_SCRIPT)
}

pub fn render_dashboard(boards: &[&Board]) -> String {
    let grid = if boards.is_empty() {
        "<div class=\"empty-state\">You don't have any boards yet. Create your first board to get started!</div>".to_string()
    } else {
        let tiles = boards
            .iter()
            .map(|board| {
                let description = board
                    .description
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .map(escape_html)
                    .unwrap_or_else(|| "No description".to_string());
                format!(
                    r#"<div class="board-tile">
    <h3>{name}</h3>
    <p class="muted">{description}</p>
    <p class="muted">Created: {created}</p>
    <a class="button" href="/boards/{id}">View board</a>
  </div>"#,
                    name = escape_html(&board.name),
                    description = description,
                    created = board.created_at.format("%Y-%m-%d"),
                    id = board.id,
                )
            })
            .collect::<Vec<_>>()
            .join("\n  ");
        format!("<div class=\"board-grid\">\n  {tiles}\n</div>")
    };
    let body = format!(
        r#"<header class="page-header">
  <h1>Your boards</h1>
  <a class="button" href="/boards/new">New board</a>
</header>
{grid}"#
    );
    page("Dashboard", &body, "")
}

pub fn render_login() -> String {
    let body = r#"<header class="page-header"><h1>Log in</h1></header>
<div class="banner banner-error hidden" id="error-message"></div>
<form id="login-form">
  <label for="email">Email</label>
  <input type="email" id="email" name="email" required />
  <label for="password">Password</label>
  <input type="password" id="password" name="password" required />
  <button type="submit">Log in</button>
</form>
<p class="muted">No account yet? <a href="/register">Register</a>.</p>"#;
    page("Log in", body, LOGIN_SCRIPT)
}

pub fn render_register() -> String {
    let body = r#"<header class="page-header"><h1>Create account</h1></header>
<div class="banner banner-error hidden" id="error-message"></div>
<div class="banner banner-success hidden" id="success-message"></div>
<form id="register-form">
  <label for="name">Name</label>
  <input type="text" id="name" name="name" required />
  <label for="email">Email</label>
  <input type="email" id="email" name="email" required />
  <label for="password">Password</label>
  <input type="password" id="password" name="password" required />
  <label for="confirm-password">Confirm password</label>
  <input type="password" id="confirm-password" name="confirmPassword" required />
  <button type="submit">Register</button>
</form>
<p class="muted">Already registered? <a href="/login">Log in</a>.</p>"#;
    page("Register", body, REGISTER_SCRIPT)
}

pub fn render_board_form() -> String {
    let body = r#"<header class="page-header"><h1>New board</h1></header>
<div class="banner banner-error hidden" id="error-message"></div>
<div class="banner banner-success hidden" id="success-message"></div>
<form id="board-form">
  <label for="name">Name</label>
  <input type="text" id="name" name="name" required />
  <label for="description">Description</label>
  <textarea id="description" name="description" rows="3"></textarea>
  <button type="submit">Create board</button>
</form>"#;
    page("New board", body, BOARD_FORM_SCRIPT)
}

pub fn render_card_form(board_id: u64, card: Option<&Card>) -> String {
    let (heading, card_id_field, title, details, reset, red_sel, green_sel) = match card {
        Some(card) => (
            "Edit card",
            format!(
                "<input type=\"hidden\" id=\"card-id\" value=\"{}\" />",
                card.id
            ),
            escape_html(&card.title),
            card.details.as_deref().map(escape_html).unwrap_or_default(),
            card.reset_time.format("%H:%M").to_string(),
            if card.state == CardState::Red { " selected" } else { "" },
            if card.state == CardState::Green { " selected" } else { "" },
        ),
        None => (
            "New card",
            String::new(),
            String::new(),
            String::new(),
            "06:00".to_string(),
            " selected",
            "",
        ),
    };
    let body = format!(
        r#"<header class="page-header"><h1>{heading}</h1></header>
<div class="banner banner-error hidden" id="error-message"></div>
<div class="banner banner-success hidden" id="success-message"></div>
<form id="card-form">
  <input type="hidden" id="board-id" value="{board_id}" />
  {card_id_field}
  <label for="title">Title</label>
  <input type="text" id="title" name="title" value="{title}" maxlength="200" required />
  <label for="details">Details</label>
  <textarea id="details" name="details" rows="4" maxlength="5000">{details}</textarea>
  <label for="state">State</label>
  <select id="state" name="state">
    <option value="RED"{red_sel}>Problem (red)</option>
    <option value="GREEN"{green_sel}>Solution (green)</option>
  </select>
  <label for="reset-time">Daily reset time (24-hour HH:mm)</label>
  <input type="text" id="reset-time" name="resetTime" value="{reset}" required />
  <button type="submit">Save card</button>
</form>"#
    );
    page(heading, &body, CARD_FORM_SCRIPT)
}

pub fn render_not_found(what: &str) -> String {
    let body = format!(
        r#"<header class="page-header"><h1>Not found</h1></header>
<p class="muted">{} not found. <a href="/dashboard">Back to the dashboard</a>.</p>"#,
        escape_html(what)
    );
    page("Not found", &body, "")
}

const PAGE_SHELL: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} - Kamishibai</title>
  <style>
    :root {
      --ink: #2b2a28;
      --paper: #f6f4ef;
      --red: #c63b2b;
      --red-soft: #fbeae7;
      --green: #2d7a4b;
      --green-soft: #e8f4ec;
      --line: rgba(43, 42, 40, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--paper);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
    }

    nav {
      display: flex;
      gap: 18px;
      align-items: center;
      padding: 14px 24px;
      background: white;
      border-bottom: 1px solid var(--line);
    }

    nav .brand {
      font-weight: 700;
      font-size: 1.1rem;
      margin-right: auto;
    }

    nav a {
      color: var(--ink);
      text-decoration: none;
    }

    main {
      width: min(960px, 100%);
      margin: 0 auto;
      padding: 28px 18px 48px;
    }

    .page-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      margin-bottom: 20px;
    }

    .page-header h1 {
      margin: 0;
    }

    .subtitle,
    .muted {
      color: #6b645d;
    }

    .button {
      display: inline-block;
      background: var(--ink);
      color: white;
      border-radius: 8px;
      padding: 8px 14px;
      text-decoration: none;
      border: none;
      cursor: pointer;
    }

    .board-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 16px;
    }

    .board-tile {
      background: white;
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 16px;
    }

    .columns {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 18px;
    }

    .column {
      background: white;
      border: 1px solid var(--line);
      border-radius: 12px;
      overflow: hidden;
    }

    .column-header {
      padding: 10px 16px;
      color: white;
    }

    .column-header h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .column-header-red {
      background: var(--red);
    }

    .column-header-green {
      background: var(--green);
    }

    .card-list {
      padding: 12px;
      display: grid;
      gap: 10px;
      min-height: 80px;
    }

    .card {
      border-radius: 10px;
      padding: 12px 14px;
      cursor: pointer;
      border: 1px solid var(--line);
    }

    .card h3 {
      margin: 0 0 6px;
    }

    .card-red {
      background: var(--red-soft);
      border-left: 5px solid var(--red);
    }

    .card-green {
      background: var(--green-soft);
      border-left: 5px solid var(--green);
    }

    .card-meta {
      display: flex;
      justify-content: space-between;
      font-size: 0.85rem;
      color: #6b645d;
    }

    .card-meta a,
    .card-meta button {
      background: none;
      border: none;
      padding: 0;
      margin-left: 10px;
      color: var(--ink);
      text-decoration: underline;
      cursor: pointer;
      font-size: 0.85rem;
    }

    .empty-state {
      text-align: center;
      color: #8b857d;
      padding: 18px 8px;
    }

    form {
      display: grid;
      gap: 8px;
      max-width: 420px;
    }

    form label {
      font-size: 0.9rem;
      color: #55504a;
    }

    form input,
    form textarea,
    form select {
      padding: 9px 10px;
      border: 1px solid var(--line);
      border-radius: 8px;
      font: inherit;
      background: white;
    }

    form button {
      margin-top: 8px;
      justify-self: start;
      background: var(--ink);
      color: white;
      border: none;
      border-radius: 8px;
      padding: 10px 16px;
      cursor: pointer;
    }

    .banner {
      border-radius: 8px;
      padding: 10px 14px;
      margin-bottom: 14px;
    }

    .banner-error {
      background: var(--red-soft);
      color: var(--red);
    }

    .banner-success {
      background: var(--green-soft);
      color: var(--green);
    }

    .hidden {
      display: none;
    }

    .status {
      min-height: 1.3em;
      margin-bottom: 10px;
      color: var(--red);
    }

    dialog {
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 20px;
      min-width: 320px;
    }

    dialog::backdrop {
      background: rgba(43, 42, 40, 0.4);
    }

    .audit-row {
      display: flex;
      justify-content: space-between;
      gap: 18px;
      padding: 8px 0;
      border-bottom: 1px solid var(--line);
    }

    @media (max-width: 700px) {
      .columns {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <nav>
    <span class="brand">Kamishibai</span>
    <a href="/dashboard">Dashboard</a>
    <a href="/boards/new">New board</a>
    <a href="/login">Log in</a>
    <a href="/register">Register</a>
  </nav>
  <main>
{{BODY}}
  </main>
  <script>
{{SCRIPT}}
  </script>
</body>
</html>
"##;

const BOARD_SCRIPT: &str = r##"const token = localStorage.getItem('token');
const authHeaders = token ? { 'Authorization': 'Bearer ' + token } : {};
const redList = document.getElementById('red-list');
const greenList = document.getElementById('green-list');
const statusEl = document.getElementById('status');
const dialog = document.getElementById('audit-dialog');
const auditContent = document.getElementById('audit-content');
const inFlight = new Set();

const setStatus = (message) => {
  statusEl.textContent = message || '';
};

const placeholderText = (list) =>
  list === redList ? 'No problem cards yet' : 'No solution cards yet';

const updateEmptyState = () => {
  [redList, greenList].forEach((list) => {
    const cards = list.querySelectorAll('.card');
    const placeholder = list.querySelector('.empty-state');
    if (cards.length === 0 && !placeholder) {
      const message = document.createElement('div');
      message.className = 'empty-state';
      message.textContent = placeholderText(list);
      list.appendChild(message);
    } else if (cards.length > 0 && placeholder) {
      placeholder.remove();
    }
  });
};

const toggleCard = async (card) => {
  const cardId = card.dataset.cardId;
  const boardId = card.dataset.boardId;
  if (inFlight.has(cardId)) {
    return;
  }
  inFlight.add(cardId);
  try {
    const res = await fetch(`/api/boards/${boardId}/cards/${cardId}/toggle`, {
      method: 'POST',
      headers: Object.assign({ 'Content-Type': 'application/json' }, authHeaders)
    });
    if (!res.ok) {
      const data = await res.json().catch(() => ({}));
      throw new Error(data.message || 'Failed to toggle card state');
    }
    const data = await res.json();
    const target = data.state === 'GREEN' ? greenList : redList;
    card.classList.remove('card-red', 'card-green');
    card.classList.add('card-' + data.state.toLowerCase());
    target.appendChild(card);
    updateEmptyState();
    setStatus('');
  } catch (err) {
    setStatus(err.message);
  } finally {
    inFlight.delete(cardId);
  }
};

const viewAudit = async (boardId, cardId) => {
  try {
    const res = await fetch(`/api/boards/${boardId}/cards/${cardId}/audit`);
    if (!res.ok) {
      throw new Error('Failed to fetch audit log');
    }
    const entries = await res.json();
    auditContent.innerHTML = '';
    if (entries.length === 0) {
      const empty = document.createElement('p');
      empty.className = 'empty-state';
      empty.textContent = 'No state changes yet';
      auditContent.appendChild(empty);
    } else {
      entries.forEach((entry) => {
        const row = document.createElement('div');
        row.className = 'audit-row';
        const change = document.createElement('span');
        change.textContent = entry.previousState + ' → ' + entry.newState;
        const when = document.createElement('small');
        when.className = 'muted';
        when.textContent = new Date(entry.changedAt).toLocaleString();
        row.append(change, when);
        auditContent.appendChild(row);
      });
    }
    dialog.showModal();
  } catch (err) {
    setStatus(err.message);
  }
};

const onListClick = (event) => {
  const card = event.target.closest('.card');
  if (!card) {
    return;
  }
  if (event.target.closest('.audit-link')) {
    viewAudit(card.dataset.boardId, card.dataset.cardId);
    return;
  }
  if (event.target.closest('.edit-link')) {
    return;
  }
  toggleCard(card);
};

redList.addEventListener('click', onListClick);
greenList.addEventListener('click', onListClick);
document.getElementById('audit-close').addEventListener('click', () => dialog.close());"##;

const LOGIN_SCRIPT: &str = r##"const form = document.getElementById('login-form');
const errorMessage = document.getElementById('error-message');

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  errorMessage.classList.add('hidden');

  const email = document.getElementById('email').value;
  const password = document.getElementById('password').value;

  try {
    const res = await fetch('/api/auth/login', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ email, password })
    });
    const data = await res.json().catch(() => ({}));
    if (!res.ok) {
      throw new Error(data.message || 'Invalid email or password');
    }
    localStorage.setItem('token', data.token);
    window.location.href = '/dashboard';
  } catch (err) {
    errorMessage.textContent = err.message || 'An error occurred while logging in';
    errorMessage.classList.remove('hidden');
  }
});"##;

const REGISTER_SCRIPT: &str = r##"const form = document.getElementById('register-form');
const errorMessage = document.getElementById('error-message');
const successMessage = document.getElementById('success-message');

const showError = (message) => {
  errorMessage.textContent = message;
  errorMessage.classList.remove('hidden');
};

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  errorMessage.classList.add('hidden');
  successMessage.classList.add('hidden');

  const name = document.getElementById('name').value;
  const email = document.getElementById('email').value;
  const password = document.getElementById('password').value;
  const confirmPassword = document.getElementById('confirm-password').value;

  if (password !== confirmPassword) {
    showError('Passwords do not match');
    return;
  }
  if (password.length < 6) {
    showError('Password must be at least 6 characters long');
    return;
  }

  try {
    const res = await fetch('/api/accounts/register', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ name, email, password, confirmPassword })
    });
    if (!res.ok) {
      const data = await res.json().catch(() => ({}));
      throw new Error(data.message || 'Failed to create account');
    }
    successMessage.textContent = 'Account created successfully! Redirecting to login...';
    successMessage.classList.remove('hidden');
    form.reset();
    setTimeout(() => {
      window.location.href = '/login';
    }, 2000);
  } catch (err) {
    showError(err.message || 'An error occurred while creating your account');
  }
});"##;

const BOARD_FORM_SCRIPT: &str = r##"const form = document.getElementById('board-form');
const errorMessage = document.getElementById('error-message');
const successMessage = document.getElementById('success-message');
const token = localStorage.getItem('token');

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  errorMessage.classList.add('hidden');
  successMessage.classList.add('hidden');

  const body = {
    name: document.getElementById('name').value,
    description: document.getElementById('description').value
  };

  try {
    const res = await fetch('/api/boards', {
      method: 'POST',
      headers: {
        'Content-Type': 'application/json',
        'Authorization': 'Bearer ' + (token || '')
      },
      body: JSON.stringify(body)
    });
    if (!res.ok) {
      const data = await res.json().catch(() => ({}));
      throw new Error(data.message || 'Failed to create board');
    }
    successMessage.textContent = 'Board created successfully!';
    successMessage.classList.remove('hidden');
    setTimeout(() => {
      window.location.href = '/dashboard';
    }, 1500);
  } catch (err) {
    errorMessage.textContent = err.message || 'An error occurred while creating the board';
    errorMessage.classList.remove('hidden');
  }
});"##;

const CARD_FORM_SCRIPT: &str = r##"const form = document.getElementById('card-form');
const errorMessage = document.getElementById('error-message');
const successMessage = document.getElementById('success-message');
const token = localStorage.getItem('token');

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  errorMessage.classList.add('hidden');
  successMessage.classList.add('hidden');

  const boardId = document.getElementById('board-id').value;
  const cardIdField = document.getElementById('card-id');
  const cardId = cardIdField ? cardIdField.value : '';
  const isEdit = cardId !== '';

  const resetTime = document.getElementById('reset-time').value;
  if (!resetTime.match(/^([01]?[0-9]|2[0-3]):[0-5][0-9]$/)) {
    errorMessage.textContent = 'Please enter a valid time in 24-hour format (HH:mm)';
    errorMessage.classList.remove('hidden');
    return;
  }

  const body = {
    title: document.getElementById('title').value,
    details: document.getElementById('details').value,
    state: document.getElementById('state').value,
    resetTime: resetTime,
    position: 0
  };

  const url = isEdit
    ? `/api/boards/${boardId}/cards/${cardId}`
    : `/api/boards/${boardId}/cards`;

  try {
    const res = await fetch(url, {
      method: isEdit ? 'PUT' : 'POST',
      headers: {
        'Content-Type': 'application/json',
        'Authorization': 'Bearer ' + (token || '')
      },
      body: JSON.stringify(body)
    });
    const data = await res.json().catch(() => ({}));
    if (!res.ok) {
      throw new Error(data.message || (isEdit ? 'Failed to update card' : 'Failed to create card'));
    }
    successMessage.textContent = data.message || 'Card saved successfully!';
    successMessage.classList.remove('hidden');
    form.reset();
    setTimeout(() => {
      window.location.href = `/boards/${boardId}`;
    }, 1000);
  } catch (err) {
    errorMessage.textContent = err.message || (isEdit ? 'An error occurred while updating the card' : 'An error occurred while creating the card');
    errorMessage.classList.remove('hidden');
  }
});"##;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn board() -> Board {
        let now = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Board {
            id: 2,
            name: "Morning routine".into(),
            description: Some("Daily checks".into()),
            owner_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn card(id: u64, state: CardState) -> Card {
        let now = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Card {
            id,
            board_id: 2,
            title: format!("card {id}"),
            details: None,
            position: 0,
            state,
            reset_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn green_card_renders_in_green_column_with_green_class() {
        let board = board();
        let green = card(5, CardState::Green);
        let html = render_board_view(&board, &[&green]);

        let green_list = html.find("id=\"green-list\"").unwrap();
        let card_pos = html.find("data-card-id=\"5\"").unwrap();
        assert!(card_pos > green_list);
        assert!(html.contains("card card-green"));
        assert!(!html.contains("card card-red"));
    }

    #[test]
    fn empty_columns_render_exactly_one_placeholder_each() {
        let board = board();
        let html = render_board_view(&board, &[]);
        assert_eq!(html.matches("No problem cards yet").count(), 1);
        assert_eq!(html.matches("No solution cards yet").count(), 1);
    }

    #[test]
    fn occupied_column_has_no_placeholder() {
        let board = board();
        let red = card(7, CardState::Red);
        let html = render_board_view(&board, &[&red]);
        assert!(!html.contains("No problem cards yet"));
        assert_eq!(html.matches("No solution cards yet").count(), 1);
    }

    #[test]
    fn empty_dashboard_renders_placeholder_not_grid() {
        let html = render_dashboard(&[]);
        assert!(html.contains("You don't have any boards yet"));
        assert!(!html.contains("class=\"board-grid\""));
    }

    #[test]
    fn dashboard_lists_boards() {
        let board = board();
        let html = render_dashboard(&[&board]);
        assert!(html.contains("class=\"board-grid\""));
        assert!(html.contains("Morning routine"));
        assert!(html.contains("Created: 2025-03-10"));
        assert!(!html.contains("You don't have any boards yet"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut board = board();
        board.name = "<script>alert(1)</script>".into();
        let html = render_board_view(&board, &[]);
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn card_form_prefills_on_edit() {
        let existing = card(9, CardState::Green);
        let html = render_card_form(2, Some(&existing));
        assert!(html.contains("Edit card"));
        assert!(html.contains("id=\"card-id\" value=\"9\""));
        assert!(html.contains("value=\"card 9\""));
        assert!(html.contains("<option value=\"GREEN\" selected>"));
    }
}
