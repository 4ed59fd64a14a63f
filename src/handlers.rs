use crate::auth;
use crate::errors::AppError;
use crate::models::{
    Account, AccountResponse, AppData, AuditEntry, Board, BoardRequest, BoardResponse, Card,
    CardRequest, CardResponse, CardState, LoginRequest, MutationResponse, RegisterRequest,
    TokenResponse, ToggleResponse, parse_reset_time,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::{Local, NaiveDateTime, NaiveTime};
use tracing::info;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ---- pages -------------------------------------------------------------

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn dashboard_page(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let boards: Vec<&Board> = data.boards.values().collect();
    Html(ui::render_dashboard(&boards))
}

pub async fn board_page(State(state): State<AppState>, Path(board_id): Path<u64>) -> Response {
    let data = state.data.lock().await;
    match data.boards.get(&board_id) {
        Some(board) => {
            let cards = data.cards_for_board(board_id);
            Html(ui::render_board_view(board, &cards)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Html(ui::render_not_found("Board"))).into_response(),
    }
}

pub async fn login_page() -> Html<String> {
    Html(ui::render_login())
}

pub async fn register_page() -> Html<String> {
    Html(ui::render_register())
}

pub async fn new_board_page() -> Html<String> {
    Html(ui::render_board_form())
}

pub async fn new_card_page(State(state): State<AppState>, Path(board_id): Path<u64>) -> Response {
    let data = state.data.lock().await;
    if data.boards.contains_key(&board_id) {
        Html(ui::render_card_form(board_id, None)).into_response()
    } else {
        (StatusCode::NOT_FOUND, Html(ui::render_not_found("Board"))).into_response()
    }
}

pub async fn edit_card_page(
    State(state): State<AppState>,
    Path((board_id, card_id)): Path<(u64, u64)>,
) -> Response {
    let data = state.data.lock().await;
    match get_card_checked(&data, board_id, card_id) {
        Ok(card) => Html(ui::render_card_form(board_id, Some(card))).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, Html(ui::render_not_found("Card"))).into_response(),
    }
}

// ---- accounts ----------------------------------------------------------

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    let email = payload.email.trim().to_lowercase();
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::bad_request("A valid email is required"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::bad_request(
            "Password must be at least 6 characters long",
        ));
    }
    if let Some(confirm) = &payload.confirm_password {
        if *confirm != payload.password {
            return Err(AppError::bad_request("Passwords do not match"));
        }
    }

    let mut data = state.data.lock().await;
    if data.account_by_email(&email).is_some() {
        return Err(AppError::bad_request("Email already registered"));
    }

    let id = data.allocate_id();
    let account = Account {
        id,
        name: name.to_string(),
        email: email.clone(),
        password_hash: auth::hash_password(&payload.password),
        created_at: now(),
    };
    data.accounts.insert(id, account);
    persist_data(&state.data_path, &data).await?;
    info!("registered account {id} ({email})");

    Ok(Json(AccountResponse {
        id,
        name: name.to_string(),
        email,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    let account_id = {
        let data = state.data.lock().await;
        data.account_by_email(&email)
            .filter(|a| a.password_hash == auth::hash_password(&payload.password))
            .map(|a| a.id)
    };
    let Some(account_id) = account_id else {
        return Err(AppError::unauthorized("Invalid email or password"));
    };

    let token = auth::generate_token();
    state
        .sessions
        .lock()
        .await
        .insert(token.clone(), account_id);
    info!("account {account_id} logged in");
    Ok(Json(TokenResponse { token }))
}

// ---- boards ------------------------------------------------------------

pub async fn list_boards(State(state): State<AppState>) -> Json<Vec<BoardResponse>> {
    let data = state.data.lock().await;
    Json(data.boards.values().map(BoardResponse::from_board).collect())
}

pub async fn create_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BoardRequest>,
) -> Result<Json<BoardResponse>, AppError> {
    let account_id = auth::require_account(&state, &headers).await?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Board name is required"));
    }

    let mut data = state.data.lock().await;
    let id = data.allocate_id();
    let timestamp = now();
    let board = Board {
        id,
        name: name.to_string(),
        description: payload
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        owner_id: account_id,
        created_at: timestamp,
        updated_at: timestamp,
    };
    let response = BoardResponse::from_board(&board);
    data.boards.insert(id, board);
    persist_data(&state.data_path, &data).await?;
    info!("account {account_id} created board {id}");

    Ok(Json(response))
}

// ---- cards -------------------------------------------------------------

fn get_card_checked(data: &AppData, board_id: u64, card_id: u64) -> Result<&Card, AppError> {
    if !data.boards.contains_key(&board_id) {
        return Err(AppError::not_found("Board not found"));
    }
    let card = data
        .cards
        .get(&card_id)
        .ok_or_else(|| AppError::not_found("Card not found"))?;
    if card.board_id != board_id {
        return Err(AppError::forbidden("Card does not belong to this board"));
    }
    Ok(card)
}

fn validate_card_request(payload: &CardRequest) -> Result<NaiveTime, AppError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("Card title is required"));
    }
    if title.chars().count() > 200 {
        return Err(AppError::bad_request(
            "Title must be between 1 and 200 characters",
        ));
    }
    if let Some(details) = &payload.details {
        if details.chars().count() > 5000 {
            return Err(AppError::bad_request("Details cannot exceed 5000 characters"));
        }
    }
    parse_reset_time(&payload.reset_time).ok_or_else(|| {
        AppError::bad_request("Please enter a valid time in 24-hour format (HH:mm)")
    })
}

pub async fn list_cards(
    State(state): State<AppState>,
    Path(board_id): Path<u64>,
) -> Result<Json<Vec<CardResponse>>, AppError> {
    let data = state.data.lock().await;
    if !data.boards.contains_key(&board_id) {
        return Err(AppError::not_found("Board not found"));
    }
    let cards = data
        .cards_for_board(board_id)
        .into_iter()
        .map(CardResponse::from_card)
        .collect();
    Ok(Json(cards))
}

pub async fn create_card(
    State(state): State<AppState>,
    Path(board_id): Path<u64>,
    headers: HeaderMap,
    Json(payload): Json<CardRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let account_id = auth::require_account(&state, &headers).await?;
    let reset_time = validate_card_request(&payload)?;

    let mut data = state.data.lock().await;
    if !data.boards.contains_key(&board_id) {
        return Err(AppError::not_found("Board not found"));
    }

    let id = data.allocate_id();
    let timestamp = now();
    let card = Card {
        id,
        board_id,
        title: payload.title.trim().to_string(),
        details: payload
            .details
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        position: payload.position.unwrap_or(0),
        // New cards always start as problems, whatever the form submitted.
        state: CardState::Red,
        reset_time,
        created_at: timestamp,
        updated_at: timestamp,
    };
    data.cards.insert(id, card);
    persist_data(&state.data_path, &data).await?;
    info!("account {account_id} created card {id} on board {board_id}");

    Ok(Json(MutationResponse {
        id,
        message: "Card created successfully".to_string(),
    }))
}

pub async fn update_card(
    State(state): State<AppState>,
    Path((board_id, card_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Json(payload): Json<CardRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let account_id = auth::require_account(&state, &headers).await?;
    let reset_time = validate_card_request(&payload)?;

    let mut data = state.data.lock().await;
    get_card_checked(&data, board_id, card_id)?;

    let timestamp = now();
    let state_change = {
        let card = data
            .cards
            .get_mut(&card_id)
            .ok_or_else(|| AppError::not_found("Card not found"))?;
        card.title = payload.title.trim().to_string();
        card.details = payload
            .details
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        card.reset_time = reset_time;
        if let Some(position) = payload.position {
            card.position = position;
        }
        card.updated_at = timestamp;

        // An explicit state change through the form is audited like a toggle.
        match payload.state {
            Some(new_state) if new_state != card.state => {
                let previous = card.state;
                card.state = new_state;
                Some((previous, new_state))
            }
            _ => None,
        }
    };
    if let Some((previous_state, new_state)) = state_change {
        data.audit_log.entry(card_id).or_default().push(AuditEntry {
            previous_state,
            new_state,
            changed_at: timestamp,
        });
    }
    persist_data(&state.data_path, &data).await?;
    info!("account {account_id} updated card {card_id} on board {board_id}");

    Ok(Json(MutationResponse {
        id: card_id,
        message: "Card updated successfully".to_string(),
    }))
}

pub async fn toggle_card(
    State(state): State<AppState>,
    Path((board_id, card_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<ToggleResponse>, AppError> {
    auth::require_account(&state, &headers).await?;

    // Per-card guard: a second toggle while one is being applied is
    // rejected rather than letting the responses race each other.
    {
        let mut in_flight = state.toggles_in_flight.lock().await;
        if !in_flight.insert(card_id) {
            return Err(AppError::conflict(
                "A toggle for this card is already in flight",
            ));
        }
    }
    let result = apply_toggle(&state, board_id, card_id).await;
    state.toggles_in_flight.lock().await.remove(&card_id);
    result.map(Json)
}

async fn apply_toggle(
    state: &AppState,
    board_id: u64,
    card_id: u64,
) -> Result<ToggleResponse, AppError> {
    let mut data = state.data.lock().await;
    get_card_checked(&data, board_id, card_id)?;

    let timestamp = now();
    let (previous_state, new_state) = {
        let card = data
            .cards
            .get_mut(&card_id)
            .ok_or_else(|| AppError::not_found("Card not found"))?;
        let previous = card.state;
        card.state = previous.toggled();
        card.updated_at = timestamp;
        (previous, card.state)
    };
    data.audit_log.entry(card_id).or_default().push(AuditEntry {
        previous_state,
        new_state,
        changed_at: timestamp,
    });
    persist_data(&state.data_path, &data).await?;
    info!(
        "card {card_id} toggled {} -> {}",
        previous_state.as_str(),
        new_state.as_str()
    );

    Ok(ToggleResponse {
        id: card_id,
        state: new_state,
    })
}

pub async fn card_audit(
    State(state): State<AppState>,
    Path((board_id, card_id)): Path<(u64, u64)>,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    let data = state.data.lock().await;
    get_card_checked(&data, board_id, card_id)?;
    Ok(Json(data.audit_for_card(card_id)))
}
